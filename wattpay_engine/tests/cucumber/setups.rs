use chrono::NaiveDate;
use cucumber::given;

use crate::cucumber::{portal_world::PortalSystem, PortalWorld};

#[given("a fresh install")]
async fn fresh_database(world: &mut PortalWorld) {
    let system = PortalSystem::new().await;
    world.system = Some(system);
}

#[given(expr = "today is {word}")]
async fn set_today(world: &mut PortalWorld, date: String) {
    let today = NaiveDate::parse_from_str(&date, "%Y-%m-%d").expect("Dates must be given as YYYY-MM-DD");
    world.today = Some(today);
}
