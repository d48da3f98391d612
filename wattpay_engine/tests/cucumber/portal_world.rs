use std::collections::HashMap;

use chrono::NaiveDate;
use cucumber::World;
use log::*;
use wattpay_engine::{
    checkout_objects::CheckoutReceipt,
    db_types::Bill,
    test_utils::prepare_env::{create_database, random_db_path, run_migrations},
    CheckoutError,
    OrderIssuerError,
    ReminderResult,
    SqliteDatabase,
};

#[derive(Default, Debug, World)]
pub struct PortalWorld {
    pub system: Option<PortalSystem>,
    /// The date the scenario treats as "today"
    pub today: Option<NaiveDate>,
    /// Bills seeded by the scenario, by bill number
    pub bills: HashMap<String, Bill>,
    pub issuer_failure: Option<OrderIssuerError>,
    pub reminder_results: Vec<ReminderResult>,
    pub checkout_result: Option<Result<CheckoutReceipt, CheckoutError>>,
}

#[derive(Debug)]
pub struct PortalSystem {
    pub db_path: String,
    pub db: SqliteDatabase,
}

impl PortalWorld {
    pub fn db(&self) -> &SqliteDatabase {
        &self.system.as_ref().expect("Database not initialised").db
    }

    pub fn today(&self) -> NaiveDate {
        self.today.expect("The scenario has not set today's date")
    }

    pub fn bill(&self, bill_number: &str) -> &Bill {
        self.bills.get(bill_number).unwrap_or_else(|| panic!("Bill {bill_number} was not seeded"))
    }
}

impl PortalSystem {
    pub async fn new() -> Self {
        let url = prepare_test_env().await;
        let db = SqliteDatabase::new_with_url(&url, 1).await.expect("Error creating connection to database");
        debug!("Created database: {url}");
        Self { db_path: url, db }
    }
}

pub async fn prepare_test_env() -> String {
    let path = random_db_path();
    create_database(&path).await;
    run_migrations(&path).await;
    path
}
