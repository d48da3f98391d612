mod portal_world;
mod setups;
mod steps;

pub use portal_world::PortalWorld;
