pub mod founders;
pub mod genesis;
pub mod params;
pub mod registry;
pub mod script;
pub mod types;
pub mod upgrades;
