pub mod admin;
pub mod callers;
pub mod lifecycle;
pub mod migration;
pub mod points;
pub mod registry;
pub mod reward;

pub use admin::EconomyParams;
