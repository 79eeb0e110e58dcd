pub mod health;
pub mod hosts;
pub mod inventory;
pub mod statistics;
