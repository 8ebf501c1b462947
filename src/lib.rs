pub mod core;
pub mod gateway;
pub mod loans;
pub mod manager;
pub mod persistence;
pub mod reservations;
pub mod resources;
pub mod users;
pub mod utils;
