pub mod envelope;
pub mod json_store;
pub mod service;
