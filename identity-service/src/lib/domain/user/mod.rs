pub mod errors;
pub mod login;
pub mod models;
pub mod ports;
pub mod service;
