pub mod config;
pub mod error;
pub mod filters;
pub mod output;
pub mod records;
pub mod reports;
pub mod seed;
pub mod server;
pub mod store;
