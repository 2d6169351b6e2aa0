pub mod config;
pub mod lab;
pub mod snapshot;
pub mod types;
