pub mod analysis;
pub mod app;
pub mod catalogue;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod snapshot;
