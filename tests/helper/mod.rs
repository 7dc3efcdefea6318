#![allow(dead_code)]

pub mod provider;

pub use provider::{FixtureProvider, write_catalogue, write_module};
