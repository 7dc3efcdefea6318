//! Catalogue layer
//! - types.rs: ModuleEntry, Repository, Catalogue and row errors
//! - parser.rs: turns (module, repository URL) rows into repositories

pub mod parser;
pub mod types;

pub use parser::{extract_repository_id, parse_rows, read_catalogue};
pub use types::{Catalogue, CatalogueRowError, ModuleEntry, Repository, RowErrorKind};
