//! Database module: the dictionary's data-access layer.
//!
//! Layout:
//! - `actor.rs`: `DbActor`, owner of the SQLite pool, and its handle
//! - `models.rs`: Rust structs mirroring result rows
//! - `schema.rs`: SQL DDL applied at startup
//! - `ops.rs`, `search.rs`, `context.rs`, `language.rs`, `reports.rs`, `seed.rs`: SQL per operation

pub mod actor;
pub mod context;
pub mod language;
pub mod models;
pub mod ops;
pub mod reports;
pub mod schema;
pub mod search;
pub mod seed;

pub use actor::{DbActorHandle, spawn};
pub use context::NewContext;
pub use language::{LanguageAttribute, LanguageProjection, LanguageUpdate};
pub use models::{
    Language, LanguageAvgLength, LanguageMaxLength, LanguageName, ProjectionRow, WordForm,
    WordSpelling,
};
pub use schema::SQLITE_INIT;
pub use search::WordFilter;
pub use seed::SeedReport;
