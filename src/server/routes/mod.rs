//! HTTP routes, one module per area of the dictionary.

pub mod dictionary;
pub mod language;
pub mod reports;
