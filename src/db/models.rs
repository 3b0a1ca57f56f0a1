//! Row types returned by the data-access layer.
//!
//! Rows serialize as positional JSON arrays (`["cat", 3]`), the shape the
//! browser frontend indexes into.

use serde::Serialize;
use sqlx::FromRow;

/// One `OrthographicForm` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(into = "(String, i64)")]
pub struct WordForm {
    pub spelling: String,
    pub num_characters: i64,
}

impl From<WordForm> for (String, i64) {
    fn from(row: WordForm) -> Self {
        (row.spelling, row.num_characters)
    }
}

/// One `Language_ancestor` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(into = "(String, Option<String>, Option<String>)")]
pub struct Language {
    pub name: String,
    pub word_order: Option<String>,
    /// Family the language belongs to.
    pub ancestor: Option<String>,
}

impl From<Language> for (String, Option<String>, Option<String>) {
    fn from(row: Language) -> Self {
        (row.name, row.word_order, row.ancestor)
    }
}

/// A spelling matched by a word search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(into = "(String,)")]
pub struct WordSpelling {
    pub spelling: String,
}

impl From<WordSpelling> for (String,) {
    fn from(row: WordSpelling) -> Self {
        (row.spelling,)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(into = "(String, i64)")]
pub struct LanguageMaxLength {
    pub language: String,
    pub max_length: i64,
}

impl From<LanguageMaxLength> for (String, i64) {
    fn from(row: LanguageMaxLength) -> Self {
        (row.language, row.max_length)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(into = "(String, f64)")]
pub struct LanguageAvgLength {
    pub language: String,
    pub average_length: f64,
}

impl From<LanguageAvgLength> for (String, f64) {
    fn from(row: LanguageAvgLength) -> Self {
        (row.language, row.average_length)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(into = "(String,)")]
pub struct LanguageName {
    pub language: String,
}

impl From<LanguageName> for (String,) {
    fn from(row: LanguageName) -> Self {
        (row.language,)
    }
}

/// A `Language_ancestor` projection row; width depends on the projection.
pub type ProjectionRow = Vec<Option<String>>;
