//! Language updates and projections. Column names come from closed enums,
//! so caller input never reaches statement text.

use crate::db::models::ProjectionRow;
use crate::error::LexiconError;
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use tracing::debug;

/// Updatable `Language_ancestor` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageAttribute {
    WordOrder,
    Ancestor,
}

impl FromStr for LanguageAttribute {
    type Err = LexiconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("Word_order") {
            Ok(Self::WordOrder)
        } else if s.eq_ignore_ascii_case("Ancestor") {
            Ok(Self::Ancestor)
        } else {
            Err(LexiconError::InvalidRequest(format!(
                "language attribute '{s}' cannot be updated"
            )))
        }
    }
}

impl LanguageAttribute {
    fn update_sql(self) -> &'static str {
        match self {
            Self::WordOrder => "UPDATE Language_ancestor SET Word_order = ? WHERE Name = ?",
            Self::Ancestor => "UPDATE Language_ancestor SET Ancestor = ? WHERE Name = ?",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageUpdate {
    /// `Name` of the row to update.
    pub key: String,
    pub attribute: LanguageAttribute,
    pub value: String,
}

/// Sets one column of the language named `update.key`.
///
/// Writing the value a row already holds still counts as success: SQLite
/// reports matched rows, not changed ones.
pub async fn update_language(pool: &SqlitePool, update: &LanguageUpdate) -> Result<(), LexiconError> {
    let res = sqlx::query(update.attribute.update_sql())
        .bind(&update.value)
        .bind(&update.key)
        .execute(pool)
        .await?;

    let affected = res.rows_affected();
    debug!(
        key = %update.key,
        attribute = ?update.attribute,
        affected,
        "language update applied"
    );

    if affected == 0 {
        return Err(LexiconError::NotFound(format!("language '{}'", update.key)));
    }
    Ok(())
}

/// Column sets the language browser can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageProjection {
    Name,
    DistinctAncestor,
    DistinctWordOrder,
    DistinctWordOrderAncestor,
    NameWordOrder,
    NameAncestor,
    All,
}

impl FromStr for LanguageProjection {
    type Err = LexiconError;

    /// Accepts the column-list spellings the frontend sends, e.g.
    /// `DISTINCT Word_order, Ancestor`. Case and spacing are not significant.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .split(',')
            .map(|part| part.split_whitespace().collect::<Vec<_>>().join(" "))
            .collect::<Vec<_>>()
            .join(", ")
            .to_ascii_lowercase();

        match normalized.as_str() {
            "name" => Ok(Self::Name),
            "distinct ancestor" => Ok(Self::DistinctAncestor),
            "distinct word_order" => Ok(Self::DistinctWordOrder),
            "distinct word_order, ancestor" => Ok(Self::DistinctWordOrderAncestor),
            "name, word_order" => Ok(Self::NameWordOrder),
            "name, ancestor" => Ok(Self::NameAncestor),
            "name, word_order, ancestor" | "*" => Ok(Self::All),
            _ => Err(LexiconError::InvalidRequest(format!(
                "unsupported language projection '{}'",
                s.trim()
            ))),
        }
    }
}

impl LanguageProjection {
    fn sql(self) -> &'static str {
        match self {
            Self::Name => "SELECT Name FROM Language_ancestor ORDER BY Name",
            Self::DistinctAncestor => {
                "SELECT DISTINCT Ancestor FROM Language_ancestor ORDER BY Ancestor"
            }
            Self::DistinctWordOrder => {
                "SELECT DISTINCT Word_order FROM Language_ancestor ORDER BY Word_order"
            }
            Self::DistinctWordOrderAncestor => {
                "SELECT DISTINCT Word_order, Ancestor FROM Language_ancestor ORDER BY Word_order, Ancestor"
            }
            Self::NameWordOrder => "SELECT Name, Word_order FROM Language_ancestor ORDER BY Name",
            Self::NameAncestor => "SELECT Name, Ancestor FROM Language_ancestor ORDER BY Name",
            Self::All => "SELECT Name, Word_order, Ancestor FROM Language_ancestor ORDER BY Name",
        }
    }

    /// Number of columns in each projected row.
    pub fn width(self) -> usize {
        match self {
            Self::Name | Self::DistinctAncestor | Self::DistinctWordOrder => 1,
            Self::DistinctWordOrderAncestor | Self::NameWordOrder | Self::NameAncestor => 2,
            Self::All => 3,
        }
    }
}

pub async fn project_languages(
    pool: &SqlitePool,
    projection: LanguageProjection,
) -> Result<Vec<ProjectionRow>, LexiconError> {
    let rows = sqlx::query(projection.sql()).fetch_all(pool).await?;

    let width = projection.width();
    rows.iter()
        .map(|row| {
            (0..width)
                .map(|i| row.try_get::<Option<String>, _>(i).map_err(LexiconError::from))
                .collect::<Result<ProjectionRow, _>>()
        })
        .collect()
}
