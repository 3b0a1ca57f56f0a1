//! Word search: a validated chain of predicates over `OrthographicForm`.

use crate::db::models::WordSpelling;
use crate::error::LexiconError;
use lexicon_schema::SearchQuery;
use serde::Serialize;
use sqlx::SqlitePool;

// Largest f64 that converts to i64 without saturating.
const MAX_LENGTH: f64 = 9_007_199_254_740_992.0;

/// Searchable `OrthographicForm` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordAttribute {
    Spelling,
    NumCharacters,
}

impl WordAttribute {
    fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("Spelling") {
            Some(Self::Spelling)
        } else if name.eq_ignore_ascii_case("Num_characters") {
            Some(Self::NumCharacters)
        } else {
            None
        }
    }
}

/// Boolean connective joining two predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Connective {
    And,
    Or,
}

impl Connective {
    fn parse(op: &str) -> Option<Self> {
        let op = op.trim();
        if op.eq_ignore_ascii_case("AND") {
            Some(Self::And)
        } else if op.eq_ignore_ascii_case("OR") {
            Some(Self::Or)
        } else {
            None
        }
    }

    fn sql(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Predicate {
    /// Substring match on `Spelling`.
    SpellingContains(String),
    /// Exact match on `Num_characters`.
    LengthEquals(i64),
}

impl Predicate {
    fn parse(query: &SearchQuery) -> Result<Self, LexiconError> {
        let attribute = WordAttribute::parse(&query.attribute).ok_or_else(|| {
            LexiconError::InvalidRequest(format!(
                "unknown search attribute '{}'",
                query.attribute
            ))
        })?;

        match attribute {
            WordAttribute::Spelling => Ok(Self::SpellingContains(query.value.clone())),
            WordAttribute::NumCharacters => parse_length(&query.value).map(Self::LengthEquals),
        }
    }

    fn sql(&self) -> &'static str {
        match self {
            Self::SpellingContains(_) => r"Spelling LIKE ? ESCAPE '\'",
            Self::LengthEquals(_) => "Num_characters = ?",
        }
    }
}

/// Predicates evaluated left to right with SQL precedence (`AND` binds
/// tighter than `OR`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordFilter {
    first: Predicate,
    rest: Vec<(Connective, Predicate)>,
}

impl WordFilter {
    /// Validates raw search rows. The `operation` of row `i` joins it to row
    /// `i + 1`; the last row's operation is ignored.
    pub fn from_queries(queries: &[SearchQuery]) -> Result<Self, LexiconError> {
        let (head, tail) = queries.split_first().ok_or_else(|| {
            LexiconError::InvalidRequest("at least one search query is required".to_string())
        })?;

        let first = Predicate::parse(head)?;
        let mut rest = Vec::with_capacity(tail.len());
        let mut prev = head;
        for query in tail {
            let op = prev.operation.as_deref().unwrap_or_default();
            let connective = Connective::parse(op).ok_or_else(|| {
                LexiconError::InvalidRequest(format!("unsupported search operation '{op}'"))
            })?;
            rest.push((connective, Predicate::parse(query)?));
            prev = query;
        }

        Ok(Self { first, rest })
    }

    fn predicates(&self) -> impl Iterator<Item = &Predicate> {
        std::iter::once(&self.first).chain(self.rest.iter().map(|(_, p)| p))
    }

    /// Statement text; every value is a bind parameter.
    pub fn to_sql(&self) -> String {
        let mut sql = String::from("SELECT Spelling AS spelling FROM OrthographicForm WHERE ");
        sql.push_str(self.first.sql());
        for (connective, predicate) in &self.rest {
            sql.push(' ');
            sql.push_str(connective.sql());
            sql.push(' ');
            sql.push_str(predicate.sql());
        }
        sql.push_str(" ORDER BY Spelling");
        sql
    }
}

/// Whole numbers in any JSON spelling (`3`, `3.0`, `1e1`) of at least 1.
fn parse_length(value: &str) -> Result<i64, LexiconError> {
    let n: f64 = value.trim().parse().map_err(|_| {
        LexiconError::InvalidRequest(format!("Num_characters expects a number, got '{value}'"))
    })?;
    if !n.is_finite() || n.fract() != 0.0 {
        return Err(LexiconError::InvalidRequest(format!(
            "Num_characters expects a whole number, got '{value}'"
        )));
    }
    if n < 1.0 || n > MAX_LENGTH {
        return Err(LexiconError::InvalidRequest(format!(
            "Num_characters out of range: '{value}'"
        )));
    }
    #[allow(clippy::cast_possible_truncation)]
    let n = n as i64;
    Ok(n)
}

fn like_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub async fn search_words(
    pool: &SqlitePool,
    filter: &WordFilter,
) -> Result<Vec<WordSpelling>, LexiconError> {
    let sql = filter.to_sql();
    let mut query = sqlx::query_as::<_, WordSpelling>(&sql);
    for predicate in filter.predicates() {
        query = match predicate {
            Predicate::SpellingContains(value) => query.bind(like_pattern(value)),
            Predicate::LengthEquals(n) => query.bind(*n),
        };
    }

    let rows = query.fetch_all(pool).await?;
    Ok(rows)
}
