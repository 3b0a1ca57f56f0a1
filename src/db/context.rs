//! Add-context: one new sense with its word form, dialect, category and
//! example sentence, written in foreign-key order inside one transaction.

use crate::error::LexiconError;
use lexicon_schema::AddContextRequest;
use sqlx::{SqliteConnection, SqlitePool, sqlite::SqliteQueryResult};
use tracing::debug;

/// Validated add-context input; all fields are trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContext {
    pub word: String,
    pub sentence: String,
    pub sentence_source: String,
    pub definition: String,
    pub lexical_category: String,
    pub region: String,
    pub ethnic_group: String,
    pub language_family: String,
    pub word_order: String,
    pub language: String,
    /// Ancestor of the language family.
    pub ancestor: String,
}

impl TryFrom<AddContextRequest> for NewContext {
    type Error = LexiconError;

    fn try_from(req: AddContextRequest) -> Result<Self, Self::Error> {
        let ctx = Self {
            word: req.word.trim().to_string(),
            sentence: req.sentence.trim().to_string(),
            sentence_source: req.sentence_source.trim().to_string(),
            definition: req.definition.trim().to_string(),
            lexical_category: req.lexical_category.trim().to_string(),
            region: req.region.trim().to_string(),
            ethnic_group: req.ethnic_groups.trim().to_string(),
            language_family: req.language_family.trim().to_string(),
            word_order: req.word_order.trim().to_string(),
            language: req.language.trim().to_string(),
            ancestor: req.ancestor.trim().to_string(),
        };

        for (field, value) in [
            ("word", &ctx.word),
            ("definition", &ctx.definition),
            ("language", &ctx.language),
            ("languageFamily", &ctx.language_family),
        ] {
            if value.is_empty() {
                return Err(LexiconError::InvalidRequest(format!(
                    "{field} must not be empty"
                )));
            }
        }
        Ok(ctx)
    }
}

/// Inserts every row of `ctx` and returns the allocated LEID.
///
/// Family and language rows are insert-or-ignore; any other failure rolls
/// the whole call back.
pub async fn add_context(pool: &SqlitePool, ctx: &NewContext) -> Result<i64, LexiconError> {
    let mut tx = pool.begin().await?;

    let res = sqlx::query(
        r#"
        INSERT INTO Language_family (Family_name, Ancestor)
        VALUES (?, ?)
        ON CONFLICT(Family_name) DO NOTHING
        "#,
    )
    .bind(&ctx.language_family)
    .bind(&ctx.ancestor)
    .execute(&mut *tx)
    .await?;
    log_ignored(&res, "Language_family", &ctx.language_family);

    let res = sqlx::query(
        r#"
        INSERT INTO Language_ancestor (Name, Word_order, Ancestor)
        VALUES (?, ?, ?)
        ON CONFLICT(Name) DO NOTHING
        "#,
    )
    .bind(&ctx.language)
    .bind(&ctx.word_order)
    .bind(&ctx.language_family)
    .execute(&mut *tx)
    .await?;
    log_ignored(&res, "Language_ancestor", &ctx.language);

    let leid = insert_sense(&mut *tx, ctx).await?;
    tx.commit().await?;

    debug!(word = %ctx.word, leid, language = %ctx.language, "context added");
    Ok(leid)
}

async fn insert_sense(conn: &mut SqliteConnection, ctx: &NewContext) -> Result<i64, LexiconError> {
    sqlx::query("INSERT INTO Dialect_Uses (Region, Ethnic_group, Language) VALUES (?, ?, ?)")
        .bind(&ctx.region)
        .bind(&ctx.ethnic_group)
        .bind(&ctx.language)
        .execute(&mut *conn)
        .await?;

    sqlx::query(
        "INSERT INTO LexicalEntry_LexicalCategory (Lexical_category, Definition) VALUES (?, ?)",
    )
    .bind(&ctx.lexical_category)
    .bind(&ctx.definition)
    .execute(&mut *conn)
    .await?;

    let leid: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO LexicalEntry_Definition (Definition, Region, Ethnic_group, Language_name)
        VALUES (?, ?, ?, ?)
        RETURNING LEID
        "#,
    )
    .bind(&ctx.definition)
    .bind(&ctx.region)
    .bind(&ctx.ethnic_group)
    .bind(&ctx.language)
    .fetch_one(&mut *conn)
    .await?;

    let num_characters = i64::try_from(ctx.word.chars().count())
        .map_err(|_| LexiconError::InvalidRequest("word is too long".to_string()))?;
    sqlx::query("INSERT INTO OrthographicForm (Spelling, Num_characters) VALUES (?, ?)")
        .bind(&ctx.word)
        .bind(num_characters)
        .execute(&mut *conn)
        .await?;

    sqlx::query("INSERT INTO Represents (LEID, Spelling, Ethnic_group) VALUES (?, ?, ?)")
        .bind(leid)
        .bind(&ctx.word)
        .bind(&ctx.ethnic_group)
        .execute(&mut *conn)
        .await?;

    sqlx::query("INSERT INTO ExampleSentence_Has (Sentence, Source, LEID) VALUES (?, ?, ?)")
        .bind(&ctx.sentence)
        .bind(&ctx.sentence_source)
        .bind(leid)
        .execute(&mut *conn)
        .await?;

    Ok(leid)
}

fn log_ignored(res: &SqliteQueryResult, table: &'static str, key: &str) {
    if res.rows_affected() == 0 {
        debug!(table, key, "row already present, insert ignored");
    }
}
