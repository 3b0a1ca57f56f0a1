//! Single-statement dictionary operations.
//!
//! Every function borrows the pool and checks out one connection for the
//! duration of its statement; the connection goes back to the pool on drop,
//! whether the statement succeeded or not.

use crate::db::models::{Language, WordForm};
use crate::error::LexiconError;
use sqlx::{Connection, SqlitePool};
use tracing::{debug, warn};

/// Checks out a connection and pings it.
pub async fn check_connection(pool: &SqlitePool) -> bool {
    let mut conn = match pool.acquire().await {
        Ok(conn) => conn,
        Err(e) => {
            warn!(error = %e, "connection check: acquire failed");
            return false;
        }
    };
    match conn.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "connection check: ping failed");
            false
        }
    }
}

pub async fn list_words(pool: &SqlitePool) -> Result<Vec<WordForm>, LexiconError> {
    let rows = sqlx::query_as::<_, WordForm>(
        r#"
        SELECT Spelling AS spelling, Num_characters AS num_characters
        FROM OrthographicForm
        ORDER BY Spelling
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn list_languages(pool: &SqlitePool) -> Result<Vec<Language>, LexiconError> {
    let rows = sqlx::query_as::<_, Language>(
        r#"
        SELECT Name AS name, Word_order AS word_order, Ancestor AS ancestor
        FROM Language_ancestor
        ORDER BY Name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// First definition (lowest LEID) represented by `word`, if any.
pub async fn find_definition(
    pool: &SqlitePool,
    word: &str,
) -> Result<Option<String>, LexiconError> {
    let definition = sqlx::query_scalar::<_, String>(
        r#"
        SELECT led.Definition
        FROM OrthographicForm o
        JOIN Represents r ON r.Spelling = o.Spelling
        JOIN LexicalEntry_Definition led ON led.LEID = r.LEID
        WHERE o.Spelling = ?
        ORDER BY led.LEID
        LIMIT 1
        "#,
    )
    .bind(word)
    .fetch_optional(pool)
    .await?;

    Ok(definition)
}

/// Deletes the word form spelled exactly `word`.
///
/// `Represents` rows pointing at it go with it; the definitions stay.
pub async fn delete_word(pool: &SqlitePool, word: &str) -> Result<(), LexiconError> {
    let res = sqlx::query("DELETE FROM OrthographicForm WHERE Spelling = ?")
        .bind(word)
        .execute(pool)
        .await?;

    let affected = res.rows_affected();
    debug!(word, affected, "word form delete applied");

    if affected == 0 {
        return Err(LexiconError::NotFound(format!("word form '{word}'")));
    }
    Ok(())
}
