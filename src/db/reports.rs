//! Fixed aggregate reports over languages and their word forms.
//!
//! A word form counts toward a language through
//! `LexicalEntry_Definition -> Represents -> OrthographicForm`, joined on
//! `(LEID, Ethnic_group)` and then `Spelling`.

use crate::db::models::{LanguageAvgLength, LanguageMaxLength, LanguageName};
use crate::error::LexiconError;
use sqlx::SqlitePool;

/// Longest word form per language.
pub async fn max_word_length(pool: &SqlitePool) -> Result<Vec<LanguageMaxLength>, LexiconError> {
    let rows = sqlx::query_as::<_, LanguageMaxLength>(
        r#"
        SELECT ld.Language_name AS language, MAX(o.Num_characters) AS max_length
        FROM LexicalEntry_Definition ld
        JOIN Represents r USING (LEID, Ethnic_group)
        JOIN OrthographicForm o USING (Spelling)
        GROUP BY ld.Language_name
        ORDER BY ld.Language_name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Average word form length for languages with more than one word.
pub async fn average_word_length(
    pool: &SqlitePool,
) -> Result<Vec<LanguageAvgLength>, LexiconError> {
    let rows = sqlx::query_as::<_, LanguageAvgLength>(
        r#"
        SELECT ld.Language_name AS language, AVG(o.Num_characters) AS average_length
        FROM LexicalEntry_Definition ld
        JOIN Represents r USING (LEID, Ethnic_group)
        JOIN OrthographicForm o USING (Spelling)
        GROUP BY ld.Language_name
        HAVING COUNT(*) > 1
        ORDER BY ld.Language_name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Languages whose average word form is longer than the dictionary-wide average.
pub async fn above_average_languages(
    pool: &SqlitePool,
) -> Result<Vec<LanguageName>, LexiconError> {
    let rows = sqlx::query_as::<_, LanguageName>(
        r#"
        SELECT ld.Language_name AS language
        FROM LexicalEntry_Definition ld
        JOIN Represents r USING (LEID, Ethnic_group)
        JOIN OrthographicForm o USING (Spelling)
        GROUP BY ld.Language_name
        HAVING AVG(o.Num_characters) > (SELECT AVG(Num_characters) FROM OrthographicForm)
        ORDER BY ld.Language_name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Languages with at least one definition in every known lexical category.
pub async fn full_category_coverage(
    pool: &SqlitePool,
) -> Result<Vec<LanguageName>, LexiconError> {
    let rows = sqlx::query_as::<_, LanguageName>(
        r#"
        SELECT DISTINCT ld.Language_name AS language
        FROM LexicalEntry_Definition ld
        WHERE NOT EXISTS (
            SELECT ll.Lexical_category
            FROM LexicalEntry_LexicalCategory ll
            EXCEPT
            SELECT ll2.Lexical_category
            FROM LexicalEntry_Definition ld2
            JOIN LexicalEntry_LexicalCategory ll2 ON ll2.Definition = ld2.Definition
            WHERE ld2.Language_name = ld.Language_name
        )
        ORDER BY ld.Language_name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
