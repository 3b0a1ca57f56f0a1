//! Seed script loading and execution.

use crate::db::schema::{SQLITE_DROP, SQLITE_INIT};
use crate::error::LexiconError;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::{debug, info, warn};

/// Sample rows shipped with the binary. Only data; see [`bundled_script`].
pub const SAMPLE_DICTIONARY: &str = include_str!("../../sql/sample_dictionary.sql");

const STATEMENT_PREVIEW_CHARS: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    /// Statements attempted.
    pub statements: usize,
    /// Statements that failed and were skipped.
    pub failed: usize,
}

/// Drops and recreates every table, then loads the sample rows.
pub fn bundled_script() -> String {
    format!("{SQLITE_DROP}\n{SQLITE_INIT}\n{SAMPLE_DICTIONARY}")
}

/// Splits a script into statements on `;`.
///
/// `/* ... */` and `-- ...` comments are dropped. Semicolons and comment
/// markers inside `'literals'` and `"identifiers"` are kept. Compound
/// statements (`CREATE TRIGGER ... BEGIN ...; END`) are not recognised and get
/// split at their inner semicolons.
pub fn split_statements(script: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut chars = script.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            current.push(c);
            if c == q {
                // a doubled quote is escaped, not the end of the token
                if chars.peek() == Some(&q) {
                    current.push(q);
                    chars.next();
                } else {
                    quote = None;
                }
            }
            continue;
        }

        match c {
            '\'' | '"' => {
                quote = Some(c);
                current.push(c);
            }
            '-' if chars.peek() == Some(&'-') => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        current.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
                current.push(' ');
            }
            ';' => push_statement(&mut statements, &mut current),
            _ => current.push(c),
        }
    }
    push_statement(&mut statements, &mut current);

    statements
}

fn push_statement(statements: &mut Vec<String>, current: &mut String) {
    let stmt = current.trim();
    if !stmt.is_empty() {
        statements.push(stmt.to_string());
    }
    current.clear();
}

/// Reads the configured script, or the bundled sample when unset.
pub async fn load_script(path: Option<&Path>) -> Result<String, LexiconError> {
    match path {
        Some(path) => {
            let script = tokio::fs::read_to_string(path).await?;
            debug!(path = %path.display(), bytes = script.len(), "seed script loaded");
            Ok(script)
        }
        None => Ok(bundled_script()),
    }
}

/// Runs every statement of `script` on one connection. A failing statement is
/// logged and skipped.
pub async fn run_script(pool: &SqlitePool, script: &str) -> Result<SeedReport, LexiconError> {
    let statements = split_statements(script);
    let mut conn = pool.acquire().await?;

    let mut failed = 0;
    for stmt in &statements {
        if let Err(e) = sqlx::query(stmt).execute(&mut *conn).await {
            failed += 1;
            let preview: String = stmt.chars().take(STATEMENT_PREVIEW_CHARS).collect();
            warn!(statement = %preview, error = %e, "seed statement failed, continuing");
        }
    }

    let report = SeedReport {
        statements: statements.len(),
        failed,
    };
    info!(
        statements = report.statements,
        failed = report.failed,
        "dictionary seed finished"
    );
    Ok(report)
}
