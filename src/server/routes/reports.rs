//! Fixed report endpoints. Paths match the buttons of the browser frontend.

use crate::db::{LanguageAvgLength, LanguageMaxLength, LanguageName};
use crate::error::LexiconError;
use crate::server::router::LexiconState;
use axum::{Json, Router, extract::State, routing::get};
use lexicon_schema::DataBody;

pub fn router() -> Router<LexiconState> {
    Router::new()
        .route("/count-demotable", get(max_word_length))
        .route("/count-demotable1", get(average_word_length))
        .route("/count-demotable2", get(above_average_languages))
        .route("/division-table", get(full_category_coverage))
}

async fn max_word_length(
    State(state): State<LexiconState>,
) -> Result<Json<DataBody<LanguageMaxLength>>, LexiconError> {
    Ok(Json(DataBody::ok(state.db.max_word_length().await?)))
}

async fn average_word_length(
    State(state): State<LexiconState>,
) -> Result<Json<DataBody<LanguageAvgLength>>, LexiconError> {
    Ok(Json(DataBody::ok(state.db.average_word_length().await?)))
}

async fn above_average_languages(
    State(state): State<LexiconState>,
) -> Result<Json<DataBody<LanguageName>>, LexiconError> {
    Ok(Json(DataBody::ok(state.db.above_average_languages().await?)))
}

/// Languages covering every lexical category.
async fn full_category_coverage(
    State(state): State<LexiconState>,
) -> Result<Json<DataBody<LanguageName>>, LexiconError> {
    Ok(Json(DataBody::ok(state.db.full_category_coverage().await?)))
}
