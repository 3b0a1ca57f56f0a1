use crate::db::{Language, LanguageAttribute, LanguageProjection, LanguageUpdate, ProjectionRow};
use crate::error::LexiconError;
use crate::server::router::LexiconState;
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
use lexicon_schema::{Ack, DataBody, LanguageContextRequest, TableBody, UpdateLanguageRequest};
use tracing::{info, warn};

pub fn router() -> Router<LexiconState> {
    Router::new()
        .route("/language", get(list_languages))
        .route("/update-language-context", post(update_language_context))
        .route("/language-context", post(language_context))
}

/// GET /language
///
/// A read failure is logged and answered with an empty table.
async fn list_languages(State(state): State<LexiconState>) -> Json<TableBody<Language>> {
    let rows = state.db.list_languages().await.unwrap_or_else(|e| {
        warn!(error = %e, "language listing failed, returning empty table");
        Vec::new()
    });
    Json(TableBody::new(rows))
}

/// POST /update-language-context
async fn update_language_context(
    State(state): State<LexiconState>,
    payload: Result<Json<UpdateLanguageRequest>, JsonRejection>,
) -> Result<Json<Ack>, LexiconError> {
    let Json(req) = payload?;
    let update = LanguageUpdate {
        key: req.key.trim().to_string(),
        attribute: req.update_attribute.parse::<LanguageAttribute>()?,
        value: req.new_data.trim().to_string(),
    };

    state.db.update_language(update.clone()).await?;
    info!(key = %update.key, attribute = ?update.attribute, "language updated");
    Ok(Json(Ack::ok()))
}

/// POST /language-context
async fn language_context(
    State(state): State<LexiconState>,
    payload: Result<Json<LanguageContextRequest>, JsonRejection>,
) -> Result<Json<DataBody<ProjectionRow>>, LexiconError> {
    let Json(req) = payload?;
    let projection = req.attribute.parse::<LanguageProjection>()?;

    let rows = state.db.project_languages(projection).await?;
    Ok(Json(DataBody::ok(rows)))
}
