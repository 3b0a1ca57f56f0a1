use crate::db::{NewContext, WordFilter, WordForm, WordSpelling};
use crate::error::LexiconError;
use crate::server::router::LexiconState;
use crate::utils::logging::with_pretty_json_debug;
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
use lexicon_schema::{
    Ack, AddContextRequest, DefinitionBody, SearchWordsRequest, SeedBody, TableBody, WordRequest,
    WordsBody,
};
use tracing::{debug, info, warn};

pub fn router() -> Router<LexiconState> {
    Router::new()
        .route("/check-db-connection", get(check_db_connection))
        .route("/dictionary", get(list_words))
        .route("/initiate-dictionary", post(initiate_dictionary))
        .route("/find-definition", post(find_definition))
        .route("/search-words", post(search_words))
        .route("/delete-word", post(delete_word))
        .route("/add-context", post(add_context))
}

/// GET /check-db-connection
///
/// Plain-text status for the page header.
async fn check_db_connection(State(state): State<LexiconState>) -> &'static str {
    if state.db.check_connection().await {
        "connected"
    } else {
        "unable to connect"
    }
}

/// GET /dictionary
///
/// A read failure is logged and answered with an empty table.
async fn list_words(State(state): State<LexiconState>) -> Json<TableBody<WordForm>> {
    let rows = state.db.list_words().await.unwrap_or_else(|e| {
        warn!(error = %e, "word listing failed, returning empty table");
        Vec::new()
    });
    Json(TableBody::new(rows))
}

/// POST /initiate-dictionary
async fn initiate_dictionary(
    State(state): State<LexiconState>,
) -> Result<Json<SeedBody>, LexiconError> {
    let report = state.db.seed().await?;
    Ok(Json(SeedBody {
        success: true,
        statements: report.statements,
        failed: report.failed,
    }))
}

/// POST /find-definition
async fn find_definition(
    State(state): State<LexiconState>,
    payload: Result<Json<WordRequest>, JsonRejection>,
) -> Result<Json<DefinitionBody>, LexiconError> {
    let Json(WordRequest { word }) = payload?;
    let word = word.trim().to_string();

    match state.db.find_definition(word.clone()).await? {
        Some(definition) => Ok(Json(DefinitionBody::ok(definition))),
        None => Err(LexiconError::NotFound(format!("definition of '{word}'"))),
    }
}

/// POST /search-words
///
/// Attributes, operators and numeric values are validated here; nothing
/// malformed reaches the database.
async fn search_words(
    State(state): State<LexiconState>,
    payload: Result<Json<SearchWordsRequest>, JsonRejection>,
) -> Result<Json<WordsBody<WordSpelling>>, LexiconError> {
    let Json(SearchWordsRequest { queries }) = payload?;
    let filter = WordFilter::from_queries(&queries)?;

    with_pretty_json_debug(&filter, |pretty| {
        debug!(filter = %pretty, "Word search filter");
    });

    let words = state.db.search_words(filter).await?;
    Ok(Json(WordsBody::ok(words)))
}

/// POST /delete-word
async fn delete_word(
    State(state): State<LexiconState>,
    payload: Result<Json<WordRequest>, JsonRejection>,
) -> Result<Json<Ack>, LexiconError> {
    let Json(WordRequest { word }) = payload?;
    let word = word.trim().to_string();

    state.db.delete_word(word.clone()).await?;
    info!(word = %word, "word deleted");
    Ok(Json(Ack::ok()))
}

/// POST /add-context
async fn add_context(
    State(state): State<LexiconState>,
    payload: Result<Json<AddContextRequest>, JsonRejection>,
) -> Result<Json<Ack>, LexiconError> {
    let Json(req) = payload?;
    let ctx = NewContext::try_from(req)?;
    let word = ctx.word.clone();

    let leid = state.db.add_context(ctx).await?;
    info!(word = %word, leid, "context added");
    Ok(Json(Ack::ok()))
}
