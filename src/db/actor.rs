use crate::config::DatabaseConfig;
use crate::db::context::{self, NewContext};
use crate::db::language::{self, LanguageProjection, LanguageUpdate};
use crate::db::models::{
    Language, LanguageAvgLength, LanguageMaxLength, LanguageName, ProjectionRow, WordForm,
    WordSpelling,
};
use crate::db::schema::SQLITE_INIT;
use crate::db::search::{self, WordFilter};
use crate::db::seed::{self, SeedReport};
use crate::db::{ops, reports};
use crate::error::LexiconError;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::{future::Future, path::PathBuf, str::FromStr, time::Duration};
use tracing::info;

type Reply<T> = RpcReplyPort<Result<T, LexiconError>>;

#[derive(Debug)]
pub enum DbActorMessage {
    /// Ping a pooled connection.
    CheckConnection(RpcReplyPort<bool>),

    /// All `OrthographicForm` rows.
    ListWords(Reply<Vec<WordForm>>),

    /// All `Language_ancestor` rows.
    ListLanguages(Reply<Vec<Language>>),

    /// Run the configured (or bundled) seed script.
    Seed(Reply<SeedReport>),

    FindDefinition(String, Reply<Option<String>>),

    SearchWords(WordFilter, Reply<Vec<WordSpelling>>),

    DeleteWord(String, Reply<()>),

    /// Insert a full context and return the new LEID.
    AddContext(NewContext, Reply<i64>),

    UpdateLanguage(LanguageUpdate, Reply<()>),

    ProjectLanguages(LanguageProjection, Reply<Vec<ProjectionRow>>),

    MaxWordLength(Reply<Vec<LanguageMaxLength>>),

    AverageWordLength(Reply<Vec<LanguageAvgLength>>),

    AboveAverageLanguages(Reply<Vec<LanguageName>>),

    FullCategoryCoverage(Reply<Vec<LanguageName>>),
}

#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
}

fn rpc_error(op: &str, e: impl std::fmt::Display) -> LexiconError {
    LexiconError::RactorError(format!("DbActor {op} RPC failed: {e}"))
}

impl DbActorHandle {
    /// `false` when the actor or the database is unreachable.
    pub async fn check_connection(&self) -> bool {
        ractor::call!(self.actor, DbActorMessage::CheckConnection).unwrap_or(false)
    }

    pub async fn list_words(&self) -> Result<Vec<WordForm>, LexiconError> {
        ractor::call!(self.actor, DbActorMessage::ListWords)
            .map_err(|e| rpc_error("ListWords", e))?
    }

    pub async fn list_languages(&self) -> Result<Vec<Language>, LexiconError> {
        ractor::call!(self.actor, DbActorMessage::ListLanguages)
            .map_err(|e| rpc_error("ListLanguages", e))?
    }

    pub async fn seed(&self) -> Result<SeedReport, LexiconError> {
        ractor::call!(self.actor, DbActorMessage::Seed).map_err(|e| rpc_error("Seed", e))?
    }

    pub async fn find_definition(&self, word: String) -> Result<Option<String>, LexiconError> {
        ractor::call!(self.actor, DbActorMessage::FindDefinition, word)
            .map_err(|e| rpc_error("FindDefinition", e))?
    }

    pub async fn search_words(&self, filter: WordFilter) -> Result<Vec<WordSpelling>, LexiconError> {
        ractor::call!(self.actor, DbActorMessage::SearchWords, filter)
            .map_err(|e| rpc_error("SearchWords", e))?
    }

    pub async fn delete_word(&self, word: String) -> Result<(), LexiconError> {
        ractor::call!(self.actor, DbActorMessage::DeleteWord, word)
            .map_err(|e| rpc_error("DeleteWord", e))?
    }

    pub async fn add_context(&self, ctx: NewContext) -> Result<i64, LexiconError> {
        ractor::call!(self.actor, DbActorMessage::AddContext, ctx)
            .map_err(|e| rpc_error("AddContext", e))?
    }

    pub async fn update_language(&self, update: LanguageUpdate) -> Result<(), LexiconError> {
        ractor::call!(self.actor, DbActorMessage::UpdateLanguage, update)
            .map_err(|e| rpc_error("UpdateLanguage", e))?
    }

    pub async fn project_languages(
        &self,
        projection: LanguageProjection,
    ) -> Result<Vec<ProjectionRow>, LexiconError> {
        ractor::call!(self.actor, DbActorMessage::ProjectLanguages, projection)
            .map_err(|e| rpc_error("ProjectLanguages", e))?
    }

    pub async fn max_word_length(&self) -> Result<Vec<LanguageMaxLength>, LexiconError> {
        ractor::call!(self.actor, DbActorMessage::MaxWordLength)
            .map_err(|e| rpc_error("MaxWordLength", e))?
    }

    pub async fn average_word_length(&self) -> Result<Vec<LanguageAvgLength>, LexiconError> {
        ractor::call!(self.actor, DbActorMessage::AverageWordLength)
            .map_err(|e| rpc_error("AverageWordLength", e))?
    }

    pub async fn above_average_languages(&self) -> Result<Vec<LanguageName>, LexiconError> {
        ractor::call!(self.actor, DbActorMessage::AboveAverageLanguages)
            .map_err(|e| rpc_error("AboveAverageLanguages", e))?
    }

    pub async fn full_category_coverage(&self) -> Result<Vec<LanguageName>, LexiconError> {
        ractor::call!(self.actor, DbActorMessage::FullCategoryCoverage)
            .map_err(|e| rpc_error("FullCategoryCoverage", e))?
    }

    /// Stops the actor and waits until the pool is closed.
    pub async fn shutdown(&self) -> Result<(), LexiconError> {
        self.actor
            .stop_and_wait(None, Some(Duration::from_secs(15)))
            .await
            .map_err(|e| LexiconError::RactorError(format!("DbActor stop failed: {e}")))
    }
}

struct DbActorState {
    pool: SqlitePool,
    seed_script: Option<PathBuf>,
}

struct DbActor;

/// Runs `work` on its own task so slow statements do not hold up the mailbox.
fn reply_with<T, F>(reply: RpcReplyPort<T>, work: F)
where
    T: Send + 'static,
    F: Future<Output = T> + Send + 'static,
{
    tokio::spawn(async move {
        let _ = reply.send(work.await);
    });
}

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = DbActorState;
    type Arguments = DatabaseConfig;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        cfg: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let connect_opts = SqliteConnectOptions::from_str(cfg.url.as_str())
            .map_err(|e| ActorProcessingErr::from(format!("invalid database url: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(cfg.max_connections)
            .min_connections(cfg.min_connections)
            .acquire_timeout(cfg.acquire_timeout())
            .connect_with(connect_opts)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db connect failed: {e}")))?;

        apply_schema(&pool)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db schema init failed: {e}")))?;

        info!(
            max_connections = cfg.max_connections,
            min_connections = cfg.min_connections,
            seed_script = %cfg
                .seed_script
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<bundled>".to_string()),
            "DbActor initialized"
        );
        Ok(DbActorState {
            pool,
            seed_script: cfg.seed_script,
        })
    }

    async fn post_stop(
        &self,
        _myself: ActorRef<Self::Msg>,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        state.pool.close().await;
        info!("DbActor stopped, connection pool closed");
        Ok(())
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        let pool = state.pool.clone();
        match message {
            DbActorMessage::CheckConnection(reply) => {
                reply_with(reply, async move { ops::check_connection(&pool).await });
            }
            DbActorMessage::ListWords(reply) => {
                reply_with(reply, async move { ops::list_words(&pool).await });
            }
            DbActorMessage::ListLanguages(reply) => {
                reply_with(reply, async move { ops::list_languages(&pool).await });
            }
            DbActorMessage::Seed(reply) => {
                let path = state.seed_script.clone();
                reply_with(reply, async move {
                    let script = seed::load_script(path.as_deref()).await?;
                    seed::run_script(&pool, &script).await
                });
            }
            DbActorMessage::FindDefinition(word, reply) => {
                reply_with(reply, async move { ops::find_definition(&pool, &word).await });
            }
            DbActorMessage::SearchWords(filter, reply) => {
                reply_with(reply, async move { search::search_words(&pool, &filter).await });
            }
            DbActorMessage::DeleteWord(word, reply) => {
                reply_with(reply, async move { ops::delete_word(&pool, &word).await });
            }
            DbActorMessage::AddContext(ctx, reply) => {
                reply_with(reply, async move { context::add_context(&pool, &ctx).await });
            }
            DbActorMessage::UpdateLanguage(update, reply) => {
                reply_with(reply, async move {
                    language::update_language(&pool, &update).await
                });
            }
            DbActorMessage::ProjectLanguages(projection, reply) => {
                reply_with(reply, async move {
                    language::project_languages(&pool, projection).await
                });
            }
            DbActorMessage::MaxWordLength(reply) => {
                reply_with(reply, async move { reports::max_word_length(&pool).await });
            }
            DbActorMessage::AverageWordLength(reply) => {
                reply_with(reply, async move { reports::average_word_length(&pool).await });
            }
            DbActorMessage::AboveAverageLanguages(reply) => {
                reply_with(reply, async move {
                    reports::above_average_languages(&pool).await
                });
            }
            DbActorMessage::FullCategoryCoverage(reply) => {
                reply_with(reply, async move {
                    reports::full_category_coverage(&pool).await
                });
            }
        }
        Ok(())
    }
}

/// Spawn the database actor and return a cloneable handle.
///
/// Fails if the database cannot be opened or the schema cannot be applied.
pub async fn spawn(cfg: &DatabaseConfig) -> Result<DbActorHandle, LexiconError> {
    let (actor, _jh) = ractor::Actor::spawn(None, DbActor, cfg.clone())
        .await
        .map_err(|e| LexiconError::RactorError(format!("failed to spawn DbActor: {e}")))?;

    Ok(DbActorHandle { actor })
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), LexiconError> {
    for stmt in seed::split_statements(SQLITE_INIT) {
        sqlx::query(&stmt).execute(pool).await?;
    }
    Ok(())
}
