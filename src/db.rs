// src/db.rs
use crate::error::{AppError, AppResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration; // Usar std::time::Duration aqui
use tower_sessions_sqlx_store::SqliteStore;

const TABELA_SESSOES: &str = "sessions";

/// Cria o store de sessões em SQLite e a respetiva tabela.
/// Com `sqlite::memory:` a base vive numa única conexão que nunca é fechada.
pub async fn create_session_store(database_url: &str) -> AppResult<SqliteStore> {
    tracing::info!("Ligando à base de sessões: {}", database_url);

    let em_memoria = database_url.contains(":memory:");
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(if em_memoria { 1 } else { 5 })
        .min_connections(if em_memoria { 1 } else { 0 })
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    let store = SqliteStore::new(pool)
        .with_table_name(TABELA_SESSOES)
        .map_err(AppError::SessionError)?;
    store.migrate().await?;
    tracing::info!("Tabela de sessões pronta.");

    Ok(store)
}
