// src/config.rs
use crate::error::{AppError, AppResult};
use std::{env, net::SocketAddr, time::Duration};

const API_BASE_URL_PADRAO: &str = "http://127.0.0.1:5000";
const BIND_ADDR_PADRAO: &str = "0.0.0.0:3000";
const API_TIMEOUT_SECS_PADRAO: u64 = 10;
const SESSION_INACTIVITY_HOURS_PADRAO: i64 = 24;
const SESSION_DATABASE_URL_PADRAO: &str = "sqlite::memory:";
// Limite superior: um ano
const SESSION_INACTIVITY_HOURS_MAX: i64 = 24 * 366;

/// Configuração lida do ambiente (e do `.env`, se existir) no arranque.
#[derive(Debug, Clone)]
pub struct Config {
    /// Raiz da API REST (sem o `/api`).
    pub api_base_url: String,
    pub bind_addr: SocketAddr,
    pub api_timeout: Duration,
    pub session_inactivity_hours: i64,
    /// Base SQLite das sessões (`sqlite::memory:` por omissão).
    pub session_database_url: String,
}

impl Config {
    /// Lê as variáveis do processo (o `.env` já foi carregado em `main`).
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|chave| env::var(chave).ok())
    }

    /// Monta a configuração a partir de uma função de leitura de variáveis.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| API_BASE_URL_PADRAO.to_string());
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(AppError::ConfigInvalida(format!(
                "API_BASE_URL deve começar por http:// ou https:// (recebido '{}')",
                api_base_url
            )));
        }

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| BIND_ADDR_PADRAO.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| AppError::ConfigInvalida(format!("BIND_ADDR inválido: {}", e)))?;

        let api_timeout_secs = match lookup("API_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .map_err(|e| AppError::ConfigInvalida(format!("API_TIMEOUT_SECS inválido: {}", e)))?,
            None => API_TIMEOUT_SECS_PADRAO,
        };
        if api_timeout_secs == 0 {
            return Err(AppError::ConfigInvalida(
                "API_TIMEOUT_SECS tem de ser maior que zero".into(),
            ));
        }

        let session_inactivity_hours = match lookup("SESSION_INACTIVITY_HOURS") {
            Some(v) => v.parse::<i64>().map_err(|e| {
                AppError::ConfigInvalida(format!("SESSION_INACTIVITY_HOURS inválido: {}", e))
            })?,
            None => SESSION_INACTIVITY_HOURS_PADRAO,
        };
        if !(1..=SESSION_INACTIVITY_HOURS_MAX).contains(&session_inactivity_hours) {
            return Err(AppError::ConfigInvalida(format!(
                "SESSION_INACTIVITY_HOURS tem de estar entre 1 e {} (recebido {})",
                SESSION_INACTIVITY_HOURS_MAX, session_inactivity_hours
            )));
        }

        let session_database_url = lookup("SESSION_DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| SESSION_DATABASE_URL_PADRAO.to_string());
        if !session_database_url.starts_with("sqlite:") {
            return Err(AppError::ConfigInvalida(format!(
                "SESSION_DATABASE_URL deve começar por sqlite: (recebido '{}')",
                session_database_url
            )));
        }

        Ok(Config {
            api_base_url,
            bind_addr,
            api_timeout: Duration::from_secs(api_timeout_secs),
            session_inactivity_hours,
            session_database_url,
        })
    }
}
