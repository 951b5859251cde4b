// src/error.rs
use axum::{http::StatusCode, response::Html, response::IntoResponse};
use thiserror::Error;

/// Falhas ao falar com a API REST de registos académicos.
#[derive(Error, Debug)]
pub enum ApiError {
    // Transporte: ligação recusada, timeout, URL inválido
    #[error("Erro de rede: {0}")]
    Rede(String),

    // O servidor respondeu com falha (status não-2xx ou corpo com `error`)
    #[error("Erro da API (status {status}): {mensagem}")]
    Api { status: u16, mensagem: String },

    // Corpo que não se consegue interpretar
    #[error("Resposta inválida da API: {0}")]
    Resposta(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Resposta(err.to_string())
        } else {
            ApiError::Rede(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Resposta(err.to_string())
    }
}

impl ApiError {
    /// Texto do aviso para o utilizador: o erro do servidor tal como veio,
    /// ou a mensagem genérica da ação para falhas de rede/resposta.
    pub fn aviso(&self, generico: &str) -> String {
        match self {
            ApiError::Api { mensagem, .. } => format!("Erro: {}", mensagem),
            ApiError::Rede(_) | ApiError::Resposta(_) => generico.to_string(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro na base de sessões: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Configuração inválida: {0}")]
    ConfigInvalida(String),

    #[error("Erro na sessão: {0}")]
    SessionError(String),

    #[error("Não encontrado: {0}")]
    NaoEncontrado(String),

    #[error("Erro interno inesperado")]
    InternalServerError,
}

// Como converter AppError numa resposta HTTP
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // Loga o erro detalhado no servidor
        tracing::error!("Erro processado: {:?}", self);

        let (status, user_message) = match self {
            AppError::ConfigInvalida(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro de configuração.")
            }
            AppError::SqlxError(_) | AppError::SessionError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro na gestão da sua sessão.")
            }
            AppError::NaoEncontrado(_) => (StatusCode::NOT_FOUND, "Página não encontrada."),
            AppError::InternalServerError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        (status, Html(format!(r#"
            <!DOCTYPE html><html><head><title>Erro</title><style>body{{font-family:sans-serif;}}</style></head>
            <body><h1>Erro {status_code}</h1><p>{message}</p><a href="/">Voltar ao painel</a></body></html>
         "#, status_code = status.as_u16(), message = user_message))).into_response()
    }
}

// Tipo Result padrão para a aplicação
pub type AppResult<T = ()> = Result<T, AppError>;
