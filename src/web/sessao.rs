// src/web/sessao.rs
use crate::{
    error::{AppError, AppResult},
    services::painel_service::EstadoPainel,
};
use tower_sessions::Session;

// Chave única do estado do painel na sessão
const CHAVE_ESTADO: &str = "painel";

/// Lê o estado do painel desta sessão (ou o estado inicial, numa sessão nova).
pub async fn carregar_estado(session: &Session) -> EstadoPainel {
    match session.get::<EstadoPainel>(CHAVE_ESTADO).await {
        Ok(Some(estado)) => estado,
        Ok(None) => {
            tracing::debug!("Sessão sem estado do painel, usando estado inicial");
            EstadoPainel::default()
        }
        Err(e) => {
            // Ex: estado gravado por uma versão anterior com outro formato
            tracing::warn!("Estado do painel ilegível na sessão ({}), recomeçando", e);
            EstadoPainel::default()
        }
    }
}

pub async fn guardar_estado(session: &Session, estado: &EstadoPainel) -> AppResult<()> {
    session
        .insert(CHAVE_ESTADO, estado)
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao guardar estado do painel: {}", e)))
}

/// Só grava quando o estado mudou; um GET sem nada para guardar não cria sessão.
pub async fn guardar_se_alterado(
    session: &Session,
    antes: &EstadoPainel,
    estado: &EstadoPainel,
) -> AppResult<()> {
    if antes == estado {
        return Ok(());
    }
    guardar_estado(session, estado).await
}
