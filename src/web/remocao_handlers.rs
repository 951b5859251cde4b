// src/web/remocao_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::entidade::Entidade,
    services::painel_service::{self, Acao, AlvoRemocao},
    state::AppState,
    web::sessao,
};
use axum::{
    extract::{Path, State},
    response::Redirect,
};
use tower_sessions::Session;

/// Handler para POST /remover/{colecao}/{id} - só pede confirmação, não remove nada
pub async fn pedir_remocao(
    session: Session,
    Path((colecao, id)): Path<(String, String)>,
) -> AppResult<Redirect> {
    let entidade = Entidade::from_colecao(&colecao)
        .ok_or_else(|| AppError::NaoEncontrado(format!("Coleção desconhecida: {}", colecao)))?;
    tracing::debug!("Pedido de remoção de {} '{}'", colecao, id);

    let mut estado = sessao::carregar_estado(&session).await;
    estado.aplicar(Acao::PedirRemocao(AlvoRemocao { entidade, id }));
    sessao::guardar_estado(&session, &estado).await?;

    Ok(Redirect::to("/"))
}

/// Handler para POST /remocao/confirmar - executa o DELETE pendente
pub async fn confirmar_remocao(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Redirect> {
    let mut estado = sessao::carregar_estado(&session).await;
    painel_service::confirmar_remocao(&state.api, &mut estado).await;
    sessao::guardar_estado(&session, &estado).await?;

    Ok(Redirect::to("/"))
}

/// Handler para POST /remocao/cancelar
pub async fn cancelar_remocao(session: Session) -> AppResult<Redirect> {
    let mut estado = sessao::carregar_estado(&session).await;
    estado.aplicar(Acao::CancelarRemocao);
    sessao::guardar_estado(&session, &estado).await?;

    Ok(Redirect::to("/"))
}
