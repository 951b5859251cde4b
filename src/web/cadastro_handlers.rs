// src/web/cadastro_handlers.rs
use crate::{
    error::AppResult,
    models::formularios::{CamposAluno, CamposDisciplina, CamposTurma, NovaMatricula, NovaOferta, Rascunho},
    services::painel_service,
    state::AppState,
    web::sessao,
};
use axum::{
    extract::{Form, State},
    response::Redirect,
};
use tower_sessions::Session;

// Padrão Post/Redirect/Get: o resultado fica como aviso na sessão e
// o GET / seguinte busca o snapshot atualizado.
async fn cadastrar(state: &AppState, session: &Session, rascunho: Rascunho) -> AppResult<Redirect> {
    tracing::info!("POST /{}: cadastro", rascunho.entidade().colecao());

    let mut estado = sessao::carregar_estado(session).await;
    painel_service::cadastrar(&state.api, &mut estado, rascunho).await;
    sessao::guardar_estado(session, &estado).await?;

    Ok(Redirect::to("/"))
}

pub async fn cadastrar_turma(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CamposTurma>,
) -> AppResult<Redirect> {
    cadastrar(&state, &session, Rascunho::Turma(form)).await
}

pub async fn cadastrar_disciplina(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CamposDisciplina>,
) -> AppResult<Redirect> {
    cadastrar(&state, &session, Rascunho::Disciplina(form)).await
}

pub async fn cadastrar_aluno(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CamposAluno>,
) -> AppResult<Redirect> {
    cadastrar(&state, &session, Rascunho::Aluno(form)).await
}

pub async fn cadastrar_oferta(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<NovaOferta>,
) -> AppResult<Redirect> {
    cadastrar(&state, &session, Rascunho::Oferta(form)).await
}

pub async fn cadastrar_matricula(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<NovaMatricula>,
) -> AppResult<Redirect> {
    cadastrar(&state, &session, Rascunho::Matricula(form)).await
}
