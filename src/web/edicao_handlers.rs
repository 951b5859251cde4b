// src/web/edicao_handlers.rs
use crate::{
    error::AppResult,
    models::formularios::{CamposAluno, CamposDisciplina, CamposOferta, CamposTurma, FormularioEdicao},
    services::painel_service::{self, Acao},
    state::AppState,
    web::sessao,
};
use axum::{
    extract::{Form, Path, State},
    response::Redirect,
};
use std::collections::HashMap; // Para processar o formulário do modal
use tower_sessions::Session;

// Abre o modal partilhado com os valores atuais do registo (vindos da própria linha)
async fn abrir(session: &Session, id: String, formulario: FormularioEdicao) -> AppResult<Redirect> {
    tracing::debug!("Abrindo edição de {} '{}'", formulario.entidade().colecao(), id);

    let mut estado = sessao::carregar_estado(session).await;
    estado.aplicar(Acao::AbrirEdicao { id, formulario });
    sessao::guardar_estado(session, &estado).await?;

    Ok(Redirect::to("/"))
}

pub async fn editar_turma(
    session: Session,
    Path(id): Path<String>,
    Form(form): Form<CamposTurma>,
) -> AppResult<Redirect> {
    abrir(&session, id, FormularioEdicao::Turma(form)).await
}

pub async fn editar_disciplina(
    session: Session,
    Path(id): Path<String>,
    Form(form): Form<CamposDisciplina>,
) -> AppResult<Redirect> {
    abrir(&session, id, FormularioEdicao::Disciplina(form)).await
}

pub async fn editar_aluno(
    session: Session,
    Path(id): Path<String>,
    Form(form): Form<CamposAluno>,
) -> AppResult<Redirect> {
    abrir(&session, id, FormularioEdicao::Aluno(form)).await
}

pub async fn editar_oferta(
    session: Session,
    Path(id): Path<String>,
    Form(form): Form<CamposOferta>,
) -> AppResult<Redirect> {
    abrir(&session, id, FormularioEdicao::Oferta(form)).await
}

/// Handler para POST /edicao/salvar - valida, faz o PUT e fecha o modal em caso de sucesso
pub async fn salvar_edicao(
    State(state): State<AppState>,
    session: Session,
    Form(valores): Form<HashMap<String, String>>,
) -> AppResult<Redirect> {
    let mut estado = sessao::carregar_estado(&session).await;
    painel_service::salvar_edicao(&state.api, &mut estado, &valores).await;
    sessao::guardar_estado(&session, &estado).await?;

    Ok(Redirect::to("/"))
}

/// Handler para POST /edicao/cancelar - descarta a edição sem perguntar
pub async fn cancelar_edicao(session: Session) -> AppResult<Redirect> {
    let mut estado = sessao::carregar_estado(&session).await;
    estado.aplicar(Acao::FecharEdicao);
    sessao::guardar_estado(&session, &estado).await?;

    Ok(Redirect::to("/"))
}
