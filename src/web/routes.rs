// src/web/routes.rs
use crate::{
    state::AppState,
    web::{cadastro_handlers, edicao_handlers, painel_handlers, remocao_handlers},
};
use axum::{
    routing::{get, post},
    Router,
};
use time::Duration;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

pub fn create_router(app_state: AppState) -> Router {
    // --- Página e navegação ---
    let painel_routes = Router::new()
        .route("/", get(painel_handlers::mostrar_painel))
        .route("/secao/{secao}", post(painel_handlers::mostrar_secao))
        .route("/buscar/{tipo}", post(painel_handlers::buscar));

    // --- Cadastros (um por coleção) ---
    let cadastro_routes = Router::new()
        .route("/turmas", post(cadastro_handlers::cadastrar_turma))
        .route("/disciplinas_catalogo", post(cadastro_handlers::cadastrar_disciplina))
        .route("/alunos", post(cadastro_handlers::cadastrar_aluno))
        .route("/turma_disciplinas_ofertas", post(cadastro_handlers::cadastrar_oferta))
        .route("/matriculas", post(cadastro_handlers::cadastrar_matricula));

    // --- Modal de edição (matrículas não se editam) ---
    let edicao_routes = Router::new()
        .route("/editar/turmas/{id}", post(edicao_handlers::editar_turma))
        .route("/editar/disciplinas_catalogo/{id}", post(edicao_handlers::editar_disciplina))
        .route("/editar/alunos/{id}", post(edicao_handlers::editar_aluno))
        .route("/editar/turma_disciplinas_ofertas/{id}", post(edicao_handlers::editar_oferta))
        .route("/edicao/salvar", post(edicao_handlers::salvar_edicao))
        .route("/edicao/cancelar", post(edicao_handlers::cancelar_edicao));

    // --- Remoção com confirmação ---
    let remocao_routes = Router::new()
        .route("/remover/{colecao}/{id}", post(remocao_handlers::pedir_remocao))
        .route("/remocao/confirmar", post(remocao_handlers::confirmar_remocao))
        .route("/remocao/cancelar", post(remocao_handlers::cancelar_remocao));

    // --- Router Final ---
    Router::new()
        .merge(painel_routes)
        .merge(cadastro_routes)
        .merge(edicao_routes)
        .merge(remocao_routes)
        .with_state(app_state)
}

/// Router com as camadas de tracing HTTP e de sessão (estado do painel por browser).
/// A limpeza das sessões expiradas do `session_store` é lançada em `main`.
pub fn create_app(
    app_state: AppState,
    session_store: SqliteStore,
    inatividade_sessao: Duration,
) -> Router {
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(inatividade_sessao));

    create_router(app_state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(session_layer),
    )
}
