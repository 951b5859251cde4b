// src/web/painel_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::entidade::{Secao, TipoBusca},
    services::painel_service::{self, Acao},
    state::AppState,
    templates::PainelPage,
    web::sessao,
};
use askama::Template; // Para render()
use axum::{
    extract::{Form, Path, State},
    response::{Html, IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;

#[derive(Deserialize, Debug)]
pub struct BuscaForm {
    #[serde(default)]
    termo: String,
}

/// Handler para GET / - busca o snapshot da secção ativa e renderiza o painel inteiro
pub async fn mostrar_painel(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<impl IntoResponse> {
    let antes = sessao::carregar_estado(&session).await;
    let mut estado = antes.clone();
    tracing::debug!("GET /: secção ativa '{}'", estado.secao_ativa);

    // 1. Snapshot novo a cada carregamento (em falha fica vazio e há aviso)
    let snapshot = painel_service::carregar_snapshot(&state.api, &mut estado).await;

    // 2. Avisos só aparecem uma vez
    let avisos = estado.tomar_avisos();
    sessao::guardar_se_alterado(&session, &antes, &estado).await?;

    // 3. Renderiza
    let template = PainelPage::new(&estado, &snapshot, avisos);
    match template.render() {
        Ok(html) => Ok(Html(html)),
        Err(e) => {
            tracing::error!("Falha ao renderizar template PainelPage: {}", e);
            Err(AppError::InternalServerError)
        }
    }
}

/// Handler para POST /secao/{secao} - mostra uma secção e esconde as outras
pub async fn mostrar_secao(
    session: Session,
    Path(nome): Path<String>,
) -> AppResult<Redirect> {
    let secao: Secao = nome.parse().map_err(AppError::NaoEncontrado)?;
    tracing::debug!("POST /secao/{}: trocando de secção", secao);

    let mut estado = sessao::carregar_estado(&session).await;
    estado.aplicar(Acao::MostrarSecao(secao));
    sessao::guardar_estado(&session, &estado).await?;

    Ok(Redirect::to("/"))
}

/// Handler para POST /buscar/{tipo} - guarda o termo e recarrega a secção ativa
pub async fn buscar(
    session: Session,
    Path(nome): Path<String>,
    Form(form): Form<BuscaForm>,
) -> AppResult<Redirect> {
    let tipo: TipoBusca = nome.parse().map_err(AppError::NaoEncontrado)?;
    tracing::debug!("POST /buscar/{}: termo '{}'", tipo.as_str(), form.termo);

    let mut estado = sessao::carregar_estado(&session).await;
    estado.aplicar(Acao::DefinirBusca { tipo, termo: form.termo });
    sessao::guardar_estado(&session, &estado).await?;

    Ok(Redirect::to("/"))
}
