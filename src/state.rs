// src/state.rs
use crate::services::api_client::ApiClient;

// Estado partilhado por todos os handlers. O estado de cada utilizador
// (secção ativa, buscas, modal...) vive na sessão, não aqui.
#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
}

// Permite extrair o cliente da API diretamente
impl axum::extract::FromRef<AppState> for ApiClient {
    fn from_ref(state: &AppState) -> ApiClient {
        state.api.clone()
    }
}
