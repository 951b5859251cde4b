// src/services/api_client.rs
use crate::{
    error::{ApiError, ApiResult},
    models::{
        dados::{RespostaApi, Snapshot},
        entidade::Entidade,
    },
};
use reqwest::{Method, RequestBuilder, Url};
use serde_json::Value;
use std::time::Duration;

const SUCESSO_SEM_MENSAGEM: &str = "Operação realizada com sucesso.";

/// Termo de busca enviado em GET /api/data (no máximo um por pedido).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filtro {
    pub parametro: &'static str,
    pub termo: String,
}

/// Cliente da API REST de registos académicos.
/// Cada operação é um único pedido; não há repetições nem cache.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::Rede(format!("URL base inválido '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Rede(format!("URL base sem caminho: {}", base_url)));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// Monta `<base>/api/<segmentos...>`; cada segmento é codificado (ids incluídos).
    fn url(&self, segmentos: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Rede(format!("URL base sem caminho: {}", self.base_url)))?
            .pop_if_empty()
            .push("api")
            .extend(segmentos);
        Ok(url)
    }

    /// GET /api/data, com o filtro da secção ativa quando houver.
    pub async fn buscar_dados(&self, filtro: Option<&Filtro>) -> ApiResult<Snapshot> {
        let url = self.url(&["data"])?;
        let mut pedido = self.client.get(url);
        if let Some(filtro) = filtro {
            tracing::debug!(parametro = filtro.parametro, termo = %filtro.termo, "Buscando dados com filtro");
            pedido = pedido.query(&[(filtro.parametro, filtro.termo.as_str())]);
        } else {
            tracing::debug!("Buscando dados sem filtro");
        }

        let resp = pedido.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                mensagem: body,
            });
        }

        let snapshot: Snapshot = resp.json().await?;
        tracing::debug!(
            turmas = snapshot.turmas.len(),
            disciplinas = snapshot.disciplinas_catalogo.len(),
            alunos = snapshot.alunos.len(),
            ofertas = snapshot.turma_disciplinas_ofertas.len(),
            matriculas = snapshot.matriculas.len(),
            "Dados carregados"
        );
        Ok(snapshot)
    }

    /// POST /api/<colecao>. Devolve a mensagem do servidor.
    pub async fn criar(&self, entidade: Entidade, corpo: &Value) -> ApiResult<String> {
        let url = self.url(&[entidade.colecao()])?;
        self.enviar(self.client.request(Method::POST, url).json(corpo)).await
    }

    /// PUT /api/<colecao>/<id> com o subconjunto editável dos campos.
    pub async fn atualizar(&self, entidade: Entidade, id: &str, corpo: &Value) -> ApiResult<String> {
        let url = self.url(&[entidade.colecao(), id])?;
        self.enviar(self.client.request(Method::PUT, url).json(corpo)).await
    }

    /// DELETE /api/<colecao>/<id>. Remoções em cascata são decididas pelo servidor.
    pub async fn remover(&self, entidade: Entidade, id: &str) -> ApiResult<String> {
        let url = self.url(&[entidade.colecao(), id])?;
        self.enviar(self.client.request(Method::DELETE, url)).await
    }

    // Mutações respondem `{message}` ou `{error}`; um 2xx só com `error` também é falha.
    async fn enviar(&self, pedido: RequestBuilder) -> ApiResult<String> {
        let resp = pedido.send().await?;
        let status = resp.status();
        let texto = resp.text().await?;
        let corpo: RespostaApi = serde_json::from_str(&texto)?;

        match (status.is_success(), corpo.message, corpo.error) {
            (true, Some(mensagem), _) => Ok(mensagem),
            (true, None, None) => Ok(SUCESSO_SEM_MENSAGEM.to_string()),
            (_, mensagem, erro) => {
                let mensagem = erro
                    .or(mensagem)
                    .unwrap_or_else(|| status.to_string());
                tracing::warn!(status = status.as_u16(), %mensagem, "API recusou o pedido");
                Err(ApiError::Api {
                    status: status.as_u16(),
                    mensagem,
                })
            }
        }
    }
}
