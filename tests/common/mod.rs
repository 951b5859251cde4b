// tests/common/mod.rs
//
// API REST falsa (em memória) e um "browser" mínimo que guarda o cookie de sessão.
#![allow(dead_code)]

use academico_admin::{
    db::create_session_store,
    models::dados::{Aluno, DisciplinaCatalogo, Matricula, Oferta, OfertaDaTurma, Snapshot, Turma},
    services::api_client::ApiClient,
    state::AppState,
    web::routes::create_app,
};
use axum::{
    body::Body,
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use scraper::{Html, Selector};
use serde_json::{json, Value};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::net::TcpListener;
use tower::ServiceExt;

// --- API falsa ---

#[derive(Debug, Clone, PartialEq)]
pub struct PedidoRecebido {
    pub metodo: String,
    pub caminho: String,
    pub query: Option<String>,
    pub corpo: Option<Value>,
}

#[derive(Debug, Clone)]
struct OfertaRaw {
    id: String,
    turma_id: String,
    disciplina_catalogo_id: String,
    professor: String,
}

#[derive(Debug, Clone)]
struct MatriculaRaw {
    id: String,
    aluno_id: String,
    turma_disciplina_id: String,
}

#[derive(Debug, Default)]
struct Tabelas {
    turmas: Vec<(String, String)>,
    disciplinas: Vec<DisciplinaCatalogo>,
    alunos: Vec<Aluno>,
    ofertas: Vec<OfertaRaw>,
    matriculas: Vec<MatriculaRaw>,
}

#[derive(Clone, Default)]
pub struct FakeBackend {
    pedidos: Arc<Mutex<Vec<PedidoRecebido>>>,
    tabelas: Arc<Mutex<Tabelas>>,
}

fn contem(campo: &str, termo: &str) -> bool {
    campo.to_lowercase().contains(&termo.to_lowercase())
}

fn texto(corpo: &Value, campo: &str) -> String {
    corpo.get(campo).and_then(Value::as_str).unwrap_or_default().to_string()
}

fn erro(status: StatusCode, mensagem: &str) -> Response {
    (status, Json(json!({ "error": mensagem }))).into_response()
}

fn ok(status: StatusCode, mensagem: &str) -> Response {
    (status, Json(json!({ "message": mensagem }))).into_response()
}

impl FakeBackend {
    pub fn pedidos(&self) -> Vec<PedidoRecebido> {
        self.pedidos.lock().unwrap().clone()
    }

    pub fn limpar_pedidos(&self) {
        self.pedidos.lock().unwrap().clear();
    }

    /// Último GET /api/data recebido.
    pub fn ultima_busca(&self) -> Option<PedidoRecebido> {
        self.pedidos()
            .into_iter()
            .rev()
            .find(|p| p.metodo == "GET" && p.caminho == "/api/data")
    }

    pub fn mutacoes(&self) -> Vec<PedidoRecebido> {
        self.pedidos().into_iter().filter(|p| p.metodo != "GET").collect()
    }

    pub fn semear_turma(&self, id: &str, nome: &str) {
        self.tabelas.lock().unwrap().turmas.push((id.into(), nome.into()));
    }

    pub fn semear_disciplina(&self, id: &str, codigo: &str, nome: &str) {
        self.tabelas.lock().unwrap().disciplinas.push(DisciplinaCatalogo {
            id: id.into(),
            codigo: codigo.into(),
            nome: nome.into(),
        });
    }

    pub fn semear_aluno(&self, id: &str, matricula: &str, nome: &str, telefone: &str) {
        self.tabelas.lock().unwrap().alunos.push(Aluno {
            id: id.into(),
            matricula: matricula.into(),
            nome: nome.into(),
            telefone: telefone.into(),
        });
    }

    pub fn semear_oferta(&self, id: &str, turma_id: &str, disciplina_id: &str, professor: &str) {
        self.tabelas.lock().unwrap().ofertas.push(OfertaRaw {
            id: id.into(),
            turma_id: turma_id.into(),
            disciplina_catalogo_id: disciplina_id.into(),
            professor: professor.into(),
        });
    }

    pub fn semear_matricula(&self, id: &str, aluno_id: &str, oferta_id: &str) {
        self.tabelas.lock().unwrap().matriculas.push(MatriculaRaw {
            id: id.into(),
            aluno_id: aluno_id.into(),
            turma_disciplina_id: oferta_id.into(),
        });
    }

    fn snapshot(&self, filtros: &HashMap<String, String>) -> Snapshot {
        let t = self.tabelas.lock().unwrap();
        let busca = |chave: &str| filtros.get(chave).filter(|v| !v.is_empty()).cloned();
        let busca_turma = busca("search_turma");
        let busca_disciplina = busca("search_disciplina");
        let busca_aluno = busca("search_aluno");

        let turma_nome = |id: &str| t.turmas.iter().find(|(tid, _)| tid == id).map(|(_, n)| n.clone());
        let disciplina = |id: &str| t.disciplinas.iter().find(|d| d.id == id).cloned();

        let ofertas: Vec<Oferta> = t
            .ofertas
            .iter()
            .filter_map(|o| {
                let nome_turma = turma_nome(&o.turma_id)?;
                let d = disciplina(&o.disciplina_catalogo_id)?;
                Some(Oferta {
                    id: o.id.clone(),
                    turma_id: o.turma_id.clone(),
                    turma_nome: nome_turma,
                    disciplina_catalogo_id: d.id.clone(),
                    disciplina_codigo: d.codigo.clone(),
                    disciplina_nome: d.nome.clone(),
                    professor: o.professor.clone(),
                })
            })
            .collect();

        let matriculas: Vec<Matricula> = t
            .matriculas
            .iter()
            .filter_map(|m| {
                let aluno = t.alunos.iter().find(|a| a.id == m.aluno_id)?;
                let oferta = ofertas.iter().find(|o| o.id == m.turma_disciplina_id)?;
                Some(Matricula {
                    id: m.id.clone(),
                    aluno_id: aluno.id.clone(),
                    aluno_matricula: aluno.matricula.clone(),
                    aluno_nome: aluno.nome.clone(),
                    turma_disciplina_id: oferta.id.clone(),
                    turma_nome: oferta.turma_nome.clone(),
                    disciplina_nome: oferta.disciplina_nome.clone(),
                    professor: oferta.professor.clone(),
                })
            })
            .collect();

        let turmas = t
            .turmas
            .iter()
            .filter(|(_, nome)| busca_turma.as_deref().map_or(true, |b| contem(nome, b)))
            .map(|(id, nome)| Turma {
                id: id.clone(),
                nome: nome.clone(),
                disciplinas: ofertas
                    .iter()
                    .filter(|o| &o.turma_id == id)
                    .map(|o| OfertaDaTurma {
                        id: o.id.clone(),
                        codigo: o.disciplina_codigo.clone(),
                        nome: o.disciplina_nome.clone(),
                        professor: o.professor.clone(),
                        disciplina_catalogo_id: o.disciplina_catalogo_id.clone(),
                        alunos: Vec::new(),
                    })
                    .collect(),
            })
            .collect();

        let disciplinas_catalogo = t
            .disciplinas
            .iter()
            .filter(|d| {
                busca_disciplina
                    .as_deref()
                    .map_or(true, |b| contem(&d.nome, b) || contem(&d.codigo, b))
            })
            .cloned()
            .collect();

        let alunos = t
            .alunos
            .iter()
            .filter(|a| {
                busca_aluno
                    .as_deref()
                    .map_or(true, |b| contem(&a.nome, b) || contem(&a.matricula, b))
            })
            .cloned()
            .collect();

        Snapshot {
            turmas,
            disciplinas_catalogo,
            alunos,
            turma_disciplinas_ofertas: ofertas,
            matriculas,
        }
    }

    fn criar(&self, colecao: &str, corpo: &Value) -> Response {
        let novo_id = uuid::Uuid::new_v4().to_string();
        let mut t = self.tabelas.lock().unwrap();
        match colecao {
            "turmas" => {
                let nome = texto(corpo, "nome");
                if nome.is_empty() {
                    return erro(StatusCode::BAD_REQUEST, "Nome da turma é obrigatório.");
                }
                t.turmas.push((novo_id, nome));
                ok(StatusCode::CREATED, "Turma adicionada com sucesso!")
            }
            "disciplinas_catalogo" => {
                let codigo = texto(corpo, "codigo");
                if t.disciplinas.iter().any(|d| d.codigo == codigo) {
                    return erro(StatusCode::CONFLICT, "Já existe uma disciplina com este código.");
                }
                t.disciplinas.push(DisciplinaCatalogo {
                    id: novo_id,
                    codigo,
                    nome: texto(corpo, "nome"),
                });
                ok(StatusCode::CREATED, "Disciplina adicionada ao catálogo com sucesso!")
            }
            "alunos" => {
                t.alunos.push(Aluno {
                    id: novo_id,
                    matricula: texto(corpo, "matricula"),
                    nome: texto(corpo, "nome"),
                    telefone: texto(corpo, "telefone"),
                });
                ok(StatusCode::CREATED, "Aluno adicionado com sucesso!")
            }
            "turma_disciplinas_ofertas" => {
                let turma_id = texto(corpo, "turma_id");
                if !t.turmas.iter().any(|(id, _)| *id == turma_id) {
                    return erro(StatusCode::NOT_FOUND, "Turma não encontrada.");
                }
                t.ofertas.push(OfertaRaw {
                    id: novo_id,
                    turma_id,
                    disciplina_catalogo_id: texto(corpo, "disciplina_catalogo_id"),
                    professor: texto(corpo, "professor"),
                });
                ok(StatusCode::CREATED, "Oferta de disciplina adicionada com sucesso!")
            }
            "matriculas" => {
                t.matriculas.push(MatriculaRaw {
                    id: novo_id,
                    aluno_id: texto(corpo, "aluno_id"),
                    turma_disciplina_id: texto(corpo, "turma_disciplina_id"),
                });
                ok(StatusCode::CREATED, "Matrícula realizada com sucesso!")
            }
            _ => erro(StatusCode::NOT_FOUND, "Coleção desconhecida."),
        }
    }

    fn atualizar(&self, colecao: &str, id: &str, corpo: &Value) -> Response {
        let mut t = self.tabelas.lock().unwrap();
        let encontrado = match colecao {
            "turmas" => t.turmas.iter_mut().find(|(tid, _)| tid == id).map(|turma| {
                turma.1 = texto(corpo, "nome");
            }),
            "disciplinas_catalogo" => t.disciplinas.iter_mut().find(|d| d.id == id).map(|d| {
                d.codigo = texto(corpo, "codigo");
                d.nome = texto(corpo, "nome");
            }),
            "alunos" => t.alunos.iter_mut().find(|a| a.id == id).map(|a| {
                a.matricula = texto(corpo, "matricula");
                a.nome = texto(corpo, "nome");
                a.telefone = texto(corpo, "telefone");
            }),
            "turma_disciplinas_ofertas" => t.ofertas.iter_mut().find(|o| o.id == id).map(|o| {
                o.professor = texto(corpo, "professor");
            }),
            _ => None,
        };
        match encontrado {
            Some(()) => ok(StatusCode::OK, "Registo atualizado com sucesso!"),
            None => erro(StatusCode::NOT_FOUND, "Registo não encontrado."),
        }
    }

    fn remover(&self, colecao: &str, id: &str) -> Response {
        let mut t = self.tabelas.lock().unwrap();
        let removido = match colecao {
            "turmas" => remover_de(&mut t.turmas, |(tid, _)| tid == id),
            "disciplinas_catalogo" => remover_de(&mut t.disciplinas, |d| d.id == id),
            "alunos" => remover_de(&mut t.alunos, |a| a.id == id),
            "turma_disciplinas_ofertas" => {
                if t.matriculas.iter().any(|m| m.turma_disciplina_id == id) {
                    return erro(
                        StatusCode::CONFLICT,
                        "Não é possível remover esta oferta de disciplina: existem matrículas de alunos associadas a ela.",
                    );
                }
                remover_de(&mut t.ofertas, |o| o.id == id)
            }
            "matriculas" => remover_de(&mut t.matriculas, |m| m.id == id),
            _ => false,
        };
        if removido {
            ok(StatusCode::OK, "Registo removido com sucesso!")
        } else {
            erro(StatusCode::NOT_FOUND, "Registo não encontrado.")
        }
    }
}

fn remover_de<T>(itens: &mut Vec<T>, alvo: impl Fn(&T) -> bool) -> bool {
    let antes = itens.len();
    itens.retain(|item| !alvo(item));
    itens.len() < antes
}

async fn registar(State(fake): State<FakeBackend>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();
    fake.pedidos.lock().unwrap().push(PedidoRecebido {
        metodo: parts.method.to_string(),
        caminho: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_string),
        corpo: serde_json::from_slice(&bytes).ok(),
    });
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

async fn get_data(
    State(fake): State<FakeBackend>,
    Query(filtros): Query<HashMap<String, String>>,
) -> Json<Snapshot> {
    Json(fake.snapshot(&filtros))
}

async fn post_colecao(
    State(fake): State<FakeBackend>,
    Path(colecao): Path<String>,
    Json(corpo): Json<Value>,
) -> Response {
    fake.criar(&colecao, &corpo)
}

async fn put_registo(
    State(fake): State<FakeBackend>,
    Path((colecao, id)): Path<(String, String)>,
    Json(corpo): Json<Value>,
) -> Response {
    fake.atualizar(&colecao, &id, &corpo)
}

async fn delete_registo(
    State(fake): State<FakeBackend>,
    Path((colecao, id)): Path<(String, String)>,
) -> Response {
    fake.remover(&colecao, &id)
}

/// Serve um router numa porta efémera e devolve o URL base.
pub async fn servir(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Sobe a API falsa e devolve o estado partilhado e o URL base.
pub async fn iniciar_fake() -> (FakeBackend, String) {
    let fake = FakeBackend::default();
    let router = Router::new()
        .route("/api/data", get(get_data))
        .route("/api/{colecao}", post(post_colecao))
        .route("/api/{colecao}/{id}", axum::routing::put(put_registo).delete(delete_registo))
        .layer(middleware::from_fn_with_state(fake.clone(), registar))
        .with_state(fake.clone());
    let base = servir(router).await;
    (fake, base)
}

/// URL para o qual nada está a escutar.
pub async fn url_sem_servidor() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

// --- Browser mínimo para o painel ---

pub struct Navegador {
    app: Router,
    cookie: Option<String>,
}

pub struct Resposta {
    pub status: StatusCode,
    pub location: Option<String>,
    pub html: String,
}

impl Navegador {
    pub async fn new(api_base: &str) -> Self {
        Self::com_timeout(api_base, Duration::from_secs(2)).await
    }

    pub async fn com_timeout(api_base: &str, timeout: Duration) -> Self {
        let api = ApiClient::new(api_base, timeout).unwrap();
        let store = create_session_store("sqlite::memory:").await.unwrap();
        let app = create_app(AppState { api }, store, time::Duration::hours(1));
        Self { app, cookie: None }
    }

    /// O servidor já emitiu um cookie de sessão para este browser.
    pub fn tem_sessao(&self) -> bool {
        self.cookie.is_some()
    }

    async fn enviar(&mut self, request: axum::http::request::Builder, body: Body) -> Resposta {
        let request = match &self.cookie {
            Some(cookie) => request.header(header::COOKIE, cookie),
            None => request,
        };
        let response = self.app.clone().oneshot(request.body(body).unwrap()).await.unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let valor = set_cookie.to_str().unwrap();
            self.cookie = valor.split(';').next().map(str::to_string);
        }
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        Resposta {
            status,
            location,
            html: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    pub async fn pagina(&mut self) -> String {
        let resposta = self
            .enviar(axum::http::Request::get("/"), Body::empty())
            .await;
        assert_eq!(resposta.status, StatusCode::OK);
        resposta.html
    }

    pub async fn post(&mut self, uri: &str, campos: &[(&str, &str)]) -> Resposta {
        let corpo = campos
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let request = axum::http::Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        self.enviar(request, Body::from(corpo)).await
    }

    /// POST que tem de terminar em redirect para `/`.
    pub async fn submeter(&mut self, uri: &str, campos: &[(&str, &str)]) {
        let resposta = self.post(uri, campos).await;
        assert_eq!(resposta.status, StatusCode::SEE_OTHER, "POST {} -> {}", uri, resposta.html);
        assert_eq!(resposta.location.as_deref(), Some("/"));
    }
}

// --- Leitura do HTML ---

fn seletor(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

/// Nomes das secções sem o atributo `hidden`.
pub fn secoes_visiveis(html: &str) -> Vec<String> {
    let documento = Html::parse_document(html);
    documento
        .select(&seletor("section.section:not([hidden])"))
        .filter_map(|secao| secao.value().id())
        .map(|id| id.trim_end_matches("-section").to_string())
        .collect()
}

/// Número de `<option>` dentro do `<select id="...">`.
pub fn opcoes_do_select(html: &str, id: &str) -> usize {
    let documento = Html::parse_document(html);
    let select = documento
        .select(&seletor(&format!("select#{}", id)))
        .next()
        .unwrap_or_else(|| panic!("select {} ausente", id));
    select.select(&seletor("option")).count()
}

/// Atributo `value` do `<input id="...">`.
pub fn valor_do_input(html: &str, id: &str) -> String {
    let documento = Html::parse_document(html);
    let input = documento
        .select(&seletor(&format!("input#{}", id)))
        .next()
        .unwrap_or_else(|| panic!("input {} ausente", id));
    input.value().attr("value").unwrap_or_default().to_string()
}

/// Elemento com o id dado está presente na página.
pub fn tem_elemento(html: &str, id: &str) -> bool {
    Html::parse_document(html)
        .select(&seletor(&format!("#{}", id)))
        .next()
        .is_some()
}

/// Texto de cada linha de uma lista (`<div id="...">` com `.item-list`).
pub fn linhas_da_lista(html: &str, container_id: &str) -> Vec<String> {
    let documento = Html::parse_document(html);
    documento
        .select(&seletor(&format!("#{} .item-list > span", container_id)))
        .map(|span| span.text().collect::<String>())
        .collect()
}

/// Atributos `action` dos formulários dentro de um container.
pub fn acoes_da_lista(html: &str, container_id: &str) -> Vec<String> {
    let documento = Html::parse_document(html);
    documento
        .select(&seletor(&format!("#{} form", container_id)))
        .filter_map(|form| form.value().attr("action").map(str::to_string))
        .collect()
}
