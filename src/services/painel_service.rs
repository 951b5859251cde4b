// src/services/painel_service.rs
//
// Estado do painel por sessão e as ações que o alteram.
// Toda a mudança de estado passa por `EstadoPainel::aplicar`; as funções assíncronas
// abaixo fazem o pedido à API e traduzem o resultado numa `Acao`.
use crate::{
    error::ApiError,
    models::{
        dados::Snapshot,
        entidade::{Entidade, Secao, TipoBusca},
        formularios::{FormularioEdicao, Rascunho, Rascunhos},
    },
    services::api_client::{ApiClient, Filtro},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const FALHA_AO_CARREGAR: &str = "Erro ao carregar dados do servidor.";
pub const FALHA_AO_SALVAR_EDICAO: &str = "Erro ao salvar edição.";
pub const FALHA_AO_REMOVER: &str = "Erro ao remover item.";
pub const NADA_EM_EDICAO: &str = "Nenhum item selecionado para edição.";
pub const NADA_A_REMOVER: &str = "Nenhum item selecionado para remoção.";

/// Termos de busca por chave. Persistem entre trocas de secção.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermosBusca {
    pub turma: String,
    pub disciplina: String,
    pub aluno: String,
}

impl TermosBusca {
    pub fn termo(&self, tipo: TipoBusca) -> &str {
        match tipo {
            TipoBusca::Turma => &self.turma,
            TipoBusca::Disciplina => &self.disciplina,
            TipoBusca::Aluno => &self.aluno,
        }
    }

    fn definir(&mut self, tipo: TipoBusca, termo: String) {
        match tipo {
            TipoBusca::Turma => self.turma = termo,
            TipoBusca::Disciplina => self.disciplina = termo,
            TipoBusca::Aluno => self.aluno = termo,
        }
    }
}

/// Modal de edição partilhado: fechado, ou a editar um registo de um tipo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "estado", rename_all = "snake_case")]
pub enum Edicao {
    #[default]
    Fechada,
    Editando {
        id: String,
        formulario: FormularioEdicao,
    },
}

/// Registo à espera de confirmação de remoção.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlvoRemocao {
    pub entidade: Entidade,
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipoAviso {
    Sucesso,
    Erro,
}

/// Aviso mostrado uma única vez, no próximo carregamento da página.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aviso {
    pub tipo: TipoAviso,
    pub texto: String,
}

impl Aviso {
    pub fn sucesso(texto: impl Into<String>) -> Self {
        Self { tipo: TipoAviso::Sucesso, texto: texto.into() }
    }

    pub fn erro(texto: impl Into<String>) -> Self {
        Self { tipo: TipoAviso::Erro, texto: texto.into() }
    }

    pub fn is_erro(&self) -> bool {
        self.tipo == TipoAviso::Erro
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Acao {
    MostrarSecao(Secao),
    DefinirBusca { tipo: TipoBusca, termo: String },
    CadastroRejeitado { rascunho: Rascunho, aviso: String },
    CadastroConcluido { entidade: Entidade, mensagem: String },
    AbrirEdicao { id: String, formulario: FormularioEdicao },
    // O modal continua aberto com o que o utilizador escreveu
    EdicaoRejeitada { formulario: Option<FormularioEdicao>, aviso: String },
    EdicaoConcluida { mensagem: String },
    FecharEdicao,
    PedirRemocao(AlvoRemocao),
    CancelarRemocao,
    RemocaoConcluida { entidade: Entidade, mensagem: String },
    RemocaoFalhou { aviso: String },
    Avisar(Aviso),
}

/// Estado do painel guardado na sessão. O snapshot não faz parte dele:
/// é buscado de novo a cada carregamento da página.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EstadoPainel {
    pub secao_ativa: Secao,
    pub termos_busca: TermosBusca,
    pub edicao: Edicao,
    pub remocao_pendente: Option<AlvoRemocao>,
    pub rascunhos: Rascunhos,
    #[serde(default)]
    avisos: Vec<Aviso>,
}

impl EstadoPainel {
    /// Único ponto de entrada para alterar o estado.
    pub fn aplicar(&mut self, acao: Acao) {
        match acao {
            Acao::MostrarSecao(secao) => self.secao_ativa = secao,
            Acao::DefinirBusca { tipo, termo } => self.termos_busca.definir(tipo, termo),
            Acao::CadastroRejeitado { rascunho, aviso } => {
                self.rascunhos.guardar(rascunho);
                self.avisos.push(Aviso::erro(aviso));
            }
            Acao::CadastroConcluido { entidade, mensagem } => {
                self.rascunhos.limpar(entidade);
                self.secao_ativa = entidade.secao_apos_criar();
                self.avisos.push(Aviso::sucesso(mensagem));
            }
            Acao::AbrirEdicao { id, formulario } => {
                self.edicao = Edicao::Editando { id, formulario };
            }
            Acao::EdicaoRejeitada { formulario, aviso } => {
                if let (Edicao::Editando { formulario: atual, .. }, Some(novo)) =
                    (&mut self.edicao, formulario)
                {
                    *atual = novo;
                }
                self.avisos.push(Aviso::erro(aviso));
            }
            Acao::EdicaoConcluida { mensagem } => {
                self.edicao = Edicao::Fechada;
                self.avisos.push(Aviso::sucesso(mensagem));
            }
            Acao::FecharEdicao => self.edicao = Edicao::Fechada,
            Acao::PedirRemocao(alvo) => self.remocao_pendente = Some(alvo),
            Acao::CancelarRemocao => self.remocao_pendente = None,
            Acao::RemocaoConcluida { entidade, mensagem } => {
                self.remocao_pendente = None;
                self.secao_ativa = entidade.secao_apos_remover();
                self.avisos.push(Aviso::sucesso(mensagem));
            }
            Acao::RemocaoFalhou { aviso } => {
                self.remocao_pendente = None;
                self.avisos.push(Aviso::erro(aviso));
            }
            Acao::Avisar(aviso) => self.avisos.push(aviso),
        }
    }

    /// Filtro a enviar: só o termo da secção ativa, e só se não estiver vazio.
    pub fn filtro_ativo(&self) -> Option<Filtro> {
        let tipo = self.secao_ativa.tipo_busca()?;
        let termo = self.termos_busca.termo(tipo).trim();
        if termo.is_empty() {
            return None;
        }
        Some(Filtro {
            parametro: tipo.parametro(),
            termo: termo.to_string(),
        })
    }

    /// Retira os avisos pendentes (são mostrados uma única vez).
    pub fn tomar_avisos(&mut self) -> Vec<Aviso> {
        std::mem::take(&mut self.avisos)
    }
}

/// Busca o snapshot para a secção ativa. Em falha mostra o aviso genérico
/// e devolve um snapshot vazio; não há nova tentativa.
pub async fn carregar_snapshot(api: &ApiClient, estado: &mut EstadoPainel) -> Snapshot {
    let filtro = estado.filtro_ativo();
    match api.buscar_dados(filtro.as_ref()).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!(secao = %estado.secao_ativa, "Erro ao buscar dados: {}", e);
            estado.aplicar(Acao::Avisar(Aviso::erro(FALHA_AO_CARREGAR)));
            Snapshot::default()
        }
    }
}

/// Cadastro: valida localmente (sem pedido se faltar algum campo) e faz o POST.
pub async fn cadastrar(api: &ApiClient, estado: &mut EstadoPainel, rascunho: Rascunho) {
    let entidade = rascunho.entidade();
    if let Err(mensagem) = rascunho.validar() {
        tracing::warn!(entidade = entidade.colecao(), "Cadastro recusado: campos obrigatórios em falta");
        estado.aplicar(Acao::CadastroRejeitado {
            rascunho,
            aviso: mensagem.to_string(),
        });
        return;
    }

    match api.criar(entidade, &rascunho.corpo()).await {
        Ok(mensagem) => {
            tracing::info!(entidade = entidade.colecao(), "✅ Cadastro concluído");
            estado.aplicar(Acao::CadastroConcluido { entidade, mensagem });
        }
        Err(e) => {
            log_falha("cadastro", entidade, &e);
            let aviso = e.aviso(entidade.falha_ao_criar());
            estado.aplicar(Acao::CadastroRejeitado { rascunho, aviso });
        }
    }
}

/// Guarda o modal de edição aberto com os valores submetidos.
pub async fn salvar_edicao(
    api: &ApiClient,
    estado: &mut EstadoPainel,
    valores: &HashMap<String, String>,
) {
    let (id, formulario) = match &estado.edicao {
        Edicao::Editando { id, formulario } => (id.clone(), formulario.com_valores(valores)),
        Edicao::Fechada => {
            tracing::warn!("Tentativa de salvar edição sem modal aberto");
            estado.aplicar(Acao::Avisar(Aviso::erro(NADA_EM_EDICAO)));
            return;
        }
    };

    if let Err(mensagem) = formulario.validar() {
        estado.aplicar(Acao::EdicaoRejeitada {
            formulario: Some(formulario),
            aviso: mensagem.to_string(),
        });
        return;
    }

    let entidade = formulario.entidade();
    match api.atualizar(entidade, &id, &formulario.corpo()).await {
        Ok(mensagem) => {
            tracing::info!(entidade = entidade.colecao(), %id, "✅ Edição guardada");
            estado.aplicar(Acao::EdicaoConcluida { mensagem });
        }
        Err(e) => {
            log_falha("edição", entidade, &e);
            estado.aplicar(Acao::EdicaoRejeitada {
                formulario: Some(formulario),
                aviso: e.aviso(FALHA_AO_SALVAR_EDICAO),
            });
        }
    }
}

/// Executa a remoção pendente. Sem confirmação pendente não há pedido.
pub async fn confirmar_remocao(api: &ApiClient, estado: &mut EstadoPainel) {
    let Some(alvo) = estado.remocao_pendente.clone() else {
        tracing::warn!("Confirmação de remoção sem item pendente");
        estado.aplicar(Acao::Avisar(Aviso::erro(NADA_A_REMOVER)));
        return;
    };

    match api.remover(alvo.entidade, &alvo.id).await {
        Ok(mensagem) => {
            tracing::info!(entidade = alvo.entidade.colecao(), id = %alvo.id, "🗑️ Registo removido");
            estado.aplicar(Acao::RemocaoConcluida {
                entidade: alvo.entidade,
                mensagem,
            });
        }
        Err(e) => {
            log_falha("remoção", alvo.entidade, &e);
            estado.aplicar(Acao::RemocaoFalhou {
                aviso: e.aviso(FALHA_AO_REMOVER),
            });
        }
    }
}

fn log_falha(operacao: &str, entidade: Entidade, erro: &ApiError) {
    match erro {
        ApiError::Api { .. } => {
            tracing::warn!(entidade = entidade.colecao(), "Falha de {}: {}", operacao, erro)
        }
        _ => tracing::error!(entidade = entidade.colecao(), "Falha de {}: {}", operacao, erro),
    }
}
