// src/templates.rs
use askama::Template; // Trait necessário para Askama
use crate::{
    models::{dados::Snapshot, formularios::Rascunhos},
    services::{
        painel_service::{Aviso, EstadoPainel, TermosBusca},
        render_service::{self, Dropdowns, ListaView, ModalView, SecaoView},
    },
};

// Página única do painel (ficheiro externo em templates/painel.html)
#[derive(Template)]
#[template(path = "painel.html")]
pub struct PainelPage {
    pub secao_ativa: &'static str,
    pub secoes: Vec<SecaoView>,
    // As cinco listas são sempre renderizadas, mesmo as das secções escondidas
    pub turmas: ListaView,
    pub disciplinas: ListaView,
    pub alunos: ListaView,
    pub ofertas: ListaView,
    pub matriculas: ListaView,
    pub dropdowns: Dropdowns,
    // Valores atuais dos formulários de cadastro e das caixas de busca
    pub rascunhos: Rascunhos,
    pub termos: TermosBusca,
    pub modal: Option<ModalView>,
    pub pergunta_remocao: Option<&'static str>,
    pub avisos: Vec<Aviso>,
}

impl PainelPage {
    /// Monta a página a partir do snapshot buscado neste pedido e do estado da sessão.
    /// `avisos` já foram retirados do estado (são mostrados uma vez).
    pub fn new(estado: &EstadoPainel, snapshot: &Snapshot, avisos: Vec<Aviso>) -> Self {
        PainelPage {
            secao_ativa: estado.secao_ativa.as_str(),
            secoes: render_service::secoes(estado.secao_ativa),
            turmas: render_service::lista_turmas(&snapshot.turmas),
            disciplinas: render_service::lista_disciplinas(&snapshot.disciplinas_catalogo),
            alunos: render_service::lista_alunos(&snapshot.alunos),
            ofertas: render_service::lista_ofertas(&snapshot.turma_disciplinas_ofertas),
            matriculas: render_service::lista_matriculas(&snapshot.matriculas),
            dropdowns: render_service::dropdowns(snapshot, &estado.rascunhos),
            rascunhos: estado.rascunhos.clone(),
            termos: estado.termos_busca.clone(),
            modal: render_service::modal(&estado.edicao),
            pergunta_remocao: estado
                .remocao_pendente
                .as_ref()
                .map(|_| render_service::PERGUNTA_REMOCAO),
            avisos,
        }
    }
}
