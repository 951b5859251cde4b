// src/services/render_service.rs
//
// Constrói os modelos de vista (listas, dropdowns, modal) a partir do snapshot e do
// estado. O HTML fica nos templates Askama, que escapam todos os valores.
use crate::{
    models::{
        dados::{Aluno, DisciplinaCatalogo, Matricula, Oferta, Snapshot, Turma},
        entidade::{Entidade, Secao},
        formularios::{FormularioEdicao, Rascunhos},
    },
    services::painel_service::Edicao,
};

pub const PERGUNTA_REMOCAO: &str = "Tem certeza que deseja remover este item?";

#[derive(Debug, Clone, PartialEq)]
pub struct CampoOculto {
    pub nome: &'static str,
    pub valor: String,
}

/// Botão de ação de uma linha: um formulário POST com os dados do registo em campos ocultos.
#[derive(Debug, Clone, PartialEq)]
pub struct BotaoLinha {
    pub rotulo: &'static str,
    pub action: String,
    pub campos: Vec<CampoOculto>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinhaLista {
    pub texto: String,
    // Vazio quando não há nada a acrescentar
    pub detalhe: String,
    pub acoes: Vec<BotaoLinha>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListaView {
    pub container_id: &'static str,
    /// Texto mostrado quando a coleção está vazia.
    pub vazia: &'static str,
    pub linhas: Vec<LinhaLista>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpcaoView {
    pub valor: String,
    pub rotulo: String,
    pub selecionada: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropdownView {
    pub id: &'static str,
    pub nome: &'static str,
    /// A primeira opção é sempre o marcador "Selecione…" de valor vazio.
    pub opcoes: Vec<OpcaoView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dropdowns {
    pub ofertas_para_matricula: DropdownView,
    pub alunos_para_matricula: DropdownView,
    pub turmas_para_oferta: DropdownView,
    pub disciplinas_para_oferta: DropdownView,
}


#[derive(Debug, Clone, PartialEq)]
pub struct CampoModal {
    pub id: &'static str,
    pub nome: &'static str,
    pub rotulo: &'static str,
    pub valor: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModalView {
    pub titulo: &'static str,
    pub campos: Vec<CampoModal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SecaoView {
    pub nome: &'static str,
    pub titulo: &'static str,
    pub visivel: bool,
}

/// Todas as secções, só a ativa visível.
pub fn secoes(ativa: Secao) -> Vec<SecaoView> {
    Secao::TODAS
        .into_iter()
        .map(|secao| SecaoView {
            nome: secao.as_str(),
            titulo: secao.titulo(),
            visivel: secao == ativa,
        })
        .collect()
}

fn oculto(nome: &'static str, valor: &str) -> CampoOculto {
    CampoOculto { nome, valor: valor.to_string() }
}

fn caminho(prefixo: &str, entidade: Entidade, id: &str) -> String {
    format!("/{}/{}/{}", prefixo, entidade.colecao(), urlencoding::encode(id))
}

fn botao_editar(entidade: Entidade, id: &str, campos: Vec<CampoOculto>) -> BotaoLinha {
    BotaoLinha {
        rotulo: "Editar",
        action: caminho("editar", entidade, id),
        campos,
    }
}

fn botao_remover(entidade: Entidade, id: &str) -> BotaoLinha {
    BotaoLinha {
        rotulo: "Remover",
        action: caminho("remover", entidade, id),
        campos: Vec::new(),
    }
}

// --- Listas ---

pub fn lista_turmas(turmas: &[Turma]) -> ListaView {
    let linhas = turmas
        .iter()
        .map(|turma| {
            let detalhe = if turma.disciplinas.is_empty() {
                String::new()
            } else {
                let ofertas: Vec<String> = turma
                    .disciplinas
                    .iter()
                    .map(|o| format!("{} ({})", o.codigo, o.professor))
                    .collect();
                format!("Ofertas ({}): {}", ofertas.len(), ofertas.join(", "))
            };
            LinhaLista {
                texto: format!("ID: {}, Nome: {}", turma.id, turma.nome),
                detalhe,
                acoes: vec![
                    botao_editar(Entidade::Turma, &turma.id, vec![oculto("nome", &turma.nome)]),
                    botao_remover(Entidade::Turma, &turma.id),
                ],
            }
        })
        .collect();
    ListaView {
        container_id: "turmas-list",
        vazia: "Nenhuma turma cadastrada (ou encontrada com o filtro).",
        linhas,
    }
}

pub fn lista_disciplinas(disciplinas: &[DisciplinaCatalogo]) -> ListaView {
    let linhas = disciplinas
        .iter()
        .map(|d| LinhaLista {
            texto: format!("ID: {}, Código: {}, Nome: {}", d.id, d.codigo, d.nome),
            detalhe: String::new(),
            acoes: vec![
                botao_editar(
                    Entidade::Disciplina,
                    &d.id,
                    vec![oculto("codigo", &d.codigo), oculto("nome", &d.nome)],
                ),
                botao_remover(Entidade::Disciplina, &d.id),
            ],
        })
        .collect();
    ListaView {
        container_id: "disciplinas-catalogo-list",
        vazia: "Nenhuma disciplina no catálogo (ou encontrada com o filtro).",
        linhas,
    }
}

pub fn lista_alunos(alunos: &[Aluno]) -> ListaView {
    let linhas = alunos
        .iter()
        .map(|a| LinhaLista {
            texto: format!(
                "ID: {}, Matrícula: {}, Nome: {}, Telefone: {}",
                a.id, a.matricula, a.nome, a.telefone
            ),
            detalhe: String::new(),
            acoes: vec![
                botao_editar(
                    Entidade::Aluno,
                    &a.id,
                    vec![
                        oculto("matricula", &a.matricula),
                        oculto("nome", &a.nome),
                        oculto("telefone", &a.telefone),
                    ],
                ),
                botao_remover(Entidade::Aluno, &a.id),
            ],
        })
        .collect();
    ListaView {
        container_id: "alunos-list",
        vazia: "Nenhum aluno cadastrado (ou encontrado com o filtro).",
        linhas,
    }
}

pub fn lista_ofertas(ofertas: &[Oferta]) -> ListaView {
    let linhas = ofertas
        .iter()
        .map(|o| LinhaLista {
            texto: format!(
                "ID Oferta: {}, Turma: {}, Disciplina: {} ({}), Professor: {}",
                o.id, o.turma_nome, o.disciplina_nome, o.disciplina_codigo, o.professor
            ),
            detalhe: String::new(),
            acoes: vec![
                botao_editar(Entidade::Oferta, &o.id, vec![oculto("professor", &o.professor)]),
                botao_remover(Entidade::Oferta, &o.id),
            ],
        })
        .collect();
    ListaView {
        container_id: "turma-disciplinas-ofertas-list",
        vazia: "Nenhuma oferta de disciplina cadastrada.",
        linhas,
    }
}

// Matrículas só se removem
pub fn lista_matriculas(matriculas: &[Matricula]) -> ListaView {
    let linhas = matriculas
        .iter()
        .map(|m| LinhaLista {
            texto: format!(
                "ID Matrícula: {}, Aluno: {} ({}), Disciplina: {} ({}) em {}",
                m.id, m.aluno_nome, m.aluno_matricula, m.disciplina_nome, m.professor, m.turma_nome
            ),
            detalhe: String::new(),
            acoes: vec![botao_remover(Entidade::Matricula, &m.id)],
        })
        .collect();
    ListaView {
        container_id: "matriculas-list-container",
        vazia: "Nenhuma matrícula cadastrada.",
        linhas,
    }
}

// --- Dropdowns ---

fn dropdown<'a, I>(id: &'static str, nome: &'static str, marcador: &str, escolhido: &str, itens: I) -> DropdownView
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    let mut opcoes = vec![OpcaoView {
        valor: String::new(),
        rotulo: marcador.to_string(),
        selecionada: escolhido.is_empty(),
    }];
    opcoes.extend(itens.into_iter().map(|(valor, rotulo)| OpcaoView {
        selecionada: !escolhido.is_empty() && valor == escolhido,
        valor: valor.to_string(),
        rotulo,
    }));
    DropdownView { id, nome, opcoes }
}

/// Reconstrói os quatro dropdowns de referência cruzada a partir do snapshot.
/// O valor do rascunho, se ainda existir no snapshot, fica selecionado.
pub fn dropdowns(snapshot: &Snapshot, rascunhos: &Rascunhos) -> Dropdowns {
    Dropdowns {
        ofertas_para_matricula: dropdown(
            "matricula-turma-disciplina-select",
            "turma_disciplina_id",
            "Selecione uma oferta de disciplina",
            &rascunhos.matricula.turma_disciplina_id,
            snapshot.turma_disciplinas_ofertas.iter().map(|o| {
                (
                    o.id.as_str(),
                    format!("Turma: {} - {} ({})", o.turma_nome, o.disciplina_nome, o.professor),
                )
            }),
        ),
        alunos_para_matricula: dropdown(
            "matricula-aluno-select",
            "aluno_id",
            "Selecione um aluno",
            &rascunhos.matricula.aluno_id,
            snapshot
                .alunos
                .iter()
                .map(|a| (a.id.as_str(), format!("{} ({})", a.nome, a.matricula))),
        ),
        turmas_para_oferta: dropdown(
            "oferta-turma-select",
            "turma_id",
            "Selecione uma turma",
            &rascunhos.oferta.turma_id,
            snapshot.turmas.iter().map(|t| (t.id.as_str(), t.nome.clone())),
        ),
        disciplinas_para_oferta: dropdown(
            "oferta-disciplina-select",
            "disciplina_catalogo_id",
            "Selecione uma disciplina do catálogo",
            &rascunhos.oferta.disciplina_catalogo_id,
            snapshot
                .disciplinas_catalogo
                .iter()
                .map(|d| (d.id.as_str(), format!("{} ({})", d.nome, d.codigo))),
        ),
    }
}

// --- Modal de edição ---

fn campo(id: &'static str, nome: &'static str, rotulo: &'static str, valor: &str) -> CampoModal {
    CampoModal { id, nome, rotulo, valor: valor.to_string() }
}

pub fn modal(edicao: &Edicao) -> Option<ModalView> {
    let Edicao::Editando { formulario, .. } = edicao else {
        return None;
    };
    let view = match formulario {
        FormularioEdicao::Turma(c) => ModalView {
            titulo: "Editar Turma",
            campos: vec![campo("edit-turma-nome", "nome", "Nome da Turma:", &c.nome)],
        },
        FormularioEdicao::Disciplina(c) => ModalView {
            titulo: "Editar Disciplina do Catálogo",
            campos: vec![
                campo("edit-disciplina-codigo", "codigo", "Código da Disciplina:", &c.codigo),
                campo("edit-disciplina-nome", "nome", "Nome da Disciplina:", &c.nome),
            ],
        },
        FormularioEdicao::Aluno(c) => ModalView {
            titulo: "Editar Aluno",
            campos: vec![
                campo("edit-aluno-matricula", "matricula", "Matrícula do Aluno:", &c.matricula),
                campo("edit-aluno-nome", "nome", "Nome do Aluno:", &c.nome),
                campo("edit-aluno-telefone", "telefone", "Telefone do Aluno:", &c.telefone),
            ],
        },
        FormularioEdicao::Oferta(c) => ModalView {
            titulo: "Editar Oferta de Disciplina",
            campos: vec![campo("edit-oferta-professor", "professor", "Professor:", &c.professor)],
        },
    };
    Some(view)
}
