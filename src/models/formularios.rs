// src/models/formularios.rs
use crate::models::entidade::Entidade;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;

// --- Campos dos formulários ---
// As mesmas structs servem para ler o formulário HTML e para montar o corpo JSON.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CamposTurma {
    #[serde(default)]
    pub nome: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CamposDisciplina {
    #[serde(default)]
    pub codigo: String,
    #[serde(default)]
    pub nome: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CamposAluno {
    #[serde(default)]
    pub matricula: String,
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub telefone: String,
}

// Na edição de uma oferta só o professor muda; turma e disciplina não são editáveis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CamposOferta {
    #[serde(default)]
    pub professor: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NovaOferta {
    #[serde(default)]
    pub turma_id: String,
    #[serde(default)]
    pub disciplina_catalogo_id: String,
    #[serde(default)]
    pub professor: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NovaMatricula {
    #[serde(default)]
    pub aluno_id: String,
    #[serde(default)]
    pub turma_disciplina_id: String,
}

fn preenchido(valor: &str) -> bool {
    !valor.trim().is_empty()
}

/// Dados de um formulário de cadastro, um variante por entidade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tipo", content = "campos", rename_all = "snake_case")]
pub enum Rascunho {
    Turma(CamposTurma),
    Disciplina(CamposDisciplina),
    Aluno(CamposAluno),
    Oferta(NovaOferta),
    Matricula(NovaMatricula),
}

impl Rascunho {
    pub fn entidade(&self) -> Entidade {
        match self {
            Rascunho::Turma(_) => Entidade::Turma,
            Rascunho::Disciplina(_) => Entidade::Disciplina,
            Rascunho::Aluno(_) => Entidade::Aluno,
            Rascunho::Oferta(_) => Entidade::Oferta,
            Rascunho::Matricula(_) => Entidade::Matricula,
        }
    }

    /// Verifica os campos obrigatórios. O erro é a mensagem mostrada ao utilizador.
    pub fn validar(&self) -> Result<(), &'static str> {
        let completo = match self {
            Rascunho::Turma(c) => preenchido(&c.nome),
            Rascunho::Disciplina(c) => preenchido(&c.codigo) && preenchido(&c.nome),
            Rascunho::Aluno(c) => {
                preenchido(&c.matricula) && preenchido(&c.nome) && preenchido(&c.telefone)
            }
            Rascunho::Oferta(c) => {
                preenchido(&c.turma_id)
                    && preenchido(&c.disciplina_catalogo_id)
                    && preenchido(&c.professor)
            }
            Rascunho::Matricula(c) => preenchido(&c.aluno_id) && preenchido(&c.turma_disciplina_id),
        };
        if completo {
            return Ok(());
        }
        Err(match self {
            Rascunho::Turma(_) => "Preencha o nome da turma.",
            Rascunho::Disciplina(_) => {
                "Preencha todos os campos para adicionar a disciplina ao catálogo."
            }
            Rascunho::Aluno(_) => "Preencha todos os campos para adicionar o aluno.",
            Rascunho::Oferta(_) => {
                "Selecione a turma, a disciplina e preencha o professor para adicionar a oferta."
            }
            Rascunho::Matricula(_) => {
                "Selecione o aluno e a oferta de disciplina para realizar a matrícula."
            }
        })
    }

    /// Corpo JSON de POST /api/<colecao>.
    pub fn corpo(&self) -> Value {
        match self {
            Rascunho::Turma(c) => json!({ "nome": c.nome }),
            Rascunho::Disciplina(c) => json!({ "codigo": c.codigo, "nome": c.nome }),
            Rascunho::Aluno(c) => json!({
                "matricula": c.matricula,
                "nome": c.nome,
                "telefone": c.telefone,
            }),
            Rascunho::Oferta(c) => json!({
                "turma_id": c.turma_id,
                "disciplina_catalogo_id": c.disciplina_catalogo_id,
                "professor": c.professor,
            }),
            Rascunho::Matricula(c) => json!({
                "aluno_id": c.aluno_id,
                "turma_disciplina_id": c.turma_disciplina_id,
            }),
        }
    }
}

/// Rascunhos dos cinco formulários de cadastro. Só são limpos depois de um cadastro aceite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rascunhos {
    pub turma: CamposTurma,
    pub disciplina: CamposDisciplina,
    pub aluno: CamposAluno,
    pub oferta: NovaOferta,
    pub matricula: NovaMatricula,
}

impl Rascunhos {
    pub fn guardar(&mut self, rascunho: Rascunho) {
        match rascunho {
            Rascunho::Turma(c) => self.turma = c,
            Rascunho::Disciplina(c) => self.disciplina = c,
            Rascunho::Aluno(c) => self.aluno = c,
            Rascunho::Oferta(c) => self.oferta = c,
            Rascunho::Matricula(c) => self.matricula = c,
        }
    }

    pub fn limpar(&mut self, entidade: Entidade) {
        match entidade {
            Entidade::Turma => self.turma = CamposTurma::default(),
            Entidade::Disciplina => self.disciplina = CamposDisciplina::default(),
            Entidade::Aluno => self.aluno = CamposAluno::default(),
            Entidade::Oferta => self.oferta = NovaOferta::default(),
            Entidade::Matricula => self.matricula = NovaMatricula::default(),
        }
    }
}

/// Formulário do modal de edição. Cada variante define os campos editáveis da sua entidade;
/// matrículas não são editáveis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tipo", content = "campos", rename_all = "snake_case")]
pub enum FormularioEdicao {
    Turma(CamposTurma),
    Disciplina(CamposDisciplina),
    Aluno(CamposAluno),
    Oferta(CamposOferta),
}

impl FormularioEdicao {
    pub fn entidade(&self) -> Entidade {
        match self {
            FormularioEdicao::Turma(_) => Entidade::Turma,
            FormularioEdicao::Disciplina(_) => Entidade::Disciplina,
            FormularioEdicao::Aluno(_) => Entidade::Aluno,
            FormularioEdicao::Oferta(_) => Entidade::Oferta,
        }
    }

    /// Novo formulário do mesmo tipo com os valores submetidos no modal.
    /// Campos ausentes ficam vazios (e falham a validação).
    pub fn com_valores(&self, valores: &HashMap<String, String>) -> FormularioEdicao {
        let campo = |nome: &str| valores.get(nome).cloned().unwrap_or_default();
        match self {
            FormularioEdicao::Turma(_) => FormularioEdicao::Turma(CamposTurma { nome: campo("nome") }),
            FormularioEdicao::Disciplina(_) => FormularioEdicao::Disciplina(CamposDisciplina {
                codigo: campo("codigo"),
                nome: campo("nome"),
            }),
            FormularioEdicao::Aluno(_) => FormularioEdicao::Aluno(CamposAluno {
                matricula: campo("matricula"),
                nome: campo("nome"),
                telefone: campo("telefone"),
            }),
            FormularioEdicao::Oferta(_) => FormularioEdicao::Oferta(CamposOferta {
                professor: campo("professor"),
            }),
        }
    }

    pub fn validar(&self) -> Result<(), &'static str> {
        match self {
            FormularioEdicao::Turma(c) if !preenchido(&c.nome) => Err("Nome da turma é obrigatório."),
            FormularioEdicao::Disciplina(c) if !preenchido(&c.codigo) || !preenchido(&c.nome) => {
                Err("Código e nome da disciplina são obrigatórios.")
            }
            FormularioEdicao::Aluno(c)
                if !preenchido(&c.matricula) || !preenchido(&c.nome) || !preenchido(&c.telefone) =>
            {
                Err("Matrícula, nome e telefone são obrigatórios.")
            }
            FormularioEdicao::Oferta(c) if !preenchido(&c.professor) => Err("Professor é obrigatório."),
            _ => Ok(()),
        }
    }

    /// Corpo JSON de PUT /api/<colecao>/<id>: só os campos editáveis.
    pub fn corpo(&self) -> Value {
        match self {
            FormularioEdicao::Turma(c) => json!({ "nome": c.nome }),
            FormularioEdicao::Disciplina(c) => json!({ "codigo": c.codigo, "nome": c.nome }),
            FormularioEdicao::Aluno(c) => json!({
                "matricula": c.matricula,
                "nome": c.nome,
                "telefone": c.telefone,
            }),
            FormularioEdicao::Oferta(c) => json!({ "professor": c.professor }),
        }
    }
}
