// src/models/entidade.rs
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// As quatro secções do painel. Só uma está ativa de cada vez.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Secao {
    #[default]
    Turmas,
    DisciplinasCatalogo,
    Alunos,
    // Ofertas e matrículas partilham esta secção
    Matriculas,
}

impl Secao {
    pub const TODAS: [Secao; 4] = [
        Secao::Turmas,
        Secao::DisciplinasCatalogo,
        Secao::Alunos,
        Secao::Matriculas,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Secao::Turmas => "turmas",
            Secao::DisciplinasCatalogo => "disciplinas_catalogo",
            Secao::Alunos => "alunos",
            Secao::Matriculas => "matriculas",
        }
    }

    pub fn titulo(&self) -> &'static str {
        match self {
            Secao::Turmas => "Turmas",
            Secao::DisciplinasCatalogo => "Catálogo de Disciplinas",
            Secao::Alunos => "Alunos",
            Secao::Matriculas => "Ofertas e Matrículas",
        }
    }

    /// Chave de busca associada à secção (a secção de matrículas não tem busca).
    pub fn tipo_busca(&self) -> Option<TipoBusca> {
        match self {
            Secao::Turmas => Some(TipoBusca::Turma),
            Secao::DisciplinasCatalogo => Some(TipoBusca::Disciplina),
            Secao::Alunos => Some(TipoBusca::Aluno),
            Secao::Matriculas => None,
        }
    }
}

impl fmt::Display for Secao {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Secao {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Secao::TODAS
            .into_iter()
            .find(|secao| secao.as_str() == s)
            .ok_or_else(|| format!("Secção desconhecida: {}", s))
    }
}

/// Chaves dos termos de busca guardados entre trocas de secção.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipoBusca {
    Turma,
    Disciplina,
    Aluno,
}

impl TipoBusca {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoBusca::Turma => "turma",
            TipoBusca::Disciplina => "disciplina",
            TipoBusca::Aluno => "aluno",
        }
    }

    /// Nome do parâmetro de query em GET /api/data.
    pub fn parametro(&self) -> &'static str {
        match self {
            TipoBusca::Turma => "search_turma",
            TipoBusca::Disciplina => "search_disciplina",
            TipoBusca::Aluno => "search_aluno",
        }
    }
}

impl FromStr for TipoBusca {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "turma" => Ok(TipoBusca::Turma),
            "disciplina" => Ok(TipoBusca::Disciplina),
            "aluno" => Ok(TipoBusca::Aluno),
            outro => Err(format!("Tipo de busca desconhecido: {}", outro)),
        }
    }
}

/// Os cinco tipos de registo geridos pelo painel, cada um com a sua coleção REST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entidade {
    Turma,
    Disciplina,
    Aluno,
    Oferta,
    Matricula,
}

impl Entidade {
    pub const TODAS: [Entidade; 5] = [
        Entidade::Turma,
        Entidade::Disciplina,
        Entidade::Aluno,
        Entidade::Oferta,
        Entidade::Matricula,
    ];

    /// Segmento da coleção em /api/<colecao>.
    pub fn colecao(&self) -> &'static str {
        match self {
            Entidade::Turma => "turmas",
            Entidade::Disciplina => "disciplinas_catalogo",
            Entidade::Aluno => "alunos",
            Entidade::Oferta => "turma_disciplinas_ofertas",
            Entidade::Matricula => "matriculas",
        }
    }

    pub fn from_colecao(colecao: &str) -> Option<Entidade> {
        Entidade::TODAS.into_iter().find(|e| e.colecao() == colecao)
    }

    /// Secção recarregada depois de um cadastro bem-sucedido.
    pub fn secao_apos_criar(&self) -> Secao {
        match self {
            Entidade::Turma => Secao::Turmas,
            Entidade::Disciplina => Secao::DisciplinasCatalogo,
            Entidade::Aluno => Secao::Alunos,
            Entidade::Oferta | Entidade::Matricula => Secao::Matriculas,
        }
    }

    /// Secção recarregada depois de uma remoção. As ofertas aparecem na secção de matrículas.
    pub fn secao_apos_remover(&self) -> Secao {
        self.secao_apos_criar()
    }

    /// Aviso genérico para falhas de rede ao cadastrar.
    pub fn falha_ao_criar(&self) -> &'static str {
        match self {
            Entidade::Turma => "Erro ao adicionar turma.",
            Entidade::Disciplina => "Erro ao adicionar disciplina ao catálogo.",
            Entidade::Aluno => "Erro ao adicionar aluno.",
            Entidade::Oferta => "Erro ao adicionar oferta de disciplina.",
            Entidade::Matricula => "Erro ao realizar matrícula.",
        }
    }
}
