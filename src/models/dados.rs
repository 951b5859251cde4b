// src/models/dados.rs
use serde::{Deserialize, Serialize};

// --- Registos tal como chegam de GET /api/data ---
// Os campos de nome (turma_nome, aluno_nome, ...) já vêm desnormalizados pelo servidor.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Turma {
    pub id: String,
    pub nome: String,
    // Ofertas desta turma (com os alunos matriculados), quando o servidor as envia
    #[serde(default)]
    pub disciplinas: Vec<OfertaDaTurma>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfertaDaTurma {
    pub id: String,
    pub codigo: String,
    pub nome: String,
    pub professor: String,
    #[serde(default)]
    pub disciplina_catalogo_id: String,
    #[serde(default)]
    pub alunos: Vec<AlunoMatriculado>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlunoMatriculado {
    pub id: String,
    pub matricula: String,
    pub nome: String,
    #[serde(default)]
    pub telefone: String,
    #[serde(default)]
    pub matricula_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisciplinaCatalogo {
    pub id: String,
    pub codigo: String,
    pub nome: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aluno {
    pub id: String,
    pub matricula: String,
    pub nome: String,
    pub telefone: String,
}

/// Oferta de uma disciplina do catálogo numa turma (`turma_disciplinas_ofertas`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Oferta {
    pub id: String,
    pub turma_id: String,
    pub turma_nome: String,
    pub disciplina_catalogo_id: String,
    pub disciplina_codigo: String,
    pub disciplina_nome: String,
    pub professor: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Matricula {
    pub id: String,
    pub aluno_id: String,
    pub aluno_matricula: String,
    pub aluno_nome: String,
    pub turma_disciplina_id: String,
    pub turma_nome: String,
    pub disciplina_nome: String,
    pub professor: String,
}

/// Fotografia completa dos dados. Substituída por inteiro a cada busca, nunca fundida.
/// Coleções ausentes no JSON ficam vazias.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub turmas: Vec<Turma>,
    #[serde(default)]
    pub disciplinas_catalogo: Vec<DisciplinaCatalogo>,
    #[serde(default)]
    pub alunos: Vec<Aluno>,
    #[serde(default)]
    pub turma_disciplinas_ofertas: Vec<Oferta>,
    #[serde(default)]
    pub matriculas: Vec<Matricula>,
}

/// Corpo de resposta das mutações: `{message}` em caso de sucesso, `{error}` em falha.
#[derive(Debug, Default, Deserialize)]
pub struct RespostaApi {
    pub message: Option<String>,
    pub error: Option<String>,
}
