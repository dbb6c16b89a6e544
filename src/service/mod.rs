//! Record services
//!
//! Orchestration per entity: validate input, check existence/uniqueness
//! preconditions through the gateway, perform the write, and map the
//! outcome into the service error taxonomy. Validation, not-found and
//! conflict conditions are classified here and never escape as unhandled
//! faults; genuinely unexpected storage failures are logged and replaced
//! by a fixed per-operation message so raw storage error text never
//! reaches a client.

mod enrollments;
mod students;

pub use enrollments::EnrollmentService;
pub use students::StudentService;

use thiserror::Error;

/// Client-facing outcome classification
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Malformed input; every violated-field message, in field order
    #[error("{}", .0.join(" "))]
    Validation(Vec<String>),

    /// Missing non-body request input (e.g. the search query parameter)
    #[error("{0}")]
    BadRequest(&'static str),

    /// Referenced entity does not exist
    #[error("{0}")]
    NotFound(&'static str),

    /// Uniqueness or business-rule violation
    #[error("{0}")]
    Conflict(&'static str),

    /// Unexpected failure during a write or single-record read
    #[error("{0}")]
    Unexpected(&'static str),

    /// Unexpected failure during a collection read
    #[error("{0}")]
    Internal(&'static str),
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Client-facing message text
pub mod messages {
    pub const STUDENT_NOT_FOUND: &str = "Aluno não encontrado";
    pub const STUDENT_DELETED: &str = "Aluno deletado com sucesso";
    pub const DUPLICATE_EMAIL: &str = "Este e-mail já está cadastrado";
    pub const DUPLICATE_RA: &str = "Este RA já está cadastrado";
    pub const DUPLICATE_CPF: &str = "Este CPF já está cadastrado";
    pub const SEARCH_QUERY_REQUIRED: &str = "Parâmetro de busca é obrigatório";

    pub const ENROLLMENT_NOT_FOUND: &str = "Matricula não encontrada";
    pub const ENROLLMENT_DELETED: &str = "Matricula deletada com sucesso";
    pub const DUPLICATE_ENROLLMENT: &str = "Este aluno já está matriculado neste curso";

    pub const CREATE_STUDENT_FAILED: &str = "Erro inesperado ao criar aluno";
    pub const UPDATE_STUDENT_FAILED: &str = "Erro inesperado ao atualizar aluno";
    pub const DELETE_STUDENT_FAILED: &str = "Erro inesperado ao deletar aluno";
    pub const GET_STUDENT_FAILED: &str = "Erro inesperado ao buscar aluno";
    pub const LIST_STUDENTS_FAILED: &str = "Erro ao listar alunos";
    pub const SEARCH_STUDENTS_FAILED: &str = "Erro inesperado na busca de alunos";

    pub const CREATE_ENROLLMENT_FAILED: &str = "Erro inesperado ao criar matricula";
    pub const GET_ENROLLMENT_FAILED: &str = "Erro inesperado ao buscar matricula";
    pub const DELETE_ENROLLMENT_FAILED: &str = "Erro inesperado ao deletar matricula";
    pub const LIST_ENROLLMENTS_FAILED: &str = "Erro ao listar matriculas";
}
