use serde_json::Value;
use thiserror::Error;

/// Failure categories surfaced in the output document's `error.code` field.
/// Everything except `InternalError` is recovered into the document; only
/// internal errors abort the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InputParse,
    InvalidSchema,
    InvalidField,
    DuplicateId,
    CatalogueMismatch,
    InconsistentDays,
    SolverTimeout,
    SolverInfeasible,
    InternalError,
}

impl ErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::InputParse => "InputParse",
            ErrorKind::InvalidSchema => "InvalidSchema",
            ErrorKind::InvalidField => "InvalidField",
            ErrorKind::DuplicateId => "DuplicateId",
            ErrorKind::CatalogueMismatch => "CatalogueMismatch",
            ErrorKind::InconsistentDays => "InconsistentDays",
            ErrorKind::SolverTimeout => "SolverTimeout",
            ErrorKind::SolverInfeasible => "SolverInfeasible",
            ErrorKind::InternalError => "InternalError",
        }
    }

    pub fn recoverable(self) -> bool {
        !matches!(self, ErrorKind::InternalError)
    }
}

#[derive(Debug, Clone, Error)]
#[error("{}: {message}", .kind.code())]
pub struct SolveError {
    pub kind: ErrorKind,
    pub message: String,
    pub details: Value,
}

impl SolveError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        SolveError { kind, message: message.into(), details: Value::Null }
    }

    pub fn with_details(kind: ErrorKind, message: impl Into<String>, details: Value) -> Self {
        SolveError { kind, message: message.into(), details }
    }
}
