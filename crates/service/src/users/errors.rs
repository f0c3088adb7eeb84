use thiserror::Error;

/// Business errors for profile workflows
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UserError {
    #[error("must be authenticated to {0}")]
    Unauthenticated(&'static str),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl UserError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            UserError::Unauthenticated(_) => 3001,
            UserError::Validation(_) => 3002,
            UserError::Repository(_) => 3100,
        }
    }
}
