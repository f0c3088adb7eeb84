use thiserror::Error;

/// Failures surfaced by listing operations. None are retried internally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ListingError {
    #[error("must be authenticated to {0}")]
    Unauthenticated(&'static str),
    #[error("item not found")]
    NotFound,
    #[error("item is no longer available")]
    Conflict,
    #[error("store error: {0}")]
    Store(String),
}

impl ListingError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ListingError::Unauthenticated(_) => 2001,
            ListingError::NotFound => 2002,
            ListingError::Conflict => 2003,
            ListingError::Store(_) => 2100,
        }
    }
}

impl From<sea_orm::DbErr> for ListingError {
    fn from(e: sea_orm::DbErr) -> Self { ListingError::Store(e.to_string()) }
}
