//! Auth service errors.

use sqlx::Error;
use thiserror::Error;

use crate::{
    auth::{IdentityError, SessionTokenError},
    domain::companies::CompaniesServiceError,
};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("session not found")]
    NotFound,

    #[error("a company is already registered for this email")]
    AlreadyRegistered,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    Validation(&'static str),

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("token processing error")]
    Token(#[source] SessionTokenError),

    #[error("identity provider error")]
    Identity(#[source] IdentityError),

    #[error("company error")]
    Companies(#[source] CompaniesServiceError),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}

impl From<SessionTokenError> for AuthServiceError {
    fn from(error: SessionTokenError) -> Self {
        Self::Token(error)
    }
}

impl From<IdentityError> for AuthServiceError {
    fn from(error: IdentityError) -> Self {
        match error {
            IdentityError::EmailExists => Self::AlreadyRegistered,
            IdentityError::InvalidCredentials => Self::InvalidCredentials,
            IdentityError::WeakPassword => Self::Validation("password is too weak"),
            other => Self::Identity(other),
        }
    }
}

impl From<CompaniesServiceError> for AuthServiceError {
    fn from(error: CompaniesServiceError) -> Self {
        match error {
            CompaniesServiceError::AlreadyExists => Self::AlreadyRegistered,
            CompaniesServiceError::NotFound => Self::NotFound,
            CompaniesServiceError::MissingRequiredData => {
                Self::Validation("company name and manager email are required")
            }
            other => Self::Companies(other),
        }
    }
}
