use thiserror::Error;

use crate::auth::AuthError;
use crate::form::{FormError, SubmitError};
use crate::store::StoreError;

/// Top-level error for a command run.
/// Each variant maps to a process exit code, so scripts can tell a rejected
/// form apart from a network failure.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Submit(#[from] SubmitError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Internal error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl From<clap::Error> for AppError {
    fn from(e: clap::Error) -> Self {
        let rendered = e.to_string();
        AppError::Usage(rendered.trim_end().trim_start_matches("error: ").to_string())
    }
}

impl AppError {
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Usage(_) => 2,
            AppError::Submit(SubmitError::Validation(_)) => 3,
            AppError::Auth(AuthError::NotAuthenticated | AuthError::InvalidCredentials)
            | AppError::Store(StoreError::Unauthorized)
            | AppError::Submit(SubmitError::Store(StoreError::Unauthorized)) => 4,
            AppError::Store(_)
            | AppError::Submit(SubmitError::Store(_))
            | AppError::Auth(AuthError::Service { .. }) => 5,
            AppError::Form(_)
            | AppError::Submit(SubmitError::NotIdle(_))
            | AppError::Auth(_)
            | AppError::Internal(_) => 1,
        }
    }
}
