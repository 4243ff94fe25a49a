//! Resume store, the persistence collaborator behind the form.
//!
//! The form core only sees the [`ResumeStore`] trait. The HTTP backend in
//! [`http`] is the production implementation; tests substitute mocks.

use async_trait::async_trait;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

use crate::models::Resume;

pub mod http;

pub use http::HttpResumeStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store error (status {status}): {message}")]
    Persistence { status: u16, message: String },

    #[error("Resume not found: {0}")]
    NotFound(String),

    #[error("Not authorized, log in again")]
    Unauthorized,

    #[error("Malformed store response: {0}")]
    Malformed(String),
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Persists a new resume and returns the identifier the store assigned.
    async fn create_resume(&self, resume: &Resume) -> Result<String, StoreError>;

    async fn update_resume(&self, id: &str, resume: &Resume) -> Result<(), StoreError>;

    async fn delete_resume(&self, id: &str) -> Result<(), StoreError>;

    async fn fetch_resumes(&self) -> Result<Vec<Resume>, StoreError>;
}
