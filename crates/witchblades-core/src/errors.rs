use thiserror::Error;
use uuid::Uuid;

use crate::ports::RepoError;

/// Errors surfaced by the catalog services.
///
/// Upper layers (the HTTP backend) map each variant to a status code; the core
/// never decides how an error is rendered.
#[derive(Debug, Error)]
pub enum CoreError {
  #[error("repository error: {0}")]
  Repository(String),

  #[error("not found")]
  NotFound,

  /// A referenced entity required by the operation does not exist.
  #[error("{entity} with id '{id}' not found")]
  MissingDependency { entity: &'static str, id: Uuid },

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("invalid input: {0}")]
  Invalid(String),
}

impl CoreError {
  pub fn missing(entity: &'static str, id: impl Into<Uuid>) -> Self {
    CoreError::MissingDependency { entity, id: id.into() }
  }
}

impl From<RepoError> for CoreError {
  fn from(err: RepoError) -> Self {
    match err {
      RepoError::NotFound => CoreError::NotFound,
      RepoError::Conflict(msg) => CoreError::Conflict(msg),
      RepoError::Storage(msg) => CoreError::Repository(msg),
    }
  }
}
