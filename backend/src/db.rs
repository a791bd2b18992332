use rocket::tokio::task;

use witchblades_core::CoreError;
use witchblades_storage::{CatalogSession, CatalogStore};

use crate::error::ApiError;

/// Runs `work` against a fresh session on the blocking pool.
///
/// diesel is synchronous; moving the whole unit of work off the async worker
/// keeps the request task suspended instead of blocking it. The session is
/// dropped (and its connection returned) when `work` finishes.
pub async fn with_session<T, F>(store: &CatalogStore, work: F) -> Result<T, ApiError>
where
  F: FnOnce(CatalogSession) -> Result<T, CoreError> + Send + 'static,
  T: Send + 'static,
{
  let store = store.clone();

  task::spawn_blocking(move || {
    let session = store.session()?;
    work(session)
  })
  .await
  .map_err(|e| ApiError::Internal(format!("blocking task failed: {e}")))?
  .map_err(ApiError::from)
}
