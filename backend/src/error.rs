use std::io::Cursor;

use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::{self, Responder, Response};
use rocket::{Catcher, catch, catchers};
use serde::{Deserialize, Serialize};
use tracing::error;

use witchblades_core::CoreError;

pub const FAILED_DEPENDENCY: Status = Status::new(424);

/// RFC 7807 problem document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
  #[serde(rename = "type")]
  pub kind: String,
  pub title: String,
  pub status: u16,
  pub detail: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub instance: Option<String>,
}

impl Problem {
  pub fn new(status: Status, kind: &str, title: &str, detail: impl Into<String>) -> Self {
    Problem { kind: kind.to_string(), title: title.to_string(), status: status.code, detail: detail.into(), instance: None }
  }
}

/// Sends a [`Problem`] as `application/problem+json`.
pub struct ProblemResponse(pub Problem);

impl<'r> Responder<'r, 'static> for ProblemResponse {
  fn respond_to(self, _req: &'r Request<'_>) -> response::Result<'static> {
    let status = Status::new(self.0.status);
    let body = serde_json::to_string(&self.0).map_err(|_| Status::InternalServerError)?;

    Response::build()
      .status(status)
      .header(ContentType::new("application", "problem+json"))
      .sized_body(body.len(), Cursor::new(body))
      .ok()
  }
}

/// Error returned by every handler.
#[derive(Debug)]
pub enum ApiError {
  Core(CoreError),
  /// The blocking worker running the request's database work died.
  Internal(String),
}

impl From<CoreError> for ApiError {
  fn from(err: CoreError) -> Self {
    ApiError::Core(err)
  }
}

impl ApiError {
  fn into_problem(self) -> Option<Problem> {
    let err = match self {
      ApiError::Core(err) => err,
      ApiError::Internal(msg) => return Some(internal_problem(&msg)),
    };

    let detail = err.to_string();
    match err {
      CoreError::NotFound => None,
      CoreError::MissingDependency { entity, .. } => Some(Problem {
        instance: Some(entity.to_string()),
        ..Problem::new(FAILED_DEPENDENCY, entity, "Failed dependency error", detail)
      }),
      CoreError::Conflict(msg) => Some(Problem::new(Status::Conflict, "Conflict", "Concurrency conflict", msg)),
      CoreError::Invalid(msg) => Some(Problem::new(Status::BadRequest, "Validation", "Invalid request", msg)),
      CoreError::Repository(msg) => Some(internal_problem(&msg)),
    }
  }
}

fn internal_problem(cause: &str) -> Problem {
  error!("request failed: {cause}");
  Problem::new(Status::InternalServerError, "Internal", "Internal server error", "unexpected persistence failure")
}

impl<'r> Responder<'r, 'static> for ApiError {
  fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
    match self.into_problem() {
      Some(problem) => ProblemResponse(problem).respond_to(req),
      // Answered directly so the 404 stays bodiless instead of going through a catcher.
      None => Response::build().status(Status::NotFound).ok(),
    }
  }
}

#[catch(404)]
fn not_found() {}

#[catch(default)]
fn default_catcher(status: Status, _req: &Request<'_>) -> ProblemResponse {
  let title = status.reason().unwrap_or("Error");
  ProblemResponse(Problem::new(status, "Http", title, format!("request failed with status {}", status.code)))
}

pub fn catchers() -> Vec<Catcher> {
  catchers![not_found, default_catcher]
}
