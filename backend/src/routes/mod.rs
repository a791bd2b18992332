pub mod albums;
pub mod artists;
pub mod tracks;

use std::str::FromStr;

use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, Responder, Response};
use rocket::serde::json::Json;
use rocket::{Route, routes};
use serde::Serialize;

use witchblades_core::CoreError;

use crate::error::ApiError;

/// Every route of the catalog API, to be mounted under `/api`.
pub fn api_routes() -> Vec<Route> {
  routes![
    albums::list_albums,
    albums::get_album,
    albums::replace_album,
    albums::create_album,
    albums::delete_album,
    artists::list_artists,
    artists::get_artist,
    artists::create_artist,
    artists::delete_artist,
    tracks::list_tracks,
    tracks::get_track,
    tracks::create_track,
    tracks::delete_track,
  ]
}

/// Parses a path id; anything that is not a UUID addresses nothing.
fn parse_id<T: FromStr>(raw: &str) -> Result<T, ApiError> {
  raw.parse().map_err(|_| ApiError::from(CoreError::NotFound))
}

/// Collection response: `200` with the items, or a bodiless `204` when there are none.
pub struct Listing<T>(pub Vec<T>);

impl<'r, T: Serialize> Responder<'r, 'static> for Listing<T> {
  fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
    if self.0.is_empty() {
      return Response::build().status(Status::NoContent).ok();
    }
    Json(self.0).respond_to(req)
  }
}
