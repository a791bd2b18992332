use rocket::response::status::{Created, NoContent};
use rocket::serde::json::Json;
use rocket::{State, delete, get, post};

use witchblades_core::domain::{TrackCreate, TrackId};
use witchblades_core::services::TrackService;
use witchblades_storage::CatalogStore;

use super::{Listing, parse_id};
use crate::db::with_session;
use crate::dto::{TrackCreateDto, TrackView};
use crate::error::ApiError;

#[get("/tracks")]
pub async fn list_tracks(store: &State<CatalogStore>) -> Result<Listing<TrackView>, ApiError> {
  let tracks = with_session(store, |session| TrackService::new(session).list()).await?;
  Ok(Listing(tracks.into_iter().map(TrackView::from).collect()))
}

#[get("/tracks/<id>")]
pub async fn get_track(store: &State<CatalogStore>, id: &str) -> Result<Json<TrackView>, ApiError> {
  let id: TrackId = parse_id(id)?;
  let track = with_session(store, move |session| TrackService::new(session).get(id)).await?;
  Ok(Json(track.into()))
}

#[post("/tracks", data = "<track>")]
pub async fn create_track(
  store: &State<CatalogStore>,
  track: Json<TrackCreateDto>,
) -> Result<Created<Json<TrackView>>, ApiError> {
  let input: TrackCreate = track.into_inner().into();
  let track = with_session(store, move |session| TrackService::new(session).create(input)).await?;

  let view = TrackView::from(track);
  Ok(Created::new(format!("/api/tracks/{}", view.id)).body(Json(view)))
}

/// Also unlinks the track from every album that listed it.
#[delete("/tracks/<id>")]
pub async fn delete_track(store: &State<CatalogStore>, id: &str) -> Result<NoContent, ApiError> {
  let id: TrackId = parse_id(id)?;
  with_session(store, move |session| TrackService::new(session).delete(id)).await?;
  Ok(NoContent)
}
