use rocket::response::status::{Created, NoContent};
use rocket::serde::json::Json;
use rocket::{State, delete, get, post};

use witchblades_core::domain::{ArtistCreate, ArtistId};
use witchblades_core::services::ArtistService;
use witchblades_storage::CatalogStore;

use super::{Listing, parse_id};
use crate::db::with_session;
use crate::dto::{ArtistCreateDto, ArtistView};
use crate::error::ApiError;

#[get("/artists")]
pub async fn list_artists(store: &State<CatalogStore>) -> Result<Listing<ArtistView>, ApiError> {
  let artists = with_session(store, |session| ArtistService::new(session).list()).await?;
  Ok(Listing(artists.into_iter().map(ArtistView::from).collect()))
}

#[get("/artists/<id>")]
pub async fn get_artist(store: &State<CatalogStore>, id: &str) -> Result<Json<ArtistView>, ApiError> {
  let id: ArtistId = parse_id(id)?;
  let artist = with_session(store, move |session| ArtistService::new(session).get(id)).await?;
  Ok(Json(artist.into()))
}

#[post("/artists", data = "<artist>")]
pub async fn create_artist(
  store: &State<CatalogStore>,
  artist: Json<ArtistCreateDto>,
) -> Result<Created<Json<ArtistView>>, ApiError> {
  let input: ArtistCreate = artist.into_inner().into();
  let artist = with_session(store, move |session| ArtistService::new(session).create(input)).await?;

  let view = ArtistView::from(artist);
  Ok(Created::new(format!("/api/artists/{}", view.id)).body(Json(view)))
}

/// Refused with 409 while any album still points at the artist.
#[delete("/artists/<id>")]
pub async fn delete_artist(store: &State<CatalogStore>, id: &str) -> Result<NoContent, ApiError> {
  let id: ArtistId = parse_id(id)?;
  with_session(store, move |session| ArtistService::new(session).delete(id)).await?;
  Ok(NoContent)
}
