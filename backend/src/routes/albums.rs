use rocket::response::status::{Created, NoContent};
use rocket::serde::json::Json;
use rocket::{State, delete, get, post, put};

use witchblades_core::domain::{AlbumCreate, AlbumId, AlbumReplace};
use witchblades_core::services::AlbumService;
use witchblades_storage::CatalogStore;

use super::{Listing, parse_id};
use crate::db::with_session;
use crate::dto::{AlbumCreateDto, AlbumReplaceDto, AlbumView};
use crate::error::ApiError;

/// GET /api/albums: every album with its artist, newest release first.
#[get("/albums")]
pub async fn list_albums(store: &State<CatalogStore>) -> Result<Listing<AlbumView>, ApiError> {
  let albums = with_session(store, |session| AlbumService::new(session).list()).await?;
  Ok(Listing(albums.into_iter().map(AlbumView::from).collect()))
}

/// GET /api/albums/{id}: one album including its tracks.
#[get("/albums/<id>")]
pub async fn get_album(store: &State<CatalogStore>, id: &str) -> Result<Json<AlbumView>, ApiError> {
  let id: AlbumId = parse_id(id)?;
  let album = with_session(store, move |session| AlbumService::new(session).get(id)).await?;
  Ok(Json(album.into()))
}

/// PUT /api/albums/{id}: overwrites name, release date and image.
///
/// The body must carry the version the client last read; a stale version is
/// answered with 409 and nothing is written.
#[put("/albums/<id>", data = "<album>")]
pub async fn replace_album(
  store: &State<CatalogStore>,
  id: &str,
  album: Json<AlbumReplaceDto>,
) -> Result<NoContent, ApiError> {
  let id: AlbumId = parse_id(id)?;
  let input: AlbumReplace = album.into_inner().into();
  with_session(store, move |session| AlbumService::new(session).replace(id, input)).await?;
  Ok(NoContent)
}

/// POST /api/albums: validates the artist and every track, then inserts.
///
/// A missing reference yields 424 and nothing is written. The response is sent
/// only after the insert committed.
#[post("/albums", data = "<album>")]
pub async fn create_album(
  store: &State<CatalogStore>,
  album: Json<AlbumCreateDto>,
) -> Result<Created<Json<AlbumView>>, ApiError> {
  let input: AlbumCreate = album.into_inner().into();
  let album = with_session(store, move |session| AlbumService::new(session).create(input)).await?;

  let view = AlbumView::from(album);
  Ok(Created::new(format!("/api/albums/{}", view.id)).body(Json(view)))
}

/// DELETE /api/albums/{id}
#[delete("/albums/<id>")]
pub async fn delete_album(store: &State<CatalogStore>, id: &str) -> Result<NoContent, ApiError> {
  let id: AlbumId = parse_id(id)?;
  with_session(store, move |session| AlbumService::new(session).delete(id)).await?;
  Ok(NoContent)
}
