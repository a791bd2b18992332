use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::artist::Artist;
use crate::domain::ids::{AlbumId, ArtistId, TrackId};
use crate::domain::track::Track;

/// An album as the catalog serves it.
///
/// The artist is always resolved. `tracks` is only populated when the album is
/// loaded individually; listings leave it empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
  pub id: AlbumId,

  pub artist: Artist,

  pub album_name: String,

  pub release_date: NaiveDate,

  /// Reference to the cover image (URL or storage key).
  pub album_image: Option<String>,

  /// Tracks in album order.
  pub tracks: Vec<Track>,

  /// Row version, bumped on every replace. Callers echo it back on replace so
  /// that a concurrent modification is detected instead of overwritten.
  pub version: i32,
}

/// Input for creating an album.
///
/// `artist` and every entry of `tracks` must reference stored entities; the
/// album service checks them before anything is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumCreate {
  pub artist: ArtistId,
  pub tracks: Option<Vec<TrackId>>,
  pub album_name: String,
  pub release_date: NaiveDate,
  pub album_image: Option<String>,
}

/// Whole-record overwrite of an album's own fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumReplace {
  /// Optional echo of the target id; must match the addressed album when present.
  pub id: Option<AlbumId>,
  pub album_name: String,
  pub release_date: NaiveDate,
  pub album_image: Option<String>,
  /// Version the caller last read.
  pub version: i32,
}
