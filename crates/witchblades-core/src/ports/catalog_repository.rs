use crate::domain::{Album, AlbumId, AlbumReplace, Artist, ArtistId, Track, TrackId};

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
  #[error("entity not found")]
  NotFound,
  /// The stored row changed since the caller read it.
  #[error("concurrent modification: {0}")]
  Conflict(String),
  #[error("storage error: {0}")]
  Storage(String),
}

/// Persistence session over the catalog.
///
/// One value is used by one request; methods take `&mut self` because an
/// implementation owns a single database connection. Writes that touch several
/// rows (an album plus its track links) must be atomic.
pub trait CatalogRepository {
  // --- Artists ---
  fn list_artists(&mut self) -> Result<Vec<Artist>, RepoError>;
  fn find_artist(&mut self, id: ArtistId) -> Result<Option<Artist>, RepoError>;
  fn insert_artist(&mut self, artist: &Artist) -> Result<(), RepoError>;
  /// Returns `false` when no artist had that id.
  fn delete_artist(&mut self, id: ArtistId) -> Result<bool, RepoError>;
  fn count_albums_by_artist(&mut self, id: ArtistId) -> Result<i64, RepoError>;

  // --- Tracks ---
  fn list_tracks(&mut self) -> Result<Vec<Track>, RepoError>;
  fn find_track(&mut self, id: TrackId) -> Result<Option<Track>, RepoError>;
  fn insert_track(&mut self, track: &Track) -> Result<(), RepoError>;
  fn delete_track(&mut self, id: TrackId) -> Result<bool, RepoError>;

  // --- Albums ---
  /// All albums with their artist, newest release first. Tracks are not loaded.
  fn list_albums(&mut self) -> Result<Vec<Album>, RepoError>;
  /// One album with its artist and its tracks in album order.
  fn find_album(&mut self, id: AlbumId) -> Result<Option<Album>, RepoError>;
  /// Inserts the album row and its track links in one transaction.
  fn insert_album(&mut self, album: &Album) -> Result<(), RepoError>;
  /// Overwrites the album's own fields if `replace.version` is still current.
  ///
  /// Fails with [`RepoError::NotFound`] when the album is gone and with
  /// [`RepoError::Conflict`] when the version moved on. Returns the new version.
  fn update_album(&mut self, id: AlbumId, replace: &AlbumReplace) -> Result<i32, RepoError>;
  fn delete_album(&mut self, id: AlbumId) -> Result<bool, RepoError>;
}
