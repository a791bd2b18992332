//! In-memory [`CatalogRepository`] used by the service tests.

use std::cmp::Reverse;

use crate::domain::{Album, AlbumId, AlbumReplace, Artist, ArtistId, Track, TrackId};
use crate::ports::{CatalogRepository, RepoError};

#[derive(Debug, Default)]
pub struct InMemoryRepository {
  pub artists: Vec<Artist>,
  pub tracks: Vec<Track>,
  pub albums: Vec<Album>,
  /// Number of write calls that reached the repository.
  pub writes: usize,
}

impl InMemoryRepository {
  pub fn with_artist(mut self, name: &str) -> (Self, ArtistId) {
    let id = ArtistId::new();
    self.artists.push(Artist { id, name: name.to_string() });
    (self, id)
  }

  pub fn with_track(mut self, name: &str) -> (Self, TrackId) {
    let id = TrackId::new();
    self.tracks.push(Track { id, track_name: name.to_string(), duration_seconds: None, artist_ids: vec![] });
    (self, id)
  }
}

impl CatalogRepository for InMemoryRepository {
  fn list_artists(&mut self) -> Result<Vec<Artist>, RepoError> {
    let mut artists = self.artists.clone();
    artists.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(artists)
  }

  fn find_artist(&mut self, id: ArtistId) -> Result<Option<Artist>, RepoError> {
    Ok(self.artists.iter().find(|a| a.id == id).cloned())
  }

  fn insert_artist(&mut self, artist: &Artist) -> Result<(), RepoError> {
    self.writes += 1;
    self.artists.push(artist.clone());
    Ok(())
  }

  fn delete_artist(&mut self, id: ArtistId) -> Result<bool, RepoError> {
    self.writes += 1;
    let before = self.artists.len();
    self.artists.retain(|a| a.id != id);
    Ok(self.artists.len() != before)
  }

  fn count_albums_by_artist(&mut self, id: ArtistId) -> Result<i64, RepoError> {
    Ok(self.albums.iter().filter(|a| a.artist.id == id).count() as i64)
  }

  fn list_tracks(&mut self) -> Result<Vec<Track>, RepoError> {
    let mut tracks = self.tracks.clone();
    tracks.sort_by(|a, b| a.track_name.cmp(&b.track_name));
    Ok(tracks)
  }

  fn find_track(&mut self, id: TrackId) -> Result<Option<Track>, RepoError> {
    Ok(self.tracks.iter().find(|t| t.id == id).cloned())
  }

  fn insert_track(&mut self, track: &Track) -> Result<(), RepoError> {
    self.writes += 1;
    self.tracks.push(track.clone());
    Ok(())
  }

  fn delete_track(&mut self, id: TrackId) -> Result<bool, RepoError> {
    self.writes += 1;
    let before = self.tracks.len();
    self.tracks.retain(|t| t.id != id);
    for album in &mut self.albums {
      album.tracks.retain(|t| t.id != id);
    }
    Ok(self.tracks.len() != before)
  }

  fn list_albums(&mut self) -> Result<Vec<Album>, RepoError> {
    let mut albums: Vec<Album> =
      self.albums.iter().cloned().map(|a| Album { tracks: vec![], ..a }).collect();
    albums.sort_by_key(|a| (Reverse(a.release_date), a.id));
    Ok(albums)
  }

  fn find_album(&mut self, id: AlbumId) -> Result<Option<Album>, RepoError> {
    Ok(self.albums.iter().find(|a| a.id == id).cloned())
  }

  fn insert_album(&mut self, album: &Album) -> Result<(), RepoError> {
    self.writes += 1;
    self.albums.push(album.clone());
    Ok(())
  }

  fn update_album(&mut self, id: AlbumId, replace: &AlbumReplace) -> Result<i32, RepoError> {
    self.writes += 1;
    let album = self.albums.iter_mut().find(|a| a.id == id).ok_or(RepoError::NotFound)?;
    if album.version != replace.version {
      return Err(RepoError::Conflict(format!("album {id} is at version {}", album.version)));
    }
    album.album_name = replace.album_name.clone();
    album.release_date = replace.release_date;
    album.album_image = replace.album_image.clone();
    album.version += 1;
    Ok(album.version)
  }

  fn delete_album(&mut self, id: AlbumId) -> Result<bool, RepoError> {
    self.writes += 1;
    let before = self.albums.len();
    self.albums.retain(|a| a.id != id);
    Ok(self.albums.len() != before)
  }
}
