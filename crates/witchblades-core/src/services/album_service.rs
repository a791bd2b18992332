use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

use crate::domain::{Album, AlbumCreate, AlbumId, AlbumReplace, Track};
use crate::errors::CoreError;
use crate::ports::CatalogRepository;

/// Album operations over one persistence session.
pub struct AlbumService<R>
where
  R: CatalogRepository,
{
  repo: R,
}

impl<R> AlbumService<R>
where
  R: CatalogRepository,
{
  pub fn new(repo: R) -> Self {
    Self { repo }
  }

  pub fn into_inner(self) -> R {
    self.repo
  }

  // -------- QUERY (read) --------

  /// All albums with their artist, most recent release first.
  pub fn list(&mut self) -> Result<Vec<Album>, CoreError> {
    Ok(self.repo.list_albums()?)
  }

  /// One album with its tracks, or [`CoreError::NotFound`].
  pub fn get(&mut self, id: AlbumId) -> Result<Album, CoreError> {
    self.repo.find_album(id)?.ok_or(CoreError::NotFound)
  }

  // -------- COMMAND (write) --------

  /// Creates an album after resolving every reference it carries.
  ///
  /// The artist is checked first, then each track in the order given. The first
  /// missing reference aborts the operation before anything is written. Repeated
  /// track ids are linked once, at their first position.
  pub fn create(&mut self, input: AlbumCreate) -> Result<Album, CoreError> {
    check_release_date(input.release_date)?;

    let artist = self.repo.find_artist(input.artist)?.ok_or_else(|| {
      warn!(artist = %input.artist, "album create rejected: artist missing");
      CoreError::missing("Artist", input.artist)
    })?;

    let requested = input.tracks.unwrap_or_default();
    let mut tracks: Vec<Track> = Vec::with_capacity(requested.len());

    for track_id in requested {
      if tracks.iter().any(|t| t.id == track_id) {
        continue;
      }

      let track = self.repo.find_track(track_id)?.ok_or_else(|| {
        warn!(track = %track_id, "album create rejected: track missing");
        CoreError::missing("Track", track_id)
      })?;
      tracks.push(track);
    }

    let album = Album {
      id: AlbumId::new(),
      artist,
      album_name: input.album_name,
      release_date: input.release_date,
      album_image: input.album_image,
      tracks,
      version: 1,
    };

    self.repo.insert_album(&album)?;
    debug!(album = %album.id, tracks = album.tracks.len(), "album created");

    Ok(album)
  }

  /// Overwrites the album's name, release date and image.
  ///
  /// A stale `version` is reported as [`CoreError::Conflict`]; nothing is written
  /// in that case. Returns the new version.
  pub fn replace(&mut self, id: AlbumId, input: AlbumReplace) -> Result<i32, CoreError> {
    if let Some(body_id) = input.id.filter(|body_id| *body_id != id) {
      return Err(CoreError::Invalid(format!("album id {body_id} in body does not match {id}")));
    }
    check_release_date(input.release_date)?;

    match self.repo.update_album(id, &input) {
      Ok(version) => {
        debug!(album = %id, version, "album replaced");
        Ok(version)
      }
      Err(err) => {
        let err = CoreError::from(err);
        if let CoreError::Conflict(msg) = &err {
          warn!(album = %id, "album replace conflict: {msg}");
        }
        Err(err)
      }
    }
  }

  pub fn delete(&mut self, id: AlbumId) -> Result<(), CoreError> {
    if !self.repo.delete_album(id)? {
      return Err(CoreError::NotFound);
    }
    debug!(album = %id, "album deleted");
    Ok(())
  }
}

/// Release dates are stored as `YYYY-MM-DD` text and ordered as text, which
/// only matches date order for four-digit, non-negative years.
fn check_release_date(date: NaiveDate) -> Result<(), CoreError> {
  if !(0..=9999).contains(&date.year()) {
    return Err(CoreError::Invalid(format!("release date {date} is outside years 0000 to 9999")));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{ArtistId, TrackId};
  use crate::testing::InMemoryRepository;
  use chrono::NaiveDate;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn create_input(artist: ArtistId, tracks: Option<Vec<TrackId>>) -> AlbumCreate {
    AlbumCreate {
      artist,
      tracks,
      album_name: "Test".to_string(),
      release_date: date(2020, 1, 1),
      album_image: Some("covers/test.jpg".to_string()),
    }
  }

  fn seeded() -> (InMemoryRepository, ArtistId, TrackId, TrackId) {
    let (repo, artist) = InMemoryRepository::default().with_artist("A1");
    let (repo, t1) = repo.with_track("T1");
    let (repo, t2) = repo.with_track("T2");
    (repo, artist, t1, t2)
  }

  #[test]
  fn create_links_artist_and_tracks_in_order() {
    let (repo, artist, t1, t2) = seeded();
    let mut service = AlbumService::new(repo);

    let album = service.create(create_input(artist, Some(vec![t2, t1]))).unwrap();

    assert_eq!(album.artist.id, artist);
    assert_eq!(album.album_name, "Test");
    assert_eq!(album.release_date, date(2020, 1, 1));
    assert_eq!(album.album_image.as_deref(), Some("covers/test.jpg"));
    assert_eq!(album.tracks.iter().map(|t| t.id).collect::<Vec<_>>(), vec![t2, t1]);
    assert_eq!(album.version, 1);

    let stored = service.get(album.id).unwrap();
    assert_eq!(stored, album);
  }

  #[test]
  fn create_without_tracks_is_allowed() {
    let (repo, artist, _, _) = seeded();
    let mut service = AlbumService::new(repo);

    let album = service.create(create_input(artist, None)).unwrap();

    assert!(album.tracks.is_empty());
  }

  #[test]
  fn create_with_unknown_artist_writes_nothing() {
    let (repo, _, t1, _) = seeded();
    let mut service = AlbumService::new(repo);
    let ghost = ArtistId::new();

    let err = service.create(create_input(ghost, Some(vec![t1]))).unwrap_err();

    assert!(matches!(err, CoreError::MissingDependency { entity: "Artist", id } if id == ghost.as_uuid()));
    let repo = service.into_inner();
    assert!(repo.albums.is_empty());
    assert_eq!(repo.writes, 0);
  }

  #[test]
  fn create_with_one_unknown_track_writes_nothing() {
    let (repo, artist, t1, _) = seeded();
    let mut service = AlbumService::new(repo);
    let ghost = TrackId::new();

    let err = service.create(create_input(artist, Some(vec![t1, ghost]))).unwrap_err();

    assert!(matches!(err, CoreError::MissingDependency { entity: "Track", id } if id == ghost.as_uuid()));
    assert_eq!(err.to_string(), format!("Track with id '{ghost}' not found"));
    assert!(service.into_inner().albums.is_empty());
  }

  #[test]
  fn release_dates_outside_four_digit_years_are_rejected() {
    let (repo, artist, _, _) = seeded();
    let mut service = AlbumService::new(repo);

    for release_date in [date(10000, 1, 1), date(-1, 1, 1)] {
      let mut input = create_input(artist, None);
      input.release_date = release_date;
      assert!(matches!(service.create(input), Err(CoreError::Invalid(_))));
    }
    assert_eq!(service.into_inner().writes, 0);
  }

  #[test]
  fn replace_rejects_out_of_range_release_date() {
    let (repo, artist, _, _) = seeded();
    let mut service = AlbumService::new(repo);
    let album = service.create(create_input(artist, None)).unwrap();

    let err = service
      .replace(
        album.id,
        AlbumReplace { id: None, album_name: "X".into(), release_date: date(12000, 1, 1), album_image: None, version: 1 },
      )
      .unwrap_err();

    assert!(matches!(err, CoreError::Invalid(_)));
    assert_eq!(service.get(album.id).unwrap().version, 1);
  }

  #[test]
  fn duplicate_track_ids_are_linked_once() {
    let (repo, artist, t1, t2) = seeded();
    let mut service = AlbumService::new(repo);

    let album = service.create(create_input(artist, Some(vec![t1, t2, t1]))).unwrap();

    assert_eq!(album.tracks.iter().map(|t| t.id).collect::<Vec<_>>(), vec![t1, t2]);
  }

  #[test]
  fn list_is_newest_first_without_tracks() {
    let (repo, artist, t1, _) = seeded();
    let mut service = AlbumService::new(repo);
    for (year, tracks) in [(2001, None), (2019, Some(vec![t1])), (2010, None)] {
      let mut input = create_input(artist, tracks);
      input.release_date = date(year, 6, 1);
      service.create(input).unwrap();
    }

    let listed = service.list().unwrap();

    let years: Vec<_> = listed.iter().map(|a| a.release_date.format("%Y").to_string()).collect();
    assert_eq!(years, vec!["2019", "2010", "2001"]);
    assert!(listed.iter().all(|a| a.tracks.is_empty()));
  }

  #[test]
  fn get_unknown_album_is_not_found() {
    let mut service = AlbumService::new(InMemoryRepository::default());

    assert!(matches!(service.get(AlbumId::new()), Err(CoreError::NotFound)));
  }

  #[test]
  fn replace_requires_current_version() {
    let (repo, artist, _, _) = seeded();
    let mut service = AlbumService::new(repo);
    let album = service.create(create_input(artist, None)).unwrap();

    let replace = |version| AlbumReplace {
      id: None,
      album_name: "Renamed".to_string(),
      release_date: date(2021, 2, 2),
      album_image: None,
      version,
    };

    assert_eq!(service.replace(album.id, replace(1)).unwrap(), 2);
    assert!(matches!(service.replace(album.id, replace(1)), Err(CoreError::Conflict(_))));

    let stored = service.get(album.id).unwrap();
    assert_eq!(stored.album_name, "Renamed");
    assert_eq!(stored.version, 2);
  }

  #[test]
  fn replace_rejects_mismatched_body_id() {
    let (repo, artist, _, _) = seeded();
    let mut service = AlbumService::new(repo);
    let album = service.create(create_input(artist, None)).unwrap();

    let err = service
      .replace(
        album.id,
        AlbumReplace {
          id: Some(AlbumId::new()),
          album_name: "X".to_string(),
          release_date: date(2021, 1, 1),
          album_image: None,
          version: 1,
        },
      )
      .unwrap_err();

    assert!(matches!(err, CoreError::Invalid(_)));
  }

  #[test]
  fn replace_unknown_album_is_not_found() {
    let mut service = AlbumService::new(InMemoryRepository::default());

    let err = service
      .replace(
        AlbumId::new(),
        AlbumReplace { id: None, album_name: "X".into(), release_date: date(2021, 1, 1), album_image: None, version: 1 },
      )
      .unwrap_err();

    assert!(matches!(err, CoreError::NotFound));
  }

  #[test]
  fn delete_removes_once() {
    let (repo, artist, _, _) = seeded();
    let mut service = AlbumService::new(repo);
    let album = service.create(create_input(artist, None)).unwrap();

    service.delete(album.id).unwrap();

    assert!(matches!(service.delete(album.id), Err(CoreError::NotFound)));
    assert!(matches!(service.get(album.id), Err(CoreError::NotFound)));
  }
}
