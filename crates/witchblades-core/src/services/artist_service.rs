use tracing::{debug, warn};

use crate::domain::{Artist, ArtistCreate, ArtistId};
use crate::errors::CoreError;
use crate::ports::CatalogRepository;

pub struct ArtistService<R>
where
  R: CatalogRepository,
{
  repo: R,
}

impl<R> ArtistService<R>
where
  R: CatalogRepository,
{
  pub fn new(repo: R) -> Self {
    Self { repo }
  }

  pub fn list(&mut self) -> Result<Vec<Artist>, CoreError> {
    Ok(self.repo.list_artists()?)
  }

  pub fn get(&mut self, id: ArtistId) -> Result<Artist, CoreError> {
    self.repo.find_artist(id)?.ok_or(CoreError::NotFound)
  }

  pub fn create(&mut self, input: ArtistCreate) -> Result<Artist, CoreError> {
    let name = input.name.trim();
    if name.is_empty() {
      return Err(CoreError::Invalid("artist name must not be blank".to_string()));
    }

    let artist = Artist { id: ArtistId::new(), name: name.to_string() };
    self.repo.insert_artist(&artist)?;
    debug!(artist = %artist.id, "artist created");

    Ok(artist)
  }

  /// Removes an artist that no album points at any more.
  pub fn delete(&mut self, id: ArtistId) -> Result<(), CoreError> {
    if self.repo.find_artist(id)?.is_none() {
      return Err(CoreError::NotFound);
    }

    let owned = self.repo.count_albums_by_artist(id)?;
    if owned > 0 {
      warn!(artist = %id, albums = owned, "artist delete rejected: still owns albums");
      return Err(CoreError::Conflict(format!("artist {id} still owns {owned} album(s)")));
    }

    if !self.repo.delete_artist(id)? {
      return Err(CoreError::NotFound);
    }
    debug!(artist = %id, "artist deleted");
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{Album, AlbumId};
  use crate::testing::InMemoryRepository;
  use chrono::NaiveDate;

  #[test]
  fn create_trims_name_and_rejects_blank() {
    let mut service = ArtistService::new(InMemoryRepository::default());

    let artist = service.create(ArtistCreate { name: "  Witchblades ".into() }).unwrap();
    assert_eq!(artist.name, "Witchblades");
    assert_eq!(service.get(artist.id).unwrap(), artist);

    assert!(matches!(service.create(ArtistCreate { name: "   ".into() }), Err(CoreError::Invalid(_))));
  }

  #[test]
  fn list_is_sorted_by_name() {
    let mut service = ArtistService::new(InMemoryRepository::default());
    for name in ["Zeta", "Alpha", "Mu"] {
      service.create(ArtistCreate { name: name.into() }).unwrap();
    }

    let names: Vec<_> = service.list().unwrap().into_iter().map(|a| a.name).collect();

    assert_eq!(names, vec!["Alpha", "Mu", "Zeta"]);
  }

  #[test]
  fn delete_refuses_artist_with_albums() {
    let (mut repo, artist_id) = InMemoryRepository::default().with_artist("A1");
    let artist = repo.artists[0].clone();
    repo.albums.push(Album {
      id: AlbumId::new(),
      artist,
      album_name: "Owned".into(),
      release_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
      album_image: None,
      tracks: vec![],
      version: 1,
    });
    let mut service = ArtistService::new(repo);

    assert!(matches!(service.delete(artist_id), Err(CoreError::Conflict(_))));
    assert!(service.get(artist_id).is_ok());
  }

  #[test]
  fn delete_unknown_artist_is_not_found() {
    let mut service = ArtistService::new(InMemoryRepository::default());

    assert!(matches!(service.delete(ArtistId::new()), Err(CoreError::NotFound)));
  }
}
