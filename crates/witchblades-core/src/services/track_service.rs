use tracing::{debug, warn};

use crate::domain::{ArtistId, Track, TrackCreate, TrackId};
use crate::errors::CoreError;
use crate::ports::CatalogRepository;

/// Longest duration the store can hold (a signed 32-bit column).
pub const MAX_DURATION_SECONDS: u32 = i32::MAX as u32;

pub struct TrackService<R>
where
  R: CatalogRepository,
{
  repo: R,
}

impl<R> TrackService<R>
where
  R: CatalogRepository,
{
  pub fn new(repo: R) -> Self {
    Self { repo }
  }

  pub fn list(&mut self) -> Result<Vec<Track>, CoreError> {
    Ok(self.repo.list_tracks()?)
  }

  pub fn get(&mut self, id: TrackId) -> Result<Track, CoreError> {
    self.repo.find_track(id)?.ok_or(CoreError::NotFound)
  }

  /// Creates a track; every listed artist must exist, same rule as album creation.
  pub fn create(&mut self, input: TrackCreate) -> Result<Track, CoreError> {
    let track_name = input.track_name.trim();
    if track_name.is_empty() {
      return Err(CoreError::Invalid("track name must not be blank".to_string()));
    }
    if let Some(seconds) = input.duration_seconds.filter(|s| *s > MAX_DURATION_SECONDS) {
      return Err(CoreError::Invalid(format!("duration {seconds}s exceeds {MAX_DURATION_SECONDS}s")));
    }

    let mut artist_ids: Vec<ArtistId> = Vec::with_capacity(input.artist_ids.len());
    for artist_id in input.artist_ids {
      if artist_ids.contains(&artist_id) {
        continue;
      }
      if self.repo.find_artist(artist_id)?.is_none() {
        warn!(artist = %artist_id, "track create rejected: artist missing");
        return Err(CoreError::missing("Artist", artist_id));
      }
      artist_ids.push(artist_id);
    }

    let track = Track {
      id: TrackId::new(),
      track_name: track_name.to_string(),
      duration_seconds: input.duration_seconds,
      artist_ids,
    };
    self.repo.insert_track(&track)?;
    debug!(track = %track.id, "track created");

    Ok(track)
  }

  pub fn delete(&mut self, id: TrackId) -> Result<(), CoreError> {
    if !self.repo.delete_track(id)? {
      return Err(CoreError::NotFound);
    }
    debug!(track = %id, "track deleted");
    Ok(())
  }
}
