use crate::domain::ids::{ArtistId, TrackId};
use serde::{Deserialize, Serialize};

/// A single recording that albums can list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
  pub id: TrackId,

  pub track_name: String,

  /// Length in whole seconds, when known.
  pub duration_seconds: Option<u32>,

  /// Performing artists (the `track_artists` relation), in insertion order.
  pub artist_ids: Vec<ArtistId>,
}

/// Input for creating a track. Every artist id must already exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackCreate {
  pub track_name: String,
  pub duration_seconds: Option<u32>,
  pub artist_ids: Vec<ArtistId>,
}
