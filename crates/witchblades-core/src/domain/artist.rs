use crate::domain::ids::ArtistId;
use serde::{Deserialize, Serialize};

/// An artist in the catalog.
///
/// Artists own albums by reference only: an album points at its artist, and the
/// artist's lifecycle is independent of the albums that point at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
  pub id: ArtistId,

  /// Display name.
  pub name: String,
}

/// Input for creating an artist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistCreate {
  pub name: String,
}
