use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Declares a UUID-backed identifier with the same surface for every entity.
///
/// Ids are opaque: they are generated with UUID v4 and never derived from the
/// entity's content, so renaming an album or artist never changes its identity.
macro_rules! entity_id {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct $name(Uuid);

    impl $name {
      /// Generates a fresh identifier.
      pub fn new() -> Self {
        $name(Uuid::new_v4())
      }

      pub fn from_uuid(u: Uuid) -> Self {
        $name(u)
      }

      pub fn as_uuid(&self) -> Uuid {
        self.0
      }
    }

    impl Default for $name {
      fn default() -> Self {
        Self::new()
      }
    }

    impl From<Uuid> for $name {
      fn from(u: Uuid) -> Self {
        $name(u)
      }
    }

    impl From<$name> for Uuid {
      fn from(id: $name) -> Self {
        id.0
      }
    }

    impl FromStr for $name {
      type Err = uuid::Error;

      fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map($name)
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
      }
    }
  };
}

entity_id!(
  /// Identifier of an [`Artist`](super::Artist).
  ArtistId
);

entity_id!(
  /// Identifier of an [`Album`](super::Album). Fixed at creation, never reassigned.
  AlbumId
);

entity_id!(
  /// Identifier of a [`Track`](super::Track).
  TrackId
);
