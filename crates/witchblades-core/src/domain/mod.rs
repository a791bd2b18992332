pub mod album;
pub mod artist;
pub mod ids;
pub mod track;

pub use album::{Album, AlbumCreate, AlbumReplace};
pub use artist::{Artist, ArtistCreate};
pub use ids::{AlbumId, ArtistId, TrackId};
pub use track::{Track, TrackCreate};
