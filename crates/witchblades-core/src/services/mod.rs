pub mod album_service;
pub mod artist_service;
pub mod track_service;

pub use album_service::AlbumService;
pub use artist_service::ArtistService;
pub use track_service::TrackService;
