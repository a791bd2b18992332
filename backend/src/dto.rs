//! Wire representations and their conversions to and from the domain.
//!
//! Everything here is a plain `From` impl: no I/O, no validation beyond what
//! serde does while decoding.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use witchblades_core::domain::{
  Album, AlbumCreate, AlbumId, AlbumReplace, Artist, ArtistCreate, ArtistId, Track, TrackCreate, TrackId,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistView {
  pub id: Uuid,
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackView {
  pub id: Uuid,
  pub track_name: String,
  pub duration_seconds: Option<u32>,
  /// Ids of the performing artists.
  pub artists: Vec<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumView {
  pub id: Uuid,
  pub album_name: String,
  pub release_date: NaiveDate,
  pub album_image: Option<String>,
  pub artist: ArtistView,
  /// Empty in listings; populated when one album is fetched.
  pub tracks: Vec<TrackView>,
  pub version: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumCreateDto {
  pub artist: Uuid,
  pub tracks: Option<Vec<Uuid>>,
  pub album_name: String,
  pub release_date: NaiveDate,
  pub album_image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumReplaceDto {
  pub id: Option<Uuid>,
  pub album_name: String,
  pub release_date: NaiveDate,
  pub album_image: Option<String>,
  pub version: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistCreateDto {
  pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackCreateDto {
  pub track_name: String,
  pub duration_seconds: Option<u32>,
  #[serde(default)]
  pub artists: Vec<Uuid>,
}

impl From<Artist> for ArtistView {
  fn from(artist: Artist) -> Self {
    ArtistView { id: artist.id.into(), name: artist.name }
  }
}

impl From<Track> for TrackView {
  fn from(track: Track) -> Self {
    TrackView {
      id: track.id.into(),
      track_name: track.track_name,
      duration_seconds: track.duration_seconds,
      artists: track.artist_ids.into_iter().map(Uuid::from).collect(),
    }
  }
}

impl From<Album> for AlbumView {
  fn from(album: Album) -> Self {
    AlbumView {
      id: album.id.into(),
      album_name: album.album_name,
      release_date: album.release_date,
      album_image: album.album_image,
      artist: album.artist.into(),
      tracks: album.tracks.into_iter().map(TrackView::from).collect(),
      version: album.version,
    }
  }
}

impl From<AlbumCreateDto> for AlbumCreate {
  fn from(dto: AlbumCreateDto) -> Self {
    AlbumCreate {
      artist: ArtistId::from_uuid(dto.artist),
      tracks: dto.tracks.map(|ids| ids.into_iter().map(TrackId::from_uuid).collect()),
      album_name: dto.album_name,
      release_date: dto.release_date,
      album_image: dto.album_image,
    }
  }
}

impl From<AlbumReplaceDto> for AlbumReplace {
  fn from(dto: AlbumReplaceDto) -> Self {
    AlbumReplace {
      id: dto.id.map(AlbumId::from_uuid),
      album_name: dto.album_name,
      release_date: dto.release_date,
      album_image: dto.album_image,
      version: dto.version,
    }
  }
}

impl From<ArtistCreateDto> for ArtistCreate {
  fn from(dto: ArtistCreateDto) -> Self {
    ArtistCreate { name: dto.name }
  }
}

impl From<TrackCreateDto> for TrackCreate {
  fn from(dto: TrackCreateDto) -> Self {
    TrackCreate {
      track_name: dto.track_name,
      duration_seconds: dto.duration_seconds,
      artist_ids: dto.artists.into_iter().map(ArtistId::from_uuid).collect(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn album_view_uses_camel_case_and_iso_dates() {
    let artist = Artist { id: ArtistId::new(), name: "A1".into() };
    let track = Track { id: TrackId::new(), track_name: "T1".into(), duration_seconds: Some(61), artist_ids: vec![artist.id] };
    let album = Album {
      id: AlbumId::new(),
      artist: artist.clone(),
      album_name: "Test".into(),
      release_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
      album_image: None,
      tracks: vec![track.clone()],
      version: 3,
    };

    let value = serde_json::to_value(AlbumView::from(album.clone())).unwrap();

    assert_eq!(
      value,
      json!({
        "id": album.id.to_string(),
        "albumName": "Test",
        "releaseDate": "2020-01-01",
        "albumImage": null,
        "artist": { "id": artist.id.to_string(), "name": "A1" },
        "tracks": [{
          "id": track.id.to_string(),
          "trackName": "T1",
          "durationSeconds": 61,
          "artists": [artist.id.to_string()],
        }],
        "version": 3,
      })
    );
  }

  #[test]
  fn create_payload_tolerates_missing_optionals() {
    let artist = Uuid::new_v4();
    let dto: AlbumCreateDto = serde_json::from_value(json!({
      "artist": artist,
      "albumName": "Test",
      "releaseDate": "2020-01-01",
    }))
    .unwrap();

    let input = AlbumCreate::from(dto);

    assert_eq!(input.artist.as_uuid(), artist);
    assert_eq!(input.tracks, None);
    assert_eq!(input.album_image, None);
  }
}
