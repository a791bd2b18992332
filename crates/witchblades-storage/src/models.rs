use crate::schema::{album_tracks, albums, artists, track_artists, tracks};

use diesel::prelude::*;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = artists)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ArtistRow {
  pub id: String,
  pub name: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = artists)]
pub struct NewArtistRow<'a> {
  pub id: String,
  pub name: &'a str,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = tracks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TrackRow {
  pub id: String,
  pub track_name: String,
  pub duration_seconds: Option<i32>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = tracks)]
pub struct NewTrackRow<'a> {
  pub id: String,
  pub track_name: &'a str,
  pub duration_seconds: Option<i32>,
}

#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = track_artists)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TrackArtistRow {
  pub track_id: String,
  pub artist_id: String,
  pub position: i32,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = albums)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AlbumRow {
  pub id: String,
  pub artist_id: String,
  pub album_name: String,
  pub release_date: String,
  pub album_image: Option<String>,
  pub version: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = albums)]
pub struct NewAlbumRow<'a> {
  pub id: String,
  pub artist_id: String,
  pub album_name: &'a str,
  pub release_date: String,
  pub album_image: Option<&'a str>,
  pub version: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = album_tracks)]
pub struct AlbumTrackRow {
  pub album_id: String,
  pub track_id: String,
  pub position: i32,
}
