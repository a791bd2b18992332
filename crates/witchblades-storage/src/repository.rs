use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::sqlite::SqliteConnection;
use tracing::error;
use uuid::Uuid;

use witchblades_core::domain::{Album, AlbumId, AlbumReplace, Artist, ArtistId, Track, TrackId};
use witchblades_core::ports::{CatalogRepository, RepoError};

use crate::models::{
  AlbumRow, AlbumTrackRow, ArtistRow, NewAlbumRow, NewArtistRow, NewTrackRow, TrackArtistRow, TrackRow,
};
use crate::schema::{album_tracks, albums, artists, track_artists, tracks};

const DATE_FORMAT: &str = "%Y-%m-%d";
/// Same shape SQLite's `CURRENT_TIMESTAMP` column defaults produce (UTC).
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One pooled connection, used for the duration of a single request.
pub struct CatalogSession {
  conn: PooledConnection<ConnectionManager<SqliteConnection>>,
}

impl CatalogSession {
  pub(crate) fn new(conn: PooledConnection<ConnectionManager<SqliteConnection>>) -> Self {
    Self { conn }
  }

  fn conn(&mut self) -> &mut SqliteConnection {
    &mut self.conn
  }
}

fn storage_err(e: diesel::result::Error) -> RepoError {
  error!("catalog query failed: {e}");
  RepoError::Storage(e.to_string())
}

fn corrupt(what: &str, value: &str) -> RepoError {
  error!("invalid {what} in DB: {value:?}");
  RepoError::Storage(format!("invalid {what} in DB: {value:?}"))
}

fn parse_uuid(value: &str) -> Result<Uuid, RepoError> {
  Uuid::parse_str(value).map_err(|_| corrupt("uuid", value))
}

fn parse_date(value: &str) -> Result<NaiveDate, RepoError> {
  NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| corrupt("release_date", value))
}

fn format_date(date: NaiveDate) -> String {
  date.format(DATE_FORMAT).to_string()
}

fn row_to_artist(row: ArtistRow) -> Result<Artist, RepoError> {
  Ok(Artist { id: ArtistId::from_uuid(parse_uuid(&row.id)?), name: row.name })
}

fn row_to_album(row: AlbumRow, artist: ArtistRow, tracks: Vec<Track>) -> Result<Album, RepoError> {
  Ok(Album {
    id: AlbumId::from_uuid(parse_uuid(&row.id)?),
    artist: row_to_artist(artist)?,
    album_name: row.album_name,
    release_date: parse_date(&row.release_date)?,
    album_image: row.album_image,
    tracks,
    version: row.version,
  })
}

fn duration_to_column(duration: Option<u32>) -> Result<Option<i32>, RepoError> {
  duration
    .map(|d| i32::try_from(d).map_err(|_| RepoError::Storage(format!("duration {d}s out of range"))))
    .transpose()
}

/// Loads the `track_artists` rows for `rows` in one query and builds the tracks.
fn attach_artists(conn: &mut SqliteConnection, rows: Vec<TrackRow>) -> Result<Vec<Track>, RepoError> {
  if rows.is_empty() {
    return Ok(vec![]);
  }

  let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
  let links = track_artists::table
    .filter(track_artists::track_id.eq_any(ids))
    .order((track_artists::track_id.asc(), track_artists::position.asc()))
    .select(TrackArtistRow::as_select())
    .load(conn)
    .map_err(storage_err)?;

  let mut by_track: HashMap<String, Vec<ArtistId>> = HashMap::new();
  for link in links {
    let artist_id = ArtistId::from_uuid(parse_uuid(&link.artist_id)?);
    by_track.entry(link.track_id).or_default().push(artist_id);
  }

  rows
    .into_iter()
    .map(|row| {
      Ok(Track {
        id: TrackId::from_uuid(parse_uuid(&row.id)?),
        artist_ids: by_track.remove(&row.id).unwrap_or_default(),
        track_name: row.track_name,
        duration_seconds: row.duration_seconds.and_then(|d| u32::try_from(d).ok()),
      })
    })
    .collect()
}

enum UpdateOutcome {
  Updated(i32),
  Missing,
  Stale(i32),
}

impl CatalogRepository for CatalogSession {
  fn list_artists(&mut self) -> Result<Vec<Artist>, RepoError> {
    let rows = artists::table
      .order((artists::name.asc(), artists::id.asc()))
      .select(ArtistRow::as_select())
      .load(self.conn())
      .map_err(storage_err)?;

    rows.into_iter().map(row_to_artist).collect()
  }

  fn find_artist(&mut self, artist_id: ArtistId) -> Result<Option<Artist>, RepoError> {
    let row = artists::table
      .find(artist_id.to_string())
      .select(ArtistRow::as_select())
      .first(self.conn())
      .optional()
      .map_err(storage_err)?;

    row.map(row_to_artist).transpose()
  }

  fn insert_artist(&mut self, artist: &Artist) -> Result<(), RepoError> {
    diesel::insert_into(artists::table)
      .values(&NewArtistRow { id: artist.id.to_string(), name: &artist.name })
      .execute(self.conn())
      .map_err(storage_err)?;
    Ok(())
  }

  fn delete_artist(&mut self, artist_id: ArtistId) -> Result<bool, RepoError> {
    let deleted =
      diesel::delete(artists::table.find(artist_id.to_string())).execute(self.conn()).map_err(storage_err)?;
    Ok(deleted > 0)
  }

  fn count_albums_by_artist(&mut self, artist_id: ArtistId) -> Result<i64, RepoError> {
    albums::table
      .filter(albums::artist_id.eq(artist_id.to_string()))
      .count()
      .get_result(self.conn())
      .map_err(storage_err)
  }

  fn list_tracks(&mut self) -> Result<Vec<Track>, RepoError> {
    let conn = self.conn();
    let rows = tracks::table
      .order((tracks::track_name.asc(), tracks::id.asc()))
      .select(TrackRow::as_select())
      .load(conn)
      .map_err(storage_err)?;

    attach_artists(conn, rows)
  }

  fn find_track(&mut self, track_id: TrackId) -> Result<Option<Track>, RepoError> {
    let conn = self.conn();
    let row = tracks::table
      .find(track_id.to_string())
      .select(TrackRow::as_select())
      .first(conn)
      .optional()
      .map_err(storage_err)?;

    match row {
      Some(row) => Ok(attach_artists(conn, vec![row])?.pop()),
      None => Ok(None),
    }
  }

  fn insert_track(&mut self, track: &Track) -> Result<(), RepoError> {
    let new_row = NewTrackRow {
      id: track.id.to_string(),
      track_name: &track.track_name,
      duration_seconds: duration_to_column(track.duration_seconds)?,
    };
    let links: Vec<TrackArtistRow> = track
      .artist_ids
      .iter()
      .zip(0..)
      .map(|(artist_id, position)| TrackArtistRow {
        track_id: track.id.to_string(),
        artist_id: artist_id.to_string(),
        position,
      })
      .collect();

    self
      .conn()
      .transaction::<_, diesel::result::Error, _>(|conn| {
        diesel::insert_into(tracks::table).values(&new_row).execute(conn)?;
        if !links.is_empty() {
          diesel::insert_into(track_artists::table).values(&links).execute(conn)?;
        }
        Ok(())
      })
      .map_err(storage_err)
  }

  fn delete_track(&mut self, track_id: TrackId) -> Result<bool, RepoError> {
    // album_tracks and track_artists rows go with it (ON DELETE CASCADE)
    let deleted =
      diesel::delete(tracks::table.find(track_id.to_string())).execute(self.conn()).map_err(storage_err)?;
    Ok(deleted > 0)
  }

  fn list_albums(&mut self) -> Result<Vec<Album>, RepoError> {
    let rows = albums::table
      .inner_join(artists::table)
      .order((albums::release_date.desc(), albums::id.asc()))
      .select((AlbumRow::as_select(), ArtistRow::as_select()))
      .load::<(AlbumRow, ArtistRow)>(self.conn())
      .map_err(storage_err)?;

    rows.into_iter().map(|(album, artist)| row_to_album(album, artist, vec![])).collect()
  }

  fn find_album(&mut self, album_id: AlbumId) -> Result<Option<Album>, RepoError> {
    let conn = self.conn();
    let id_str = album_id.to_string();

    let Some((album, artist)) = albums::table
      .inner_join(artists::table)
      .filter(albums::id.eq(&id_str))
      .select((AlbumRow::as_select(), ArtistRow::as_select()))
      .first::<(AlbumRow, ArtistRow)>(conn)
      .optional()
      .map_err(storage_err)?
    else {
      return Ok(None);
    };

    let track_rows = album_tracks::table
      .inner_join(tracks::table)
      .filter(album_tracks::album_id.eq(&id_str))
      .order(album_tracks::position.asc())
      .select(TrackRow::as_select())
      .load(conn)
      .map_err(storage_err)?;

    let tracks = attach_artists(conn, track_rows)?;
    row_to_album(album, artist, tracks).map(Some)
  }

  fn insert_album(&mut self, album: &Album) -> Result<(), RepoError> {
    let id_str = album.id.to_string();
    let new_row = NewAlbumRow {
      id: id_str.clone(),
      artist_id: album.artist.id.to_string(),
      album_name: &album.album_name,
      release_date: format_date(album.release_date),
      album_image: album.album_image.as_deref(),
      version: album.version,
    };
    let links: Vec<AlbumTrackRow> = album
      .tracks
      .iter()
      .zip(0..)
      .map(|(track, position)| AlbumTrackRow { album_id: id_str.clone(), track_id: track.id.to_string(), position })
      .collect();

    // Album row and links commit together or not at all.
    self
      .conn()
      .transaction::<_, diesel::result::Error, _>(|conn| {
        diesel::insert_into(albums::table).values(&new_row).execute(conn)?;
        if !links.is_empty() {
          diesel::insert_into(album_tracks::table).values(&links).execute(conn)?;
        }
        Ok(())
      })
      .map_err(storage_err)
  }

  fn update_album(&mut self, album_id: AlbumId, replace: &AlbumReplace) -> Result<i32, RepoError> {
    let id_str = album_id.to_string();
    let release_date = format_date(replace.release_date);
    let now = Utc::now().format(TIMESTAMP_FORMAT).to_string();

    let outcome = self
      .conn()
      .transaction::<_, diesel::result::Error, _>(|conn| {
        let updated = diesel::update(albums::table.filter(albums::id.eq(&id_str)).filter(albums::version.eq(replace.version)))
          .set((
            albums::album_name.eq(&replace.album_name),
            albums::release_date.eq(&release_date),
            albums::album_image.eq(replace.album_image.as_deref()),
            albums::version.eq(albums::version + 1),
            albums::updated_at.eq(&now),
          ))
          .execute(conn)?;

        if updated > 0 {
          return Ok(UpdateOutcome::Updated(replace.version + 1));
        }

        let current =
          albums::table.find(&id_str).select(albums::version).first::<i32>(conn).optional()?;
        Ok(match current {
          Some(version) => UpdateOutcome::Stale(version),
          None => UpdateOutcome::Missing,
        })
      })
      .map_err(storage_err)?;

    match outcome {
      UpdateOutcome::Updated(version) => Ok(version),
      UpdateOutcome::Missing => Err(RepoError::NotFound),
      UpdateOutcome::Stale(current) => Err(RepoError::Conflict(format!(
        "album {album_id} is at version {current}, request was based on version {}",
        replace.version
      ))),
    }
  }

  fn delete_album(&mut self, album_id: AlbumId) -> Result<bool, RepoError> {
    let deleted =
      diesel::delete(albums::table.find(album_id.to_string())).execute(self.conn()).map_err(storage_err)?;
    Ok(deleted > 0)
  }
}
