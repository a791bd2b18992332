#![allow(dead_code)]

use rocket::http::Status;
use rocket::local::blocking::Client;
use serde_json::{Value, json};

use witchblades::build_rocket;
use witchblades::config::ServerConfig;
use witchblades_storage::CatalogStore;

pub fn client_with(server: ServerConfig) -> Client {
  let store = CatalogStore::in_memory().expect("in-memory store");
  Client::tracked(build_rocket(store, &server)).expect("valid rocket instance")
}

pub fn client() -> Client {
  client_with(ServerConfig { api_docs: false, ..ServerConfig::default() })
}

pub fn create_artist(client: &Client, name: &str) -> String {
  let response = client.post("/api/artists").json(&json!({ "name": name })).dispatch();
  assert_eq!(response.status(), Status::Created);
  id_of(response.into_json::<Value>().expect("artist body"))
}

pub fn create_track(client: &Client, name: &str, artists: &[&str]) -> String {
  let response =
    client.post("/api/tracks").json(&json!({ "trackName": name, "durationSeconds": 200, "artists": artists })).dispatch();
  assert_eq!(response.status(), Status::Created);
  id_of(response.into_json::<Value>().expect("track body"))
}

pub fn create_album(client: &Client, artist: &str, tracks: &[&str], name: &str, release_date: &str) -> Value {
  let response = client
    .post("/api/albums")
    .json(&json!({
      "artist": artist,
      "tracks": tracks,
      "albumName": name,
      "releaseDate": release_date,
      "albumImage": format!("covers/{name}.png"),
    }))
    .dispatch();
  assert_eq!(response.status(), Status::Created);
  response.into_json::<Value>().expect("album body")
}

pub fn id_of(value: Value) -> String {
  value["id"].as_str().expect("id field").to_string()
}
