//! Development-time API documentation: an OpenAPI 3 document and a Swagger UI
//! page that renders it. Mounted only when `server.api_docs` is on.

use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::{Route, get, routes};
use serde_json::{Value, json};

pub const OPENAPI_PATH: &str = "/swagger/v1/swagger.json";

const SWAGGER_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <title>Witchblades API</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
  </head>
  <body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
      window.ui = SwaggerUIBundle({ url: "/swagger/v1/swagger.json", dom_id: "#swagger-ui" });
    </script>
  </body>
</html>
"##;

pub fn routes() -> Vec<Route> {
  routes![openapi_document, swagger_ui]
}

#[get("/swagger/v1/swagger.json")]
fn openapi_document() -> Json<Value> {
  Json(openapi())
}

#[get("/swagger")]
fn swagger_ui() -> RawHtml<&'static str> {
  RawHtml(SWAGGER_PAGE)
}

fn id_param() -> Value {
  json!({ "name": "id", "in": "path", "required": true, "schema": { "type": "string", "format": "uuid" } })
}

fn json_body(schema: &str) -> Value {
  json!({ "required": true, "content": { "application/json": { "schema": { "$ref": format!("#/components/schemas/{schema}") } } } })
}

fn json_response(description: &str, schema: Value) -> Value {
  json!({ "description": description, "content": { "application/json": { "schema": schema } } })
}

fn schema_ref(name: &str) -> Value {
  json!({ "$ref": format!("#/components/schemas/{name}") })
}

fn problem(description: &str) -> Value {
  json!({ "description": description, "content": { "application/problem+json": { "schema": schema_ref("Problem") } } })
}

/// Read/create/delete operations shared by the three resources.
fn resource_paths(plural: &str, view: &str, create: &str, tag: &str) -> (Value, Value) {
  let collection = json!({
    "get": {
      "tags": [tag],
      "responses": {
        "200": json_response("All items", json!({ "type": "array", "items": schema_ref(view) })),
        "204": { "description": "No items" }
      }
    },
    "post": {
      "tags": [tag],
      "requestBody": json_body(create),
      "responses": {
        "201": json_response("Created", schema_ref(view)),
        "400": problem("Invalid input"),
        "424": problem("Failed dependency error")
      }
    }
  });

  let item = json!({
    "parameters": [id_param()],
    "get": {
      "tags": [tag],
      "responses": {
        "200": json_response("The item", schema_ref(view)),
        "404": { "description": format!("No such {plural} entry") }
      }
    },
    "delete": {
      "tags": [tag],
      "responses": {
        "204": { "description": "Deleted" },
        "404": { "description": "Not found" },
        "409": problem("Still referenced")
      }
    }
  });

  (collection, item)
}

pub fn openapi() -> Value {
  let (albums, mut album) = resource_paths("album", "Album", "AlbumCreate", "Albums");
  let (artists, artist) = resource_paths("artist", "Artist", "ArtistCreate", "Artists");
  let (tracks, track) = resource_paths("track", "Track", "TrackCreate", "Tracks");

  album["put"] = json!({
    "tags": ["Albums"],
    "requestBody": json_body("AlbumReplace"),
    "responses": {
      "204": { "description": "Replaced" },
      "400": problem("Body id does not match the path"),
      "404": { "description": "Not found" },
      "409": problem("Version is stale")
    }
  });

  json!({
    "openapi": "3.0.3",
    "info": { "title": "Witchblades API", "version": env!("CARGO_PKG_VERSION") },
    "paths": {
      "/api/albums": albums,
      "/api/albums/{id}": album,
      "/api/artists": artists,
      "/api/artists/{id}": artist,
      "/api/tracks": tracks,
      "/api/tracks/{id}": track
    },
    "components": {
      "schemas": {
        "Artist": {
          "type": "object",
          "properties": { "id": { "type": "string", "format": "uuid" }, "name": { "type": "string" } }
        },
        "ArtistCreate": {
          "type": "object",
          "required": ["name"],
          "properties": { "name": { "type": "string" } }
        },
        "Track": {
          "type": "object",
          "properties": {
            "id": { "type": "string", "format": "uuid" },
            "trackName": { "type": "string" },
            "durationSeconds": { "type": "integer", "nullable": true },
            "artists": { "type": "array", "items": { "type": "string", "format": "uuid" } }
          }
        },
        "TrackCreate": {
          "type": "object",
          "required": ["trackName"],
          "properties": {
            "trackName": { "type": "string" },
            "durationSeconds": { "type": "integer", "nullable": true },
            "artists": { "type": "array", "items": { "type": "string", "format": "uuid" } }
          }
        },
        "Album": {
          "type": "object",
          "properties": {
            "id": { "type": "string", "format": "uuid" },
            "albumName": { "type": "string" },
            "releaseDate": { "type": "string", "format": "date" },
            "albumImage": { "type": "string", "nullable": true },
            "artist": schema_ref("Artist"),
            "tracks": { "type": "array", "items": schema_ref("Track") },
            "version": { "type": "integer" }
          }
        },
        "AlbumCreate": {
          "type": "object",
          "required": ["artist", "albumName", "releaseDate"],
          "properties": {
            "artist": { "type": "string", "format": "uuid" },
            "tracks": { "type": "array", "items": { "type": "string", "format": "uuid" }, "nullable": true },
            "albumName": { "type": "string" },
            "releaseDate": { "type": "string", "format": "date" },
            "albumImage": { "type": "string", "nullable": true }
          }
        },
        "AlbumReplace": {
          "type": "object",
          "required": ["albumName", "releaseDate", "version"],
          "properties": {
            "id": { "type": "string", "format": "uuid", "nullable": true },
            "albumName": { "type": "string" },
            "releaseDate": { "type": "string", "format": "date" },
            "albumImage": { "type": "string", "nullable": true },
            "version": { "type": "integer" }
          }
        },
        "Problem": {
          "type": "object",
          "properties": {
            "type": { "type": "string" },
            "title": { "type": "string" },
            "status": { "type": "integer" },
            "detail": { "type": "string" },
            "instance": { "type": "string" }
          }
        }
      }
    }
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn document_covers_every_mounted_route() {
    let doc = openapi();

    for route in crate::routes::api_routes() {
      let path = format!("/api{}", route.uri.path()).replace('<', "{").replace('>', "}");
      let verb = route.method.as_str().to_ascii_lowercase();
      assert!(doc["paths"][&path].get(&verb).is_some(), "undocumented {verb} {path}");
    }
    assert!(doc["paths"]["/api/albums"]["post"]["responses"].get("424").is_some());
  }
}
