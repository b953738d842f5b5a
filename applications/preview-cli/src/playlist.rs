//! Playlist files
//!
//! A playlist is either a catalog search response (`{"resultCount": .., "results": [..]}`)
//! or a bare JSON array of tracks. Lookup responses mix collection entries in
//! with the tracks; anything that is not a track is skipped.

use crate::error::{CliError, Result};
use preview_core::Track;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Deserialize)]
#[serde(untagged)]
enum PlaylistFile {
    Response { results: Vec<Value> },
    Tracks(Vec<Value>),
}

/// Read and decode a playlist file
pub fn load_playlist(path: &Path) -> Result<Vec<Track>> {
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::ReadPlaylist {
        path: path.to_path_buf(),
        source,
    })?;
    parse_playlist(&contents)
}

/// Decode playlist JSON, keeping catalog order
pub fn parse_playlist(json: &str) -> Result<Vec<Track>> {
    let entries = match serde_json::from_str::<PlaylistFile>(json)? {
        PlaylistFile::Response { results } | PlaylistFile::Tracks(results) => results,
    };

    let mut tracks = Vec::with_capacity(entries.len());
    for entry in entries {
        if let Some(kind) = entry.get("wrapperType").and_then(Value::as_str) {
            if kind != "track" {
                debug!(wrapper_type = kind, "skipping non-track entry");
                continue;
            }
        }

        match serde_json::from_value::<Track>(entry) {
            Ok(track) => tracks.push(track),
            Err(e) => warn!(error = %e, "skipping undecodable playlist entry"),
        }
    }

    Ok(tracks)
}
