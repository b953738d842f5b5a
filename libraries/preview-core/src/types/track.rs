/// Catalog track domain type
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Numeric catalog identifier of a track
pub type TrackId = i64;

/// A catalog entry that may be previewed
///
/// Field names follow the catalog's JSON so a search result decodes directly.
/// Identity is the numeric `id`; two values with the same id are the same
/// track even if their metadata differs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique track identifier
    #[serde(rename = "trackId")]
    pub id: TrackId,

    /// Collection (album) identifier
    pub collection_id: i64,

    /// Artist name
    pub artist_name: String,

    /// Track title
    #[serde(rename = "trackName")]
    pub title: String,

    /// 60x60 artwork URL
    pub artwork_url60: String,

    /// 100x100 artwork URL
    pub artwork_url100: String,

    /// Preview media URL (absent for unplayable entries)
    #[serde(default)]
    pub preview_url: Option<String>,

    /// Collection (album) name
    pub collection_name: String,

    /// Track number in its collection
    #[serde(default)]
    pub track_number: Option<u32>,
}

impl Track {
    /// Create a track with minimal metadata
    pub fn new(id: TrackId, title: impl Into<String>) -> Self {
        Self {
            id,
            collection_id: 0,
            artist_name: String::new(),
            title: title.into(),
            artwork_url60: String::new(),
            artwork_url100: String::new(),
            preview_url: None,
            collection_name: String::new(),
            track_number: None,
        }
    }

    /// Set the artist name
    #[must_use]
    pub fn with_artist(mut self, artist_name: impl Into<String>) -> Self {
        self.artist_name = artist_name.into();
        self
    }

    /// Set the preview media URL
    #[must_use]
    pub fn with_preview_url(mut self, preview_url: impl Into<String>) -> Self {
        self.preview_url = Some(preview_url.into());
        self
    }

    /// Set both artwork URLs
    #[must_use]
    pub fn with_artwork(mut self, url60: impl Into<String>, url100: impl Into<String>) -> Self {
        self.artwork_url60 = url60.into();
        self.artwork_url100 = url100.into();
        self
    }

    /// Set collection id, name and track number
    #[must_use]
    pub fn with_collection(
        mut self,
        collection_id: i64,
        collection_name: impl Into<String>,
        track_number: Option<u32>,
    ) -> Self {
        self.collection_id = collection_id;
        self.collection_name = collection_name.into();
        self.track_number = track_number;
        self
    }

    /// Resolve the preview reference to an absolute URL
    pub fn preview_url(&self) -> Result<Url> {
        let raw = self
            .preview_url
            .as_deref()
            .ok_or(CoreError::MissingPreviewUrl(self.id))?;
        Ok(Url::parse(raw)?)
    }

    /// Whether the track can be handed to the playback engine
    ///
    /// Unplayable tracks must be filtered out of any list given to the engine.
    pub fn is_playable(&self) -> bool {
        self.preview_url().is_ok()
    }

    /// Track number as display text ("0" when unknown)
    pub fn track_number_label(&self) -> String {
        self.track_number.unwrap_or(0).to_string()
    }
}
