use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::TrackError,
    util::track::{SavedTrack, save_track},
};

/// Response body of a successful generation, kept exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeneratedTrack(Value);

impl GeneratedTrack {
    pub fn new(body: Value) -> Self {
        Self(body)
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }

    pub fn into_json(self) -> Value {
        self.0
    }

    /// Base64 WAV audio.
    pub fn audio_data(&self) -> Option<&str> {
        self.0.get("audio_data").and_then(Value::as_str)
    }

    /// Base64 PNG album cover.
    pub fn cover_image_data(&self) -> Option<&str> {
        self.0.get("cover_image_data").and_then(Value::as_str)
    }

    pub fn categories(&self) -> Vec<&str> {
        self.0
            .get("categories")
            .and_then(Value::as_array)
            .map(|tags| tags.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    pub fn save_to(&self, dir: &Path) -> Result<SavedTrack, TrackError> {
        save_track(self, dir)
    }
}

impl From<Value> for GeneratedTrack {
    fn from(body: Value) -> Self {
        Self(body)
    }
}
