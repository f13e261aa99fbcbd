use std::{
    fs,
    path::{Path, PathBuf},
};

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::{error::TrackError, store::track::GeneratedTrack};

pub const AUDIO_FILE_NAME: &str = "generated.wav";
pub const COVER_FILE_NAME: &str = "cover.png";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedTrack {
    pub audio: PathBuf,
    pub cover: PathBuf,
}

/// Decodes the audio and cover of a track into `dir`, creating it if needed.
/// Both fields are decoded before anything is written.
pub fn save_track(track: &GeneratedTrack, dir: &Path) -> Result<SavedTrack, TrackError> {
    let audio = decode_field("audio_data", track.audio_data())?;
    let cover = decode_field("cover_image_data", track.cover_image_data())?;

    fs::create_dir_all(dir)?;
    let saved = SavedTrack {
        audio: dir.join(AUDIO_FILE_NAME),
        cover: dir.join(COVER_FILE_NAME),
    };
    fs::write(&saved.audio, audio)?;
    fs::write(&saved.cover, cover)?;

    tracing::info!(audio = %saved.audio.display(), cover = %saved.cover.display(), "Track saved");
    Ok(saved)
}

fn decode_field(field: &'static str, value: Option<&str>) -> Result<Vec<u8>, TrackError> {
    let encoded = value.ok_or(TrackError::MissingField(field))?;
    STANDARD
        .decode(encoded.trim())
        .map_err(|source| TrackError::Base64 { field, source })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn writes_decoded_audio_and_cover() {
        let dir = tempfile::tempdir().unwrap();
        let track = GeneratedTrack::new(json!({
            "audio_data": STANDARD.encode(b"RIFF....WAVE"),
            "cover_image_data": STANDARD.encode(b"\x89PNG"),
            "categories": ["pop"],
        }));

        let saved = save_track(&track, &dir.path().join("out")).unwrap();

        assert_eq!(fs::read(&saved.audio).unwrap(), b"RIFF....WAVE");
        assert_eq!(fs::read(&saved.cover).unwrap(), b"\x89PNG");
        assert!(saved.audio.ends_with(AUDIO_FILE_NAME));
    }

    #[test]
    fn missing_or_corrupt_fields_write_nothing() {
        let dir = tempfile::tempdir().unwrap();

        let missing = GeneratedTrack::new(json!({ "audio_data": STANDARD.encode(b"a") }));
        let err = save_track(&missing, dir.path()).unwrap_err();
        assert!(matches!(err, TrackError::MissingField("cover_image_data")));

        let corrupt = GeneratedTrack::new(json!({
            "audio_data": "not base64!",
            "cover_image_data": STANDARD.encode(b"c"),
        }));
        let err = save_track(&corrupt, dir.path()).unwrap_err();
        assert!(matches!(err, TrackError::Base64 { field: "audio_data", .. }));

        assert!(!dir.path().join(AUDIO_FILE_NAME).exists());
    }
}
