use serde::Serialize;

use super::form::{DescribedLyricsForm, DescriptionForm, LyricsForm, Mode};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptionPayload {
    pub full_described_song: String,
    pub instrumental: bool,
    pub audio_duration: f64,
    pub seed: i64,
    pub guidance_scale: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LyricsPayload {
    pub prompt: String,
    pub lyrics: String,
    pub audio_duration: f64,
    pub seed: i64,
    pub guidance_scale: f64,
    pub instrumental: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescribedLyricsPayload {
    pub prompt: String,
    pub described_lyrics: String,
    pub audio_duration: f64,
    pub seed: i64,
    pub guidance_scale: f64,
    pub instrumental: bool,
}

/// Body of one generation call, shaped the way the endpoint for its
/// mode expects it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GenerationRequest {
    Description(DescriptionPayload),
    Lyrics(LyricsPayload),
    DescribedLyrics(DescribedLyricsPayload),
}

impl GenerationRequest {
    pub fn mode(&self) -> Mode {
        match self {
            Self::Description(_) => Mode::Description,
            Self::Lyrics(_) => Mode::Lyrics,
            Self::DescribedLyrics(_) => Mode::DescribedLyrics,
        }
    }
}

impl From<&DescriptionForm> for GenerationRequest {
    fn from(form: &DescriptionForm) -> Self {
        Self::Description(DescriptionPayload {
            full_described_song: form.text.clone(),
            instrumental: form.is_instrumental,
            audio_duration: form.duration,
            seed: form.seed,
            guidance_scale: form.guidance_scale,
        })
    }
}

impl From<&LyricsForm> for GenerationRequest {
    fn from(form: &LyricsForm) -> Self {
        Self::Lyrics(LyricsPayload {
            prompt: form.prompt.clone(),
            lyrics: form.lyrics.clone(),
            audio_duration: form.duration,
            seed: form.seed,
            guidance_scale: form.guidance_scale,
            instrumental: false,
        })
    }
}

impl From<&DescribedLyricsForm> for GenerationRequest {
    fn from(form: &DescribedLyricsForm) -> Self {
        Self::DescribedLyrics(DescribedLyricsPayload {
            prompt: form.prompt.clone(),
            described_lyrics: form.lyrics_description.clone(),
            audio_duration: form.duration,
            seed: form.seed,
            guidance_scale: form.guidance_scale,
            instrumental: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn description_payload_uses_service_field_names() {
        let form = DescriptionForm {
            text: "upbeat pop song".into(),
            is_instrumental: true,
            ..DescriptionForm::default()
        };
        let body = serde_json::to_value(GenerationRequest::from(&form)).unwrap();

        assert_eq!(
            body,
            json!({
                "full_described_song": "upbeat pop song",
                "instrumental": true,
                "audio_duration": 30.0,
                "seed": -1,
                "guidance_scale": 15.0,
            })
        );
    }

    #[test]
    fn lyric_modes_are_never_instrumental() {
        let lyrics = LyricsForm {
            prompt: "synthwave, 110BPM".into(),
            lyrics: "[verse]\nneon rain".into(),
            ..LyricsForm::default()
        };
        let described = DescribedLyricsForm {
            prompt: "rave, funk, 140BPM".into(),
            lyrics_description: "lyrics about the monsoon".into(),
            seed: 42,
            ..DescribedLyricsForm::default()
        };

        let lyrics_body = serde_json::to_value(GenerationRequest::from(&lyrics)).unwrap();
        assert_eq!(lyrics_body["lyrics"], "[verse]\nneon rain");
        assert_eq!(lyrics_body["instrumental"], false);

        let described_body = serde_json::to_value(GenerationRequest::from(&described)).unwrap();
        assert_eq!(
            described_body,
            json!({
                "prompt": "rave, funk, 140BPM",
                "described_lyrics": "lyrics about the monsoon",
                "audio_duration": 30.0,
                "seed": 42,
                "guidance_scale": 15.0,
                "instrumental": false,
            })
        );
    }
}
