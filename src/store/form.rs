use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_DURATION_SECS: f64 = 30.0;
pub const DEFAULT_SEED: i64 = -1;
pub const DEFAULT_GUIDANCE_SCALE: f64 = 15.0;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Prompt and lyrics are both written by the service from one description.
    #[default]
    Description,
    /// Style prompt plus lyrics supplied by the user.
    Lyrics,
    /// Style prompt plus a description the service turns into lyrics.
    DescribedLyrics,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::Lyrics => "lyrics",
            Self::DescribedLyrics => "described-lyrics",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptionForm {
    pub text: String,
    pub is_instrumental: bool,
    /// Seconds of audio to generate.
    pub duration: f64,
    /// `-1` lets the service pick.
    pub seed: i64,
    pub guidance_scale: f64,
}

impl Default for DescriptionForm {
    fn default() -> Self {
        Self {
            text: String::new(),
            is_instrumental: false,
            duration: DEFAULT_DURATION_SECS,
            seed: DEFAULT_SEED,
            guidance_scale: DEFAULT_GUIDANCE_SCALE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricsForm {
    pub prompt: String,
    pub lyrics: String,
    pub duration: f64,
    pub seed: i64,
    pub guidance_scale: f64,
}

impl Default for LyricsForm {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            lyrics: String::new(),
            duration: DEFAULT_DURATION_SECS,
            seed: DEFAULT_SEED,
            guidance_scale: DEFAULT_GUIDANCE_SCALE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescribedLyricsForm {
    pub prompt: String,
    pub lyrics_description: String,
    pub duration: f64,
    pub seed: i64,
    pub guidance_scale: f64,
}

impl Default for DescribedLyricsForm {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            lyrics_description: String::new(),
            duration: DEFAULT_DURATION_SECS,
            seed: DEFAULT_SEED,
            guidance_scale: DEFAULT_GUIDANCE_SCALE,
        }
    }
}
