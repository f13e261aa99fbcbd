use std::time::Duration;

use crate::{error::ConfigError, store::form::Mode};

pub const DESCRIPTION_URL: &str =
    "https://hasratmd697--music-generator-musicgenserver-generate-fro-6c1849.modal.run";
pub const LYRICS_URL: &str =
    "https://hasratmd697--music-generator-musicgenserver-generate-wit-ba449d.modal.run";
pub const DESCRIBED_LYRICS_URL: &str =
    "https://hasratmd697--music-generator-musicgenserver-generate-wit-a2ff74.modal.run";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub description: String,
    pub lyrics: String,
    pub described_lyrics: String,
}

impl Endpoints {
    pub fn for_mode(&self, mode: Mode) -> &str {
        match mode {
            Mode::Description => &self.description,
            Mode::Lyrics => &self.lyrics,
            Mode::DescribedLyrics => &self.described_lyrics,
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            description: DESCRIPTION_URL.to_string(),
            lyrics: LYRICS_URL.to_string(),
            described_lyrics: DESCRIBED_LYRICS_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub endpoints: Endpoints,
    /// Generation is slow; the service routinely takes a minute or more.
    pub request_timeout: Duration,
    pub notification_duration: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            request_timeout: Duration::from_millis(300_000),
            notification_duration: Duration::from_millis(5_000),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source, falling back to
    /// the defaults for anything unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("MUSEGEN_DESCRIPTION_URL") {
            config.endpoints.description = parse_url("MUSEGEN_DESCRIPTION_URL", url)?;
        }
        if let Some(url) = lookup("MUSEGEN_LYRICS_URL") {
            config.endpoints.lyrics = parse_url("MUSEGEN_LYRICS_URL", url)?;
        }
        if let Some(url) = lookup("MUSEGEN_DESCRIBED_LYRICS_URL") {
            config.endpoints.described_lyrics =
                parse_url("MUSEGEN_DESCRIBED_LYRICS_URL", url)?;
        }
        if let Some(ms) = lookup("MUSEGEN_TIMEOUT_MS") {
            config.request_timeout = parse_millis("MUSEGEN_TIMEOUT_MS", &ms)?;
        }
        if let Some(ms) = lookup("MUSEGEN_NOTIFICATION_MS") {
            config.notification_duration = parse_millis("MUSEGEN_NOTIFICATION_MS", &ms)?;
        }

        Ok(config)
    }
}

fn parse_url(key: &'static str, value: String) -> Result<String, ConfigError> {
    reqwest::Url::parse(value.trim())
        .map(|_| value.trim().to_string())
        .map_err(|err| ConfigError::InvalidUrl {
            key,
            reason: err.to_string(),
        })
}

fn parse_millis(key: &'static str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ConfigError::InvalidNumber {
            key,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_the_deployed_service() {
        let config = AppConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(300));
        assert_eq!(config.notification_duration, Duration::from_secs(5));
        assert_eq!(config.endpoints.for_mode(Mode::Lyrics), LYRICS_URL);
    }

    #[test]
    fn overrides_are_read_from_lookup() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("MUSEGEN_LYRICS_URL", "http://localhost:9000/lyrics"),
            ("MUSEGEN_TIMEOUT_MS", "1500"),
        ]))
        .unwrap();

        assert_eq!(config.endpoints.lyrics, "http://localhost:9000/lyrics");
        assert_eq!(config.endpoints.description, DESCRIPTION_URL);
        assert_eq!(config.request_timeout, Duration::from_millis(1500));
    }

    #[test]
    fn rejects_bad_values() {
        let err = AppConfig::from_lookup(lookup_from(&[("MUSEGEN_TIMEOUT_MS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { key: "MUSEGEN_TIMEOUT_MS", .. }));

        let err = AppConfig::from_lookup(lookup_from(&[("MUSEGEN_DESCRIPTION_URL", "not a url")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }
}
