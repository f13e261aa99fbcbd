pub mod traits;

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    config::{AppConfig, Endpoints},
    error::GenerationError,
    store::{request::GenerationRequest, track::GeneratedTrack},
};

pub use traits::GenerationBackend;

pub struct ApiService {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl ApiService {
    pub fn new(config: &AppConfig) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            endpoints: config.endpoints.clone(),
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub async fn post_generation(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedTrack, GenerationError> {
        let mode = request.mode();
        let url = self.endpoints.for_mode(mode);
        tracing::debug!(%mode, url, "Posting generation request");

        let response = self.client.post(url).json(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let detail = extract_detail(&body);
            tracing::warn!(%mode, status = status.as_u16(), ?detail, "Generation rejected");
            return Err(GenerationError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        let body: Value = response.json().await?;
        Ok(GeneratedTrack::new(body))
    }
}

#[async_trait]
impl GenerationBackend for ApiService {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedTrack, GenerationError> {
        self.post_generation(request).await
    }
}

/// Pulls a readable message out of an error body's `detail` field.
/// Validation errors arrive as a list of `{ "msg": ... }` objects.
pub fn extract_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;

    let detail = match value.get("detail")? {
        Value::Null => return None,
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(text) => text.clone(),
                other => other
                    .get("msg")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| other.to_string()),
            })
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    };

    (!detail.trim().is_empty()).then_some(detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_detail_is_used_verbatim() {
        assert_eq!(
            extract_detail(br#"{"detail":"invalid duration"}"#).as_deref(),
            Some("invalid duration")
        );
    }

    #[test]
    fn validation_lists_are_joined() {
        let body = br#"{"detail":[
            {"loc":["body","prompt"],"msg":"Field required","type":"missing"},
            {"loc":["body","seed"],"msg":"Input should be a valid integer"}
        ]}"#;
        assert_eq!(
            extract_detail(body).as_deref(),
            Some("Field required; Input should be a valid integer")
        );
    }

    #[test]
    fn missing_or_unusable_detail() {
        assert_eq!(extract_detail(b"<html>502 Bad Gateway</html>"), None);
        assert_eq!(extract_detail(br#"{"message":"nope"}"#), None);
        assert_eq!(extract_detail(br#"{"detail":null}"#), None);
        assert_eq!(extract_detail(br#"{"detail":""}"#), None);
        assert_eq!(
            extract_detail(br#"{"detail":{"code":7}}"#).as_deref(),
            Some(r#"{"code":7}"#)
        );
    }
}
