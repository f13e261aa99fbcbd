use async_trait::async_trait;

use crate::{
    error::GenerationError,
    store::{request::GenerationRequest, track::GeneratedTrack},
};

#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, request: &GenerationRequest)
    -> Result<GeneratedTrack, GenerationError>;
}
