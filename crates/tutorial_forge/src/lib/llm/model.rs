use std::{fmt::Debug, future::Future, path::Path};

use serde::Deserialize;

/// The remote generative-AI service the summarizers talk to.
///
/// Covers the two call shapes this system needs: plain text prompts and
/// prompts over a previously uploaded video asset.
pub trait GenerativeModel {
    const GENERATION_MODEL: &'static str;

    type Error: Debug;

    /// Submit a text prompt and return the model's raw text reply.
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;

    /// Upload a local file to the service's asset store.
    fn upload_asset(
        &self,
        path: &Path,
        display_name: &str,
        mime_type: &str,
    ) -> impl Future<Output = Result<AssetHandle, Self::Error>> + Send;

    /// Re-fetch the current state of a previously uploaded asset.
    fn get_asset(&self, name: &str)
        -> impl Future<Output = Result<AssetHandle, Self::Error>> + Send;

    /// Submit a prompt together with an uploaded asset.
    fn generate_with_asset(
        &self,
        asset: &AssetHandle,
        prompt: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// Opaque reference to an uploaded asset under remote processing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetHandle {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub uri: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    pub state: AssetState,
}

/// Remote processing state of an uploaded asset, as reported by the vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetState {
    Processing,
    #[serde(rename = "ACTIVE")]
    Ready,
    Failed,
}
