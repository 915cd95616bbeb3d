use std::path::Path;

use reqwest::Client;
use serde::Deserialize;

use crate::{AssetHandle, GenerativeModel};

/// Client for the Google Generative Language ("Gemini") REST API.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://generativelanguage.googleapis.com".into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    async fn send_generate_request(
        &self,
        parts: serde_json::Value,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let body = serde_json::json!({
            "contents": [{ "parts": parts }]
        });

        let resp = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url,
                Self::GENERATION_MODEL
            ))
            .query(&[("key", &self.api_key)])
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(GeminiError::Api { status, message });
        }

        Ok(resp.json::<GenerateContentResponse>().await?)
    }

    async fn send_upload_request(
        &self,
        file: &Path,
        display_name: &str,
        mime_type: &str,
    ) -> Result<AssetHandle, GeminiError> {
        let bytes = tokio::fs::read(file).await?;

        let metadata = serde_json::json!({ "file": { "display_name": display_name } });
        let metadata_part = reqwest::multipart::Part::text(metadata.to_string())
            .mime_str("application/json")?;
        let file_part = reqwest::multipart::Part::bytes(bytes)
            .file_name(display_name.to_string())
            .mime_str(mime_type)?;

        let form = reqwest::multipart::Form::new()
            .part("metadata", metadata_part)
            .part("file", file_part);

        let resp = self
            .client
            .post(format!("{}/upload/v1beta/files", self.base_url))
            .query(&[("key", &self.api_key)])
            .multipart(form)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(GeminiError::Api { status, message });
        }

        let response = resp.json::<UploadAssetResponse>().await?;
        Ok(response.file)
    }

    async fn send_get_asset_request(&self, name: &str) -> Result<AssetHandle, GeminiError> {
        // `name` is already fully qualified, e.g. "files/abc123"
        let resp = self
            .client
            .get(format!("{}/v1beta/{}", self.base_url, name))
            .query(&[("key", &self.api_key)])
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(GeminiError::Api { status, message });
        }

        Ok(resp.json::<AssetHandle>().await?)
    }
}

#[derive(Debug, Deserialize)]
struct UploadAssetResponse {
    file: AssetHandle,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: CandidateContent,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    fn into_text(self) -> Result<String, GeminiError> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().find_map(|p| p.text))
            .ok_or_else(|| GeminiError::Api {
                status: 0,
                message: "No content in response".into(),
            })
    }
}

impl GenerativeModel for GeminiClient {
    const GENERATION_MODEL: &'static str = "gemini-1.5-flash";

    type Error = GeminiError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        let parts = serde_json::json!([{ "text": prompt }]);
        let response = self
            .send_generate_request(parts)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to generate content"))?;
        response.into_text()
    }

    async fn upload_asset(
        &self,
        path: &Path,
        display_name: &str,
        mime_type: &str,
    ) -> Result<AssetHandle, Self::Error> {
        self.send_upload_request(path, display_name, mime_type)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to upload asset"))
    }

    async fn get_asset(&self, name: &str) -> Result<AssetHandle, Self::Error> {
        self.send_get_asset_request(name)
            .await
            .inspect_err(|e| tracing::error!(error = %e, asset = %name, "Failed to fetch asset"))
    }

    async fn generate_with_asset(
        &self,
        asset: &AssetHandle,
        prompt: &str,
    ) -> Result<String, Self::Error> {
        let parts = serde_json::json!([
            {
                "file_data": {
                    "file_uri": asset.uri,
                    "mime_type": asset.mime_type,
                }
            },
            { "text": prompt }
        ]);
        let response = self
            .send_generate_request(parts)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to generate content"))?;
        response.into_text()
    }
}
