use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Video processing failed for file: {0}")]
    AssetProcessingFailed(String),
    #[error("Timed out after {waited:?} waiting for asset {asset} to finish processing")]
    PollTimeout { asset: String, waited: Duration },
    #[error("Polling for asset {0} was cancelled")]
    PollCancelled(String),
    #[error("No JSON value found in model response")]
    ExtractionFailed,
    #[error("Model returned {steps} steps but {clips} clips")]
    StepClipMismatch { steps: usize, clips: usize },
    #[error("Failed to decode model response: {0}")]
    Json(#[from] serde_json::Error),
}
