use std::{
    path::PathBuf,
    time::Duration,
};

use serde::Deserialize;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tutorial_datastore::DataStore;

use crate::{
    extract::extract_json,
    llm::model::{AssetHandle, AssetState, GenerativeModel},
    Error,
};

pub mod builder;

/// How the generator waits on remote asset processing.
///
/// The wait starts at `initial_interval`, doubles after every poll up to
/// `max_interval`, and gives up once `timeout` has elapsed.
#[derive(Debug, Clone)]
pub struct PollConfig {
    pub initial_interval: Duration,
    pub max_interval: Duration,
    pub timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_secs(5),
            max_interval: Duration::from_secs(40),
            timeout: Duration::from_secs(600),
        }
    }
}

/// Decoded structured reply for the video path. `content[i]` is illustrated
/// by the clip range at `clips[i]`.
#[derive(Debug, Deserialize)]
struct TutorialPayload {
    content: Vec<String>,
    clips: Vec<String>,
}

// The core transcript/video tutorial generator
#[derive(Debug)]
pub struct TutorialGenerator<D, M>
where
    D: DataStore + Send + Sync + 'static,
    M: GenerativeModel + Send + Sync + 'static,
{
    videos_dir: PathBuf,
    store: D,
    model: M,
    poll_config: PollConfig,
}

impl<D, M> TutorialGenerator<D, M>
where
    D: DataStore + Send + Sync + 'static,
    M: GenerativeModel + Send + Sync + 'static,
{
    const VIDEO_PROMPT: &'static str = include_str!("./generator/prompts/video_tutorial.txt");

    /// Generates a tutorial from a raw transcript and persists it.
    ///
    /// The transcript is embedded in the prompt verbatim; no structural
    /// validation of its bytes is performed. Remote failure propagates and
    /// nothing is persisted.
    #[tracing::instrument(skip(self, transcript))]
    pub async fn generate_transcript_tutorial(
        &self,
        transcript: &str,
        uploader: &str,
    ) -> anyhow::Result<()> {
        let prompt = format!(
            "Extract relevant steps from the transcript. \
             Generate a clear step-by-step tutorial summarizing how the issue was resolved. \
             Include steps only when meaningful. (avoid trivial dialogue) \
             Here is the transcript: {transcript}"
        );

        let tutorial = self
            .model
            .generate(&prompt)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to generate tutorial: {e:?}"))?;

        self.store
            .insert_tutorial(&tutorial, transcript, uploader)
            .await?;

        Ok(())
    }

    /// Generates a step/clip tutorial from a video already stored under the
    /// videos directory and persists it.
    #[tracing::instrument(skip(self, cancel))]
    pub async fn generate_video_tutorial(
        &self,
        file_name: &str,
        mime_type: &str,
        uploader: &str,
        cancel: CancellationToken,
    ) -> anyhow::Result<()> {
        let video_path = self.videos_dir.join(file_name);

        let asset = self
            .model
            .upload_asset(&video_path, file_name, mime_type)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to upload video asset: {e:?}"))?;
        tracing::info!(asset = %asset.name, "Video uploaded, waiting for remote processing");

        let asset = self.wait_for_processing(asset, &cancel).await?;

        let reply = self
            .model
            .generate_with_asset(&asset, Self::VIDEO_PROMPT)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to generate video tutorial: {e:?}"))?;

        let json = extract_json(&reply);
        if json.is_empty() {
            return Err(Error::ExtractionFailed.into());
        }
        let payload: TutorialPayload = serde_json::from_str(json).map_err(Error::Json)?;

        if payload.content.len() != payload.clips.len() {
            return Err(Error::StepClipMismatch {
                steps: payload.content.len(),
                clips: payload.clips.len(),
            }
            .into());
        }

        let content = payload.content.join("\n\n");
        let clips = payload.clips.join("|");

        self.store
            .insert_video_tutorial(&content, &clips, file_name, uploader)
            .await?;

        Ok(())
    }

    /// Polls the remote asset until it leaves the processing state.
    ///
    /// Backs off exponentially between polls, errors out past the configured
    /// timeout and honors `cancel` between attempts.
    async fn wait_for_processing(
        &self,
        mut asset: AssetHandle,
        cancel: &CancellationToken,
    ) -> anyhow::Result<AssetHandle> {
        let deadline = Instant::now() + self.poll_config.timeout;
        let mut interval = self.poll_config.initial_interval;

        loop {
            match asset.state {
                AssetState::Ready => return Ok(asset),
                AssetState::Failed => {
                    return Err(Error::AssetProcessingFailed(asset.name).into());
                }
                AssetState::Processing => {}
            }

            if Instant::now() >= deadline {
                return Err(Error::PollTimeout {
                    asset: asset.name,
                    waited: self.poll_config.timeout,
                }
                .into());
            }

            tokio::select! {
                _ = cancel.cancelled() => {
                    return Err(Error::PollCancelled(asset.name).into());
                }
                _ = tokio::time::sleep(interval) => {}
            }

            interval = (interval * 2).min(self.poll_config.max_interval);

            asset = self
                .model
                .get_asset(&asset.name)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to fetch asset state: {e:?}"))?;
        }
    }
}
