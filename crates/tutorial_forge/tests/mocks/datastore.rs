use std::sync::{Arc, Mutex};

use tutorial_datastore::{DataStore, Tutorial};

#[derive(Clone, Default)]
pub struct MockDataStore {
    pub inserted: Arc<Mutex<Vec<Tutorial>>>,
    pub updates: Arc<Mutex<Vec<(i64, String)>>>,
    pub fail_with: Option<String>,
}

impl MockDataStore {
    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Default::default()
        }
    }

    fn record(&self, tutorial: Tutorial) -> anyhow::Result<()> {
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        self.inserted.lock().unwrap().push(tutorial);
        Ok(())
    }
}

impl DataStore for MockDataStore {
    async fn insert_tutorial(
        &self,
        content: &str,
        transcript: &str,
        uploader: &str,
    ) -> anyhow::Result<()> {
        let id = self.inserted.lock().unwrap().len() as i64 + 1;
        self.record(Tutorial {
            id,
            content: content.to_string(),
            transcript: Some(transcript.to_string()),
            uploader: uploader.to_string(),
            timestamp: "2024-01-01 00:00:00".to_string(),
            clips: None,
            video: None,
        })
    }

    async fn insert_video_tutorial(
        &self,
        content: &str,
        clips: &str,
        video: &str,
        uploader: &str,
    ) -> anyhow::Result<()> {
        let id = self.inserted.lock().unwrap().len() as i64 + 1;
        self.record(Tutorial {
            id,
            content: content.to_string(),
            transcript: None,
            uploader: uploader.to_string(),
            timestamp: "2024-01-01 00:00:00".to_string(),
            clips: Some(clips.to_string()),
            video: Some(video.to_string()),
        })
    }

    async fn select_tutorials(&self, uploader: &str) -> anyhow::Result<Vec<Tutorial>> {
        Ok(self
            .inserted
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.uploader == uploader)
            .cloned()
            .collect())
    }

    async fn update_tutorial_content(&self, id: i64, content: &str) -> anyhow::Result<()> {
        self.updates.lock().unwrap().push((id, content.to_string()));
        Ok(())
    }
}
