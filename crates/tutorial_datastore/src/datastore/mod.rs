use std::future::Future;

use crate::Tutorial;

pub mod sqlite;

pub trait DataStore {
    fn insert_tutorial(
        &self,
        content: &str,
        transcript: &str,
        uploader: &str,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;

    fn insert_video_tutorial(
        &self,
        content: &str,
        clips: &str,
        video: &str,
        uploader: &str,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;

    fn select_tutorials(
        &self,
        uploader: &str,
    ) -> impl Future<Output = anyhow::Result<Vec<Tutorial>>> + Send;

    fn update_tutorial_content(
        &self,
        id: i64,
        content: &str,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

impl<T: DataStore + Send + Sync> DataStore for &T {
    async fn insert_tutorial(
        &self,
        content: &str,
        transcript: &str,
        uploader: &str,
    ) -> anyhow::Result<()> {
        (**self).insert_tutorial(content, transcript, uploader).await
    }

    async fn insert_video_tutorial(
        &self,
        content: &str,
        clips: &str,
        video: &str,
        uploader: &str,
    ) -> anyhow::Result<()> {
        (**self)
            .insert_video_tutorial(content, clips, video, uploader)
            .await
    }

    async fn select_tutorials(&self, uploader: &str) -> anyhow::Result<Vec<Tutorial>> {
        (**self).select_tutorials(uploader).await
    }

    async fn update_tutorial_content(&self, id: i64, content: &str) -> anyhow::Result<()> {
        (**self).update_tutorial_content(id, content).await
    }
}
