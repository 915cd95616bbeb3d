use anyhow::Context;
use chrono::Local;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

use crate::{datastore::DataStore, Tutorial};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct SqliteDataStore {
    pub pool: SqlitePool,
}

impl SqliteDataStore {
    /// Establish connection to database and create the tutorials table
    /// if not exists
    pub async fn init(database_url: &str) -> anyhow::Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .inspect_err(
                |e| tracing::error!(error = ?e, "Failed to establish connection to database"),
            )
            .context("Failed to connect to sqlite database")?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS tutorials (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                content TEXT NOT NULL,
                transcript TEXT,
                uploader TEXT NOT NULL,
                timestamp TEXT NOT NULL,
                clips TEXT,
                video TEXT
            )
            "#,
        )
        .execute(&pool)
        .await
        .inspect_err(|e| tracing::error!(error = ?e, "Failed to create tutorials table"))
        .context("Failed to create tutorials table")?;

        Ok(SqliteDataStore { pool })
    }

    async fn try_insert_tutorial(
        &self,
        content: &str,
        transcript: &str,
        uploader: &str,
    ) -> anyhow::Result<()> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();

        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "INSERT INTO tutorials (content, transcript, uploader, timestamp) VALUES (?, ?, ?, ?)",
        )
        .bind(content)
        .bind(transcript)
        .bind(uploader)
        .bind(&timestamp)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        tracing::info!(%uploader, %timestamp, "Inserted tutorial record");
        Ok(())
    }

    async fn try_insert_video_tutorial(
        &self,
        content: &str,
        clips: &str,
        video: &str,
        uploader: &str,
    ) -> anyhow::Result<()> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();

        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "INSERT INTO tutorials (content, clips, video, uploader, timestamp) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(content)
        .bind(clips)
        .bind(video)
        .bind(uploader)
        .bind(&timestamp)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        tracing::info!(%uploader, %video, %timestamp, "Inserted video tutorial record");
        Ok(())
    }

    async fn try_update_tutorial_content(&self, id: i64, content: &str) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        // matches by id; updating a missing id affects zero rows and is
        // deliberately not an error
        sqlx::query("UPDATE tutorials SET content = ? WHERE id = ?")
            .bind(content)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(())
    }
}

impl DataStore for SqliteDataStore {
    /// Transcript-path insert. Database failures are logged and swallowed;
    /// the transaction rolls back on drop and no partial row is committed.
    async fn insert_tutorial(
        &self,
        content: &str,
        transcript: &str,
        uploader: &str,
    ) -> anyhow::Result<()> {
        if let Err(e) = self.try_insert_tutorial(content, transcript, uploader).await {
            tracing::error!(error = ?e, %uploader, "Failed to insert tutorial");
        }
        Ok(())
    }

    /// Video-path insert. Same error contract as [`Self::insert_tutorial`].
    async fn insert_video_tutorial(
        &self,
        content: &str,
        clips: &str,
        video: &str,
        uploader: &str,
    ) -> anyhow::Result<()> {
        if let Err(e) = self
            .try_insert_video_tutorial(content, clips, video, uploader)
            .await
        {
            tracing::error!(error = ?e, %uploader, %video, "Failed to insert video tutorial");
        }
        Ok(())
    }

    async fn select_tutorials(&self, uploader: &str) -> anyhow::Result<Vec<Tutorial>> {
        let tutorials = sqlx::query_as::<_, Tutorial>(
            "SELECT id, content, transcript, uploader, timestamp, clips, video
             FROM tutorials WHERE uploader = ? ORDER BY id",
        )
        .bind(uploader)
        .fetch_all(&self.pool)
        .await
        .inspect_err(|e| {
            tracing::error!(error = ?e, %uploader, "Failed to fetch tutorials");
        })
        .context("Failed to fetch tutorials")?;

        Ok(tutorials)
    }

    async fn update_tutorial_content(&self, id: i64, content: &str) -> anyhow::Result<()> {
        if let Err(e) = self.try_update_tutorial_content(id, content).await {
            tracing::error!(error = ?e, id, "Failed to update tutorial content");
        }
        Ok(())
    }
}
