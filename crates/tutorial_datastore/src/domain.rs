use serde::{Deserialize, Serialize};

/// A single generated tutorial row.
///
/// Exactly one of the two upload shapes applies per record: the transcript
/// path sets `transcript`, the video path sets `clips` and `video`. The
/// fields of the other path stay `None`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tutorial {
    /// Store-assigned autoincrement id.
    pub id: i64,
    /// Tutorial prose, or newline-joined steps for the video path.
    pub content: String,
    /// Raw transcript (transcript path only).
    pub transcript: Option<String>,
    /// Owner identifier, the sole read partition key.
    pub uploader: String,
    /// Creation time, `YYYY-MM-DD HH:MM:SS`, never updated on edit.
    pub timestamp: String,
    /// Pipe-joined clip timestamp ranges (video path only), aligned 1:1
    /// with the steps in `content`.
    pub clips: Option<String>,
    /// Stored asset filename (video path only).
    pub video: Option<String>,
}
