//! Durable local storage for fetched call recordings.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::{AppError, Result};

/// Stores recordings on disk addressed by conversation id.
pub struct RecordingStore {
    dir: PathBuf,
}

impl RecordingStore {
    /// Create a store rooted at `dir`, creating the directory tree.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|err| {
            AppError::Storage(format!(
                "failed to create recordings dir {}: {err}",
                dir.display()
            ))
        })?;
        Ok(Self { dir })
    }

    /// Path a conversation's recording is stored at.
    ///
    /// `save` validates the conversation id before calling this.
    #[must_use]
    pub fn path_for(&self, conversation_id: &str) -> PathBuf {
        self.dir.join(format!("{conversation_id}.mp3"))
    }

    /// Stream a fetched recording body to disk.
    ///
    /// # Errors
    ///
    /// Returns `AppError::MalformedEvent` if the conversation id is not
    /// a safe file-name segment, `AppError::MediaFetch` if the stream
    /// yields a transfer error, and `AppError::Storage` on any write
    /// failure.
    pub async fn save<S>(&self, conversation_id: &str, body: S) -> Result<PathBuf>
    where
        S: Stream<Item = std::result::Result<Bytes, reqwest::Error>>,
    {
        validate_segment(conversation_id)?;
        let mut body = std::pin::pin!(body);
        let path = self.path_for(conversation_id);
        let mut file = fs::File::create(&path)
            .await
            .map_err(|err| storage_err(&path, &err))?;

        while let Some(chunk) = body.next().await {
            let chunk = chunk
                .map_err(|err| AppError::MediaFetch(format!("recording stream failed: {err}")))?;
            file.write_all(&chunk)
                .await
                .map_err(|err| storage_err(&path, &err))?;
        }

        file.flush().await.map_err(|err| storage_err(&path, &err))?;
        Ok(path)
    }

    /// Public retrieval URL for a stored recording.
    #[must_use]
    pub fn public_url(&self, public_base_url: &str, conversation_id: &str) -> String {
        format!("{public_base_url}/recordings/{conversation_id}.mp3")
    }
}

fn storage_err(path: &Path, err: &std::io::Error) -> AppError {
    AppError::Storage(format!("failed to write {}: {err}", path.display()))
}

/// Reject conversation ids that do not stay a single path segment.
///
/// The id arrives on an unauthenticated webhook; separators or `..`
/// would let it address files outside the store root.
fn validate_segment(conversation_id: &str) -> Result<()> {
    if conversation_id.is_empty()
        || conversation_id.contains(['/', '\\'])
        || conversation_id.contains("..")
    {
        return Err(AppError::MalformedEvent(format!(
            "conversation id is not a safe file name: {conversation_id}"
        )));
    }
    Ok(())
}
