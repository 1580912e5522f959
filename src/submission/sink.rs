// ABOUTME: Built-in submission sinks writing to disk or keeping submissions in memory
// ABOUTME: JsonFileSink stores one pretty JSON document per submission id

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::error::{Result, SinkError};
use super::{Submission, SubmissionSink};

pub struct JsonFileSink {
    directory: PathBuf,
}

impl JsonFileSink {
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// File a submission is written to
    pub fn path_for(&self, submission: &Submission) -> PathBuf {
        self.directory.join(format!("{}.json", submission.id))
    }
}

#[async_trait]
impl SubmissionSink for JsonFileSink {
    async fn deliver(&self, submission: &Submission) -> Result<()> {
        fs::create_dir_all(&self.directory)
            .await
            .map_err(|source| SinkError::WriteError {
                path: self.directory.clone(),
                source,
            })?;

        let path = self.path_for(submission);
        let content = serde_json::to_string_pretty(submission)?;
        fs::write(&path, content)
            .await
            .map_err(|source| SinkError::WriteError {
                path: path.clone(),
                source,
            })?;

        info!("Submission {} written to {}", submission.id, path.display());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "json_file"
    }
}

#[derive(Default)]
pub struct MemorySink {
    submissions: RwLock<Vec<Submission>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submissions(&self) -> Vec<Submission> {
        self.submissions.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.submissions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.submissions.read().await.is_empty()
    }
}

#[async_trait]
impl SubmissionSink for MemorySink {
    async fn deliver(&self, submission: &Submission) -> Result<()> {
        self.submissions.write().await.push(submission.clone());
        debug!("Submission {} kept in memory", submission.id);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
