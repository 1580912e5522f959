// ABOUTME: Submission records and the sinks that receive them
// ABOUTME: A finished form session hands its answers to a SubmissionSink

pub mod error;
pub mod sink;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::navigator::AnswerSet;

pub use error::{Result, SinkError};
pub use sink::{JsonFileSink, MemorySink};

/// Answers of a completed form session plus identifying metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub session_id: Uuid,
    pub template_name: String,
    pub template_category: String,
    pub path: Vec<String>,
    pub answers: AnswerSet,
    pub started_at: Option<DateTime<Utc>>,
    pub submitted_at: DateTime<Utc>,
}

#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn deliver(&self, submission: &Submission) -> Result<()>;

    fn name(&self) -> &'static str;
}
