pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Emotion;

pub use http::HttpClassifier;

/// A named entity spotted in the analyzed text, e.g. a person or place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedEntity {
    pub text: String,
    pub label: String,
}

/// The analysis result for one piece of text. Emotion and keywords feed the
/// saved entry; entities are surfaced for display only and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub emotion: Emotion,
    pub keywords: Vec<String>,
    pub entities: Vec<NamedEntity>,
}

#[derive(Debug, Error)]
pub enum ClassifierError {
    /// The service answered with a non-success status. The body is captured
    /// best-effort for diagnostics.
    #[error("analysis service returned {status}: {body}")]
    Status { status: u16, body: String },
    /// The request never produced a usable response.
    #[error("analysis request failed")]
    Transport(#[from] reqwest::Error),
}

/// Remote text analysis. One request per call, no retries; the caller
/// decides what a failure means for the save in progress.
#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<Classification, ClassifierError>;
}
