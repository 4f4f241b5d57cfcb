use async_trait::async_trait;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::JournalConfig;
use crate::models::Emotion;

use super::{Classification, ClassifierError, EmotionClassifier, NamedEntity};

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct AnalyzeResponse {
    emotion: String,
    keywords: Vec<String>,
    #[serde(default)]
    entities: Vec<NamedEntity>,
}

/// `POST {base}/analyze` client for the text analysis service.
pub struct HttpClassifier {
    client: reqwest::Client,
    analyze_url: String,
}

impl HttpClassifier {
    pub fn new(config: &JournalConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            analyze_url: config.analyze_url(),
        }
    }

    pub fn analyze_url(&self) -> &str {
        &self.analyze_url
    }
}

#[async_trait]
impl EmotionClassifier for HttpClassifier {
    async fn analyze(&self, text: &str) -> Result<Classification, ClassifierError> {
        let response = self
            .client
            .post(&self.analyze_url)
            .json(&AnalyzeRequest { text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                "analysis request to {} failed with {}: {}",
                self.analyze_url, status, body
            );
            return Err(ClassifierError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let analysis: AnalyzeResponse = response.json().await?;
        Ok(Classification {
            emotion: Emotion::from_label(&analysis.emotion),
            keywords: analysis.keywords,
            entities: analysis.entities,
        })
    }
}
