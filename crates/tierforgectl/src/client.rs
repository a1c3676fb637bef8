//! HTTP client for the tierforge daemon.

use anyhow::{anyhow, Result};
use tierforge_common::{ErrorResponse, GenerateRequest, GenerateResponse, HealthResponse, YearGroup};

/// Outcome of a generation call the CLI needs to distinguish: a task blob,
/// or the free-preview lock. Other failures surface as plain errors.
pub enum GenerateOutcome {
    Tasks(String),
    Locked(String),
}

pub struct DaemonClient {
    base_url: String,
    http: reqwest::Client,
}

impl DaemonClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub async fn generate(&self, topic: &str, year_group: YearGroup) -> Result<GenerateOutcome> {
        let request = GenerateRequest {
            topic: topic.to_string(),
            year_group,
        };

        let response = self
            .http
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| anyhow!("cannot reach tierforged at {}: {}", self.base_url, e))?;

        let status = response.status();
        if status.is_success() {
            let body: GenerateResponse = response.json().await?;
            return Ok(GenerateOutcome::Tasks(body.tasks));
        }

        let error = response
            .json::<ErrorResponse>()
            .await
            .map(|b| b.error)
            .unwrap_or_else(|_| format!("daemon returned HTTP {}", status));

        if status == reqwest::StatusCode::FORBIDDEN {
            Ok(GenerateOutcome::Locked(error))
        } else {
            Err(anyhow!(error))
        }
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        let response = self
            .http
            .get(format!("{}/v1/health", self.base_url))
            .send()
            .await
            .map_err(|e| anyhow!("cannot reach tierforged at {}: {}", self.base_url, e))?;

        Ok(response.error_for_status()?.json().await?)
    }
}
