//! Sales report generation
//!
//! Serializes the monthly summaries into a prompt and asks a text generation
//! API to write a markdown report from it.

pub mod config;
pub mod mock;
pub mod openai;

pub use config::ReportConfig;
pub use mock::MockTextGenerator;
pub use openai::OpenAiClient;

use crate::health::{HealthCheckResult, HealthChecker};
use crate::sales::MonthlySummary;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

const REPORT_INSTRUCTIONS: &str = "Please generate a sales report from the following JSON structure. \
The report should have a 1-paragraph summary for the last 30 days at the top, including sales and \
campaign information, including any trends that you can detect, and then a detailed breakdown of \
the sales by product and campaign in a table format sorted by revenue. The report should be in \
markdown format:";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("No API key configured for report generation")]
    MissingApiKey,
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("API returned status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Failed to serialize or parse report payload: {0}")]
    Serialization(String),
    #[error("Text generation returned no content")]
    EmptyResponse,
}

/// Backend that turns a prompt into text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ReportError>;

    /// Model or backend name, reported by the health check
    fn name(&self) -> &str;
}

/// Build the report prompt from monthly summaries, money rounded to cents
pub fn build_prompt(summaries: &[MonthlySummary]) -> Result<String, ReportError> {
    let rounded: Vec<MonthlySummary> = summaries.iter().map(MonthlySummary::rounded).collect();
    let payload =
        serde_json::to_string(&rounded).map_err(|e| ReportError::Serialization(e.to_string()))?;
    Ok(format!("{} {}", REPORT_INSTRUCTIONS, payload))
}

/// Generates markdown sales reports when a text generator is configured
#[derive(Clone)]
pub struct ReportService {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl ReportService {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { generator }
    }

    /// Build the service from configuration; disabled when no API key is set
    pub fn from_config(config: &ReportConfig) -> Result<Self, ReportError> {
        if !config.is_available() {
            warn!("Report generation disabled: no API key configured");
            return Ok(Self::new(None));
        }

        let client = OpenAiClient::new(config)?;
        info!("Report generation enabled with model {}", client.model());
        Ok(Self::new(Some(Arc::new(client))))
    }

    pub fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    /// Generate a markdown report; `Ok(None)` when report generation is disabled
    pub async fn generate_report(
        &self,
        summaries: &[MonthlySummary],
    ) -> Result<Option<String>, ReportError> {
        let Some(generator) = &self.generator else {
            return Ok(None);
        };

        let prompt = build_prompt(summaries)?;
        info!(
            "Generating sales report for {} monthly summaries",
            summaries.len()
        );
        generator.generate(&prompt).await.map(Some)
    }
}

#[async_trait]
impl HealthChecker for ReportService {
    fn name(&self) -> &str {
        "report"
    }

    async fn check(&self) -> HealthCheckResult {
        match &self.generator {
            Some(generator) => HealthCheckResult::healthy_with_details(serde_json::json!({
                "generator": generator.name()
            })),
            None => HealthCheckResult::degraded("Report generation disabled".to_string()),
        }
    }
}
