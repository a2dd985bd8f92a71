use super::{ReportError, TextGenerator};
use async_trait::async_trait;
use std::sync::Mutex;

/// Canned text generator that records the prompts it receives
pub struct MockTextGenerator {
    response: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl MockTextGenerator {
    /// Always answer with `response`
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            response: Some(response.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Always fail with `ReportError::EmptyResponse`
    pub fn failing() -> Self {
        Self {
            response: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ReportError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        self.response.clone().ok_or(ReportError::EmptyResponse)
    }

    fn name(&self) -> &str {
        "mock"
    }
}
