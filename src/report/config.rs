use serde::{Deserialize, Serialize};

/// Settings for the LLM-backed sales report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Bearer token for the chat completions API; reports are disabled without it
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_timeout_seconds() -> u64 {
    120
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl ReportConfig {
    /// Reports can be generated only when enabled and an API key is present
    pub fn is_available(&self) -> bool {
        self.enabled && self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_availability() {
        let mut config = ReportConfig::default();
        assert!(!config.is_available());

        config.api_key = Some(String::new());
        assert!(!config.is_available());

        config.api_key = Some("sk-test".to_string());
        assert!(config.is_available());

        config.enabled = false;
        assert!(!config.is_available());
    }
}
