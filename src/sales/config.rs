use serde::{Deserialize, Serialize};

/// Which sales feed the campaign performance ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CampaignScope {
    /// Same trailing window as the best sellers ranking
    #[default]
    Window,
    /// Full sale history
    AllTime,
}

/// Settings for the dashboard views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Length of the trailing window in days
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    /// Maximum number of best sellers returned
    #[serde(default = "default_best_sellers_limit")]
    pub best_sellers_limit: usize,
    #[serde(default)]
    pub campaign_scope: CampaignScope,
}

fn default_window_days() -> u32 {
    30
}

fn default_best_sellers_limit() -> usize {
    5
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            best_sellers_limit: default_best_sellers_limit(),
            campaign_scope: CampaignScope::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_config_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.window_days, 30);
        assert_eq!(config.best_sellers_limit, 5);
        assert_eq!(config.campaign_scope, CampaignScope::Window);
    }

    #[test]
    fn test_campaign_scope_deserialize() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{"campaign_scope": "all_time"}"#).unwrap();
        assert_eq!(config.campaign_scope, CampaignScope::AllTime);
        assert_eq!(config.window_days, 30);
    }
}
