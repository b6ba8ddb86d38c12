//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;
use validator::Validate;

use crate::domain::hotel::AmbientLocale;
use crate::domain::session::SessionUser;

/// Timing and paging knobs for the dashboard controller.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Validate)]
pub struct DashboardConfig {
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1))]
    pub page_size: u32,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_linger_ms")]
    pub linger_ms: u64,
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,
}

fn default_page_size() -> u32 {
    6
}

fn default_debounce_ms() -> u64 {
    400
}

fn default_linger_ms() -> u64 {
    700
}

fn default_cooldown_ms() -> u64 {
    100
}

fn default_listing_stale_secs() -> u64 {
    5 * 60
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_login_path() -> String {
    "/auth/login".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            debounce_ms: default_debounce_ms(),
            linger_ms: default_linger_ms(),
            cooldown_ms: default_cooldown_ms(),
        }
    }
}

impl DashboardConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn linger(&self) -> Duration {
        Duration::from_millis(self.linger_ms)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

#[derive(Clone, Debug, Deserialize, Validate)]
/// Settings shared by both screens and the HTTP repository.
pub struct AppConfig {
    #[validate(url)]
    pub api_base_url: String,
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[validate(url)]
    pub handoff_url: String,
    #[serde(default = "default_login_path")]
    pub login_path: String,
    pub storage_path: String,
    pub locale: String,
    pub currency: String,
    #[serde(default)]
    pub hotel_modules: Vec<String>,
    #[serde(default = "default_listing_stale_secs")]
    pub listing_stale_secs: u64,
    #[serde(default)]
    #[validate(nested)]
    pub dashboard: DashboardConfig,
    /// Signed-in user handed to the session guard, if any.
    #[serde(default)]
    pub session_user: Option<SessionUser>,
}

impl AppConfig {
    pub fn ambient_locale(&self) -> AmbientLocale {
        AmbientLocale {
            locale: self.locale.clone(),
            currency: self.currency.clone(),
        }
    }

    pub fn listing_stale_after(&self) -> Duration {
        Duration::from_secs(self.listing_stale_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_timings() {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "api_base_url": "http://localhost:8000/api/",
            "handoff_url": "http://localhost:3001/",
            "storage_path": "storage.json",
            "locale": "en",
            "currency": "USD",
        }))
        .unwrap();

        assert_eq!(config.dashboard, DashboardConfig::default());
        assert_eq!(config.dashboard.debounce(), Duration::from_millis(400));
        assert_eq!(config.dashboard.linger(), Duration::from_millis(700));
        assert_eq!(config.dashboard.cooldown(), Duration::from_millis(100));
        assert_eq!(config.listing_stale_after(), Duration::from_secs(300));
        assert_eq!(config.login_path, "/auth/login");
        assert!(config.hotel_modules.is_empty());
        assert!(config.session_user.is_none());
    }

    #[test]
    fn session_user_is_read_from_config() {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "api_base_url": "http://localhost:8000/api/",
            "handoff_url": "http://localhost:3001/",
            "storage_path": "storage.json",
            "locale": "en",
            "currency": "USD",
            "session_user": {"user_id": "42", "user_type": "Agent"},
            "dashboard": {"page_size": 12},
        }))
        .unwrap();

        let user = config.session_user.unwrap();
        assert_eq!(user.user_id, "42");
        assert_eq!(user.user_type, crate::domain::session::UserType::Agent);
        assert_eq!(config.dashboard.page_size, 12);
        assert_eq!(config.dashboard.debounce_ms, 400);
    }

    #[test]
    fn config_validation_rejects_bad_urls_and_empty_pages() {
        let base = serde_json::json!({
            "api_base_url": "http://localhost:8000/api/",
            "handoff_url": "http://localhost:3001/",
            "storage_path": "storage.json",
            "locale": "en",
            "currency": "USD",
        });
        let config: AppConfig = serde_json::from_value(base.clone()).unwrap();
        assert!(config.validate().is_ok());

        let mut bad_url = base.clone();
        bad_url["handoff_url"] = serde_json::json!("not a url");
        let config: AppConfig = serde_json::from_value(bad_url).unwrap();
        assert!(config.validate().is_err());

        let mut no_page = base;
        no_page["dashboard"] = serde_json::json!({"page_size": 0});
        let config: AppConfig = serde_json::from_value(no_page).unwrap();
        assert!(config.validate().is_err());
    }
}
