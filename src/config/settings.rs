//! Configuration settings for Oddsdesk.

use crate::market::OutcomeOrder;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend API configuration.
    pub api: ApiConfig,
    /// UI configuration.
    pub ui: UiConfig,
    /// EV, arbitrage and match list feeds.
    pub feeds: FeedConfig,
    /// Key bindings.
    pub keybindings: KeyBindings,
}

impl Config {
    /// Load configuration from the default location, falling back to defaults.
    pub fn load_or_default() -> crate::Result<Self> {
        Self::load(None)
    }

    /// Load configuration layered as defaults, then the TOML file (if it
    /// exists), then `ODDSDESK_<SECTION>__<KEY>` environment variables.
    pub fn load(path: Option<PathBuf>) -> crate::Result<Self> {
        Self::load_layered(path, None)
    }

    /// Layered load reading environment overrides from `env` instead of the
    /// process environment when given.
    fn load_layered(
        path: Option<PathBuf>,
        env: Option<config::Map<String, String>>,
    ) -> crate::Result<Self> {
        let config_path = super::config_path(path);
        tracing::debug!(path = %config_path.display(), "loading configuration");

        let environment = config::Environment::with_prefix(super::ENV_PREFIX)
            .source(env)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("feeds.leagues");

        let layered = config::Config::builder()
            .add_source(
                config::File::from(config_path.as_path())
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(environment)
            .build()?;

        Ok(layered.try_deserialize()?)
    }

    /// Save configuration to file.
    pub fn save(&self, path: Option<PathBuf>) -> crate::Result<()> {
        let config_path = super::config_path(path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

/// Backend API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend base URL.
    pub base_url: String,
    /// Value for the `X-API-Key` header (optional).
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Rate limit (requests per second).
    pub rate_limit: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            api_key: None,
            timeout_secs: 15,
            rate_limit: 10,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Tick rate in milliseconds for UI updates.
    pub tick_rate_ms: u64,
    /// Poll interval in seconds for the visible view (0 to disable).
    pub auto_refresh_secs: u64,
    /// Enable mouse support.
    pub mouse_support: bool,
    /// Column order for market outcomes.
    pub outcome_order: OutcomeOrder,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            auto_refresh_secs: 30,
            mouse_support: true,
            outcome_order: OutcomeOrder::default(),
        }
    }
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(16))
    }

    /// Poll interval, `None` when polling is disabled.
    pub fn poll_interval(&self) -> Option<Duration> {
        (self.auto_refresh_secs > 0).then(|| Duration::from_secs(self.auto_refresh_secs))
    }
}

/// Feed configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// League identifiers cycled in the match list. Empty means all leagues only.
    pub leagues: Vec<String>,
    /// Rows per page for the EV and arbitrage feeds (1-100).
    pub page_size: u32,
    /// Only list matches, EV bets and arbitrages within this many hours (max 168).
    pub hours: Option<u32>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            leagues: Vec::new(),
            page_size: 20,
            hours: None,
        }
    }
}

/// Key bindings configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Quit the application.
    pub quit: String,
    /// Show help.
    pub help: String,
    /// Navigate up.
    pub up: String,
    /// Navigate down.
    pub down: String,
    /// Open the selected match.
    pub select: String,
    /// Back to the match list.
    pub back: String,
    /// Refresh the visible view.
    pub refresh: String,
    /// Switch to matches view.
    pub matches: String,
    /// Switch to top EV view.
    pub top_ev: String,
    /// Switch to arbitrage view.
    pub arbs: String,
    /// Next league.
    pub next_league: String,
    /// Previous league.
    pub prev_league: String,
    /// Next feed page.
    pub next_page: String,
    /// Previous feed page.
    pub prev_page: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            help: "?".to_string(),
            up: "k".to_string(),
            down: "j".to_string(),
            select: "Enter".to_string(),
            back: "Esc".to_string(),
            refresh: "r".to_string(),
            matches: "1".to_string(),
            top_ev: "2".to_string(),
            arbs: "3".to_string(),
            next_league: "]".to_string(),
            prev_league: "[".to_string(),
            next_page: "n".to_string(),
            prev_page: "p".to_string(),
        }
    }
}
