//! Cinedex: a Zellij plugin for browsing a movie catalog.
//!
//! Cinedex shows the catalog's top rated movies, searches it by title and
//! opens a detail overlay for any result. All data comes from an external,
//! read-only HTTP catalog; requests are performed by the Zellij host and
//! complete asynchronously, in any order.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← keys, web requests
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - DiscoveryController (results, stale discard)     │
//! │  - DetailResolver (overlay, id-guarded upgrade)     │
//! │  - Event handling and view model computation        │
//! └─────────────────────────────────────────────────────┘
//!         │                    │
//! ┌───────────────┐   ┌───────────────────────────────┐
//! │ UI Layer      │   │ Catalog Layer (catalog/)      │
//! │ (ui/)         │   │ - Tickets in request context  │
//! │ - Rendering   │   │ - Endpoint URLs               │
//! │ - Theming     │   │ - JSON decoding               │
//! └───────────────┘   └───────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Infrastructure, Observability              │
//! │  - Movie model and errors (domain/)                 │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - OpenTelemetry file export (observability/)       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/cinedex.wasm" {
//!         catalog_url "http://localhost:8080"
//!         top_limit "20"
//!         page_size "20"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use cinedex::{handle_event, initialize, Action, Config, Event};
//!
//! let (mut state, startup) = initialize(&Config::default());
//! assert!(matches!(startup.as_slice(), [Action::Fetch(_)]));
//!
//! let (_render, actions) = handle_event(&mut state, Event::SearchMode)?;
//! assert!(actions.is_empty());
//! # Ok::<(), cinedex::CinedexError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppState, DiscoveryController, DiscoverySettings, Event, Mode};
pub use domain::{CinedexError, MovieDetail, MovieSummary, NetworkFailure, Result, Selection};
pub use ui::Theme;

use catalog::{CatalogClient, DEFAULT_CATALOG_URL};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// Accepted range for `top_limit` and `page_size`.
const FETCH_SIZE_RANGE: RangeInclusive<u32> = 1..=100;

/// Plugin configuration parsed from Zellij's configuration system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root URL of the catalog service. Default: `http://localhost:8080`
    pub catalog_url: String,

    /// Number of top rated movies to request (1..=100). Default: 20
    pub top_limit: u32,

    /// Title search page size (1..=100). Default: 20
    pub page_size: u32,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file; `~` is mapped to the sandbox home.
    pub theme_file: Option<String>,

    /// Tracing filter directive (`trace`, `debug`, `info`, ...). Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let settings = DiscoverySettings::default();
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            top_limit: settings.top_limit,
            page_size: settings.page_size,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses the plugin configuration map.
    ///
    /// Every key falls back to its default on its own: a missing, blank,
    /// unparsable or out-of-range value never affects the other keys.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use cinedex::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("catalog_url".to_string(), "http://catalog:9000".to_string());
    /// map.insert("top_limit".to_string(), "50".to_string());
    /// map.insert("page_size".to_string(), "0".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.catalog_url, "http://catalog:9000");
    /// assert_eq!(config.top_limit, 50);
    /// assert_eq!(config.page_size, 20);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };
        let size = |key: &str, default: u32| {
            config
                .get(key)
                .and_then(|value| value.trim().parse::<u32>().ok())
                .filter(|value| FETCH_SIZE_RANGE.contains(value))
                .unwrap_or(default)
        };

        Self {
            catalog_url: text("catalog_url").unwrap_or(defaults.catalog_url),
            top_limit: size("top_limit", defaults.top_limit),
            page_size: size("page_size", defaults.page_size),
            theme_name: text("theme"),
            theme_file: text("theme_file"),
            trace_level: text("trace_level"),
        }
    }

    /// Fetch sizes for the discovery controller.
    #[must_use]
    pub const fn discovery_settings(&self) -> DiscoverySettings {
        DiscoverySettings {
            top_limit: self.top_limit,
            page_size: self.page_size,
        }
    }

    /// Client for the configured catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if `catalog_url` is not an absolute hierarchical URL.
    pub fn catalog_client(&self) -> Result<CatalogClient> {
        CatalogClient::new(&self.catalog_url)
    }

    /// Resolves the theme: `theme_file`, then `theme`, then the default.
    ///
    /// A theme that fails to load is logged and skipped.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            match Theme::from_file(&path) {
                Ok(theme) => return theme,
                Err(e) => tracing::warn!(theme_file = %path, error = %e, "failed to load theme file, falling back"),
            }
        }

        if let Some(theme_name) = &self.theme_name {
            match Theme::from_name(theme_name) {
                Some(theme) => return theme,
                None => tracing::warn!(theme_name = %theme_name, "unknown theme, using default"),
            }
        }

        Theme::default()
    }
}

/// Builds the application state and the startup actions.
///
/// The only startup action is the implicit top rated fetch.
#[must_use]
pub fn initialize(config: &Config) -> (AppState, Vec<Action>) {
    tracing::debug!(
        catalog_url = %config.catalog_url,
        top_limit = config.top_limit,
        page_size = config.page_size,
        "initializing cinedex plugin"
    );

    AppState::start(config.discovery_settings(), config.load_theme())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn empty_map_yields_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn sizes_outside_range_fall_back_individually() {
        let config = Config::from_zellij(&map(&[("top_limit", "101"), ("page_size", " 35 ")]));
        assert_eq!(config.top_limit, 20);
        assert_eq!(config.page_size, 35);

        let config = Config::from_zellij(&map(&[("top_limit", "lots"), ("page_size", "-1")]));
        assert_eq!(config.discovery_settings(), DiscoverySettings::default());
    }

    #[test]
    fn blank_text_values_are_absent() {
        let config = Config::from_zellij(&map(&[("catalog_url", "  "), ("theme", ""), ("trace_level", "debug")]));
        assert_eq!(config.catalog_url, DEFAULT_CATALOG_URL);
        assert_eq!(config.theme_name, None);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn theme_file_takes_precedence_over_name() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut custom = Theme::from_name("catppuccin-frappe").unwrap();
        custom.name = "custom".to_string();
        file.write_all(toml::to_string(&custom).unwrap().as_bytes()).unwrap();

        let config = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            theme_file: Some(file.path().to_string_lossy().into_owned()),
            ..Config::default()
        };

        assert_eq!(config.load_theme().name, "custom");
    }

    #[test]
    fn broken_theme_sources_fall_back() {
        let config = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            theme_file: Some("/nowhere/theme.toml".to_string()),
            ..Config::default()
        };
        assert_eq!(config.load_theme().name, "catppuccin-latte");

        let config = Config { theme_name: Some("neon".to_string()), ..Config::default() };
        assert_eq!(config.load_theme().name, "catppuccin-mocha");
    }

    #[test]
    fn invalid_catalog_url_is_reported() {
        let config = Config { catalog_url: "::not a url".to_string(), ..Config::default() };
        assert!(config.catalog_client().is_err());
        assert!(Config::default().catalog_client().is_ok());
    }

    #[test]
    fn initialize_issues_configured_top_rated_fetch() {
        let config = Config { top_limit: 7, ..Config::default() };
        let (state, actions) = initialize(&config);

        assert_eq!(state.controller.state().mode(), Mode::Loading);
        match actions.as_slice() {
            [Action::Fetch(request)] => {
                assert_eq!(request.query, catalog::CatalogQuery::TopRated { limit: 7 });
            }
            other => panic!("unexpected startup actions: {other:?}"),
        }
    }
}
