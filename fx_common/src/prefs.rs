//! Persisted user preferences.
//!
//! Theme, dashboard layout and the remembered login e-mail are stored
//! together as one JSON document. A missing file yields the defaults; a file
//! that exists but cannot be parsed is an error rather than being silently
//! replaced.
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::currency::Currency;
use crate::pair::CurrencyPair;
use crate::result::Result;

/// File name used when no path is given.
pub const DEFAULT_PREFS_FILE: &str = "fx_prefs.json";

/// Colour scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Display, EnumString, Serialize, Deserialize)]
#[clap(rename_all = "lower")]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background.
    #[default]
    Light,
    /// Dark background.
    Dark,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Chart style of the dashboard history panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Display, EnumString, Serialize, Deserialize)]
#[clap(rename_all = "lower")]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    /// Bars.
    #[default]
    Bar,
    /// Line.
    Line,
    /// Filled area.
    Area,
}

/// Dashboard layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardPreferences {
    /// Currency amounts are shown in by default.
    pub default_currency: Currency,
    /// Pairs pinned to the dashboard.
    pub favorite_currency_pairs: Vec<CurrencyPair>,
    /// Show the market news panel.
    pub show_market_news: bool,
    /// Show the recent trends panel.
    pub show_recent_trends: bool,
    /// Style of the history chart.
    pub chart_type: ChartType,
}

impl Default for DashboardPreferences {
    fn default() -> Self {
        use crate::currency::Currency::{EUR, GBP, GHS, NGN, USD};
        Self {
            default_currency: USD,
            favorite_currency_pairs: vec![
                CurrencyPair::new(USD, EUR),
                CurrencyPair::new(USD, GBP),
                CurrencyPair::new(USD, NGN),
                CurrencyPair::new(USD, GHS),
            ],
            show_market_news: true,
            show_recent_trends: true,
            chart_type: ChartType::Bar,
        }
    }
}

/// Partial update of the dashboard layout; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardUpdate {
    /// New default currency.
    pub default_currency: Option<Currency>,
    /// New favourite pairs.
    pub favorite_currency_pairs: Option<Vec<CurrencyPair>>,
    /// New market news visibility.
    pub show_market_news: Option<bool>,
    /// New recent trends visibility.
    pub show_recent_trends: Option<bool>,
    /// New chart style.
    pub chart_type: Option<ChartType>,
}

/// Everything the user can persist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    /// Colour scheme.
    pub theme: Theme,
    /// Dashboard layout.
    pub dashboard: DashboardPreferences,
    /// E-mail remembered by the login form.
    pub remembered_email: Option<String>,
}

impl Preferences {
    /// Switches between light and dark; returns the new theme.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Merges `update` into the dashboard layout.
    pub fn merge_dashboard(&mut self, update: DashboardUpdate) {
        let dashboard = &mut self.dashboard;
        if let Some(currency) = update.default_currency {
            dashboard.default_currency = currency;
        }
        if let Some(pairs) = update.favorite_currency_pairs {
            dashboard.favorite_currency_pairs = pairs;
        }
        if let Some(show) = update.show_market_news {
            dashboard.show_market_news = show;
        }
        if let Some(show) = update.show_recent_trends {
            dashboard.show_recent_trends = show;
        }
        if let Some(chart_type) = update.chart_type {
            dashboard.chart_type = chart_type;
        }
    }

    /// Remembers `email` for the next login, or forgets it with `None`.
    pub fn remember_email(&mut self, email: Option<&str>) {
        self.remembered_email = email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string);
    }
}

/// JSON file holding the preferences.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    /// Store backed by `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Location of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the preferences; a missing file yields the defaults.
    pub fn load(&self) -> Result<Preferences> {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                debug!("Loaded preferences from {}", self.path.display());
                Ok(serde_json::from_str(&text)?)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No preferences at {}, using defaults", self.path.display());
                Ok(Preferences::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Writes the preferences as pretty-printed JSON.
    pub fn save(&self, prefs: &Preferences) -> Result<()> {
        let json = serde_json::to_string_pretty(prefs)?;
        fs::write(&self.path, json)?;
        info!("Preferences saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FxError;
    use std::process;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("fx_prefs_{}_{}.json", name, process::id()))
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let store = PreferenceStore::new(scratch_path("missing"));
        let prefs = store.load().unwrap();
        assert_eq!(prefs, Preferences::default());
        assert_eq!(prefs.dashboard.favorite_currency_pairs.len(), 4);
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_path("roundtrip");
        let store = PreferenceStore::new(&path);
        let mut prefs = Preferences::default();
        assert_eq!(prefs.toggle_theme(), Theme::Dark);
        prefs.remember_email(Some("  ama@example.com "));
        prefs.merge_dashboard(DashboardUpdate {
            chart_type: Some(ChartType::Line),
            show_market_news: Some(false),
            ..Default::default()
        });
        store.save(&prefs).unwrap();

        let loaded = store.load().unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(loaded, prefs);
        assert_eq!(loaded.remembered_email.as_deref(), Some("ama@example.com"));
        assert_eq!(loaded.dashboard.chart_type, ChartType::Line);
        assert!(loaded.dashboard.show_recent_trends);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let path = scratch_path("malformed");
        fs::write(&path, "{ not json").unwrap();
        let err = PreferenceStore::new(&path).load().unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(matches!(err, FxError::SerdeJson(_)));
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let prefs: Preferences =
            serde_json::from_str(r#"{"theme":"dark","dashboard":{"defaultCurrency":"GHS"}}"#).unwrap();
        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(prefs.dashboard.default_currency, Currency::GHS);
        assert!(prefs.dashboard.show_market_news);
        assert_eq!(prefs.remembered_email, None);
    }

    #[test]
    fn test_forget_email() {
        let mut prefs = Preferences::default();
        prefs.remember_email(Some("kofi@example.com"));
        prefs.remember_email(Some("   "));
        assert_eq!(prefs.remembered_email, None);
    }
}
