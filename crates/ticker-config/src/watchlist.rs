//! Watchlist file persistence.
//!
//! Two on-disk shapes are accepted: a bare array of `{"code", "name"}`
//! records, and the full object carrying display preferences and the
//! session snapshot. Saving always writes the full object.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use ticker_core::error::PersistenceError;
use ticker_core::types::{Instrument, SessionSnapshot};
use ticker_monitor::DisplayPreferences;
use tracing::{debug, warn};

/// Watchlist, display preferences and persisted session state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistFile {
    #[serde(default = "default_stocks")]
    pub stocks: Vec<Instrument>,
    #[serde(default)]
    pub preferences: DisplayPreferences,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionSnapshot>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OnDisk {
    Legacy(Vec<Instrument>),
    Full(WatchlistFile),
}

fn default_stocks() -> Vec<Instrument> {
    vec![
        Instrument::new("sh000681", "科创价格"),
        Instrument::new("sh000832", "中证转债"),
        Instrument::new("sh518880", "国内金价"),
    ]
}

impl Default for WatchlistFile {
    fn default() -> Self {
        Self {
            stocks: default_stocks(),
            preferences: DisplayPreferences::default(),
            session: None,
        }
    }
}

impl WatchlistFile {
    /// Parse either on-disk shape.
    pub fn from_json(path: &Path, json: &str) -> Result<Self, PersistenceError> {
        let on_disk: OnDisk =
            serde_json::from_str(json).map_err(|source| PersistenceError::Json {
                path: path.display().to_string(),
                source,
            })?;

        Ok(match on_disk {
            OnDisk::Legacy(stocks) => Self {
                stocks,
                ..Self::default()
            },
            OnDisk::Full(file) => file,
        })
    }

    /// Load a watchlist file.
    pub fn load(path: &Path) -> Result<Self, PersistenceError> {
        let json = fs::read_to_string(path).map_err(|source| PersistenceError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(path, &json)
    }

    /// Load a watchlist file, falling back to the default watchlist when it
    /// is missing or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "No watchlist file, using defaults");
            return Self::default();
        }

        match Self::load(path) {
            Ok(file) => file,
            Err(e) => {
                warn!(error = %e, "Unreadable watchlist file, using defaults");
                Self::default()
            }
        }
    }

    /// Write the full shape as pretty UTF-8 JSON.
    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        let io_err = |source| PersistenceError::Io {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|source| PersistenceError::Json {
            path: path.display().to_string(),
            source,
        })?;
        fs::write(path, json).map_err(io_err)?;

        debug!(path = %path.display(), stocks = self.stocks.len(), "Saved watchlist");
        Ok(())
    }

    /// Replace the entry with the same identifier, or append a new one.
    ///
    /// Returns `true` when an existing entry was replaced.
    pub fn upsert(&mut self, code: &str, name: &str) -> bool {
        match self.stocks.iter_mut().find(|s| s.identifier == code) {
            Some(existing) => {
                existing.display_name = name.to_string();
                true
            }
            None => {
                self.stocks.push(Instrument::new(code, name));
                false
            }
        }
    }

    /// Remove an entry. Returns `true` when something was removed.
    pub fn remove(&mut self, code: &str) -> bool {
        let before = self.stocks.len();
        self.stocks.retain(|s| s.identifier != code);
        self.stocks.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    #[test]
    fn test_legacy_array_shape() {
        let json = r#"[{"code":"sh000001","name":"上证指数"},{"code":"gds_AUTD","name":"Gold"}]"#;
        let file = WatchlistFile::from_json(Path::new("w.json"), json).unwrap();

        assert_eq!(file.stocks.len(), 2);
        assert_eq!(file.stocks[0], Instrument::new("sh000001", "上证指数"));
        assert_eq!(file.preferences, DisplayPreferences::default());
        assert!(file.session.is_none());
    }

    #[test]
    fn test_full_shape_with_partial_preferences() {
        let json = r#"{
            "stocks": [{"code":"nf_AU0","name":"Gold futures"}],
            "preferences": {"show_volume": true},
            "session": {"date":"2024-10-18","extrema":{"nf_AU0":1.5}}
        }"#;
        let file = WatchlistFile::from_json(Path::new("w.json"), json).unwrap();

        assert_eq!(file.stocks, vec![Instrument::new("nf_AU0", "Gold futures")]);
        assert!(file.preferences.show_volume);
        assert_eq!(file.preferences.max_name_chars, 8);
        assert_eq!(file.session.unwrap().extrema["nf_AU0"], 1.5);
    }

    #[test]
    fn test_object_without_stocks_uses_defaults() {
        let file = WatchlistFile::from_json(Path::new("w.json"), "{}").unwrap();
        assert_eq!(file.stocks.len(), 3);
        assert_eq!(file.stocks[0].identifier, "sh000681");
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let err = WatchlistFile::from_json(Path::new("w.json"), "{not json").unwrap_err();
        assert!(matches!(err, PersistenceError::Json { .. }));
    }

    #[test]
    fn test_missing_or_broken_file_falls_back() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("missing.json");
        assert_eq!(WatchlistFile::load_or_default(&missing), WatchlistFile::default());

        let broken = temp.path().join("broken.json");
        fs::write(&broken, "[{").unwrap();
        assert_eq!(WatchlistFile::load_or_default(&broken), WatchlistFile::default());
        assert!(matches!(
            WatchlistFile::load(&missing),
            Err(PersistenceError::Io { .. })
        ));
    }

    #[test]
    fn test_save_writes_full_shape_and_keeps_unicode() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("stock_config.json");

        let mut file = WatchlistFile::default();
        let mut extrema = BTreeMap::new();
        extrema.insert("sh000832".to_string(), 0.8);
        file.session = Some(SessionSnapshot {
            date: "2024-10-18".to_string(),
            extrema,
        });
        file.save(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("中证转债"));
        assert!(text.contains("\"preferences\""));
        assert!(text.contains("\"code\": \"sh000681\""));

        assert_eq!(WatchlistFile::load(&path).unwrap(), file);
    }

    #[test]
    fn test_upsert_and_remove() {
        let mut file = WatchlistFile::default();

        assert!(!file.upsert("sh588000", "STAR 50 ETF"));
        assert_eq!(file.stocks.len(), 4);
        assert_eq!(file.stocks[3].identifier, "sh588000");

        assert!(file.upsert("sh000832", "CSI Convertible"));
        assert_eq!(file.stocks.len(), 4);
        assert_eq!(file.stocks[1].display_name, "CSI Convertible");

        assert!(file.remove("sh000681"));
        assert!(!file.remove("sh000681"));
        assert_eq!(file.stocks.len(), 3);
        assert_eq!(file.stocks[0].identifier, "sh000832");
    }
}
