use anyhow::{Context, Result};
use ledgerlens_finance::InternalAccounts;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{default_store_path, ensure_ledgerlens_home};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreSection,
    pub accounts: AccountsSection,
    pub forecast: ForecastSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    /// Transaction CSV; `transactions.csv` under the ledgerlens home when unset
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountsSection {
    /// Description fragments naming the user's own accounts (e.g. "Sav ...5521")
    pub internal_fragments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastSection {
    pub horizon_months: usize,
}

impl Default for ForecastSection {
    fn default() -> Self {
        Self { horizon_months: 3 }
    }
}

impl Config {
    pub fn store_path(&self) -> Result<PathBuf> {
        match &self.store.path {
            Some(p) => Ok(p.clone()),
            None => default_store_path(),
        }
    }

    pub fn internal_accounts(&self) -> InternalAccounts {
        InternalAccounts::new(&self.accounts.internal_fragments)
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_ledgerlens_home()?.join("config.toml"))
}

/// Load from `path`, or from the default location. A missing file means defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config, path: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(path: Option<&Path>) -> Result<()> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[accounts]\ninternal_fragments = [\"Sav ...5521\", \"\"]\n",
        )
        .unwrap();

        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.forecast, ForecastSection::default());
        assert_eq!(cfg.store.path, None);
        assert_eq!(cfg.internal_accounts().fragments(), ["Sav ...5521".to_string()]);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let cfg = load_config(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.store.path = Some(dir.path().join("tx.csv"));
        cfg.forecast.horizon_months = 6;
        save_config(&cfg, &path).unwrap();

        assert_eq!(load_config(Some(&path)).unwrap(), cfg);
        assert_eq!(cfg.store_path().unwrap(), dir.path().join("tx.csv"));
    }

    #[test]
    fn test_retired_forecast_keys_are_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[forecast]\nhorizon_months = 4\ncache_ttl_secs = 60\n").unwrap();

        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.forecast, ForecastSection { horizon_months: 4 });
        assert!(!toml::to_string_pretty(&cfg).unwrap().contains("cache_ttl_secs"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[forecast]\nhorizon_months = \"soon\"\n").unwrap();
        assert!(load_config(Some(&path)).is_err());
    }
}
