use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub general: General,
    pub backend: Backend,
    pub auth: Auth,
    pub pagination: Pagination,
    pub redeem: Redeem,
    pub gamification: Gamification,
}

#[derive(Debug, Clone, Deserialize)]
pub struct General {
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Backend {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Auth {
    /// File the persisted credential token is read from (and deleted from on
    /// a fatal auth failure).
    pub token_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Pagination {
    pub transactions_per_page: usize,
    pub redeems_per_page: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Redeem {
    /// Coin sizes offered by the custom redemption form, in grams.
    pub coin_sizes_grams: Vec<Decimal>,
    /// Quick-redeem shortcut targets, in grams.
    pub quick_targets_grams: Vec<Decimal>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Gamification {
    pub max_stars: u32,
}

impl Config {
    pub fn default_config_path() -> String {
        "config/default.toml".to_string()
    }

    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {path}"))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).context("failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            !self.backend.base_url.is_empty(),
            "backend.base_url must not be empty"
        );
        anyhow::ensure!(
            self.backend.request_timeout_secs > 0,
            "backend.request_timeout_secs must be > 0"
        );
        anyhow::ensure!(
            self.pagination.transactions_per_page > 0,
            "pagination.transactions_per_page must be > 0"
        );
        anyhow::ensure!(
            self.pagination.redeems_per_page > 0,
            "pagination.redeems_per_page must be > 0"
        );
        anyhow::ensure!(
            !self.redeem.quick_targets_grams.is_empty(),
            "redeem.quick_targets_grams must not be empty"
        );
        anyhow::ensure!(
            self.redeem
                .coin_sizes_grams
                .iter()
                .chain(&self.redeem.quick_targets_grams)
                .all(|size| *size > Decimal::ZERO),
            "redeem sizes and targets must be > 0 grams"
        );
        anyhow::ensure!(
            self.gamification.max_stars > 0,
            "gamification.max_stars must be > 0"
        );
        Ok(())
    }
}

impl FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_toml_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_config() {
        let config = Config::from_toml_str(include_str!("../../../config/default.toml")).unwrap();
        assert_eq!(config.pagination.transactions_per_page, 4);
        assert_eq!(config.pagination.redeems_per_page, 3);
        assert_eq!(config.gamification.max_stars, 5);
        assert_eq!(config.redeem.quick_targets_grams.len(), 3);
        assert!(config.backend.base_url.starts_with("http"));
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let toml = include_str!("../../../config/default.toml")
            .replace("transactions_per_page = 4", "transactions_per_page = 0");
        let err = Config::from_toml_str(&toml).unwrap_err();
        assert!(err.to_string().contains("transactions_per_page"));
    }

    #[test]
    fn test_rejects_non_positive_coin_size() {
        let toml = include_str!("../../../config/default.toml").replace("\"0.5\"", "\"-0.5\"");
        assert!(Config::from_toml_str(&toml).is_err());
    }
}
