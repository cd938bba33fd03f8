//! Application configuration.
//!
//! The catalog section carries the reference data the views need:
//! which columns are restaurants, which products the analysis views
//! cover, portion weights, and the classification groups for seasonal
//! analysis. Everything has a workable default, so a config file is
//! optional.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub chat: ChatConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Known restaurant column names. Empty: accept every numeric extra
    /// column as a restaurant.
    pub restaurants: Vec<String>,
    /// Products covered by the analysis, scenario and chat views.
    /// Empty: all products.
    pub analysis_products: Vec<String>,
    /// Products allowed into generated reports. Empty: all products.
    pub report_products: Vec<String>,
    /// Weight of one portion per product, kg.
    pub portion_weights_kg: BTreeMap<String, f64>,
    /// Named product groups for the seasonal-trend view.
    pub classifications: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Environment variable holding the API key
    pub api_key_env: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.2,
            max_tokens: 1000,
            api_key_env: "OPENAI_API_KEY".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter when RUST_LOG is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load a TOML config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Load a config file when given one, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Restaurant catalog in the form the loader wants: None when no
    /// catalog is configured.
    pub fn restaurant_catalog(&self) -> Option<Vec<String>> {
        if self.catalog.restaurants.is_empty() {
            None
        } else {
            Some(self.catalog.restaurants.clone())
        }
    }

    /// Whether a product belongs to the analysis views.
    pub fn is_analysis_product(&self, product: &str) -> bool {
        self.catalog.analysis_products.is_empty()
            || self.catalog.analysis_products.iter().any(|p| p == product)
    }

    /// Whether a product belongs to generated reports.
    pub fn is_report_product(&self, product: &str) -> bool {
        self.catalog.report_products.is_empty()
            || self.catalog.report_products.iter().any(|p| p == product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_permissive() {
        let config = AppConfig::default();
        assert!(config.restaurant_catalog().is_none());
        assert!(config.is_analysis_product("anything"));
        assert!(config.is_report_product("anything"));
        assert_eq!(config.chat.model, "gpt-4o-mini");
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [catalog]
            restaurants = ["Riverside Mall"]

            [catalog.portion_weights_kg]
            "Beef Patty Prep" = 0.2
            "#,
        )
        .unwrap();

        assert_eq!(config.catalog.restaurants, ["Riverside Mall"]);
        assert_eq!(
            config.catalog.portion_weights_kg.get("Beef Patty Prep"),
            Some(&0.2)
        );
        assert_eq!(config.chat.max_tokens, 1000);
        assert_eq!(config.logging.level, "info");
    }
}
