use serde::Deserialize;
use thrift_pricing::FeeSchedule;
use thrift_shared::Masked;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub fees: FeeSchedule,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub photos: PhotoConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AiConfig {
    /// Absent or placeholder keys disable AI generation entirely; the CLI
    /// falls back to template content.
    pub api_key: Option<Masked<String>>,
    #[serde(default = "default_ai_base_url")]
    pub base_url: String,
    #[serde(default = "default_ai_model")]
    pub model: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_ai_base_url(),
            model: default_ai_model(),
        }
    }
}

fn default_ai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_ai_model() -> String {
    "gpt-4o-mini".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct PhotoConfig {
    pub input_dir: String,
    pub output_dir: String,
}

impl Default for PhotoConfig {
    fn default() -> Self {
        Self {
            input_dir: "photos".to_string(),
            output_dir: "processed".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    pub drafts_dir: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            drafts_dir: "drafts".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in a local configuration file
            // This file shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of THRIFT)
            // Eg. `THRIFT_DATABASE__URL=...` would set the database url
            .add_source(config::Environment::with_prefix("THRIFT").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [database]
        url = "sqlite://thriftdesk.db"

        [fees]
        final_value_rate = 0.10
        processing_rate = 0.029
        processing_fixed = 0.30
        minimum_margin = 1.5
        break_even_buffer = 1.05

        [ai]
        api_key = "sk-test-123"
    "#;

    #[test]
    fn test_parse_sample_config() {
        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(SAMPLE, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.database.url, "sqlite://thriftdesk.db");
        assert_eq!(config.fees.final_value_rate, 0.10);
        assert_eq!(config.fees.listing_fee, 0.0); // serde default
        assert_eq!(config.ai.model, "gpt-4o-mini");
        assert_eq!(
            config.ai.api_key.as_ref().map(|k| k.expose().as_str()),
            Some("sk-test-123")
        );
        assert_eq!(config.photos.input_dir, "photos");
        assert_eq!(config.export.drafts_dir, "drafts");
    }

    #[test]
    fn test_config_debug_masks_key() {
        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(SAMPLE, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk-test-123"));
    }
}
