use crate::rag::DEFAULT_TOP_K;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default collection name for the banking document corpus
pub const DEFAULT_COLLECTION: &str = "banking_docs";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Enable the generation step; when off, evidence is returned verbatim
    pub enabled: bool,
    /// OpenAI-compatible chat completions endpoint
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// API credential; usually injected from the environment, not the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.7,
            max_tokens: 512,
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    pub collection: String,
    pub top_k: usize,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            collection: DEFAULT_COLLECTION.to_string(),
            top_k: DEFAULT_TOP_K,
            chunk_size: 500,
            chunk_overlap: 50,
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist,
    /// then apply environment overrides.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            let contents =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            toml::from_str(&contents).context("Failed to parse config file")?
        } else {
            let config = Config::default();
            config.save()?;
            config
        };

        config.apply_env();
        Ok(config)
    }

    /// Environment overrides: credential, generation toggle, endpoint.
    ///
    /// An absent credential is not an error here; the composer degrades to
    /// returning raw evidence instead of crashing ingestion or retrieval.
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("BANKBUDDY_API_KEY") {
            self.generation.api_key = Some(key);
        } else if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.generation.api_key = Some(key);
        }

        if let Ok(flag) = std::env::var("BANKBUDDY_USE_AI") {
            self.generation.enabled = flag.eq_ignore_ascii_case("true") || flag == "1";
        }

        if let Ok(url) = std::env::var("BANKBUDDY_BASE_URL") {
            self.generation.base_url = url;
        }

        // The toggle only takes effect with a credential present
        if self.generation.api_key.is_none() {
            self.generation.enabled = false;
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_string = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, toml_string).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;

        Ok(home.join(".bankbuddy").join("config.toml"))
    }

    /// Whether the generation collaborator is ready to be called
    pub fn generation_ready(&self) -> bool {
        self.generation.enabled && self.generation.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(!config.generation.enabled);
        assert_eq!(config.retrieval.top_k, DEFAULT_TOP_K);
        assert_eq!(config.retrieval.chunk_size, 500);
        assert_eq!(config.retrieval.chunk_overlap, 50);
        assert_eq!(config.retrieval.collection, "banking_docs");
    }

    #[test]
    fn test_generation_ready_requires_key() {
        let mut config = Config::default();
        config.generation.enabled = true;
        assert!(!config.generation_ready());

        config.generation.api_key = Some("sk-test".to_string());
        assert!(config.generation_ready());
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config.generation.model = "gpt-4o-mini".to_string();

        let toml_string = toml::to_string(&config).unwrap();
        assert!(toml_string.contains("gpt-4o-mini"));

        let deserialized: Config = toml::from_str(&toml_string).unwrap();
        assert_eq!(deserialized.generation.model, "gpt-4o-mini");
    }
}
