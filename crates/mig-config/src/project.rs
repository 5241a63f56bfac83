use std::path::Path;

use anyhow::Context;
use mig_core::ConfigError;
use serde::{Deserialize, Serialize};

use crate::translator::TranslatorConfig;

/// Serialized forms a project file may use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    Toml,
}

impl Format {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            "toml" => Some(Format::Toml),
            _ => None,
        }
    }
}

/// Project file: the translators available between this project's spaces
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub translators: Vec<TranslatorConfig>,
}

impl ProjectConfig {
    /// Read, parse and validate a project file.
    ///
    /// Parse and validation failures surface as [`ConfigError`].
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let format = Format::from_path(path).ok_or_else(|| {
            ConfigError::new(
                "",
                format!("Unsupported project file format: {}", path.display()),
            )
        })?;
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read project file {}", path.display()))?;

        let config = Self::parse(&content, format)?;
        config.validate()?;
        tracing::debug!(
            project = %config.name,
            translators = config.translators.len(),
            "Loaded project config"
        );
        Ok(config)
    }

    /// Parse without validating
    pub fn parse(content: &str, format: Format) -> Result<Self, ConfigError> {
        let parsed = match format {
            Format::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Format::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            Format::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|e| ConfigError::new("", format!("Failed to parse project file: {}", e)))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::new("name", "Project requires a name"));
        }

        for (index, translator) in self.translators.iter().enumerate() {
            let container = format!("translators[{}]", index);
            translator.validate().map_err(|e| e.within(&container))?;

            let duplicate = self.translators[..index].iter().any(|other| {
                other.from_space == translator.from_space && other.to_space == translator.to_space
            });
            if duplicate {
                return Err(ConfigError::new(
                    container,
                    format!(
                        "Duplicate translator from {} to {}",
                        translator.from_space, translator.to_space
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Find the translator between two project spaces
    pub fn translator(&self, from: &str, to: &str) -> Option<&TranslatorConfig> {
        self.translators
            .iter()
            .find(|t| t.from_space == from && t.to_space == to)
    }
}
