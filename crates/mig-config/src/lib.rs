//! Configuration for mig: translator pipelines, project files and user settings

pub mod project;
pub mod translator;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use project::{Format, ProjectConfig};
pub use translator::{
    EditorConfig, SHELL_OPTIONS, ScrubberConfig, ShellConfig, StepConfig, TranslatorConfig,
    scrubber_config_of,
};

/// User-level settings (~/.config/mig/config.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub filter: FilterSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterSettings {
    /// Worker threads deciding which files survive (0 = one per core)
    #[serde(default)]
    pub parallelism: usize,

    /// Capacity of the bounded queue feeding those workers
    #[serde(default = "default_queue_depth")]
    pub queue_depth: usize,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            parallelism: 0,
            queue_depth: default_queue_depth(),
        }
    }
}

impl FilterSettings {
    pub fn effective_parallelism(&self) -> usize {
        if self.parallelism > 0 {
            return self.parallelism;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}

fn default_queue_depth() -> usize {
    1024
}

impl Settings {
    /// Load settings from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            let settings = Settings::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&settings)?;
            std::fs::write(path, content)?;
            tracing::info!(path = %path.display(), "Created default settings");
            Ok(settings)
        }
    }

    /// Get settings file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("org", "mig", "mig") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.mig/config.toml")
        }
    }
}
