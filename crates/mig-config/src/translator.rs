//! Translator pipeline model: an ordered list of editing steps between two
//! project spaces.

use std::collections::BTreeMap;
use std::path::{Component, Path};

use mig_core::{ConfigError, ExclusionFilter, check_keys};
use serde::{Deserialize, Serialize};

/// Option keys a shell step understands
pub const SHELL_OPTIONS: &[&str] = &["subdir"];

/// Configuration for one translator (e.g. `internal` -> `public`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslatorConfig {
    #[serde(rename = "from_project_space", default)]
    pub from_space: String,

    #[serde(rename = "to_project_space", default)]
    pub to_space: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<StepConfig>>,

    /// An inverse translator is derived from its forward counterpart and
    /// never carries steps of its own.
    #[serde(default)]
    pub inverse: bool,
}

impl TranslatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.from_space.is_empty() {
            return Err(ConfigError::new(
                "from_project_space",
                "Translator requires from_project_space",
            ));
        }
        if self.to_space.is_empty() {
            return Err(ConfigError::new(
                "to_project_space",
                "Translator requires to_project_space",
            ));
        }

        if self.inverse {
            if self.steps.is_some() {
                return Err(ConfigError::new("steps", "Inverse translator can't have steps"));
            }
            return Ok(());
        }

        match &self.steps {
            Some(steps) if !steps.is_empty() => {
                for (index, step) in steps.iter().enumerate() {
                    step.validate().map_err(|e| e.in_step(index))?;
                }
                Ok(())
            }
            _ => Err(ConfigError::new("steps", "Translator requires steps")),
        }
    }

    /// Steps in declared order (empty for inverse translators)
    pub fn steps(&self) -> &[StepConfig] {
        self.steps.as_deref().unwrap_or_default()
    }

    pub fn scrubber(&self) -> Option<&ScrubberConfig> {
        scrubber_config_of(self)
    }
}

/// Scrubber settings of the first scrubber step, in declared order.
///
/// Later scrubber steps still filter files but do not drive metadata.
pub fn scrubber_config_of(pipeline: &TranslatorConfig) -> Option<&ScrubberConfig> {
    pipeline
        .steps()
        .iter()
        .find_map(|step| step.editor.scrubber_config())
}

/// One stage of a translator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepConfig {
    #[serde(default)]
    pub name: String,

    pub editor: EditorConfig,
}

impl StepConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::new("name", "Step requires a name"));
        }
        self.editor.validate().map_err(|e| e.within("editor"))
    }
}

/// The closed set of editor kinds a step can wrap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditorConfig {
    Identity,
    Scrubber(ScrubberConfig),
    Shell(ShellConfig),
}

impl EditorConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            EditorConfig::Identity => "identity",
            EditorConfig::Scrubber(_) => "scrubber",
            EditorConfig::Shell(_) => "shell",
        }
    }

    pub fn scrubber_config(&self) -> Option<&ScrubberConfig> {
        match self {
            EditorConfig::Scrubber(config) => Some(config),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            EditorConfig::Identity => Ok(()),
            EditorConfig::Scrubber(config) => config.validate(),
            EditorConfig::Shell(config) => config.validate(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrubberConfig {
    /// Regexes over tree-relative paths; matching files are deleted
    #[serde(default)]
    pub exclude_files: Vec<String>,

    /// Move `ORIGINAL_AUTHOR=` from the description back into the author field
    #[serde(default)]
    pub restore_original_author: bool,
}

impl ScrubberConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.file_filter().map(|_| ())
    }

    pub fn file_filter(&self) -> Result<ExclusionFilter, ConfigError> {
        ExclusionFilter::new(&self.exclude_files)
            .map_err(|e| ConfigError::new("exclude_files", e.message))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellConfig {
    pub command_string: String,

    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

impl ShellConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.command_string.trim().is_empty() {
            return Err(ConfigError::new(
                "command_string",
                "Shell editor requires command_string",
            ));
        }
        check_keys(&self.options, SHELL_OPTIONS)?;

        if let Some(subdir) = self.subdir() {
            let contained = Path::new(subdir)
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
            if !contained {
                return Err(ConfigError::new(
                    "options.subdir",
                    format!("subdir must stay inside the tree: {}", subdir),
                ));
            }
        }
        Ok(())
    }

    pub fn subdir(&self) -> Option<&str> {
        self.options.get("subdir").map(String::as_str)
    }
}
