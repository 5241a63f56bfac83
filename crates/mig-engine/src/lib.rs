//! Translator execution: run a validated pipeline against a working tree and
//! a revision's metadata.

use std::borrow::Cow;
use std::path::Path;
use std::process::Command;

use mig_config::{
    EditorConfig, FilterSettings, ProjectConfig, ScrubberConfig, ShellConfig, StepConfig,
    TranslatorConfig, scrubber_config_of,
};
use mig_core::{ConfigError, OperationError, Result, RevisionMetadata};
use mig_fs::{FileSystem, TreeFilter};
use tracing::{debug, info};

/// Outcome of a translation
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub metadata: RevisionMetadata,
    /// Whether the metadata differs from the input
    pub metadata_changed: bool,
    /// Tree-relative paths removed by scrubber steps, in step order
    pub deleted: Vec<String>,
}

pub struct Translator<'a> {
    fs: &'a dyn FileSystem,
    config: &'a TranslatorConfig,
    filter: FilterSettings,
}

impl<'a> Translator<'a> {
    /// Validate `config` and prepare to run it. Nothing is touched on failure.
    pub fn new(
        fs: &'a dyn FileSystem,
        config: &'a TranslatorConfig,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        if config.inverse {
            return Err(ConfigError::new(
                "inverse",
                format!(
                    "Translator from {} to {} is an inverse and has no steps to run",
                    config.from_space, config.to_space
                ),
            ));
        }

        Ok(Self {
            fs,
            config,
            filter: FilterSettings::default(),
        })
    }

    /// Look up the translator between two spaces of a project
    pub fn from_project(
        fs: &'a dyn FileSystem,
        project: &'a ProjectConfig,
        from: &str,
        to: &str,
    ) -> std::result::Result<Self, ConfigError> {
        let config = project.translator(from, to).ok_or_else(|| {
            ConfigError::new(
                "translators",
                format!("No translator from {} to {} in project {}", from, to, project.name),
            )
        })?;
        Self::new(fs, config)
    }

    pub fn with_filter_settings(mut self, filter: FilterSettings) -> Self {
        self.filter = filter;
        self
    }

    /// Run every step in declared order against `tree`, then restore the
    /// original author using the first scrubber step's policy.
    pub fn translate(&self, tree: &Path, metadata: &RevisionMetadata) -> Result<Translation> {
        info!(
            from = %self.config.from_space,
            to = %self.config.to_space,
            tree = %tree.display(),
            revision = %metadata.id,
            "Translating"
        );

        let mut deleted = Vec::new();
        for (index, step) in self.config.steps().iter().enumerate() {
            debug!(step = %step.name, kind = step.editor.kind(), "Running step");
            match &step.editor {
                EditorConfig::Identity => {}
                EditorConfig::Scrubber(scrubber) => {
                    let removed = self
                        .scrub_files(tree, scrubber)
                        .map_err(|e| match e {
                            mig_core::Error::Config(c) => c.in_step(index).into(),
                            other => other,
                        })?;
                    deleted.extend(removed);
                }
                EditorConfig::Shell(shell) => self.run_shell(step, shell, tree)?,
            }
        }

        let scrubbed = match scrubber_config_of(self.config) {
            Some(scrubber) => mig_scrub::scrub(metadata, scrubber),
            None => Cow::Borrowed(metadata),
        };
        let metadata_changed = matches!(scrubbed, Cow::Owned(_));

        info!(deleted = deleted.len(), metadata_changed, "Translation finished");
        Ok(Translation {
            metadata: scrubbed.into_owned(),
            metadata_changed,
            deleted,
        })
    }

    fn scrub_files(&self, tree: &Path, scrubber: &ScrubberConfig) -> Result<Vec<String>> {
        let exclude = scrubber.file_filter()?;
        if exclude.is_empty() {
            return Ok(Vec::new());
        }

        let outcome = TreeFilter::new(self.fs)
            .with_parallelism(self.filter.effective_parallelism())
            .with_queue_depth(self.filter.queue_depth)
            .apply(tree, |path| exclude.survives(path))?;
        Ok(outcome.deleted)
    }

    /// Runs the command with `sh -e -c`; no script file is involved.
    fn run_shell(&self, step: &StepConfig, shell: &ShellConfig, tree: &Path) -> Result<()> {
        let cwd = match shell.subdir() {
            Some(subdir) => tree.join(subdir),
            None => tree.to_path_buf(),
        };
        let output = Command::new("/bin/sh")
            .arg("-e")
            .arg("-c")
            .arg(&shell.command_string)
            .current_dir(&cwd)
            .output()
            .map_err(|e| OperationError::StepFailed {
                step: step.name.clone(),
                message: format!("could not start shell in {}: {}", cwd.display(), e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OperationError::StepFailed {
                step: step.name.clone(),
                message: format!("{}: {}", output.status, stderr.trim()),
            }
            .into());
        }
        Ok(())
    }
}
