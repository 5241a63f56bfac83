use std::path::PathBuf;

use thiserror::Error;

/// A structural or semantic problem in a pipeline, step or option map.
///
/// Always raised before any file is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "{message} (field: {field}{})",
    .step.map(|s| format!(", step: {s}")).unwrap_or_default()
)]
pub struct ConfigError {
    /// Dotted path of the offending field, e.g. `steps[2].editor.exclude_files`
    pub field: String,
    /// Index of the failing step, when the problem lives inside one
    pub step: Option<usize>,
    pub message: String,
}

impl ConfigError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            step: None,
            message: message.into(),
        }
    }

    /// Re-anchor this error under step `index` of an enclosing pipeline.
    pub fn in_step(mut self, index: usize) -> Self {
        self.field = nest(&format!("steps[{}]", index), &self.field);
        self.step = Some(index);
        self
    }

    /// Prefix the field path with an enclosing container.
    pub fn within(mut self, container: &str) -> Self {
        self.field = nest(container, &self.field);
        self
    }
}

fn nest(outer: &str, inner: &str) -> String {
    if inner.is_empty() {
        outer.to_string()
    } else {
        format!("{}.{}", outer, inner)
    }
}

/// A runtime failure while touching the file system or producing an artifact.
///
/// Work done before the failure is not rolled back.
#[derive(Error, Debug)]
pub enum OperationError {
    #[error("Failed to {action} {}: {source}", path.display())]
    FileOperation {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File {} is under {} but does not begin with it", file.display(), base.display())]
    PathSafety { file: PathBuf, base: PathBuf },

    #[error("Could not generate shell script {}: {source}", path.display())]
    ScriptGeneration {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Step {step} failed: {message}")]
    StepFailed { step: String, message: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

impl Error {
    /// True when the failure was detected before anything ran.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
