pub mod filter;
pub mod scripts;
pub mod scrub;
pub mod translate;
pub mod validate;

use anyhow::{Context, Result};
use mig_config::Settings;
use mig_core::{ConfigError, RevisionMetadata};
use std::path::Path;

use crate::cli::Commands;

pub const EXIT_OPERATION: u8 = 1;
pub const EXIT_CONFIG: u8 = 2;

pub fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Validate { project } => validate::handle(&project),
        Commands::Translate {
            project,
            from,
            to,
            tree,
            metadata,
        } => translate::handle(&project, &from, &to, &tree, &metadata),
        Commands::Filter {
            dir,
            exclude,
            parallelism,
        } => filter::handle(&dir, &exclude, parallelism),
        Commands::Scripts {
            project,
            from,
            to,
            out,
        } => scripts::handle(&project, &from, &to, &out),
        Commands::Scrub {
            metadata,
            restore_original_author,
        } => scrub::handle(&metadata, restore_original_author),
    }
}

/// Config problems mean nothing ran; everything else may have left partial work.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    let config = err.chain().any(|cause| {
        cause.downcast_ref::<ConfigError>().is_some()
            || cause
                .downcast_ref::<mig_core::Error>()
                .is_some_and(mig_core::Error::is_config)
    });
    if config { EXIT_CONFIG } else { EXIT_OPERATION }
}

/// User settings, falling back to defaults when the settings file is unusable
pub fn load_settings() -> Settings {
    Settings::load().unwrap_or_else(|e| {
        tracing::warn!("Using default settings: {:#}", e);
        Settings::default()
    })
}

pub fn read_metadata(path: &Path) -> Result<RevisionMetadata> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read metadata {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse metadata {}", path.display()))
}

pub fn print_metadata(metadata: &RevisionMetadata) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(metadata)?);
    Ok(())
}
