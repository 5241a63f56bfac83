use anyhow::Result;
use mig_config::ProjectConfig;
use mig_engine::Translator;
use mig_fs::LocalFileSystem;
use std::path::Path;

use super::{load_settings, print_metadata, read_metadata};

pub fn handle(project: &Path, from: &str, to: &str, tree: &Path, metadata: &Path) -> Result<()> {
    // Everything that can be rejected up front is checked before the tree is touched
    let config = ProjectConfig::load(project)?;
    let translator = Translator::from_project(&LocalFileSystem, &config, from, to)?
        .with_filter_settings(load_settings().filter);
    let revision = read_metadata(metadata)?;

    let translation = translator.translate(tree, &revision)?;

    for path in &translation.deleted {
        tracing::info!(path = %path, "Removed");
    }
    print_metadata(&translation.metadata)
}
