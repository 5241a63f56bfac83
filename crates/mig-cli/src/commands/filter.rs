use anyhow::Result;
use mig_core::ExclusionFilter;
use mig_fs::{LocalFileSystem, TreeFilter};
use std::path::Path;

use super::load_settings;

pub fn handle(dir: &Path, exclude: &[String], parallelism: Option<usize>) -> Result<()> {
    let exclude = ExclusionFilter::new(exclude)?;
    let settings = load_settings().filter;
    let parallelism = parallelism.unwrap_or_else(|| settings.effective_parallelism());

    let outcome = TreeFilter::new(&LocalFileSystem)
        .with_parallelism(parallelism)
        .with_queue_depth(settings.queue_depth)
        .apply(dir, |path| exclude.survives(path))?;

    for path in &outcome.deleted {
        println!("{}", path);
    }
    eprintln!(
        "✓ Removed {} of {} file(s)",
        outcome.deleted.len(),
        outcome.examined
    );
    Ok(())
}
