use anyhow::Result;
use mig_config::ScrubberConfig;
use std::borrow::Cow;
use std::path::Path;

use super::{print_metadata, read_metadata};

pub fn handle(metadata: &Path, restore_original_author: bool) -> Result<()> {
    let revision = read_metadata(metadata)?;
    let config = ScrubberConfig {
        restore_original_author,
        ..Default::default()
    };

    let scrubbed = mig_scrub::scrub(&revision, &config);
    if let Cow::Borrowed(_) = scrubbed {
        tracing::info!(revision = %revision.id, "Metadata unchanged");
    }
    print_metadata(&scrubbed)
}
