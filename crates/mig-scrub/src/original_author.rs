//! Original author restoration.
//!
//! When a change is re-attributed on import (say, to a service account), the
//! real author is kept in the description as an `ORIGINAL_AUTHOR=<value>` line.
//! Scrubbing moves that value back into the author field.

use std::borrow::Cow;
use std::sync::LazyLock;

use mig_config::ScrubberConfig;
use mig_core::RevisionMetadata;
use regex::Regex;

static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^ORIGINAL_AUTHOR=([^\r\n]+)").expect("marker pattern is valid")
});

/// Policy consulted on every scrub call
pub trait MetadataScrubberConfig {
    fn restore_original_author(&self) -> bool;
}

impl MetadataScrubberConfig for ScrubberConfig {
    fn restore_original_author(&self) -> bool {
        self.restore_original_author
    }
}

/// Result of pulling the marker out of a description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Marker value, unquoted
    pub value: String,
    /// Description with the marker line blanked; its line terminator stays
    pub residual: String,
}

/// Find the first `ORIGINAL_AUTHOR=` line and split it out of `description`.
///
/// The value runs to end of line, so `a=b` is kept whole. A value wrapped in
/// double quotes is unquoted. Lines whose value is empty are skipped.
pub fn extract_first_original_author(description: &str) -> Option<Extraction> {
    MARKER.captures_iter(description).find_map(|caps| {
        let line = caps.get(0)?;
        let value = unquote(caps.get(1)?.as_str());
        if value.is_empty() {
            return None;
        }

        let mut residual = String::with_capacity(description.len() - line.len());
        residual.push_str(&description[..line.start()]);
        residual.push_str(&description[line.end()..]);

        Some(Extraction {
            value: value.to_string(),
            residual,
        })
    })
}

fn unquote(raw: &str) -> &str {
    raw.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(raw)
}

/// Restore the original author recorded in `metadata`'s description.
///
/// Returns `Cow::Borrowed(metadata)` (the same reference) when disabled or when
/// no marker is present; callers can test for `Cow::Borrowed` to skip work.
pub fn scrub<'a, C>(metadata: &'a RevisionMetadata, config: &C) -> Cow<'a, RevisionMetadata>
where
    C: MetadataScrubberConfig + ?Sized,
{
    if !config.restore_original_author() {
        return Cow::Borrowed(metadata);
    }

    match extract_first_original_author(&metadata.description) {
        Some(Extraction { value, residual }) => {
            tracing::debug!(
                revision = %metadata.id,
                from = %metadata.author,
                to = %value,
                "Restored original author"
            );
            Cow::Owned(metadata.with_attribution(value, residual))
        }
        None => Cow::Borrowed(metadata),
    }
}
