//! Revision metadata domain model

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Metadata of a single revision, as read from a repository.
///
/// Immutable once built; rewriting stages produce a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionMetadata {
    pub id: String,
    pub author: String,
    #[serde(with = "time::serde::timestamp")]
    pub date: OffsetDateTime,
    pub description: String,
}

impl RevisionMetadata {
    pub fn new(
        id: impl Into<String>,
        author: impl Into<String>,
        date: OffsetDateTime,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            date,
            description: description.into(),
        }
    }

    /// Copy with a different author and description; id and date are kept.
    pub fn with_attribution(&self, author: String, description: String) -> Self {
        Self {
            id: self.id.clone(),
            author,
            date: self.date,
            description,
        }
    }
}
