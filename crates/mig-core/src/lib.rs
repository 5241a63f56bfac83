//! Core domain models and shared utilities for mig
//!
//! This crate contains:
//! - Revision metadata (the value the scrubber rewrites)
//! - Error types shared by every stage of a translation
//! - Path set utilities (pattern exclusion, option key checks, relative paths)

pub mod error;
pub mod paths;
pub mod revision;

pub use error::{ConfigError, Error, OperationError, Result};
pub use paths::{ExclusionFilter, check_keys, exclude_by_patterns, make_filenames_relative};
pub use revision::RevisionMetadata;
