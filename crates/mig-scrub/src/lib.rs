//! Revision metadata scrubbing

pub mod original_author;

pub use original_author::{
    Extraction, MetadataScrubberConfig, extract_first_original_author, scrub,
};
