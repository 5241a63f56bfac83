use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mig")]
#[command(about = "Move source trees and revisions between project spaces", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log at debug level (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a project file without touching anything
    Validate {
        /// Project file (.json, .yaml, .yml or .toml)
        project: PathBuf,
    },

    /// Run a translator over a working tree and a revision's metadata
    Translate {
        /// Project file (.json, .yaml, .yml or .toml)
        project: PathBuf,

        /// Source project space
        #[arg(long)]
        from: String,

        /// Target project space
        #[arg(long)]
        to: String,

        /// Working tree to edit in place
        #[arg(long)]
        tree: PathBuf,

        /// Revision metadata as JSON
        #[arg(long)]
        metadata: PathBuf,
    },

    /// Delete files whose tree-relative path matches any pattern
    Filter {
        /// Directory to filter in place
        dir: PathBuf,

        /// Exclusion regex (repeatable)
        #[arg(long, required = true)]
        exclude: Vec<String>,

        /// Decision worker threads (default from settings)
        #[arg(long)]
        parallelism: Option<usize>,
    },

    /// Write a translator's shell steps out as standalone scripts
    Scripts {
        /// Project file (.json, .yaml, .yml or .toml)
        project: PathBuf,

        /// Source project space
        #[arg(long)]
        from: String,

        /// Target project space
        #[arg(long)]
        to: String,

        /// Directory to write the scripts into
        #[arg(long)]
        out: PathBuf,
    },

    /// Restore the original author of a revision
    Scrub {
        /// Revision metadata as JSON
        metadata: PathBuf,

        /// Move ORIGINAL_AUTHOR= from the description into the author field
        #[arg(long)]
        restore_original_author: bool,
    },
}
