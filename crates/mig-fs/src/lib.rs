//! File system collaborator and the tree operations built on it

pub mod filesystem;
pub mod filter;
pub mod script;

pub use filesystem::{FileSystem, LocalFileSystem};
pub use filter::{FilterOutcome, TreeFilter, filter_files};
pub use script::make_shell_script;

#[cfg(test)]
pub(crate) mod testing;
