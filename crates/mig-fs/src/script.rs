use std::path::Path;

use mig_core::OperationError;

use crate::FileSystem;

pub const SHEBANG: &str = "#!/bin/sh -e\n";

/// Write `content` as an executable `sh -e` script at `name`.
pub fn make_shell_script(
    fs: &dyn FileSystem,
    content: &str,
    name: &Path,
) -> Result<(), OperationError> {
    let script = format!("{}{}", SHEBANG, content);

    fs.write(&script, name)
        .and_then(|()| fs.set_executable(name))
        .map_err(|source| OperationError::ScriptGeneration {
            path: name.to_path_buf(),
            source,
        })?;

    tracing::debug!(path = %name.display(), "Generated shell script");
    Ok(())
}
