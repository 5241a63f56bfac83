use anyhow::{Context, Result};
use mig_config::{EditorConfig, ProjectConfig, ShellConfig};
use mig_fs::{LocalFileSystem, make_shell_script};
use std::path::{Path, PathBuf};

/// Scripts are meant to be run from the root of a working tree.
pub fn handle(project: &Path, from: &str, to: &str, out: &Path) -> Result<()> {
    let config = ProjectConfig::load(project)?;
    let translator = config.translator(from, to).with_context(|| {
        format!("No translator from {} to {} in {}", from, to, project.display())
    })?;

    let mut written = 0;
    for (index, step) in translator.steps().iter().enumerate() {
        let EditorConfig::Shell(shell) = &step.editor else {
            continue;
        };
        let path = script_path(out, index, &step.name);
        make_shell_script(&LocalFileSystem, &script_body(shell), &path)?;
        println!("{}", path.display());
        written += 1;
    }

    eprintln!("✓ Wrote {} script(s) to {}", written, out.display());
    Ok(())
}

fn script_path(out: &Path, index: usize, step_name: &str) -> PathBuf {
    let safe: String = step_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    out.join(format!("{:02}-{}.sh", index, safe))
}

fn script_body(shell: &ShellConfig) -> String {
    match shell.subdir() {
        Some(subdir) => format!(
            "cd '{}'\n{}",
            subdir.replace('\'', r"'\''"),
            shell.command_string
        ),
        None => shell.command_string.clone(),
    }
}
