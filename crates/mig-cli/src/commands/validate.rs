use anyhow::Result;
use mig_config::ProjectConfig;
use std::path::Path;

pub fn handle(project: &Path) -> Result<()> {
    let config = ProjectConfig::load(project)?;

    println!("✓ {} is valid", project.display());
    for translator in &config.translators {
        if translator.inverse {
            println!(
                "  {} -> {} (inverse)",
                translator.from_space, translator.to_space
            );
        } else {
            println!(
                "  {} -> {} ({} step(s))",
                translator.from_space,
                translator.to_space,
                translator.steps().len()
            );
        }
    }
    Ok(())
}
