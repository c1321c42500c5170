use super::config::DaoboardConfig;
use std::path::Path;

/// Write a commented default config to `path`
///
/// Refuses to overwrite an existing file unless `force` is set.
pub fn execute(path: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() && !force {
        return Err(format!(
            "Config file '{}' already exists (use --force to overwrite)",
            path.display()
        )
        .into());
    }

    DaoboardConfig::create_default(path)?;
    println!("📝 Wrote default configuration: {}", path.display());
    Ok(())
}
