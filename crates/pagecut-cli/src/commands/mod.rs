//! Subcommand implementations.

pub mod config;
pub mod extract;
pub mod info;
pub mod merge;
pub mod split;
pub mod text;

use std::path::Path;

use pagecut_core::PagecutConfig;

/// Load the configuration, falling back to defaults when no file is given.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<PagecutConfig> {
    match config_path {
        Some(path) => Ok(PagecutConfig::from_file(Path::new(path))?),
        None => Ok(PagecutConfig::default()),
    }
}

/// Refuse to clobber an existing file when the configuration forbids it.
pub fn check_overwrite(path: &Path, config: &PagecutConfig) -> anyhow::Result<()> {
    if !config.output.overwrite && path.exists() {
        anyhow::bail!(
            "Output file already exists: {} (enable output.overwrite to replace it)",
            path.display()
        );
    }
    Ok(())
}
