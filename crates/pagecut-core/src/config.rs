//! Configuration structures for pagecut.

use serde::{Deserialize, Serialize};

/// Main configuration for pagecut operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PagecutConfig {
    /// Output file handling.
    pub output: OutputConfig,
}

impl Default for PagecutConfig {
    fn default() -> Self {
        Self {
            output: OutputConfig::default(),
        }
    }
}

/// Output file configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Overwrite existing output files.
    pub overwrite: bool,

    /// Compress streams in written documents.
    pub compress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            overwrite: true,
            compress: true,
        }
    }
}

impl PagecutConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
