//! Configuration file loading and parsing
//!
//! Loads the admin configuration from RON files, searching a few standard
//! locations before falling back to defaults.

use super::Config;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "SERVICES_ADMIN_CONFIG_PATH";

/// Standard config file names to search for
const CONFIG_FILENAMES: &[&str] = &["services-admin.ron", ".services-admin/config.ron"];

/// Load configuration from a specific file path
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config = parse_ron(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid config file {}: {}", path.display(), e))?;
    Ok(config)
}

/// Load configuration with automatic file discovery
///
/// Searches, in order:
/// 1. Path specified in SERVICES_ADMIN_CONFIG_PATH
/// 2. services-admin.ron in current directory
/// 3. .services-admin/config.ron relative to current directory
///
/// If no config file is found, returns a default configuration.
pub fn load_with_discovery() -> Result<Config> {
    if let Ok(env_path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            tracing::info!("Loading config from {}: {}", CONFIG_PATH_ENV, path.display());
            return load_from_file(&path);
        } else {
            tracing::warn!(
                "{} specified but file not found: {}",
                CONFIG_PATH_ENV,
                path.display()
            );
        }
    }

    for filename in CONFIG_FILENAMES {
        let path = PathBuf::from(filename);
        if path.exists() {
            tracing::info!("Loading config from: {}", path.display());
            return load_from_file(&path);
        }
    }

    tracing::info!("No config file found, using defaults");
    Ok(Config::default())
}

/// Parse RON configuration string
fn parse_ron(content: &str) -> Result<Config> {
    ron::from_str(content).context("Failed to parse RON configuration")
}
