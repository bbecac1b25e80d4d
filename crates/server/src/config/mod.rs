//! Configuration management for the services admin
//!
//! Settings are stored in RON. Every section is optional; anything left out
//! falls back to its default.

pub mod loader;

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Environment variable that overrides [`DatabaseSettings::path`].
pub const DB_PATH_ENV: &str = "SERVICES_ADMIN_DB_PATH";

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub admin: AdminSettings,
}

impl Config {
    /// Validate the whole configuration
    pub fn validate(&self) -> Result<(), String> {
        self.server.validate()?;
        self.admin.validate()
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ServerSettings {
    /// Address the admin server binds to
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        self.bind_addr
            .parse()
            .map_err(|_| format!("Invalid bind address '{}'", self.bind_addr))
    }

    pub fn validate(&self) -> Result<(), String> {
        self.socket_addr().map(|_| ())
    }
}

/// Category database location
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct DatabaseSettings {
    /// Directory holding the SQLite file
    pub path: PathBuf,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".services-admin"),
        }
    }
}

impl DatabaseSettings {
    /// The database directory, preferring the environment override.
    pub fn resolve_path(&self) -> PathBuf {
        match std::env::var(DB_PATH_ENV) {
            Ok(path) if !path.is_empty() => PathBuf::from(path),
            _ => self.path.clone(),
        }
    }
}

/// Admin page settings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AdminSettings {
    /// Route of the category listing; edit pages live beneath it
    pub listing_path: String,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            listing_path: "/admin/services".to_string(),
        }
    }
}

impl AdminSettings {
    pub fn validate(&self) -> Result<(), String> {
        if !self.listing_path.starts_with('/') {
            return Err(format!(
                "Listing path '{}' must start with '/'",
                self.listing_path
            ));
        }

        if self.listing_path.len() > 1 && self.listing_path.ends_with('/') {
            return Err(format!(
                "Listing path '{}' cannot end with '/'",
                self.listing_path
            ));
        }

        Ok(())
    }

    /// Path of the edit page for a category slug.
    pub fn edit_path(&self, slug: &str) -> String {
        format!(
            "{}/{}/edit",
            self.listing_path.trim_end_matches('/'),
            urlencoding::encode(slug)
        )
    }
}
