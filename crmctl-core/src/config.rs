use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::{CrmError, Result};

/// Connection string used when neither the config file nor `DATABASE_URL`
/// names a store. Local development only, carries no credentials.
pub const FALLBACK_DATABASE_URL: &str = "postgres://localhost/crm";

/// Default bind address for `crmctl serve`
pub const DEFAULT_BIND: &str = "127.0.0.1:3030";

/// Centralized configuration for crmctl
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CrmConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerSection {
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
    #[serde(default)]
    pub cors_permissive: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DatabaseConfig {
    /// Connection string; `DATABASE_URL` wins over this when set
    pub url: Option<String>,
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3030))
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            cors_permissive: false,
        }
    }
}

impl CrmConfig {
    /// Load config from ~/.crmctl/config.toml, falling back to defaults when
    /// the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from an explicit path. A missing file yields defaults; a
    /// malformed file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|source| CrmError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get config file path: ~/.crmctl/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".crmctl/config.toml")
    }

    /// Resolve the connection string: `DATABASE_URL`, then the config file,
    /// then the local fallback.
    pub fn database_url(&self) -> String {
        Self::resolve_database_url(env::var("DATABASE_URL").ok(), self.database.url.as_deref())
    }

    fn resolve_database_url(from_env: Option<String>, from_file: Option<&str>) -> String {
        from_env
            .filter(|url| !url.trim().is_empty())
            .or_else(|| {
                from_file
                    .filter(|url| !url.trim().is_empty())
                    .map(str::to_owned)
            })
            .unwrap_or_else(|| FALLBACK_DATABASE_URL.to_string())
    }

    /// Write config to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        fs::write(path, toml_str)?;
        Ok(())
    }

    /// Render as TOML for `crmctl config show`
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = CrmConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, CrmConfig::default());
        assert_eq!(config.server.bind.to_string(), DEFAULT_BIND);
    }

    #[test]
    fn parses_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[database]\nurl = \"postgres://db/crm\"\n").unwrap();

        let config = CrmConfig::load_from(&path).unwrap();
        assert_eq!(config.database.url.as_deref(), Some("postgres://db/crm"));
        assert!(!config.server.cors_permissive);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server\nbind = 1").unwrap();

        let err = CrmConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, CrmError::ConfigParse { .. }));
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/config.toml");
        let mut config = CrmConfig::default();
        config.server.cors_permissive = true;

        config.save_to(&path).unwrap();
        assert_eq!(CrmConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn database_url_precedence() {
        assert_eq!(
            CrmConfig::resolve_database_url(Some("postgres://env".into()), Some("postgres://file")),
            "postgres://env"
        );
        assert_eq!(
            CrmConfig::resolve_database_url(Some("  ".into()), Some("postgres://file")),
            "postgres://file"
        );
        assert_eq!(
            CrmConfig::resolve_database_url(None, None),
            FALLBACK_DATABASE_URL
        );
    }
}
