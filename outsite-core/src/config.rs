//! Tool configuration (`outsite.yml`) parsing and management.
//!
//! This is separate from the publication settings, which live inside the
//! export itself (see [`crate::publication`]).

use crate::publication::DEFAULT_CONFIG_KEY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// Main configuration struct matching the outsite.yml schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteInfo,

    #[serde(default)]
    pub paths: PathsConfig,

    /// Key of the configuration page inside the export
    #[serde(default = "default_config_page")]
    pub config_page: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Regexes matched against document keys; matching documents are skipped
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_config_page() -> String {
    DEFAULT_CONFIG_KEY.to_string()
}

fn default_base_url() -> String {
    String::from("/")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteInfo {
    /// Shown next to page titles; empty means page titles only
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_export")]
    pub export: PathBuf,

    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_export() -> PathBuf {
    PathBuf::from("export")
}

fn default_output() -> PathBuf {
    PathBuf::from("out")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            export: default_export(),
            output: default_output(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site: SiteInfo::default(),
            paths: PathsConfig::default(),
            config_page: default_config_page(),
            base_url: default_base_url(),
            ignore_patterns: Vec::new(),
            config_path: None,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Load configuration from a YAML file, falling back to defaults when it
    /// does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!("No config file at {:?}; using defaults", path);
            Ok(Self::default())
        }
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Get the export directory, resolved relative to config file
    pub fn export_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.export)
    }

    /// Get the output directory, resolved relative to config file
    pub fn output_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.output)
    }

    /// Resolve a path relative to the config file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match self.config_path.as_deref().and_then(Path::parent) {
            Some(parent) => parent.join(path),
            None => path.to_path_buf(),
        }
    }

    /// Normalized base URL with leading and trailing slash ("/foo/" or "/")
    pub fn normalized_base_url(&self) -> String {
        normalize_base_url(&self.base_url)
    }
}

/// Ensure base URLs have a leading and trailing slash
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "/".to_string();
    }

    let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_values() {
        let config = SiteConfig::default();
        assert_eq!(config.base_url, "/");
        assert_eq!(config.config_page, "roam/js/static-site.md");
        assert_eq!(config.export_dir(), PathBuf::from("export"));
        assert_eq!(config.output_dir(), PathBuf::from("out"));
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = SiteConfig::from_yaml("site:\n  title: Garden\npaths:\n  output: public\n").unwrap();
        assert_eq!(config.site.title, "Garden");
        assert_eq!(config.paths.export, PathBuf::from("export"));
        assert_eq!(config.paths.output, PathBuf::from("public"));
        assert!(config.ignore_patterns.is_empty());
    }

    #[test]
    fn test_paths_resolve_relative_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("outsite.yml");
        std::fs::write(&path, "paths:\n  export: graph\n  output: /abs/out\n").unwrap();

        let config = SiteConfig::from_file(&path).unwrap();
        assert_eq!(config.export_dir(), dir.path().join("graph"));
        assert_eq!(config.output_dir(), PathBuf::from("/abs/out"));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempdir().unwrap();
        let config = SiteConfig::load_or_default(dir.path().join("missing.yml")).unwrap();
        assert_eq!(config.base_url, "/");
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            SiteConfig::from_yaml("paths: [unclosed"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url(""), "/");
        assert_eq!(normalize_base_url("/"), "/");
        assert_eq!(normalize_base_url("docs"), "/docs/");
        assert_eq!(normalize_base_url("//a//b/"), "/a/b/");
    }
}
