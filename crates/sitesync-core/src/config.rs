//! Configuration module for SiteSync.
//!
//! Provides typed configuration structs that map to the YAML configuration
//! file, with loading, defaults, and validation.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::credentials::Credentials;

/// Top-level configuration for SiteSync.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub sync: SyncConfig,
    pub logging: LoggingConfig,
}

/// Identity and remote location settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Azure AD tenant (directory) id.
    pub tenant_id: String,
    /// Application (client) id.
    pub client_id: String,
    /// Secret provider scope holding the client secret.
    pub secret_scope: String,
    /// Key of the client secret within the scope.
    pub secret_key: String,
    /// SharePoint hostname, e.g. `contoso.sharepoint.com`.
    pub hostname: String,
    /// Site name under `/sites/`, e.g. `Analytics`.
    pub site_name: String,
    /// Document library display name, e.g. `Shared Documents`.
    pub document_library: String,
}

/// Synchronization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Directory downloaded files are written under.
    pub output_dir: PathBuf,
    /// Whether to archive a prior version before overwriting a changed file.
    pub versioning: bool,
    /// Whether index keys preserve folder structure (`false` = bare file names).
    pub structured: bool,
    /// Directory for archived versions; `None` means `./versions`.
    pub versions_dir: Option<PathBuf>,
    /// Optional subfolder to start discovery from; `None` means library root.
    pub folder_path: Option<String>,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Builds the authentication credentials from the site section.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.site.tenant_id.clone(),
            self.site.client_id.clone(),
            self.site.secret_scope.clone(),
            self.site.secret_key.clone(),
        )
    }

    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("site.tenant_id", &self.site.tenant_id),
            ("site.client_id", &self.site.client_id),
            ("site.secret_scope", &self.site.secret_scope),
            ("site.secret_key", &self.site.secret_key),
            ("site.hostname", &self.site.hostname),
            ("site.site_name", &self.site.site_name),
            ("site.document_library", &self.site.document_library),
        ] {
            if value.is_empty() {
                errors.push(ValidationError {
                    field: field.into(),
                    message: "must not be empty".into(),
                });
            }
        }

        if self.sync.output_dir.as_os_str().is_empty() {
            errors.push(ValidationError {
                field: "sync.output_dir".into(),
                message: "must not be empty".into(),
            });
        }

        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!("must be one of {VALID_LOG_LEVELS:?}"),
            });
        }

        errors
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("downloads"),
            versioning: true,
            structured: true,
            versions_dir: None,
            folder_path: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"site.tenant_id"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
