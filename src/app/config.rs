//! Host manifest loading
//!
//! The manifest lists the project factories and navigator providers the
//! host installs at startup:
//!
//! ```toml
//! [[factory]]
//! id = "workflow-multibranch"
//! display_name = "Multibranch Pipeline"
//!
//! [[provider]]
//! id = "github"
//! display_name = "GitHub Organization"
//! name_inference = true
//! ```

use crate::descriptor::api::{
    DescriptorResult, Extension, FactoryDescriptor, IconSpec, Navigator, ProviderDescriptor,
    NESTED_PROJECTS_CATEGORY,
};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("The specified manifest does not exist: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Error reading manifest {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing manifest {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid manifest: {message}")]
    Invalid { message: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl crate::core::error_handling::ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        !matches!(self, ConfigError::Read { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ConfigError::NotFound { .. } => Some("The manifest given with --config does not exist"),
            ConfigError::Parse { .. } => Some("The manifest is not valid TOML for this tool"),
            ConfigError::Invalid { message } => Some(message.as_str()),
            ConfigError::Read { .. } => None,
        }
    }
}

fn default_category() -> String {
    NESTED_PROJECTS_CATEGORY.to_string()
}

fn default_true() -> bool {
    true
}

/// A `[[factory]]` entry
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FactoryEntry {
    pub id: String,
    pub display_name: String,
}

/// A `[[provider]]` entry
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderEntry {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_category")]
    pub category: String,
    pub icon_class: Option<String>,
    pub icon_pattern: Option<String>,
    /// Whether the provider can build a navigator from an item name alone
    #[serde(default = "default_true")]
    pub name_inference: bool,
    /// The single-navigator provider kind
    #[serde(default)]
    pub single: bool,
}

/// Levels accepted for `log_level`, matching `--log-level`
pub const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostManifest {
    /// Log level applied once the manifest is loaded, unless `--log-level`
    /// was given
    pub log_level: Option<String>,
    #[serde(default)]
    pub factory: Vec<FactoryEntry>,
    #[serde(default)]
    pub provider: Vec<ProviderEntry>,
}

impl HostManifest {
    /// Check the log level and that ids are present and unique per kind
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(level) = &self.log_level {
            if !LOG_LEVELS.contains(&level.as_str()) {
                return Err(ConfigError::Invalid {
                    message: format!(
                        "log_level '{}' is not one of {}",
                        level,
                        LOG_LEVELS.join(", ")
                    ),
                });
            }
        }
        check_ids("factory", self.factory.iter().map(|f| f.id.as_str()))?;
        check_ids("provider", self.provider.iter().map(|p| p.id.as_str()))
    }

    pub fn factories(&self) -> Vec<FactoryDescriptor> {
        self.factory
            .iter()
            .map(|entry| FactoryDescriptor::new(&entry.id, &entry.display_name))
            .collect()
    }

    pub fn providers(&self) -> Vec<ManifestProvider> {
        self.provider.iter().cloned().map(ManifestProvider::from).collect()
    }
}

fn check_ids<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> ConfigResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(ConfigError::Invalid {
                message: format!("every {} needs a non-empty id", kind),
            });
        }
        if !seen.insert(id) {
            return Err(ConfigError::Invalid {
                message: format!("{} id '{}' is listed more than once", kind, id),
            });
        }
    }
    Ok(())
}

/// Parse and validate manifest text read from `path`
pub fn parse_manifest(contents: &str, path: &Path) -> ConfigResult<HostManifest> {
    let manifest: HostManifest = toml::from_str(contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    manifest.validate()?;
    Ok(manifest)
}

/// Where the manifest is looked for when no path is given
pub fn default_manifest_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("Orgfolder").join("orgfolder.toml"))
}

/// Load the host manifest
///
/// An explicit path must exist. Without one the default location is used
/// when present, otherwise the manifest is empty.
pub async fn load_manifest(explicit: Option<&Path>) -> ConfigResult<HostManifest> {
    let path = match explicit {
        Some(path) if !path.exists() => {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            })
        }
        Some(path) => path.to_path_buf(),
        None => match default_manifest_path() {
            Some(path) if path.exists() => path,
            _ => {
                log::debug!("no manifest found; starting with no extensions");
                return Ok(HostManifest::default());
            }
        },
    };

    log::debug!("loading manifest {}", path.display());
    let contents = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| ConfigError::Read {
            path: path.clone(),
            source: e,
        })?;
    parse_manifest(&contents, &path)
}

/// Navigator provider declared in the manifest
#[derive(Debug, Clone)]
pub struct ManifestProvider {
    entry: ProviderEntry,
}

impl From<ProviderEntry> for ManifestProvider {
    fn from(entry: ProviderEntry) -> Self {
        Self { entry }
    }
}

impl Extension for ManifestProvider {
    fn id(&self) -> &str {
        &self.entry.id
    }
}

impl ProviderDescriptor for ManifestProvider {
    fn display_name(&self) -> &str {
        &self.entry.display_name
    }

    fn description(&self) -> &str {
        &self.entry.description
    }

    fn category_id(&self) -> &str {
        &self.entry.category
    }

    fn icon(&self) -> IconSpec {
        IconSpec {
            file_path_pattern: self.entry.icon_pattern.clone(),
            class_name: self.entry.icon_class.clone(),
        }
    }

    fn new_instance(&self, name: Option<&str>) -> DescriptorResult<Option<Navigator>> {
        if self.entry.name_inference {
            Ok(Some(Navigator::new(&self.entry.id, name)))
        } else {
            Ok(None)
        }
    }

    fn is_single_provider(&self) -> bool {
        self.entry.single
    }
}
