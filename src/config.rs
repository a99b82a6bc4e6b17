//! Inspector configuration
//!
//! Loaded from a TOML file (`vpc-inspector.toml` by default) and then patched
//! with command-line overrides:
//!
//! ```toml
//! project = "k8s-playground-123456"
//! network = "vpc-network"
//! parent = "10.0.0.0/8"
//! max_concurrent_requests = 16
//!
//! [inventory]
//! kind = "compute"
//! token_env = "VPC_INSPECTOR_TOKEN"
//! ```

use crate::core::cidr::Cidr;
use crate::core::validation::{ProjectId, ResourceName};
use crate::error::{InspectorError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default compute REST endpoint
pub const DEFAULT_ENDPOINT: &str = "https://compute.googleapis.com/compute/v1";

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_max_concurrent_requests() -> usize {
    16
}

/// Where network and subnetwork records come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum InventorySource {
    /// Remote compute REST API
    Compute {
        #[serde(default = "default_endpoint")]
        endpoint: String,
        /// Environment variable holding a bearer token
        #[serde(default, skip_serializing_if = "Option::is_none")]
        token_env: Option<String>,
    },
    /// Local JSON snapshot of the inventory
    Snapshot { path: PathBuf },
}

impl Default for InventorySource {
    fn default() -> Self {
        InventorySource::Compute {
            endpoint: default_endpoint(),
            token_env: None,
        }
    }
}

/// Full inspector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectorConfig {
    pub project: ProjectId,

    pub network: ResourceName,

    /// Address space to inspect; falls back to the network's declared range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Cidr>,

    /// Upper bound on in-flight subnetwork requests
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,

    #[serde(default)]
    pub inventory: InventorySource,
}

/// Values supplied on the command line, each taking precedence over the file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub project: Option<String>,
    pub network: Option<String>,
    pub parent: Option<String>,
    pub snapshot: Option<PathBuf>,
    pub endpoint: Option<String>,
}

impl InspectorConfig {
    pub const DEFAULT_PATH: &'static str = "vpc-inspector.toml";

    /// Create a config with defaults for everything but the identifiers
    pub fn new(project: ProjectId, network: ResourceName) -> Self {
        InspectorConfig {
            project,
            network,
            parent: None,
            max_concurrent_requests: default_max_concurrent_requests(),
            inventory: InventorySource::default(),
        }
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: InspectorConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML config file
    pub async fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let text = tokio::fs::read_to_string(path).await?;
        Self::from_toml_str(&text)
    }

    /// Build the effective config from an optional file and CLI overrides
    ///
    /// # Errors
    ///
    /// Returns `Config` when neither source provides the project or network,
    /// and the usual validation errors for bad identifiers or CIDR text.
    pub fn resolve(file: Option<Self>, overrides: ConfigOverrides) -> Result<Self> {
        let mut config = match file {
            Some(config) => config,
            None => {
                let project = overrides.project.clone().ok_or_else(|| {
                    InspectorError::Config("no config file and no --project given".to_string())
                })?;
                let network = overrides.network.clone().ok_or_else(|| {
                    InspectorError::Config("no config file and no --network given".to_string())
                })?;
                InspectorConfig::new(ProjectId::new(project)?, ResourceName::new(network)?)
            }
        };

        if let Some(project) = overrides.project {
            config.project = ProjectId::new(project)?;
        }
        if let Some(network) = overrides.network {
            config.network = ResourceName::new(network)?;
        }
        if let Some(parent) = overrides.parent {
            config.parent = Some(parent.parse()?);
        }
        if let Some(path) = overrides.snapshot {
            config.inventory = InventorySource::Snapshot { path };
        } else if let Some(endpoint) = overrides.endpoint {
            let token_env = match config.inventory {
                InventorySource::Compute { token_env, .. } => token_env,
                InventorySource::Snapshot { .. } => None,
            };
            config.inventory = InventorySource::Compute {
                endpoint,
                token_env,
            };
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_concurrent_requests == 0 {
            return Err(InspectorError::Config(
                "max_concurrent_requests must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
project = "k8s-playground-123456"
network = "vpc-network"
parent = "10.0.0.0/8"
max_concurrent_requests = 4

[inventory]
kind = "compute"
endpoint = "http://localhost:8080/compute/v1"
token_env = "VPC_INSPECTOR_TOKEN"
"#;

    #[test]
    fn test_parse_full_config() {
        let config = InspectorConfig::from_toml_str(FULL).unwrap();
        assert_eq!(config.project.as_str(), "k8s-playground-123456");
        assert_eq!(config.network.as_str(), "vpc-network");
        assert_eq!(config.parent, Some("10.0.0.0/8".parse().unwrap()));
        assert_eq!(config.max_concurrent_requests, 4);
        assert_eq!(
            config.inventory,
            InventorySource::Compute {
                endpoint: "http://localhost:8080/compute/v1".to_string(),
                token_env: Some("VPC_INSPECTOR_TOKEN".to_string()),
            }
        );
    }

    #[test]
    fn test_defaults() {
        let config =
            InspectorConfig::from_toml_str("project = \"my-project\"\nnetwork = \"default\"\n")
                .unwrap();
        assert_eq!(config.parent, None);
        assert_eq!(config.max_concurrent_requests, 16);
        assert_eq!(config.inventory, InventorySource::default());
    }

    #[test]
    fn test_snapshot_source() {
        let text = "project = \"my-project\"\nnetwork = \"default\"\n\n[inventory]\nkind = \"snapshot\"\npath = \"inventory.json\"\n";
        let config = InspectorConfig::from_toml_str(text).unwrap();
        assert_eq!(
            config.inventory,
            InventorySource::Snapshot {
                path: PathBuf::from("inventory.json")
            }
        );
    }

    #[test]
    fn test_rejects_invalid_values() {
        let bad_project = "project = \"Bad\"\nnetwork = \"default\"\n";
        assert!(InspectorConfig::from_toml_str(bad_project).is_err());

        let bad_parent = "project = \"my-project\"\nnetwork = \"default\"\nparent = \"10.0.0.0/99\"\n";
        assert!(InspectorConfig::from_toml_str(bad_parent).is_err());

        let zero = "project = \"my-project\"\nnetwork = \"default\"\nmax_concurrent_requests = 0\n";
        assert!(matches!(
            InspectorConfig::from_toml_str(zero),
            Err(InspectorError::Config(_))
        ));
    }

    #[test]
    fn test_resolve_without_file() {
        let overrides = ConfigOverrides {
            project: Some("my-project".to_string()),
            network: Some("vpc-network".to_string()),
            parent: Some("172.16.0.0/12".to_string()),
            ..Default::default()
        };
        let config = InspectorConfig::resolve(None, overrides).unwrap();
        assert_eq!(config.project.as_str(), "my-project");
        assert_eq!(config.parent, Some("172.16.0.0/12".parse().unwrap()));
        assert_eq!(config.inventory, InventorySource::default());
    }

    #[test]
    fn test_resolve_requires_identifiers() {
        let overrides = ConfigOverrides {
            project: Some("my-project".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            InspectorConfig::resolve(None, overrides),
            Err(InspectorError::Config(_))
        ));
    }

    #[test]
    fn test_resolve_overrides_file() {
        let file = InspectorConfig::from_toml_str(FULL).unwrap();
        let overrides = ConfigOverrides {
            network: Some("other-network".to_string()),
            endpoint: Some("http://127.0.0.1:9000".to_string()),
            ..Default::default()
        };
        let config = InspectorConfig::resolve(Some(file), overrides).unwrap();
        assert_eq!(config.project.as_str(), "k8s-playground-123456");
        assert_eq!(config.network.as_str(), "other-network");
        assert_eq!(
            config.inventory,
            InventorySource::Compute {
                endpoint: "http://127.0.0.1:9000".to_string(),
                token_env: Some("VPC_INSPECTOR_TOKEN".to_string()),
            }
        );

        let file = InspectorConfig::from_toml_str(FULL).unwrap();
        let overrides = ConfigOverrides {
            snapshot: Some(PathBuf::from("snap.json")),
            ..Default::default()
        };
        let config = InspectorConfig::resolve(Some(file), overrides).unwrap();
        assert_eq!(
            config.inventory,
            InventorySource::Snapshot {
                path: PathBuf::from("snap.json")
            }
        );
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(InspectorConfig::DEFAULT_PATH);
        tokio::fs::write(&path, FULL).await.unwrap();

        let config = InspectorConfig::load(&path).await.unwrap();
        assert_eq!(config.network.as_str(), "vpc-network");

        let missing = InspectorConfig::load(&dir.path().join("missing.toml")).await;
        assert!(matches!(missing, Err(InspectorError::Io(_))));
    }
}
