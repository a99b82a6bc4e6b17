//! Local JSON snapshot inventory
//!
//! A snapshot holds network and subnetwork records in the same wire format as
//! the compute API:
//!
//! ```json
//! {
//!   "networks": [
//!     { "name": "vpc-network", "project": "my-project",
//!       "subnetworks": ["https://example.test/subnetworks/a"] }
//!   ],
//!   "subnetworks": [
//!     { "name": "a", "selfLink": "https://example.test/subnetworks/a",
//!       "ipCidrRange": "10.0.0.0/20" }
//!   ]
//! }
//! ```

use crate::core::validation::{ProjectId, ResourceName};
use crate::error::{InspectorError, Result};
use crate::inventory::{Inventory, Network, Subnetwork};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// On-disk snapshot document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventorySnapshot {
    #[serde(default)]
    pub networks: Vec<Network>,
    #[serde(default)]
    pub subnetworks: Vec<Subnetwork>,
}

/// Inventory served from a snapshot held in memory
#[derive(Debug, Clone)]
pub struct SnapshotInventory {
    networks: Vec<Network>,
    /// Subnetworks keyed by self link
    subnetworks: HashMap<String, Subnetwork>,
}

impl SnapshotInventory {
    pub fn from_snapshot(snapshot: InventorySnapshot) -> Self {
        let subnetworks = snapshot
            .subnetworks
            .into_iter()
            .map(|subnetwork| (subnetwork.self_link.clone(), subnetwork))
            .collect();

        SnapshotInventory {
            networks: snapshot.networks,
            subnetworks,
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let snapshot: InventorySnapshot = serde_json::from_str(text)?;
        Ok(Self::from_snapshot(snapshot))
    }

    pub async fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading inventory snapshot");
        let text = tokio::fs::read_to_string(path).await?;
        Self::from_json_str(&text)
    }
}

#[async_trait]
impl Inventory for SnapshotInventory {
    async fn get_network(&self, project: &ProjectId, network: &ResourceName) -> Result<Network> {
        self.networks
            .iter()
            .find(|candidate| {
                candidate.name == network.as_str()
                    && candidate
                        .project
                        .as_deref()
                        .map_or(true, |owner| owner == project.as_str())
            })
            .cloned()
            .ok_or_else(|| InspectorError::NotFound(format!("network {}/{}", project, network)))
    }

    async fn get_subnetwork(&self, link: &str) -> Result<Subnetwork> {
        self.subnetworks
            .get(link)
            .cloned()
            .ok_or_else(|| InspectorError::NotFound(format!("subnetwork {}", link)))
    }
}
