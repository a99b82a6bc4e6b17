//! Inspection orchestration: fetch, parse, allocate

use crate::config::{InspectorConfig, InventorySource};
use crate::core::allocator::find_free_blocks;
use crate::core::cidr::Cidr;
use crate::error::{InspectorError, Result};
use crate::inventory::compute::ComputeInventory;
use crate::inventory::snapshot::SnapshotInventory;
use crate::inventory::{fetch_network_usage, Inventory, Network};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};

/// Outcome of inspecting one network
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub project: String,
    pub network: String,
    /// Address space that was inspected
    pub parent: Cidr,
    /// Range text exactly as the inventory declared it
    pub declared: Vec<String>,
    /// Declared ranges that parsed
    pub used: Vec<Cidr>,
    /// Free blocks inside `parent`, by address
    pub free: Vec<Cidr>,
}

impl Report {
    /// Total number of free addresses
    pub fn free_addresses(&self) -> u64 {
        self.free.iter().map(Cidr::size).sum()
    }
}

/// Runs inspections against an inventory
pub struct Inspector {
    config: InspectorConfig,
    inventory: Arc<dyn Inventory>,
}

impl Inspector {
    pub fn new(config: InspectorConfig, inventory: Arc<dyn Inventory>) -> Self {
        Inspector { config, inventory }
    }

    /// Build the inventory the config points at
    ///
    /// For the compute source, a bearer token is read from the configured
    /// environment variable when one is named and set.
    pub async fn from_config(config: InspectorConfig) -> Result<Self> {
        let inventory: Arc<dyn Inventory> = match &config.inventory {
            InventorySource::Compute {
                endpoint,
                token_env,
            } => {
                let mut compute = ComputeInventory::new(endpoint.clone())?;
                if let Some(token) = token_env.as_deref().and_then(|var| std::env::var(var).ok()) {
                    compute = compute.with_token(token);
                }
                Arc::new(compute)
            }
            InventorySource::Snapshot { path } => Arc::new(SnapshotInventory::load(path).await?),
        };

        Ok(Inspector::new(config, inventory))
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// Inspect the configured network
    ///
    /// # Errors
    ///
    /// Inventory errors are returned unchanged. `Config` if no parent block is
    /// configured and the network declares none, `Overlap` if used ranges collide.
    #[instrument(skip(self), fields(project = %self.config.project, network = %self.config.network))]
    pub async fn inspect(&self) -> Result<Report> {
        let usage = fetch_network_usage(
            self.inventory.as_ref(),
            &self.config.project,
            &self.config.network,
            self.config.max_concurrent_requests,
        )
        .await?;

        let parent = self.resolve_parent(&usage.network)?;
        let free = find_free_blocks(parent, &usage.used)?;

        info!(
            parent = %parent,
            subnetworks = usage.subnetworks.len(),
            used = usage.used.len(),
            free = free.len(),
            "inspection complete"
        );

        let declared = usage.declared();
        Ok(Report {
            project: self.config.project.to_string(),
            network: usage.network.name,
            parent,
            declared,
            used: usage.used,
            free,
        })
    }

    fn resolve_parent(&self, network: &Network) -> Result<Cidr> {
        if let Some(parent) = self.config.parent {
            return Ok(parent);
        }

        match &network.ipv4_range {
            Some(range) => range.parse(),
            None => Err(InspectorError::Config(format!(
                "network {} declares no address range; set `parent`",
                network.name
            ))),
        }
    }
}
