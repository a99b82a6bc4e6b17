//! Network inventory access
//!
//! The allocator only needs a parent block and a list of used blocks. This
//! module gathers them from an [`Inventory`]:
//! - [`compute::ComputeInventory`] talks to the compute REST API
//! - [`snapshot::SnapshotInventory`] reads a local JSON snapshot
//!
//! Subnetworks are fetched one request per declared link, concurrently. The
//! first failure wins and the requests still in flight are dropped.

pub mod compute;
pub mod snapshot;

use crate::core::cidr::Cidr;
use crate::core::validation::{ProjectId, ResourceName};
use crate::error::Result;
use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// A virtual network as declared in the inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub name: String,

    #[serde(default)]
    pub self_link: String,

    /// Legacy networks declare a single address range
    #[serde(default, rename = "IPv4Range", skip_serializing_if = "Option::is_none")]
    pub ipv4_range: Option<String>,

    /// Self links of the network's subnetworks
    #[serde(default)]
    pub subnetworks: Vec<String>,

    /// Owning project; only recorded in snapshots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

/// An additional range attached to a subnetwork
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecondaryRange {
    pub range_name: String,
    pub ip_cidr_range: String,
}

/// A subnetwork and the ranges it occupies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subnetwork {
    pub name: String,

    #[serde(default)]
    pub self_link: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    pub ip_cidr_range: String,

    #[serde(default)]
    pub secondary_ip_ranges: Vec<SecondaryRange>,
}

impl Subnetwork {
    /// Primary range followed by every secondary range, as declared
    pub fn declared_ranges(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.ip_cidr_range.as_str()).chain(
            self.secondary_ip_ranges
                .iter()
                .map(|range| range.ip_cidr_range.as_str()),
        )
    }
}

/// Source of network and subnetwork records
#[async_trait]
pub trait Inventory: Send + Sync {
    /// Fetch a network by project and name
    async fn get_network(&self, project: &ProjectId, network: &ResourceName) -> Result<Network>;

    /// Fetch a subnetwork by its self link
    async fn get_subnetwork(&self, link: &str) -> Result<Subnetwork>;
}

/// Fetch every subnetwork the network declares
///
/// At most `max_in_flight` requests run at once. Results keep the network's
/// declaration order. On the first error the remaining requests are cancelled
/// and that error is returned.
pub async fn list_subnetworks(
    inventory: &dyn Inventory,
    network: &Network,
    max_in_flight: usize,
) -> Result<Vec<Subnetwork>> {
    debug!(
        network = %network.name,
        count = network.subnetworks.len(),
        max_in_flight,
        "fetching subnetworks"
    );

    let mut fetched: Vec<(usize, Subnetwork)> = stream::iter(network.subnetworks.iter().enumerate())
        .map(|(idx, link)| async move {
            inventory
                .get_subnetwork(link)
                .await
                .map(|subnetwork| (idx, subnetwork))
        })
        .buffer_unordered(max_in_flight.max(1))
        .try_collect()
        .await?;

    fetched.sort_unstable_by_key(|(idx, _)| *idx);
    Ok(fetched.into_iter().map(|(_, subnetwork)| subnetwork).collect())
}

/// Parse every declared range of the subnetworks into blocks
///
/// Ranges that do not parse are logged and skipped.
pub fn used_blocks(subnetworks: &[Subnetwork]) -> Vec<Cidr> {
    let mut blocks = Vec::new();

    for subnetwork in subnetworks {
        for range in subnetwork.declared_ranges() {
            match range.parse::<Cidr>() {
                Ok(block) => blocks.push(block),
                Err(e) => warn!(subnetwork = %subnetwork.name, range, "skipping range: {}", e),
            }
        }
    }

    blocks
}

/// A network together with everything its subnetworks declare
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkUsage {
    pub network: Network,
    /// Subnetworks in declaration order
    pub subnetworks: Vec<Subnetwork>,
    /// Declared ranges that parsed
    pub used: Vec<Cidr>,
}

impl NetworkUsage {
    /// Range text exactly as declared, primary ranges before secondary ones
    pub fn declared(&self) -> Vec<String> {
        self.subnetworks
            .iter()
            .flat_map(|subnetwork| subnetwork.declared_ranges().map(str::to_string))
            .collect()
    }
}

/// Fetch a network, its subnetworks and the blocks they use
///
/// Errors from the inventory are returned unchanged.
pub async fn fetch_network_usage(
    inventory: &dyn Inventory,
    project: &ProjectId,
    network: &ResourceName,
    max_in_flight: usize,
) -> Result<NetworkUsage> {
    let network = inventory.get_network(project, network).await?;
    let subnetworks = list_subnetworks(inventory, &network, max_in_flight).await?;
    let used = used_blocks(&subnetworks);

    info!(
        network = %network.name,
        subnetworks = subnetworks.len(),
        blocks = used.len(),
        "collected used blocks"
    );

    Ok(NetworkUsage {
        network,
        subnetworks,
        used,
    })
}

/// Fetch the blocks already used inside a network
///
/// Errors from the inventory are returned unchanged.
pub async fn fetch_used_blocks(
    inventory: &dyn Inventory,
    project: &ProjectId,
    network: &ResourceName,
    max_in_flight: usize,
) -> Result<Vec<Cidr>> {
    Ok(fetch_network_usage(inventory, project, network, max_in_flight)
        .await?
        .used)
}
