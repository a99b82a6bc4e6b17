//! # vpc-inspector - Free Address Space for Cloud Networks
//!
//! `vpc-inspector` looks at a virtual network's declared address space and the
//! subnetwork ranges already carved out of it, then computes which CIDR blocks
//! are still free:
//!
//! - **Pure allocator** with no I/O: containment filter, overlap check, greedy
//!   VLSM tiling of every gap
//! - **Inventory access** over the compute REST API or a local JSON snapshot,
//!   with bounded concurrent subnetwork fetches
//! - **Text and JSON reports**
//!
//! ## Quick Start
//!
//! ```rust
//! use vpc_inspector::{compute_free_blocks, Result};
//!
//! # fn main() -> Result<()> {
//! let free = compute_free_blocks(
//!     "10.0.0.0/8",
//!     &["10.64.0.0/11", "10.96.0.0/12", "10.112.0.0/12", "10.192.0.0/10"],
//! )?;
//!
//! let text: Vec<String> = free.iter().map(|block| block.to_string()).collect();
//! assert_eq!(text, vec!["10.0.0.0/10", "10.128.0.0/10"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Inspecting a Network
//!
//! ```rust,no_run
//! use vpc_inspector::{render, InspectorConfig, Inspector, OutputFormat, Result};
//! use std::path::Path;
//!
//! # async fn run() -> Result<()> {
//! let config = InspectorConfig::load(Path::new("vpc-inspector.toml")).await?;
//! let inspector = Inspector::from_config(config).await?;
//!
//! let report = inspector.inspect().await?;
//! println!("{}", render(&report, OutputFormat::Text)?);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod inspector;
pub mod inventory;
pub mod render;

pub use crate::config::{ConfigOverrides, InspectorConfig, InventorySource};
pub use crate::core::{
    allocator::{compute_free_blocks, find_free_blocks, verify_no_overlap},
    cidr::{BlockRange, Cidr},
    validation::{ProjectId, ResourceName},
};
pub use crate::error::{InspectorError, Result};
pub use crate::inspector::{Inspector, Report};
pub use crate::inventory::{
    compute::ComputeInventory,
    fetch_network_usage, fetch_used_blocks, list_subnetworks,
    snapshot::{InventorySnapshot, SnapshotInventory},
    Inventory, Network, NetworkUsage, SecondaryRange, Subnetwork,
};
pub use crate::render::{render, OutputFormat};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
