//! Free address-space computation
//!
//! Given a parent block and the blocks already carved out of it, the allocator
//! produces the aligned free blocks that exactly tile what is left:
//! - blocks outside the parent are ignored
//! - overlapping used blocks reject the whole input
//! - each gap between used blocks is tiled greedily, largest aligned block first

pub mod carve;

use crate::core::cidr::Cidr;
use crate::error::{InspectorError, Result};
use tracing::debug;

/// Compute the free blocks of `parent` not covered by `used`
///
/// The result is ordered by address, pairwise disjoint, and covers exactly the
/// addresses of `parent` outside every retained used block.
///
/// # Errors
///
/// Returns `Overlap` naming two used blocks (inside `parent`) that share addresses.
///
/// # Examples
///
/// ```
/// use vpc_inspector::{find_free_blocks, Cidr};
///
/// let parent: Cidr = "10.0.0.0/8".parse().unwrap();
/// let used: Vec<Cidr> = ["10.0.0.0/10", "10.192.0.0/10", "172.31.0.0/16"]
///     .iter()
///     .map(|s| s.parse().unwrap())
///     .collect();
///
/// let free = find_free_blocks(parent, &used).unwrap();
/// let expected: Vec<Cidr> = ["10.64.0.0/10", "10.128.0.0/10"]
///     .iter()
///     .map(|s| s.parse().unwrap())
///     .collect();
/// assert_eq!(free, expected);
/// ```
pub fn find_free_blocks(parent: Cidr, used: &[Cidr]) -> Result<Vec<Cidr>> {
    let mut retained = retain_contained(parent, used);

    if retained.is_empty() {
        return Ok(vec![parent]);
    }

    verify_no_overlap(&retained)?;

    retained.sort_unstable_by_key(Cidr::first);

    let mut free = Vec::new();
    let mut cursor = u64::from(parent.first());

    for block in &retained {
        carve::tile_gap(cursor, u64::from(block.first()), &mut free);
        cursor = u64::from(block.last()) + 1;
    }

    // Trailing gap up to one past the parent's last address
    carve::tile_gap(cursor, u64::from(parent.last()) + 1, &mut free);

    debug!(
        parent = %parent,
        used = retained.len(),
        free = free.len(),
        "computed free blocks"
    );

    Ok(free)
}

/// Parse CIDR text and compute the free blocks
///
/// All text is parsed before the allocator runs, so malformed input fails with
/// `InvalidCidr` and never reaches the overlap check.
pub fn compute_free_blocks<S: AsRef<str>>(parent: &str, used: &[S]) -> Result<Vec<Cidr>> {
    let parent: Cidr = parent.parse()?;
    let used = used
        .iter()
        .map(|s| s.as_ref().parse())
        .collect::<Result<Vec<Cidr>>>()?;

    find_free_blocks(parent, &used)
}

/// Keep only the blocks lying entirely inside `parent`
fn retain_contained(parent: Cidr, used: &[Cidr]) -> Vec<Cidr> {
    used.iter()
        .copied()
        .filter(|block| {
            let inside = parent.contains(block);
            if !inside {
                debug!(block = %block, parent = %parent, "ignoring block outside parent");
            }
            inside
        })
        .collect()
}

/// Check every pair of blocks for shared addresses
///
/// Fails on the first overlapping pair, naming the later block first.
pub fn verify_no_overlap(blocks: &[Cidr]) -> Result<()> {
    for (j, later) in blocks.iter().enumerate() {
        if let Some(earlier) = blocks[..j].iter().find(|earlier| earlier.overlaps(later)) {
            return Err(InspectorError::Overlap {
                first: *later,
                second: *earlier,
            });
        }
    }
    Ok(())
}
