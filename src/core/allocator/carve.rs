//! Greedy aligned carving (VLSM tiling of a single gap)

use crate::core::cidr::{Cidr, IPV4_BITS};
use tracing::trace;

/// Carve the largest aligned block starting at `cursor` that fits in `available` addresses
///
/// The block size is the largest power of two that does not exceed `available`
/// and divides `cursor`. Returns the block together with the addresses left over.
/// A cursor of `0.0.0.0` has no alignment bound.
pub fn carve(cursor: u32, available: u64) -> (Cidr, u64) {
    debug_assert!(available > 0);
    debug_assert!(available <= 1u64 << IPV4_BITS);

    let fit_exp = 63 - available.leading_zeros();
    // trailing_zeros(0) == 32, so the all-zero address is unconstrained
    let align_exp = cursor.trailing_zeros();
    let exp = fit_exp.min(align_exp);

    let block = Cidr::aligned(cursor, IPV4_BITS - exp as u8);
    (block, available - block.size())
}

/// Tile the half-open span `[start, end)` into maximal aligned blocks, left to right
pub fn tile_gap(start: u64, end: u64, out: &mut Vec<Cidr>) {
    let mut cursor = start;
    let mut available = end.saturating_sub(start);

    while available > 0 {
        let (block, left) = carve(cursor as u32, available);
        trace!(block = %block, left, "carved free block");
        out.push(block);
        cursor += block.size();
        available = left;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn addr(a: u8, b: u8, c: u8, d: u8) -> u32 {
        u32::from(Ipv4Addr::new(a, b, c, d))
    }

    fn cidr(s: &str) -> Cidr {
        s.parse().unwrap()
    }

    #[test]
    fn test_carve_exact_fit() {
        let (block, left) = carve(addr(10, 0, 0, 0), 4194304);
        assert_eq!(block, cidr("10.0.0.0/10"));
        assert_eq!(left, 0);
    }

    #[test]
    fn test_carve_leaves_remainder() {
        let (block, left) = carve(addr(10, 128, 0, 0), 4194304 + 2097152);
        assert_eq!(block, cidr("10.128.0.0/10"));
        assert_eq!(left, 2097152);
    }

    #[test]
    fn test_carve_limited_by_alignment() {
        // 10.96.0.0 is only /11-aligned even though 64 /16s are available
        let (block, left) = carve(addr(10, 96, 0, 0), 1 << 22);
        assert_eq!(block, cidr("10.96.0.0/11"));
        assert_eq!(left, (1 << 22) - (1 << 21));
    }

    #[test]
    fn test_carve_single_address() {
        let (block, left) = carve(addr(10, 0, 0, 7), 1);
        assert_eq!(block, cidr("10.0.0.7/32"));
        assert_eq!(left, 0);
    }

    #[test]
    fn test_carve_zero_cursor_unbounded() {
        let (block, left) = carve(0, 1 << 32);
        assert_eq!(block, cidr("0.0.0.0/0"));
        assert_eq!(left, 0);

        let (block, left) = carve(0, 3);
        assert_eq!(block, cidr("0.0.0.0/31"));
        assert_eq!(left, 1);
    }

    #[test]
    fn test_tile_gap_grows_then_shrinks() {
        let mut out = Vec::new();
        // 10.0.0.1 .. 10.0.0.14 inclusive
        tile_gap(u64::from(addr(10, 0, 0, 1)), u64::from(addr(10, 0, 0, 15)), &mut out);

        let text: Vec<String> = out.iter().map(|c| c.to_string()).collect();
        assert_eq!(
            text,
            vec!["10.0.0.1/32", "10.0.0.2/31", "10.0.0.4/30", "10.0.0.8/30", "10.0.0.12/31", "10.0.0.14/32"]
        );
    }

    #[test]
    fn test_tile_gap_empty_span() {
        let mut out = Vec::new();
        tile_gap(100, 100, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_tile_gap_to_end_of_address_space() {
        let mut out = Vec::new();
        tile_gap(u64::from(addr(255, 255, 255, 254)), 1 << 32, &mut out);
        assert_eq!(out, vec![cidr("255.255.255.254/31")]);
    }
}
