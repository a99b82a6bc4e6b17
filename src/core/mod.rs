//! Address-space core: CIDR arithmetic, free-block allocation, identifier validation
//!
//! Everything here is pure and synchronous.

pub mod allocator;
pub mod cidr;
pub mod validation;
