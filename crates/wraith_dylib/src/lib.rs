//! Dynamic-linking wrapper around `wraith_internal`.
//!
//! Enabled through the `dynamic_linking` feature of `wraith-rs` to speed up incremental builds.

pub use wraith_internal::*;
