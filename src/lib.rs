#![allow(clippy::single_component_path_imports)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `wraith-rs` inspects, edits and converts Mario Kart 8 (Wii U) ghost replay files.
//!
//! Most of what the game knows about a ghost is packed into its filename; the rest lives in a
//! binary body with an optional `CTG0` header and an embedded Mii. This crate decodes both and
//! keeps them, and their checksums, consistent across edits.
//!
pub use wraith_internal::*;

#[cfg(all(feature = "dynamic_linking", not(target_family = "wasm")))]
#[allow(unused_imports)]
use wraith_dylib;
