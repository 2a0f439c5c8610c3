//! This module is separated into its own crate to enable simple dynamic linking for `wraith`, and should not be used directly.

/// `use wraith::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export wraith_types for convenience
pub use wraith_types;

// Re-export commonly used types at crate root
pub use wraith_types::{
	config::CodecConfig,
	file::{Ghost, GhostError, GhostFile, GhostFilename},
	gamedata::GameData,
};
