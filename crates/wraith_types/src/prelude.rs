//! Prelude module for `wraith_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and constants.
//!
//! # Examples
//!
//! ```no_run
//! use wraith_types::prelude::*;
//!
//! let record = GhostFilename::parse("sg1121030000130c0012e0630230fd0231950231b993b3e793b3e7004e0069006e26050043006800720069007300006e000000").unwrap();
//! let course = GameData::wii_u().course(record.track_id);
//! ```

// File module types
#[doc(inline)]
pub use crate::file::{
	ConversionTarget,
	CustomTrack,

	// Filename
	FilenameLayout,
	GameVersion,

	// Session
	Ghost,
	GhostError,
	// Body
	GhostFile,
	GhostFilename,
	GhostType,
	LapTime,
	MemoryModStore,

	// Mii
	MiiData,
	MiiLocation,
	// Linkage
	ModLinkage,
	ModSite,
	ModStore,
	ModVersion,

	NameCodec,
	Section,
};

// Configuration and tables
#[doc(inline)]
pub use crate::config::CodecConfig;

#[doc(inline)]
pub use crate::gamedata::{Course, GameData, Lookup};

// Re-export the file module for advanced usage
#[doc(inline)]
pub use crate::file;
