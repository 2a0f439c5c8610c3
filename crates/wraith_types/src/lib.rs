//! This crate provides the ghost file codecs and game data for the `wraith-rs` project.
//!
//! # Modules
//!
//! - **`file::filename`**: hex-encoded filename metadata (ghost type, track, times, player name)
//! - **`file::name`**: UTF-16 name codec with the game's control-code glyphs
//! - **`file::body`**: header detection, course id, custom track linkage and CRC-32
//! - **`file::mii`**: embedded Mii sub-record with its CRC-16
//! - **`file::convert`**: conversion between staff, player and downloaded ghosts
//! - **`gamedata`**: course, character and vehicle tables
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use wraith_types::prelude::*;
//!
//! # fn main() -> Result<(), GhostError> {
//! let config = CodecConfig::load(None)?;
//! let ghost = Ghost::open("ghosts/sg1121030000130c0012e0630230fd0231950231b993b3e793b3e7004e0069006e26050043006800720069007300006e000000.dat", &config)?;
//! ghost.verify()?;
//! println!("{}", ghost.record());
//! # Ok(())
//! # }
//! ```
//!
//! Or decode a filename on its own:
//!
//! ```
//! use wraith_types::file::{ConversionTarget, FilenameLayout, GhostFilename, convert};
//!
//! let stem = "sg1121030000130c0012e0630230fd0231950231b993b3e793b3e7004e0069006e26050043006800720069007300006e000000";
//! let record = GhostFilename::parse(stem).unwrap();
//! let name = convert(&record, ConversionTarget::Downloaded { slot: 5 }, &FilenameLayout::current()).unwrap();
//! assert!(name.starts_with("dg05"));
//! ```

pub mod config;
pub mod file;
pub mod gamedata;

/// `use wraith_types::prelude::*;` to import commonly used items.
pub mod prelude;
