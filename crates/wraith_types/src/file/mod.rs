//! Ghost file support for the `wraith-rs` project.
//!
//! A ghost is described twice: race metadata is packed into the hex-encoded filename
//! ([`filename`]), the recording itself lives in the file body ([`body`]) together with an
//! embedded Mii ([`mii`]) and optional custom track linkage ([`linkage`]).

mod error;

pub mod body;
pub mod checksum;
pub mod convert;
pub mod filename;
pub mod ghost;
pub mod linkage;
pub mod mii;
pub mod name;

// Re-export unified error type
pub use error::{GhostError, Section};

// Re-export main types
pub use body::GhostFile;
pub use convert::{ConversionTarget, DOWNLOAD_SLOTS, convert, convert_record, copy_body};
pub use filename::{FilenameLayout, GameVersion, GhostFilename, GhostType, LapTime, LayoutRevision};
pub use ghost::Ghost;
pub use linkage::{CustomTrack, MemoryModStore, ModLinkage, ModSite, ModStore, ModVersion};
pub use mii::{MiiData, MiiLocation, MiiOffsetPolicy};
pub use name::{ByteOrder, GlyphTable, NameCodec};
