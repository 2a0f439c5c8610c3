//! Codec configuration.
//!
//! Settings are read from an optional TOML file and can be overridden through `WRAITH_*`
//! environment variables:
//!
//! ```toml
//! layout = "legacy"          # or "current"
//! mii_offsets = "ghost_type" # or "header"
//! strict_mii = false
//! prefer_control_codes = true
//! ```

use std::path::Path;

use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::file::{
	GhostError,
	filename::{FilenameLayout, LayoutRevision},
	mii::MiiOffsetPolicy,
	name::NameCodec,
};

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "WRAITH";

/// Settings shared by every codec
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
	/// Filename layout revision
	pub layout: LayoutRevision,
	/// How the Mii sub-record position is chosen
	pub mii_offsets: MiiOffsetPolicy,
	/// Reject Mii sub-records with bad padding or checksum
	pub strict_mii: bool,
	/// Encode glyphs such as `★` as their in-game control code instead of their code point
	pub prefer_control_codes: bool,
}

impl Default for CodecConfig {
	fn default() -> Self {
		Self {
			layout: LayoutRevision::Current,
			mii_offsets: MiiOffsetPolicy::Header,
			strict_mii: true,
			prefer_control_codes: false,
		}
	}
}

impl CodecConfig {
	/// Loads settings from an optional TOML file, then applies `WRAITH_*` environment overrides
	pub fn load(path: Option<&Path>) -> Result<Self, GhostError> {
		let mut builder = Config::builder();
		if let Some(path) = path {
			log::debug!("Loading codec configuration from {}", path.display());
			builder = builder.add_source(File::from(path).format(FileFormat::Toml));
		}
		let config = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true)).build()?;
		Ok(config.try_deserialize()?)
	}

	/// Parses settings from a TOML string, without environment overrides
	pub fn from_toml(toml: &str) -> Result<Self, GhostError> {
		let config = Config::builder().add_source(File::from_str(toml, FileFormat::Toml)).build()?;
		Ok(config.try_deserialize()?)
	}

	/// Name codec for filenames
	pub fn filename_codec(&self) -> NameCodec {
		NameCodec::filename().with_control_codes(self.prefer_control_codes)
	}

	/// Filename layout with the configured revision and name codec
	pub fn filename_layout(&self) -> FilenameLayout {
		FilenameLayout::for_revision(self.layout).with_name_codec(self.filename_codec())
	}
}
