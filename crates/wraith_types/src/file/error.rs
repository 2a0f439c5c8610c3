//! Error types for ghost file parsing and manipulation.

use std::fmt::Formatter;

use thiserror::Error;

/// Part of a ghost an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
	/// The hex-encoded filename stem
	Filename,
	/// The optional `CTG0` header
	Header,
	/// The ghost payload following the header
	Body,
	/// The embedded Mii sub-record
	Mii,
}

impl std::fmt::Display for Section {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Filename => write!(f, "filename"),
			Self::Header => write!(f, "header"),
			Self::Body => write!(f, "body"),
			Self::Mii => write!(f, "Mii"),
		}
	}
}

/// Errors that can occur when reading, editing or converting ghost files
#[derive(Debug, Error)]
pub enum GhostError {
	/// Filename stem does not have one of the recognised lengths
	#[error("Filename has {actual} characters, expected one of {expected:?}")]
	InvalidLength {
		/// Actual number of characters in the stem
		actual: usize,
		/// Recognised stem lengths
		expected: Vec<usize>,
	},

	/// Recognised but unimplemented layout (MKTV replays)
	#[error("Unsupported ghost format: {0}")]
	UnsupportedFormat(String),

	/// Ghost type prefix is not one the game writes
	#[error("Unknown ghost type prefix: {0:?}")]
	UnknownGhostType(String),

	/// A numeric filename field holds non-hexadecimal characters
	#[error("Invalid hex value {value:?} in field {field}")]
	InvalidHex {
		/// Name of the field being decoded
		field: &'static str,
		/// Raw characters found in the field
		value: String,
	},

	/// Course id is not part of the course table
	#[error("Unknown course id in ghost data: {0}")]
	UnknownCourse(u32),

	/// Values inside a ghost contradict each other
	#[error("Corrupted ghost data: {0}")]
	CorruptedData(String),

	/// File is too short for the requested field
	#[error(
		"Truncated {section}: {needed} bytes at offset {offset:#X} requested, but file has {actual} bytes"
	)]
	TruncatedFile {
		/// Section being read
		section: Section,
		/// Absolute offset of the access
		offset: usize,
		/// Number of bytes requested
		needed: usize,
		/// Total size of the file
		actual: usize,
	},

	/// Bytes following the Mii payload are not zero
	#[error("Mii padding must be zero, found {0:02X?}")]
	InvalidMiiPadding([u8; 2]),

	/// Stored checksum does not match the computed one
	#[error("{section} checksum mismatch: stored {expected:#X}, computed {actual:#X}")]
	ChecksumMismatch {
		/// Section protected by the checksum
		section: Section,
		/// Checksum stored in the file
		expected: u32,
		/// Checksum computed from the data
		actual: u32,
	},

	/// Caller supplied a value the format cannot hold
	#[error("Precondition failed: {0}")]
	Precondition(String),

	/// Configuration could not be loaded
	#[error(transparent)]
	Config(#[from] ::config::ConfigError),

	/// JSON (de)serialization failed
	#[error(transparent)]
	Json(#[from] serde_json::Error),

	/// IO error
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

impl GhostError {
	/// Creates a [`GhostError::TruncatedFile`] error
	pub fn truncated(section: Section, offset: usize, needed: usize, actual: usize) -> Self {
		Self::TruncatedFile {
			section,
			offset,
			needed,
			actual,
		}
	}

	/// Creates a [`GhostError::Precondition`] error
	pub fn precondition(message: impl Into<String>) -> Self {
		Self::Precondition(message.into())
	}

	/// Creates a [`GhostError::CorruptedData`] error
	pub fn corrupted(message: impl Into<String>) -> Self {
		Self::CorruptedData(message.into())
	}

	/// Returns `true` for errors caused by structurally invalid input rather than the environment
	pub fn is_structural(&self) -> bool {
		!matches!(self, Self::Io(_) | Self::Config(_) | Self::Json(_))
	}
}
