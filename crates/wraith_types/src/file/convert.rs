//! Conversion between ghost variants.
//!
//! Converting a ghost only changes its filename (ghost type and ghost number) and drops the
//! `CTG0` header from the body; the header is never re-synthesised. The source file is never
//! touched.

use std::{
	fmt::Formatter,
	path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use super::{
	GhostError,
	body::GhostFile,
	filename::{FilenameLayout, GhostFilename, GhostType},
};
use crate::gamedata::FIRST_COURSE_ID;

/// Number of download slots the game offers per course
pub const DOWNLOAD_SLOTS: u32 = 16;

/// Ghost variant to convert to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ConversionTarget {
	/// Staff ghost; the ghost number becomes `track_id - 16`
	Staff,
	/// Downloaded ghost in the given slot (`0..16`)
	Downloaded {
		/// Download slot
		slot: u32,
	},
	/// Player ghost with an explicit ghost number
	Player {
		/// Ghost number
		number: u32,
	},
}

impl ConversionTarget {
	/// Ghost type written by this target
	pub fn ghost_type(self) -> GhostType {
		match self {
			Self::Staff => GhostType::Staff,
			Self::Downloaded {
				..
			} => GhostType::Downloaded,
			Self::Player {
				..
			} => GhostType::Player,
		}
	}

	/// Ghost number the converted record gets
	pub fn ghost_number(self, record: &GhostFilename) -> Result<u32, GhostError> {
		match self {
			Self::Staff => record.track_id.checked_sub(FIRST_COURSE_ID).ok_or_else(|| {
				GhostError::precondition(format!(
					"track id {} is below {FIRST_COURSE_ID} and has no staff ghost slot",
					record.track_id
				))
			}),
			Self::Downloaded {
				slot,
			} if slot >= DOWNLOAD_SLOTS => Err(GhostError::precondition(format!(
				"download slot {slot} is out of range 0..{DOWNLOAD_SLOTS}"
			))),
			Self::Downloaded {
				slot,
			} => Ok(slot),
			Self::Player {
				number,
			} => Ok(number),
		}
	}
}

impl std::fmt::Display for ConversionTarget {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Staff => write!(f, "staff ghost"),
			Self::Downloaded {
				slot,
			} => write!(f, "downloaded ghost (slot {slot})"),
			Self::Player {
				number,
			} => write!(f, "player ghost #{number}"),
		}
	}
}

/// Converts a filename record, returning the new record; the input is left as is
pub fn convert_record(record: &GhostFilename, target: ConversionTarget) -> Result<GhostFilename, GhostError> {
	let mut converted = record.clone();
	converted.ghost_number = target.ghost_number(record)?;
	converted.ghost_type = target.ghost_type();
	Ok(converted)
}

/// Filename (extension included) of a record converted to `target`
pub fn convert(record: &GhostFilename, target: ConversionTarget, layout: &FilenameLayout) -> Result<String, GhostError> {
	let converted = convert_record(record, target)?;
	layout.filename(&converted)
}

/// Copies a ghost body to a new file `dst`, dropping the header if `strip_header` is set and one
/// exists
///
/// `dst` must not exist yet, whichever way it is spelled.
pub fn copy_body(src: impl AsRef<Path>, dst: impl AsRef<Path>, strip_header: bool) -> Result<(), GhostError> {
	let src = src.as_ref();
	let dst = dst.as_ref();
	if let (Ok(source), Ok(target)) = (std::fs::canonicalize(src), std::fs::canonicalize(dst))
		&& source == target
	{
		return Err(GhostError::precondition(format!(
			"refusing to overwrite {} with itself",
			src.display()
		)));
	}

	let ghost = GhostFile::open(src)?;
	let output = if strip_header && ghost.has_header() {
		ghost.without_header()
	} else {
		ghost
	};
	output.save_new(dst)
}

/// Writes a converted copy of a ghost into `output_dir`, returning the new path
pub fn export(
	src: impl AsRef<Path>,
	record: &GhostFilename,
	target: ConversionTarget,
	layout: &FilenameLayout,
	output_dir: impl AsRef<Path>,
) -> Result<PathBuf, GhostError> {
	let src = src.as_ref();
	let output = output_dir.as_ref().join(convert(record, target, layout)?);
	log::info!("Converting {} to {target}: {}", src.display(), output.display());
	copy_body(src, &output, true)?;
	Ok(output)
}
