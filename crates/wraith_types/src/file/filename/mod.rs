//! Ghost filename codec.
//!
//! Ghost files carry most of their race metadata in the filename. The stem is a fixed-layout
//! string of lowercase hex nibble groups:
//!
//! ```text
//! Chars  Width  Field
//! -----  -----  ---------------------------------------------
//! 0      2      Ghost type ("sg", "gs", "dg"; "rp" is MKTV)
//! 2      2      Ghost number
//! 4      2      Track id
//! 6      6      Character, character variant, Mii weight class
//! 12     6      Kart, wheels, glider
//! 18     6      Total time (m, ss, mmm)
//! 24     30     Laps 1-5 (m, ss, mmm each)
//! 54     40     Player name (10 UTF-16BE code units)
//! 94     2      Flag id
//! 96     2      Motion control flag
//! 98     4      Padding
//! 102    12     Laps 6-7 (v4 only)
//! ```
//!
//! The stem length alone selects the [`GameVersion`]: 100 (non-standard v3, padding cut short),
//! 102 (v3) or 114 (v4). Absent laps parse to `None` and serialize as the `9:59.999` sentinel.
//!
//! # Examples
//!
//! ```
//! use wraith_types::file::filename::{GhostFilename, GhostType};
//!
//! # fn main() -> Result<(), wraith_types::file::GhostError> {
//! let stem = "sg1121030000130c0012e0630230fd0231950231b993b3e793b3e7004e0069006e26050043006800720069007300006e000000";
//! let record = GhostFilename::parse(stem)?;
//! assert_eq!(record.ghost_type, GhostType::Staff);
//! assert_eq!(record.playername, "Nin★Chris");
//! assert_eq!(record.to_stem()?, stem);
//! # Ok(())
//! # }
//! ```

mod layout;


use std::{fmt::Formatter, path::Path};

use serde::{Deserialize, Serialize};

use super::GhostError;

pub use layout::{FieldKind, FilenameLayout, HexField, LayoutRevision, PaddingFill, Slot, TimePart, VersionLayout};

/// Extension of ghost files
pub const EXTENSION: &str = ".dat";

/// Number of lap slots a filename can hold
pub const MAX_LAPS: usize = 7;

/// Kind of ghost, encoded as the two-character filename prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GhostType {
	/// Developer-authored reference ghost (`sg`)
	Staff,
	/// Ghost recorded by the player (`gs`)
	Player,
	/// Ghost downloaded from another player (`dg`)
	Downloaded,
	/// MKTV highlight replay (`rp`); different layout, recognised only to reject it
	Mktv,
}

impl GhostType {
	/// Parses a filename prefix, rejecting MKTV replays
	pub fn from_prefix(prefix: &str) -> Result<Self, GhostError> {
		match prefix {
			"sg" => Ok(Self::Staff),
			"gs" => Ok(Self::Player),
			"dg" => Ok(Self::Downloaded),
			"rp" => Err(GhostError::UnsupportedFormat("MKTV replay files are not supported".into())),
			_ => Err(GhostError::UnknownGhostType(prefix.to_string())),
		}
	}

	/// Two-character filename prefix
	pub fn prefix(self) -> &'static str {
		match self {
			Self::Staff => "sg",
			Self::Player => "gs",
			Self::Downloaded => "dg",
			Self::Mktv => "rp",
		}
	}

	/// Returns `true` if the ghost number encodes the track slot (`track_id - 16`)
	pub fn numbers_by_track(self) -> bool {
		matches!(self, Self::Staff | Self::Player)
	}
}

impl std::fmt::Display for GhostType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Staff => write!(f, "Staff Ghost"),
			Self::Player => write!(f, "Player Ghost"),
			Self::Downloaded => write!(f, "Downloaded Ghost"),
			Self::Mktv => write!(f, "MKTV Replay"),
		}
	}
}

/// Game version a filename was written by, derived from the stem length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameVersion {
	/// v3 filename with a shortened padding span
	V3Nonstandard,
	/// v1-v3 filename, five laps
	V3,
	/// v4+ filename, seven laps
	V4,
}

impl std::fmt::Display for GameVersion {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::V3Nonstandard => write!(f, "v3 (non-standard)"),
			Self::V3 => write!(f, "v3"),
			Self::V4 => write!(f, "v4"),
		}
	}
}

/// A race or lap time
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LapTime {
	/// Minutes (one hex digit)
	pub minutes: u8,
	/// Seconds (two hex digits)
	pub seconds: u8,
	/// Milliseconds (three hex digits)
	pub milliseconds: u16,
}

impl LapTime {
	/// Time the game shows for laps that were never driven
	pub const UNSET: LapTime = LapTime::new(9, 59, 999);

	/// Creates a new time
	pub const fn new(minutes: u8, seconds: u8, milliseconds: u16) -> Self {
		Self {
			minutes,
			seconds,
			milliseconds,
		}
	}

	/// Total duration in milliseconds
	pub fn as_millis(&self) -> u32 {
		(self.minutes as u32 * 60 + self.seconds as u32) * 1000 + self.milliseconds as u32
	}

	pub(crate) fn part(&self, part: TimePart) -> u32 {
		match part {
			TimePart::Minutes => self.minutes as u32,
			TimePart::Seconds => self.seconds as u32,
			TimePart::Millis => self.milliseconds as u32,
		}
	}

	pub(crate) fn from_parts(parts: [u32; 3]) -> Self {
		// Widths of the hex groups (1, 2 and 3 digits) bound the values
		Self {
			minutes: parts[0] as u8,
			seconds: parts[1] as u8,
			milliseconds: parts[2] as u16,
		}
	}
}

impl std::fmt::Display for LapTime {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{:02}.{:03}", self.minutes, self.seconds, self.milliseconds)
	}
}

/// Metadata decoded from a ghost filename
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GhostFilename {
	/// Game version, selected by the stem length
	pub game_version: GameVersion,
	/// Kind of ghost
	pub ghost_type: GhostType,
	/// Track slot (`track_id - 16`) for staff/player ghosts, download slot for downloaded ghosts
	pub ghost_number: u32,
	/// Course id
	pub track_id: u32,
	/// Character id
	pub character_id: u32,
	/// Character colour variant
	pub character_variant_id: u32,
	/// Weight class of a Mii driver
	pub mii_weight_class_id: u32,
	/// Kart body id
	pub kart_id: u32,
	/// Wheels id
	pub wheels_id: u32,
	/// Glider id
	pub glider_id: u32,
	/// Total race time
	pub total_time: LapTime,
	/// Lap times; `None` for laps the filename has no room for
	pub laps: [Option<LapTime>; MAX_LAPS],
	/// Player name
	pub playername: String,
	/// Region flag id
	pub flag_id: u32,
	/// Non-zero if the ghost was driven with motion controls
	pub motion_control_flag: u32,
}

impl GhostFilename {
	/// Parses a filename stem with the current layout
	pub fn parse(stem: &str) -> Result<Self, GhostError> {
		FilenameLayout::current().parse(stem)
	}

	/// Parses the stem of a ghost file path with the given layout
	pub fn from_path(path: impl AsRef<Path>, layout: &FilenameLayout) -> Result<Self, GhostError> {
		let path = path.as_ref();
		let stem = path.file_stem().and_then(|s| s.to_str()).ok_or_else(|| {
			GhostError::precondition(format!("{} has no UTF-8 file stem", path.display()))
		})?;
		layout.parse(stem)
	}

	/// Serializes the record into a stem with the current layout
	pub fn to_stem(&self) -> Result<String, GhostError> {
		FilenameLayout::current().serialize(self)
	}

	/// Serializes the record into a full filename, extension included
	pub fn to_filename(&self) -> Result<String, GhostError> {
		FilenameLayout::current().filename(self)
	}

	/// Number of laps with a recorded time
	pub fn lap_count(&self) -> usize {
		self.laps.iter().filter(|lap| lap.is_some()).count()
	}

	/// Time of lap `n` (1-based), or `None` if not present
	pub fn lap(&self, n: usize) -> Option<LapTime> {
		n.checked_sub(1).and_then(|i| self.laps.get(i).copied().flatten())
	}

	/// Returns `true` if the ghost number matches the track slot convention for its ghost type
	pub fn ghost_number_consistent(&self) -> bool {
		!self.ghost_type.numbers_by_track()
			|| self.track_id.checked_sub(crate::gamedata::FIRST_COURSE_ID) == Some(self.ghost_number)
	}
}

impl std::fmt::Display for GhostFilename {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		writeln!(f, "{} #{} ({})", self.ghost_type, self.ghost_number, self.game_version)?;
		writeln!(f, "  Player: {}", self.playername)?;
		writeln!(f, "  Track: {}", self.track_id)?;
		writeln!(f, "  Total: {}", self.total_time)?;
		for (i, lap) in self.laps.iter().enumerate() {
			if let Some(lap) = lap {
				writeln!(f, "  Lap {}: {}", i + 1, lap)?;
			}
		}
		Ok(())
	}
}

impl TryFrom<&str> for GhostFilename {
	type Error = GhostError;

	fn try_from(value: &str) -> Result<Self, Self::Error> {
		Self::parse(value)
	}
}
