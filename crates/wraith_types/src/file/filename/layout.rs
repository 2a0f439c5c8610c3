//! Field tables driving the filename codec.
//!
//! A layout is an ordered list of [`Slot`]s per [`GameVersion`]. Each slot has a width in hex
//! characters and a [`FieldKind`] resolved when the table is built, so parsing and serializing
//! are plain walks over the table.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::{EXTENSION, GameVersion, GhostFilename, GhostType, LapTime, MAX_LAPS};
use crate::file::{GhostError, name::NameCodec};

/// Component of a time field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimePart {
	/// Minutes, one hex digit
	Minutes,
	/// Seconds, two hex digits
	Seconds,
	/// Milliseconds, three hex digits
	Millis,
}

impl TimePart {
	fn index(self) -> usize {
		match self {
			Self::Minutes => 0,
			Self::Seconds => 1,
			Self::Millis => 2,
		}
	}

	/// Value written for laps that are absent
	pub fn sentinel(self) -> u32 {
		LapTime::UNSET.part(self)
	}
}

/// Integer-valued filename field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HexField {
	/// [`GhostFilename::ghost_number`]
	GhostNumber,
	/// [`GhostFilename::track_id`]
	TrackId,
	/// [`GhostFilename::character_id`]
	CharacterId,
	/// [`GhostFilename::character_variant_id`]
	CharacterVariantId,
	/// [`GhostFilename::mii_weight_class_id`]
	MiiWeightClassId,
	/// [`GhostFilename::kart_id`]
	KartId,
	/// [`GhostFilename::wheels_id`]
	WheelsId,
	/// [`GhostFilename::glider_id`]
	GliderId,
	/// Part of [`GhostFilename::total_time`]
	Total(TimePart),
	/// Part of lap `n` (1-based) in [`GhostFilename::laps`]
	Lap(u8, TimePart),
	/// [`GhostFilename::flag_id`]
	FlagId,
	/// [`GhostFilename::motion_control_flag`]
	MotionControlFlag,
}

impl HexField {
	/// Field name used in error messages
	pub fn name(self) -> &'static str {
		match self {
			Self::GhostNumber => "ghost_number",
			Self::TrackId => "track_id",
			Self::CharacterId => "character_id",
			Self::CharacterVariantId => "character_variant_id",
			Self::MiiWeightClassId => "mii_weight_class_id",
			Self::KartId => "kart_id",
			Self::WheelsId => "wheels_id",
			Self::GliderId => "glider_id",
			Self::Total(_) => "total_time",
			Self::Lap(..) => "lap_time",
			Self::FlagId => "flag_id",
			Self::MotionControlFlag => "motion_control_flag",
		}
	}

	/// Current value of the field, or `None` for an absent lap
	fn get(self, record: &GhostFilename) -> Option<u32> {
		match self {
			Self::GhostNumber => Some(record.ghost_number),
			Self::TrackId => Some(record.track_id),
			Self::CharacterId => Some(record.character_id),
			Self::CharacterVariantId => Some(record.character_variant_id),
			Self::MiiWeightClassId => Some(record.mii_weight_class_id),
			Self::KartId => Some(record.kart_id),
			Self::WheelsId => Some(record.wheels_id),
			Self::GliderId => Some(record.glider_id),
			Self::Total(part) => Some(record.total_time.part(part)),
			Self::Lap(n, part) => record.lap(n as usize).map(|lap| lap.part(part)),
			Self::FlagId => Some(record.flag_id),
			Self::MotionControlFlag => Some(record.motion_control_flag),
		}
	}

	/// Value to serialize, substituting the sentinel for absent laps
	fn value(self, record: &GhostFilename) -> u32 {
		match (self.get(record), self) {
			(Some(value), _) => value,
			(None, Self::Lap(_, part)) => part.sentinel(),
			(None, _) => 0,
		}
	}
}

/// Content of a padding slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaddingFill {
	/// Zero characters
	Zeros,
	/// A fixed hex string, repeated or cut to the slot width
	Constant(&'static str),
}

impl PaddingFill {
	fn render(self, width: usize) -> String {
		match self {
			Self::Zeros => "0".repeat(width),
			Self::Constant(fill) => fill.chars().cycle().take(width).collect(),
		}
	}
}

/// How a slot is decoded and encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
	/// Two-character ghost type prefix
	GhostType,
	/// Unsigned hex integer
	Hex(HexField),
	/// UTF-16BE player name
	Name,
	/// Skipped on parse, filled on serialize
	Padding(PaddingFill),
}

/// One fixed-width slot of a filename layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
	/// Width in hex characters
	pub width: usize,
	/// Codec for the slot
	pub kind: FieldKind,
}

const fn slot(width: usize, kind: FieldKind) -> Slot {
	Slot {
		width,
		kind,
	}
}

const fn hex(width: usize, field: HexField) -> Slot {
	slot(width, FieldKind::Hex(field))
}

const fn lap(n: u8) -> [Slot; 3] {
	[
		hex(1, HexField::Lap(n, TimePart::Minutes)),
		hex(2, HexField::Lap(n, TimePart::Seconds)),
		hex(3, HexField::Lap(n, TimePart::Millis)),
	]
}

/// Concatenates slot arrays at compile time
const fn concat<const N: usize>(parts: &[&[Slot]]) -> [Slot; N] {
	let mut out = [slot(0, FieldKind::Padding(PaddingFill::Zeros)); N];
	let mut n = 0;
	let mut p = 0;
	while p < parts.len() {
		let mut i = 0;
		while i < parts[p].len() {
			out[n] = parts[p][i];
			n += 1;
			i += 1;
		}
		p += 1;
	}
	assert!(n == N, "slot count mismatch");
	out
}

const IDENTITY: [Slot; 9] = [
	slot(2, FieldKind::GhostType),
	hex(2, HexField::GhostNumber),
	hex(2, HexField::TrackId),
	hex(2, HexField::CharacterId),
	hex(2, HexField::CharacterVariantId),
	hex(2, HexField::MiiWeightClassId),
	hex(2, HexField::KartId),
	hex(2, HexField::WheelsId),
	hex(2, HexField::GliderId),
];

const TOTAL: [Slot; 3] = [
	hex(1, HexField::Total(TimePart::Minutes)),
	hex(2, HexField::Total(TimePart::Seconds)),
	hex(3, HexField::Total(TimePart::Millis)),
];

const PLAYER: [Slot; 4] = [
	slot(40, FieldKind::Name),
	hex(2, HexField::FlagId),
	hex(2, HexField::MotionControlFlag),
	slot(4, FieldKind::Padding(PaddingFill::Zeros)),
];

/// Reserved span where v1-v3 wrote the `9:59.999` sentinel twice instead of laps 4 and 5
const LEGACY_LAP_PADDING: Slot = slot(12, FieldKind::Padding(PaddingFill::Constant("93b3e7")));

/// Slots shared by every version of the current layout
const CURRENT_SLOTS: [Slot; 37] = concat(&[
	&IDENTITY,
	&TOTAL,
	&lap(1),
	&lap(2),
	&lap(3),
	&lap(4),
	&lap(5),
	&PLAYER,
	&lap(6),
	&lap(7),
]);

/// v3 slots as written by the first release of the editor
const LEGACY_V3_SLOTS: [Slot; 26] =
	concat(&[&IDENTITY, &TOTAL, &lap(1), &lap(2), &lap(3), &[LEGACY_LAP_PADDING], &PLAYER]);

/// Named layout revision, selectable from configuration
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutRevision {
	/// All three versions, laps 4-5 always decoded
	#[default]
	Current,
	/// v3 and v4 only, v3 laps 4-5 treated as constant padding
	Legacy,
}

/// Slots and expected length of one game version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionLayout {
	/// Game version described
	pub version: GameVersion,
	/// Exact stem length, which identifies the version
	pub length: usize,
	/// Ordered slots; slots past `length` are absent for this version
	pub slots: Cow<'static, [Slot]>,
}

impl VersionLayout {
	/// Creates a version layout from a static slot table
	pub fn new(version: GameVersion, length: usize, slots: &'static [Slot]) -> Self {
		Self {
			version,
			length,
			slots: Cow::Borrowed(slots),
		}
	}
}

/// Complete filename layout: per-version slot tables plus the name codec
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameLayout {
	versions: Vec<VersionLayout>,
	names: NameCodec,
}

impl FilenameLayout {
	/// Creates a layout from explicit version tables
	pub fn new(versions: Vec<VersionLayout>) -> Self {
		Self {
			versions,
			names: NameCodec::filename(),
		}
	}

	/// Layout of current ghost filenames (100, 102 and 114 characters)
	pub fn current() -> Self {
		Self::new(vec![
			VersionLayout::new(GameVersion::V3Nonstandard, 100, &CURRENT_SLOTS),
			VersionLayout::new(GameVersion::V3, 102, &CURRENT_SLOTS),
			VersionLayout::new(GameVersion::V4, 114, &CURRENT_SLOTS),
		])
	}

	/// Layout written by the first release of the editor (102 and 114 characters)
	pub fn legacy() -> Self {
		Self::new(vec![
			VersionLayout::new(GameVersion::V3, 102, &LEGACY_V3_SLOTS),
			VersionLayout::new(GameVersion::V4, 114, &CURRENT_SLOTS),
		])
	}

	/// Layout for a named revision
	pub fn for_revision(revision: LayoutRevision) -> Self {
		match revision {
			LayoutRevision::Current => Self::current(),
			LayoutRevision::Legacy => Self::legacy(),
		}
	}

	/// Replaces the codec used for the player name slot
	pub fn with_name_codec(mut self, names: NameCodec) -> Self {
		self.names = names;
		self
	}

	/// Recognised stem lengths
	pub fn lengths(&self) -> Vec<usize> {
		self.versions.iter().map(|v| v.length).collect()
	}

	/// Expected stem length for a version, if the layout knows it
	pub fn expected_length(&self, version: GameVersion) -> Option<usize> {
		self.version(version).map(|v| v.length)
	}

	fn version(&self, version: GameVersion) -> Option<&VersionLayout> {
		self.versions.iter().find(|v| v.version == version)
	}

	/// Selects the version layout by stem length
	pub fn detect(&self, stem: &str) -> Result<&VersionLayout, GhostError> {
		let actual = stem.chars().count();
		self.versions.iter().find(|v| v.length == actual).ok_or_else(|| GhostError::InvalidLength {
			actual,
			expected: self.lengths(),
		})
	}

	/// Parses a filename stem (no directory, no extension)
	pub fn parse(&self, stem: &str) -> Result<GhostFilename, GhostError> {
		let layout = self.detect(stem)?;
		if !stem.is_ascii() {
			return Err(GhostError::InvalidHex {
				field: "filename",
				value: stem.to_string(),
			});
		}

		let mut record = GhostFilename {
			game_version: layout.version,
			ghost_type: GhostType::Staff,
			ghost_number: 0,
			track_id: 0,
			character_id: 0,
			character_variant_id: 0,
			mii_weight_class_id: 0,
			kart_id: 0,
			wheels_id: 0,
			glider_id: 0,
			total_time: LapTime::default(),
			laps: [None; MAX_LAPS],
			playername: String::new(),
			flag_id: 0,
			motion_control_flag: 0,
		};
		let mut total = [None; 3];
		let mut laps = [[None; 3]; MAX_LAPS];

		let mut offset = 0;
		for slot in layout.slots.iter() {
			let end = offset + slot.width;
			if end > stem.len() {
				match slot.kind {
					// Short padding still consumes what is left
					FieldKind::Padding(_) => {
						offset = stem.len();
						continue;
					}
					// Nothing left to parse; remaining laps are absent
					FieldKind::Hex(HexField::Lap(..)) => break,
					_ => {
						return Err(GhostError::InvalidLength {
							actual: stem.len(),
							expected: self.lengths(),
						});
					}
				}
			}

			let chunk = &stem[offset..end];
			match slot.kind {
				FieldKind::GhostType => record.ghost_type = GhostType::from_prefix(chunk)?,
				FieldKind::Name => record.playername = self.names.decode_hex(chunk)?,
				FieldKind::Padding(_) => {}
				FieldKind::Hex(field) => {
					let value = parse_hex(field, chunk)?;
					match field {
						HexField::GhostNumber => record.ghost_number = value,
						HexField::TrackId => record.track_id = value,
						HexField::CharacterId => record.character_id = value,
						HexField::CharacterVariantId => record.character_variant_id = value,
						HexField::MiiWeightClassId => record.mii_weight_class_id = value,
						HexField::KartId => record.kart_id = value,
						HexField::WheelsId => record.wheels_id = value,
						HexField::GliderId => record.glider_id = value,
						HexField::Total(part) => total[part.index()] = Some(value),
						HexField::Lap(n, part) => {
							if let Some(lap) = laps.get_mut((n as usize).wrapping_sub(1)) {
								lap[part.index()] = Some(value);
							}
						}
						HexField::FlagId => record.flag_id = value,
						HexField::MotionControlFlag => record.motion_control_flag = value,
					}
				}
			}
			offset = end;
		}

		let [Some(minutes), Some(seconds), Some(millis)] = total else {
			return Err(GhostError::precondition("filename layout has no total time"));
		};
		record.total_time = LapTime::from_parts([minutes, seconds, millis]);
		for (slot, parts) in record.laps.iter_mut().zip(laps) {
			if let [Some(minutes), Some(seconds), Some(millis)] = parts {
				*slot = Some(LapTime::from_parts([minutes, seconds, millis]));
			}
		}

		Ok(record)
	}

	/// Serializes a record into a stem of the length its game version requires
	pub fn serialize(&self, record: &GhostFilename) -> Result<String, GhostError> {
		let layout = self.version(record.game_version).ok_or_else(|| {
			GhostError::precondition(format!("layout has no {} filenames", record.game_version))
		})?;

		let mut output = String::with_capacity(layout.length);
		let mut remaining = layout.length;
		for slot in layout.slots.iter() {
			if remaining == 0 {
				break;
			}

			let encoded = match slot.kind {
				FieldKind::Padding(fill) => {
					let width = slot.width.min(remaining);
					output.push_str(&fill.render(width));
					remaining -= width;
					continue;
				}
				FieldKind::GhostType => match record.ghost_type {
					GhostType::Mktv => {
						return Err(GhostError::UnsupportedFormat(
							"MKTV replay files are not supported".into(),
						));
					}
					ghost_type => ghost_type.prefix().to_string(),
				},
				FieldKind::Name => self.names.encode_hex(&record.playername)?,
				FieldKind::Hex(field) => {
					let value = field.value(record);
					let encoded = format!("{value:0width$x}", width = slot.width);
					if encoded.len() != slot.width {
						return Err(GhostError::precondition(format!(
							"{} value {value:#x} does not fit in {} hex digits",
							field.name(),
							slot.width
						)));
					}
					encoded
				}
			};

			if encoded.len() != slot.width || slot.width > remaining {
				return Err(GhostError::precondition(format!(
					"slot of {} characters does not fit the {} layout",
					slot.width, record.game_version
				)));
			}
			output.push_str(&encoded);
			remaining -= slot.width;
		}

		if output.len() != layout.length {
			return Err(GhostError::precondition(format!(
				"serialized {} characters, {} filenames have {}",
				output.len(),
				record.game_version,
				layout.length
			)));
		}
		Ok(output)
	}

	/// Serializes a record into a filename with the `.dat` extension
	pub fn filename(&self, record: &GhostFilename) -> Result<String, GhostError> {
		self.serialize(record).map(|stem| stem + EXTENSION)
	}
}

impl Default for FilenameLayout {
	fn default() -> Self {
		Self::current()
	}
}

fn parse_hex(field: HexField, chunk: &str) -> Result<u32, GhostError> {
	let invalid = || GhostError::InvalidHex {
		field: field.name(),
		value: chunk.to_string(),
	};
	// `from_str_radix` would also accept a leading sign
	if !chunk.bytes().all(|b| b.is_ascii_hexdigit()) {
		return Err(invalid());
	}
	u32::from_str_radix(chunk, 16).map_err(|_| invalid())
}
