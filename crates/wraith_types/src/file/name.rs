//! UTF-16 name codec shared by the filename and the Mii sub-record.
//!
//! Names are stored as fixed-size slots of UTF-16 code units, terminated by the first zero unit
//! (a name that fills the slot has no terminator). The filename stores the units big-endian, the
//! Mii sub-record little-endian; both go through the same [`NameCodec`] configured with a
//! [`ByteOrder`].
//!
//! Code units in the control ranges `0x00..0x20` and `0x7F..0xA0` are not text: the game's font
//! draws special glyphs for some of them. They decode through a [`GlyphTable`]; codes missing from
//! the table decode to [`PLACEHOLDER`] and never fail.

use std::borrow::Cow;

use super::GhostError;

/// Glyph used for control codes without a known translation
pub const PLACEHOLDER: char = '\u{FFFD}';

/// Control-code glyphs known to be drawn by the game's font
const DEFAULT_GLYPHS: &[(u16, char)] = &[(0x05, '★')];

/// Returns `true` if `code` lies in one of the control ranges the font does not render as text.
pub fn is_control_code(code: u32) -> bool {
	code < 0x20 || (0x7F..0xA0).contains(&code)
}

/// Byte order of the UTF-16 code units in a name slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
	/// Most significant byte first (filename names)
	BigEndian,
	/// Least significant byte first (Mii nicknames)
	LittleEndian,
}

impl ByteOrder {
	fn read(self, pair: [u8; 2]) -> u16 {
		match self {
			Self::BigEndian => u16::from_be_bytes(pair),
			Self::LittleEndian => u16::from_le_bytes(pair),
		}
	}

	fn write(self, unit: u16) -> [u8; 2] {
		match self {
			Self::BigEndian => unit.to_be_bytes(),
			Self::LittleEndian => unit.to_le_bytes(),
		}
	}
}

/// Translation between control codes and the glyphs the game draws for them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphTable {
	entries: Cow<'static, [(u16, char)]>,
}

impl GlyphTable {
	/// Creates a table from explicit `(control code, glyph)` pairs
	pub fn new(entries: Vec<(u16, char)>) -> Self {
		Self {
			entries: Cow::Owned(entries),
		}
	}

	/// Returns a copy of this table with one more translation
	pub fn with_glyph(mut self, code: u16, glyph: char) -> Self {
		let entries = self.entries.to_mut();
		entries.retain(|&(c, g)| c != code && g != glyph);
		entries.push((code, glyph));
		self
	}

	/// Looks up the glyph drawn for a control code
	pub fn glyph(&self, code: u16) -> Option<char> {
		self.entries.iter().find(|&&(c, _)| c == code).map(|&(_, g)| g)
	}

	/// Looks up the control code that draws a glyph
	pub fn code(&self, glyph: char) -> Option<u16> {
		self.entries.iter().find(|&&(_, g)| g == glyph).map(|&(c, _)| c)
	}

	/// Number of known translations
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns `true` if the table has no translations
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl Default for GlyphTable {
	fn default() -> Self {
		Self {
			entries: Cow::Borrowed(DEFAULT_GLYPHS),
		}
	}
}

/// Encoder/decoder for fixed-size UTF-16 name slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCodec {
	order: ByteOrder,
	capacity: usize,
	glyphs: GlyphTable,
	prefer_control_codes: bool,
}

impl NameCodec {
	/// Maximum number of UTF-16 code units in a player or Mii name
	pub const NAME_CAPACITY: usize = 10;

	/// Creates a codec for slots of `capacity` code units
	pub fn new(order: ByteOrder, capacity: usize) -> Self {
		Self {
			order,
			capacity,
			glyphs: GlyphTable::default(),
			prefer_control_codes: false,
		}
	}

	/// Codec for the player name embedded in ghost filenames (big-endian)
	pub fn filename() -> Self {
		Self::new(ByteOrder::BigEndian, Self::NAME_CAPACITY)
	}

	/// Codec for the nickname stored in the Mii sub-record (little-endian)
	pub fn mii() -> Self {
		Self::new(ByteOrder::LittleEndian, Self::NAME_CAPACITY)
	}

	/// Replaces the glyph table
	pub fn with_glyphs(mut self, glyphs: GlyphTable) -> Self {
		self.glyphs = glyphs;
		self
	}

	/// Encodes table glyphs as their control code instead of their own code point
	pub fn with_control_codes(mut self, prefer: bool) -> Self {
		self.prefer_control_codes = prefer;
		self
	}

	/// Byte order of the code units
	pub fn byte_order(&self) -> ByteOrder {
		self.order
	}

	/// Slot capacity in code units
	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Slot size in bytes
	pub fn slot_len(&self) -> usize {
		self.capacity * 2
	}

	/// Slot size in hex characters
	pub fn hex_len(&self) -> usize {
		self.capacity * 4
	}

	/// Decodes a name slot. Reading stops at the first zero unit or at the slot capacity.
	pub fn decode(&self, slot: &[u8]) -> String {
		let units = slot
			.chunks_exact(2)
			.take(self.capacity)
			.map(|pair| self.order.read([pair[0], pair[1]]))
			.take_while(|&unit| unit != 0);

		char::decode_utf16(units)
			.map(|result| match result {
				Ok(c) if is_control_code(c as u32) => {
					self.glyphs.glyph(c as u16).unwrap_or(PLACEHOLDER)
				}
				Ok(c) => c,
				Err(_) => PLACEHOLDER,
			})
			.collect()
	}

	/// Decodes a name slot given as hex characters
	pub fn decode_hex(&self, hex: &str) -> Result<String, GhostError> {
		let bytes = hex::decode(hex).map_err(|_| GhostError::InvalidHex {
			field: "playername",
			value: hex.to_string(),
		})?;
		Ok(self.decode(&bytes))
	}

	/// Converts a name into code units, without checking the capacity
	fn units(&self, name: &str) -> Result<Vec<u16>, GhostError> {
		let mut units = Vec::with_capacity(self.capacity);
		for c in name.chars() {
			if self.prefer_control_codes
				&& let Some(code) = self.glyphs.code(c)
			{
				units.push(code);
				continue;
			}

			if is_control_code(c as u32) {
				return Err(GhostError::precondition(format!(
					"name {name:?} contains control character U+{:04X}",
					c as u32
				)));
			}

			let mut buf = [0u16; 2];
			units.extend_from_slice(c.encode_utf16(&mut buf));
		}
		Ok(units)
	}

	/// Encodes a name into a zero-padded slot of [`Self::slot_len`] bytes.
	///
	/// Names longer than the slot are rejected rather than truncated.
	pub fn encode(&self, name: &str) -> Result<Vec<u8>, GhostError> {
		let units = self.units(name)?;
		if units.len() > self.capacity {
			return Err(GhostError::precondition(format!(
				"name {name:?} needs {} UTF-16 units, slot holds {}",
				units.len(),
				self.capacity
			)));
		}

		let mut slot = vec![0u8; self.slot_len()];
		for (i, unit) in units.into_iter().enumerate() {
			slot[i * 2..i * 2 + 2].copy_from_slice(&self.order.write(unit));
		}
		Ok(slot)
	}

	/// Encodes a name into a zero-padded lowercase hex slot of [`Self::hex_len`] characters
	pub fn encode_hex(&self, name: &str) -> Result<String, GhostError> {
		self.encode(name).map(hex::encode)
	}
}

impl Default for NameCodec {
	fn default() -> Self {
		Self::filename()
	}
}
