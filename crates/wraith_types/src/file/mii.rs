//! Mii sub-record embedded in ghost files.
//!
//! ```text
//! Offset  Size  Field
//! ------  ----  --------------------------------------
//! 0x00    0x5C  Mii payload (nickname at 0x1A, 0x14 bytes UTF-16LE)
//! 0x5C    0x02  Zero padding
//! 0x5E    0x02  CRC-16/XMODEM of payload + padding, big-endian
//! ```
//!
//! The record sits at logical offset 0x244, i.e. absolute 0x244 in headerless ghosts and 0x28C in
//! ghosts with a `CTG0` header.

use std::fmt::Formatter;

use serde::{Deserialize, Serialize};

use super::{
	GhostError, Section,
	body::{GhostFile, constants::HEADER_SIZE, constants::MII_OFFSET},
	checksum::crc16_xmodem,
	filename::GhostType,
	name::NameCodec,
};

mod constants {
	/// Size of the Mii payload
	pub const PAYLOAD_SIZE: usize = 0x5C;

	/// Size of the zero padding following the payload
	pub const PADDING_SIZE: usize = 0x02;

	/// Size of the CRC-16 following the padding
	pub const CHECKSUM_SIZE: usize = 0x02;

	/// Nickname offset inside the payload
	pub const NAME_OFFSET: usize = 0x1A;

	/// Nickname slot size in bytes
	pub const NAME_SIZE: usize = 0x14;
}

pub use constants::PAYLOAD_SIZE;

/// Total size of the sub-record, checksum included
pub const RECORD_SIZE: usize = constants::PAYLOAD_SIZE + constants::PADDING_SIZE + constants::CHECKSUM_SIZE;

/// How the position of the Mii sub-record is chosen
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MiiOffsetPolicy {
	/// Key off header presence: the record always sits at the same header-relative offset
	#[default]
	Header,
	/// Staff ghosts use the headerless position, every other ghost type the headed one
	GhostType,
}

/// Position of the Mii sub-record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MiiLocation {
	/// Absolute 0x244, for ghosts without a header
	Headerless,
	/// Absolute 0x28C, for ghosts with a header
	Headed,
}

impl MiiLocation {
	/// Picks the location for a ghost under the given policy
	pub fn select(policy: MiiOffsetPolicy, has_header: bool, ghost_type: GhostType) -> Self {
		let headed = match policy {
			MiiOffsetPolicy::Header => has_header,
			MiiOffsetPolicy::GhostType => ghost_type != GhostType::Staff,
		};
		if headed {
			Self::Headed
		} else {
			Self::Headerless
		}
	}

	/// Location implied by header presence
	pub fn for_file(file: &GhostFile) -> Self {
		if file.has_header() {
			Self::Headed
		} else {
			Self::Headerless
		}
	}

	/// Absolute offset of the sub-record
	pub fn offset(self) -> usize {
		match self {
			Self::Headerless => MII_OFFSET,
			Self::Headed => MII_OFFSET + HEADER_SIZE,
		}
	}
}

/// A Mii payload, as exported to and imported from `.mii` files
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MiiData([u8; constants::PAYLOAD_SIZE]);

impl MiiData {
	/// Wraps a payload, which must be exactly [`PAYLOAD_SIZE`] bytes
	pub fn from_bytes(data: &[u8]) -> Result<Self, GhostError> {
		let payload: [u8; constants::PAYLOAD_SIZE] = data.try_into().map_err(|_| {
			GhostError::precondition(format!(
				"Mii payload must be {:#X} bytes, got {:#X}",
				constants::PAYLOAD_SIZE,
				data.len()
			))
		})?;
		Ok(Self(payload))
	}

	/// Reads a `.mii` file from disk
	pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, GhostError> {
		let data = std::fs::read(path)?;
		Self::from_bytes(&data)
	}

	/// Writes the payload to disk
	pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<(), GhostError> {
		std::fs::write(path, self.0)?;
		Ok(())
	}

	/// Raw payload
	pub fn as_bytes(&self) -> &[u8; constants::PAYLOAD_SIZE] {
		&self.0
	}

	/// Decoded nickname
	pub fn name(&self) -> String {
		NameCodec::mii().decode(&self.0[constants::NAME_OFFSET..constants::NAME_OFFSET + constants::NAME_SIZE])
	}

	/// CRC-16 the game stores after this payload
	pub fn checksum(&self) -> u16 {
		let record = self.record();
		u16::from_be_bytes([record[RECORD_SIZE - 2], record[RECORD_SIZE - 1]])
	}

	/// Full sub-record: payload, zero padding and checksum
	pub fn record(&self) -> [u8; RECORD_SIZE] {
		let mut record = [0u8; RECORD_SIZE];
		record[..constants::PAYLOAD_SIZE].copy_from_slice(&self.0);
		let checksum = crc16_xmodem(&record[..constants::PAYLOAD_SIZE + constants::PADDING_SIZE]);
		record[constants::PAYLOAD_SIZE + constants::PADDING_SIZE..].copy_from_slice(&checksum.to_be_bytes());
		record
	}
}

impl TryFrom<&[u8]> for MiiData {
	type Error = GhostError;

	fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
		Self::from_bytes(value)
	}
}

impl From<[u8; constants::PAYLOAD_SIZE]> for MiiData {
	fn from(value: [u8; constants::PAYLOAD_SIZE]) -> Self {
		Self(value)
	}
}

impl std::fmt::Debug for MiiData {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MiiData").field("name", &self.name()).field("checksum", &self.checksum()).finish()
	}
}

impl GhostFile {
	/// Reads the Mii payload
	///
	/// In strict mode the padding must be zero and the stored CRC-16 must match; otherwise the
	/// payload is returned even if either check fails.
	pub fn extract_mii(&self, location: MiiLocation, strict: bool) -> Result<MiiData, GhostError> {
		let record = self.read_abs(Section::Mii, location.offset(), RECORD_SIZE)?;
		let (payload, rest) = record.split_at(constants::PAYLOAD_SIZE);
		let (padding, stored) = rest.split_at(constants::PADDING_SIZE);
		let padding = [padding[0], padding[1]];
		let stored = u16::from_be_bytes([stored[0], stored[1]]);
		let computed = crc16_xmodem(&record[..constants::PAYLOAD_SIZE + constants::PADDING_SIZE]);

		if padding != [0, 0] {
			if strict {
				return Err(GhostError::InvalidMiiPadding(padding));
			}
			log::warn!("Mii padding is {padding:02X?}, expected zeros");
		}
		if stored != computed {
			if strict {
				return Err(GhostError::ChecksumMismatch {
					section: Section::Mii,
					expected: stored as u32,
					actual: computed as u32,
				});
			}
			log::warn!("Mii checksum is {stored:#06X}, computed {computed:#06X}");
		}

		MiiData::from_bytes(payload)
	}

	/// Writes a new Mii payload with fresh padding and CRC-16
	///
	/// The header CRC-32 is refreshed as well, since the sub-record lies inside the protected
	/// payload.
	pub fn replace_mii(&mut self, location: MiiLocation, mii: &MiiData) -> Result<(), GhostError> {
		self.write_abs(Section::Mii, location.offset(), &mii.record())?;
		self.recompute_checksum()
	}

	/// Decodes the Mii nickname without validating the sub-record
	pub fn mii_name(&self, location: MiiLocation) -> Result<String, GhostError> {
		let slot = self.read_abs(Section::Mii, location.offset() + constants::NAME_OFFSET, constants::NAME_SIZE)?;
		Ok(NameCodec::mii().decode(slot))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn payload(name: &str) -> MiiData {
		let mut data = [0x11u8; PAYLOAD_SIZE];
		let slot = NameCodec::mii().encode(name).unwrap();
		data[constants::NAME_OFFSET..constants::NAME_OFFSET + constants::NAME_SIZE].copy_from_slice(&slot);
		MiiData::from(data)
	}

	fn ghost(header: bool, mii: &MiiData) -> GhostFile {
		let mut data = Vec::new();
		if header {
			data.extend_from_slice(b"CTG0");
			data.resize(HEADER_SIZE, 0);
		}
		data.resize(data.len() + MII_OFFSET, 0);
		data.extend_from_slice(&mii.record());
		data.extend_from_slice(&[0xAA; 0x10]);
		GhostFile::from_bytes(data)
	}

	#[test]
	fn test_location_offsets() {
		assert_eq!(MiiLocation::Headerless.offset(), 0x244);
		assert_eq!(MiiLocation::Headed.offset(), 0x28C);
	}

	#[test]
	fn test_location_policies() {
		let (header, by_type) = (MiiOffsetPolicy::Header, MiiOffsetPolicy::GhostType);
		// A headerless downloaded ghost is where the two policies disagree
		assert_eq!(MiiLocation::select(header, false, GhostType::Downloaded), MiiLocation::Headerless);
		assert_eq!(MiiLocation::select(by_type, false, GhostType::Downloaded), MiiLocation::Headed);
		assert_eq!(MiiLocation::select(header, true, GhostType::Player), MiiLocation::Headed);
		assert_eq!(MiiLocation::select(by_type, false, GhostType::Staff), MiiLocation::Headerless);
	}

	#[test]
	fn test_extract_valid_record() {
		let mii = payload("Chris");
		for header in [false, true] {
			let file = ghost(header, &mii);
			let location = MiiLocation::for_file(&file);
			assert_eq!(file.extract_mii(location, true).unwrap(), mii);
			assert_eq!(file.mii_name(location).unwrap(), "Chris");
		}
	}

	#[test]
	fn test_bad_padding_fails_strict() {
		let mii = payload("Chris");
		let mut data = ghost(false, &mii).into_bytes();
		data[0x244 + 0x5C] = 1;
		let file = GhostFile::from_bytes(data);

		assert!(matches!(
			file.extract_mii(MiiLocation::Headerless, true),
			Err(GhostError::InvalidMiiPadding([1, 0]))
		));
		assert_eq!(file.extract_mii(MiiLocation::Headerless, false).unwrap(), mii);
	}

	#[test]
	fn test_bad_checksum_fails_strict() {
		let mii = payload("Chris");
		let mut data = ghost(false, &mii).into_bytes();
		data[0x244 + 0x5F] ^= 0xFF;
		let file = GhostFile::from_bytes(data);

		match file.extract_mii(MiiLocation::Headerless, true) {
			Err(GhostError::ChecksumMismatch {
				section,
				..
			}) => assert_eq!(section, Section::Mii),
			other => panic!("unexpected result: {other:?}"),
		}
		assert_eq!(file.extract_mii(MiiLocation::Headerless, false).unwrap(), mii);
	}

	#[test]
	fn test_replace_rewrites_checksum() {
		let mut file = ghost(false, &payload("Old"));
		let new = payload("New Mii");
		file.replace_mii(MiiLocation::Headerless, &new).unwrap();

		let record = &file.as_bytes()[0x244..0x244 + RECORD_SIZE];
		assert_eq!(&record[..PAYLOAD_SIZE], new.as_bytes());
		assert_eq!(&record[0x5C..0x5E], &[0, 0]);
		assert_eq!(&record[0x5E..0x60], &new.checksum().to_be_bytes());
		assert_eq!(file.extract_mii(MiiLocation::Headerless, true).unwrap().name(), "New Mii");
		// Bytes after the record are untouched
		assert_eq!(&file.as_bytes()[0x244 + RECORD_SIZE..], &[0xAA; 0x10]);
	}

	#[test]
	fn test_replace_refreshes_header_checksum() {
		let mut file = ghost(true, &payload("Old"));
		file.replace_mii(MiiLocation::Headed, &payload("New")).unwrap();
		file.verify_checksum().unwrap();
		assert_eq!(file.mii_name(MiiLocation::Headed).unwrap(), "New");
	}

	#[test]
	fn test_payload_length_precondition() {
		assert!(matches!(MiiData::from_bytes(&[0u8; 0x5B]), Err(GhostError::Precondition(_))));
		assert!(matches!(MiiData::from_bytes(&[0u8; 0x5E]), Err(GhostError::Precondition(_))));
		assert!(MiiData::from_bytes(&[0u8; 0x5C]).is_ok());
	}

	#[test]
	fn test_truncated_record() {
		let file = GhostFile::from_bytes(vec![0u8; 0x250]);
		assert!(matches!(
			file.extract_mii(MiiLocation::Headerless, false),
			Err(GhostError::TruncatedFile {
				section: Section::Mii,
				..
			})
		));
	}
}
