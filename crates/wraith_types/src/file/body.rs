//! Ghost file body codec.
//!
//! A ghost file is laid out as:
//!
//! ```text
//! [optional 0x48-byte "CTG0" header][ghost payload ... course id @ 0x17C ...
//!  mod linkage @ 0x234..0x23C][Mii sub-record @ 0x244][...]
//! ```
//!
//! Every offset below is relative to the end of the header, so [`GhostFile::offset`] adds the
//! header length when one is present. The header carries a CRC-32 over everything after it, which
//! must be refreshed with [`GhostFile::recompute_checksum`] after any payload edit.

use std::{
	fmt::Formatter,
	io::{Read, Write},
	path::Path,
};

use super::{
	GhostError, Section,
	checksum::crc32,
	linkage::{ModLinkage, ModVersion},
};
use crate::gamedata::{Course, GameData};

pub(crate) mod constants {
	/// Magic bytes at offset 0 of files with a header
	pub const MAGIC: [u8; 4] = *b"CTG0";

	/// Size of the player ghost header in bytes
	pub const HEADER_SIZE: usize = 0x48;

	/// Absolute offset of the big-endian CRC-32 inside the header
	pub const CHECKSUM_OFFSET: usize = 0x38;

	/// Course id (u32, big-endian)
	pub const COURSE_ID_OFFSET: usize = 0x17C;

	/// Mod version triple (u8 major, minor, patch)
	pub const MOD_VERSION_OFFSET: usize = 0x234;

	/// Mod site id (u8)
	pub const MOD_SITE_OFFSET: usize = 0x237;

	/// Mod id (u32, big-endian); zero means no linkage
	pub const MOD_ID_OFFSET: usize = 0x238;

	/// Mii sub-record
	pub const MII_OFFSET: usize = 0x244;
}

pub use constants::{HEADER_SIZE, MAGIC};

/// Returns `true` if `data` starts with the header magic
pub fn has_magic(data: &[u8]) -> bool {
	data.starts_with(&constants::MAGIC)
}

/// Raw contents of a ghost file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GhostFile {
	data: Vec<u8>,
	has_header: bool,
}

impl GhostFile {
	/// Wraps raw file contents, detecting the header from the magic bytes
	pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
		let data = data.into();
		let has_header = has_magic(&data);
		Self {
			data,
			has_header,
		}
	}

	/// Reads a ghost from any reader
	pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, GhostError> {
		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;
		Ok(Self::from_bytes(data))
	}

	/// Reads a ghost file from disk
	pub fn open(path: impl AsRef<Path>) -> Result<Self, GhostError> {
		let path = path.as_ref();
		let data = std::fs::read(path)?;
		log::debug!("Read {} bytes from {}", data.len(), path.display());
		Ok(Self::from_bytes(data))
	}

	/// Checks a file on disk for the header magic without reading the whole file
	pub fn detect_header(path: impl AsRef<Path>) -> Result<bool, GhostError> {
		let file = std::fs::File::open(path)?;
		let mut magic = Vec::with_capacity(constants::MAGIC.len());
		file.take(constants::MAGIC.len() as u64).read_to_end(&mut magic)?;
		Ok(has_magic(&magic))
	}

	/// Writes the ghost to disk, replacing any existing file
	pub fn save(&self, path: impl AsRef<Path>) -> Result<(), GhostError> {
		let path = path.as_ref();
		let mut file = std::fs::File::create(path)?;
		self.to_writer(&mut file)?;
		log::debug!("Wrote {} bytes to {}", self.data.len(), path.display());
		Ok(())
	}

	/// Writes the ghost to a new file; fails with [`GhostError::Precondition`] if `path` exists
	pub fn save_new(&self, path: impl AsRef<Path>) -> Result<(), GhostError> {
		let path = path.as_ref();
		let mut file = match std::fs::OpenOptions::new().write(true).create_new(true).open(path) {
			Ok(file) => file,
			Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
				return Err(GhostError::precondition(format!("{} already exists", path.display())));
			}
			Err(e) => return Err(e.into()),
		};
		self.to_writer(&mut file)?;
		log::debug!("Wrote {} bytes to new file {}", self.data.len(), path.display());
		Ok(())
	}

	/// Writes the raw contents to any writer
	pub fn to_writer<W: Write>(&self, writer: &mut W) -> Result<(), GhostError> {
		writer.write_all(&self.data)?;
		writer.flush()?;
		Ok(())
	}

	/// Raw file contents
	pub fn as_bytes(&self) -> &[u8] {
		&self.data
	}

	/// Consumes the ghost, returning the raw contents
	pub fn into_bytes(self) -> Vec<u8> {
		self.data
	}

	/// Size of the file in bytes
	pub fn len(&self) -> usize {
		self.data.len()
	}

	/// Returns `true` if the file is empty
	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	/// Returns `true` if the file starts with a `CTG0` header
	pub fn has_header(&self) -> bool {
		self.has_header
	}

	/// Absolute offset of a header-relative offset
	pub fn offset(&self, logical: usize) -> usize {
		if self.has_header {
			logical + constants::HEADER_SIZE
		} else {
			logical
		}
	}

	/// Everything after the header (the whole file if there is none)
	pub fn payload(&self) -> &[u8] {
		let start = self.offset(0).min(self.data.len());
		&self.data[start..]
	}

	/// Copy of this ghost without its header
	pub fn without_header(&self) -> GhostFile {
		Self {
			data: self.payload().to_vec(),
			has_header: false,
		}
	}

	/// Reads `len` bytes at an absolute offset
	pub(crate) fn read_abs(&self, section: Section, offset: usize, len: usize) -> Result<&[u8], GhostError> {
		offset
			.checked_add(len)
			.and_then(|end| self.data.get(offset..end))
			.ok_or_else(|| GhostError::truncated(section, offset, len, self.data.len()))
	}

	/// Overwrites bytes at an absolute offset; never grows the file
	pub(crate) fn write_abs(&mut self, section: Section, offset: usize, bytes: &[u8]) -> Result<(), GhostError> {
		let actual = self.data.len();
		let slot = offset
			.checked_add(bytes.len())
			.and_then(|end| self.data.get_mut(offset..end))
			.ok_or_else(|| GhostError::truncated(section, offset, bytes.len(), actual))?;
		slot.copy_from_slice(bytes);
		Ok(())
	}

	fn read_array<const N: usize>(&self, section: Section, logical: usize) -> Result<[u8; N], GhostError> {
		let mut out = [0u8; N];
		out.copy_from_slice(self.read_abs(section, self.offset(logical), N)?);
		Ok(out)
	}

	fn write_logical(&mut self, section: Section, logical: usize, bytes: &[u8]) -> Result<(), GhostError> {
		let offset = self.offset(logical);
		self.write_abs(section, offset, bytes)
	}

	/// Raw course id stored in the body
	pub fn course_id(&self) -> Result<u32, GhostError> {
		self.read_array(Section::Body, constants::COURSE_ID_OFFSET).map(u32::from_be_bytes)
	}

	/// Course the ghost was recorded on
	pub fn track_slot(&self) -> Result<Course, GhostError> {
		let id = self.course_id()?;
		GameData::wii_u().course(id).ok_or(GhostError::UnknownCourse(id))
	}

	/// Writes a new course id; the id must be a known course
	pub fn set_track_slot(&mut self, course_id: u32) -> Result<(), GhostError> {
		if GameData::wii_u().course(course_id).is_none() {
			return Err(GhostError::UnknownCourse(course_id));
		}
		self.write_logical(Section::Body, constants::COURSE_ID_OFFSET, &course_id.to_be_bytes())
	}

	/// Reads the custom track linkage, if any
	pub fn mod_linkage(&self) -> Result<Option<ModLinkage>, GhostError> {
		let mod_id = u32::from_be_bytes(self.read_array(Section::Body, constants::MOD_ID_OFFSET)?);
		if mod_id == 0 {
			return Ok(None);
		}

		let version = ModVersion::from(self.read_array::<3>(Section::Body, constants::MOD_VERSION_OFFSET)?);
		let [site_id] = self.read_array::<1>(Section::Body, constants::MOD_SITE_OFFSET)?;
		let linkage = ModLinkage {
			mod_id,
			site_id,
			version,
		};
		if linkage.site().is_none() {
			log::warn!("Ghost links mod {mod_id} on unknown site id {site_id}");
		}
		Ok(Some(linkage))
	}

	/// Writes or clears the custom track linkage
	///
	/// Clearing zeroes the version, site and id fields alike.
	pub fn set_mod_linkage(&mut self, linkage: Option<&ModLinkage>) -> Result<(), GhostError> {
		let (version, site, id) = match linkage {
			Some(linkage) if linkage.mod_id == 0 => {
				return Err(GhostError::precondition("mod id 0 is reserved for \"no linkage\""));
			}
			Some(linkage) => (linkage.version.to_bytes(), linkage.site_id, linkage.mod_id),
			None => ([0; 3], 0, 0),
		};
		self.write_logical(Section::Body, constants::MOD_VERSION_OFFSET, &version)?;
		self.write_logical(Section::Body, constants::MOD_SITE_OFFSET, &[site])?;
		self.write_logical(Section::Body, constants::MOD_ID_OFFSET, &id.to_be_bytes())
	}

	/// CRC-32 stored in the header, or `None` without a header
	pub fn stored_checksum(&self) -> Result<Option<u32>, GhostError> {
		if !self.has_header {
			return Ok(None);
		}
		let bytes = self.read_abs(Section::Header, constants::CHECKSUM_OFFSET, 4)?;
		let mut raw = [0u8; 4];
		raw.copy_from_slice(bytes);
		Ok(Some(u32::from_be_bytes(raw)))
	}

	/// CRC-32 of the payload, or `None` without a header
	pub fn compute_checksum(&self) -> Option<u32> {
		self.has_header.then(|| crc32(self.payload()))
	}

	/// Refreshes the header CRC-32 after payload edits; does nothing without a header
	pub fn recompute_checksum(&mut self) -> Result<(), GhostError> {
		let Some(checksum) = self.compute_checksum() else {
			return Ok(());
		};
		if self.data.len() < constants::HEADER_SIZE {
			return Err(GhostError::truncated(
				Section::Header,
				0,
				constants::HEADER_SIZE,
				self.data.len(),
			));
		}
		log::debug!("Header checksum is now {checksum:#010X}");
		self.write_abs(Section::Header, constants::CHECKSUM_OFFSET, &checksum.to_be_bytes())
	}

	/// Checks the header CRC-32; files without a header always pass
	pub fn verify_checksum(&self) -> Result<(), GhostError> {
		let (Some(expected), Some(actual)) = (self.stored_checksum()?, self.compute_checksum()) else {
			return Ok(());
		};
		if expected != actual {
			return Err(GhostError::ChecksumMismatch {
				section: Section::Header,
				expected,
				actual,
			});
		}
		Ok(())
	}
}

impl From<Vec<u8>> for GhostFile {
	fn from(data: Vec<u8>) -> Self {
		Self::from_bytes(data)
	}
}

impl From<&[u8]> for GhostFile {
	fn from(data: &[u8]) -> Self {
		Self::from_bytes(data)
	}
}

impl From<GhostFile> for Vec<u8> {
	fn from(file: GhostFile) -> Self {
		file.into_bytes()
	}
}

impl std::fmt::Display for GhostFile {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"Ghost {{ size: {} bytes, header: {} }}",
			self.data.len(),
			if self.has_header {
				"CTG0"
			} else {
				"none"
			}
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::file::linkage::ModSite;

	/// Smallest body covering the Mii sub-record
	const BODY_SIZE: usize = 0x2A0;

	fn body(course: u32) -> Vec<u8> {
		let mut data = vec![0u8; BODY_SIZE];
		data[constants::COURSE_ID_OFFSET..constants::COURSE_ID_OFFSET + 4]
			.copy_from_slice(&course.to_be_bytes());
		data
	}

	fn with_header(body: &[u8]) -> Vec<u8> {
		let mut data = vec![0u8; HEADER_SIZE];
		data[..4].copy_from_slice(&MAGIC);
		data.extend_from_slice(body);
		data
	}

	#[test]
	fn test_header_detection() {
		assert!(!GhostFile::from_bytes(body(33)).has_header());
		assert!(GhostFile::from_bytes(with_header(&body(33))).has_header());
		assert!(!GhostFile::from_bytes(b"CTG".to_vec()).has_header());
	}

	#[test]
	fn test_detect_header_on_disk() {
		let dir = tempfile::tempdir().unwrap();
		let headed = dir.path().join("headed.dat");
		let plain = dir.path().join("plain.dat");
		let short = dir.path().join("short.dat");
		std::fs::write(&headed, with_header(&body(33))).unwrap();
		std::fs::write(&plain, body(33)).unwrap();
		std::fs::write(&short, b"CT").unwrap();

		assert!(GhostFile::detect_header(&headed).unwrap());
		assert!(!GhostFile::detect_header(&plain).unwrap());
		assert!(!GhostFile::detect_header(&short).unwrap());
		assert!(matches!(GhostFile::detect_header(dir.path().join("missing.dat")), Err(GhostError::Io(_))));
	}

	#[test]
	fn test_save_new_refuses_existing_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("ghost.dat");
		let ghost = GhostFile::from_bytes(body(33));
		ghost.save_new(&path).unwrap();
		assert_eq!(std::fs::read(&path).unwrap(), body(33));

		let other = GhostFile::from_bytes(body(27));
		assert!(matches!(other.save_new(&path), Err(GhostError::Precondition(_))));
		assert_eq!(std::fs::read(&path).unwrap(), body(33));
	}

	#[test]
	fn test_offset_transparency() {
		let plain = GhostFile::from_bytes(body(33));
		let headed = GhostFile::from_bytes(with_header(&body(33)));
		assert_eq!(plain.offset(constants::COURSE_ID_OFFSET), 0x17C);
		assert_eq!(headed.offset(constants::COURSE_ID_OFFSET), 0x48 + 0x17C);
		assert_eq!(plain.course_id().unwrap(), headed.course_id().unwrap());
		assert_eq!(headed.track_slot().unwrap().name(), "Wii Moo Moo Meadows");
	}

	#[test]
	fn test_unknown_course() {
		let ghost = GhostFile::from_bytes(body(7));
		assert!(matches!(ghost.track_slot(), Err(GhostError::UnknownCourse(7))));

		let mut ghost = GhostFile::from_bytes(body(33));
		assert!(matches!(ghost.set_track_slot(200), Err(GhostError::UnknownCourse(200))));
		assert_eq!(ghost.course_id().unwrap(), 33);
	}

	#[test]
	fn test_set_track_slot() {
		let mut ghost = GhostFile::from_bytes(with_header(&body(33)));
		ghost.set_track_slot(27).unwrap();
		assert_eq!(ghost.track_slot().unwrap().id(), 27);
		assert_eq!(&ghost.as_bytes()[0x48 + 0x17C..0x48 + 0x180], &[0, 0, 0, 27]);
	}

	#[test]
	fn test_truncated_file() {
		let ghost = GhostFile::from_bytes(vec![0u8; 0x100]);
		match ghost.course_id() {
			Err(GhostError::TruncatedFile {
				section,
				offset,
				needed,
				actual,
			}) => {
				assert_eq!(section, Section::Body);
				assert_eq!(offset, 0x17C);
				assert_eq!(needed, 4);
				assert_eq!(actual, 0x100);
			}
			other => panic!("unexpected result: {other:?}"),
		}
	}

	#[test]
	fn test_mod_linkage_round_trip() {
		let mut ghost = GhostFile::from_bytes(body(33));
		assert_eq!(ghost.mod_linkage().unwrap(), None);

		let linkage = ModLinkage::new(ModSite::GameBanana, 100039, ModVersion::new(1, 2, 3));
		ghost.set_mod_linkage(Some(&linkage)).unwrap();
		assert_eq!(ghost.mod_linkage().unwrap(), Some(linkage));
		assert_eq!(&ghost.as_bytes()[0x234..0x23C], &[1, 2, 3, 1, 0x00, 0x01, 0x86, 0xC7]);
	}

	#[test]
	fn test_clearing_linkage_zeroes_all_fields() {
		let mut ghost = GhostFile::from_bytes(body(33));
		let linkage = ModLinkage::new(ModSite::CtWiki, 42, ModVersion::new(9, 9, 9));
		ghost.set_mod_linkage(Some(&linkage)).unwrap();
		ghost.set_mod_linkage(None).unwrap();
		assert!(ghost.as_bytes()[0x234..0x23C].iter().all(|&b| b == 0));
	}

	#[test]
	fn test_unknown_mod_site_is_not_fatal() {
		let mut data = body(33);
		data[0x237] = 7;
		data[0x238..0x23C].copy_from_slice(&5u32.to_be_bytes());
		let linkage = GhostFile::from_bytes(data).mod_linkage().unwrap().unwrap();
		assert_eq!(linkage.site_id, 7);
		assert_eq!(linkage.site(), None);
	}

	#[test]
	fn test_checksum_round_trip() {
		let mut ghost = GhostFile::from_bytes(with_header(&body(33)));
		assert!(matches!(ghost.verify_checksum(), Err(GhostError::ChecksumMismatch { .. })));

		ghost.recompute_checksum().unwrap();
		ghost.verify_checksum().unwrap();
		let stored = ghost.stored_checksum().unwrap().unwrap();
		assert_eq!(stored, crc32(&ghost.as_bytes()[HEADER_SIZE..]));
		assert_eq!(&ghost.as_bytes()[0x38..0x3C], &stored.to_be_bytes());

		ghost.set_track_slot(27).unwrap();
		assert!(ghost.verify_checksum().is_err());
		ghost.recompute_checksum().unwrap();
		ghost.verify_checksum().unwrap();
	}

	#[test]
	fn test_checksum_without_header() {
		let mut ghost = GhostFile::from_bytes(body(33));
		let before = ghost.clone();
		ghost.recompute_checksum().unwrap();
		assert_eq!(ghost, before);
		assert_eq!(ghost.stored_checksum().unwrap(), None);
		ghost.verify_checksum().unwrap();
	}

	#[test]
	fn test_without_header() {
		let raw = body(33);
		let ghost = GhostFile::from_bytes(with_header(&raw));
		let stripped = ghost.without_header();
		assert!(!stripped.has_header());
		assert_eq!(stripped.as_bytes(), raw.as_slice());
		assert_eq!(stripped.course_id().unwrap(), 33);
	}
}
