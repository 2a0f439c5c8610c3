//! Edit session over a single ghost file on disk.
//!
//! A [`Ghost`] keeps the decoded filename, the raw body and the settings it was opened with.
//! Edits patch the body in memory, refresh the checksums, write the file back and rename it to
//! the re-serialized filename. Nothing is cached between sessions.

use std::path::{Path, PathBuf};

use super::{
	GhostError,
	body::GhostFile,
	convert::{self, ConversionTarget},
	filename::{FilenameLayout, GhostFilename},
	linkage::{CustomTrack, ModLinkage, ModStore},
	mii::{MiiData, MiiLocation},
};
use crate::{
	config::CodecConfig,
	gamedata::{Course, FIRST_COURSE_ID, GameData},
};

/// An opened ghost file
#[derive(Debug, Clone)]
pub struct Ghost {
	path: PathBuf,
	record: GhostFilename,
	file: GhostFile,
	layout: FilenameLayout,
	config: CodecConfig,
}

impl Ghost {
	/// Opens a ghost, decoding its filename and reading its body
	pub fn open(path: impl AsRef<Path>, config: &CodecConfig) -> Result<Self, GhostError> {
		let path = path.as_ref();
		let layout = config.filename_layout();
		let record = GhostFilename::from_path(path, &layout)?;
		let file = GhostFile::open(path)?;
		log::info!("Opened {} ({}, header: {})", path.display(), record.ghost_type, file.has_header());

		Ok(Self {
			path: path.to_path_buf(),
			record,
			file,
			layout,
			config: config.clone(),
		})
	}

	/// Current path of the ghost
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Decoded filename
	pub fn record(&self) -> &GhostFilename {
		&self.record
	}

	/// Raw body
	pub fn file(&self) -> &GhostFile {
		&self.file
	}

	/// Returns `true` if the body starts with a `CTG0` header
	pub fn has_header(&self) -> bool {
		self.file.has_header()
	}

	/// Position of the Mii sub-record under the configured policy
	pub fn mii_location(&self) -> MiiLocation {
		MiiLocation::select(self.config.mii_offsets, self.file.has_header(), self.record.ghost_type)
	}

	/// Course named by the filename, if it is a known course
	pub fn course(&self) -> Option<Course> {
		GameData::wii_u().course(self.record.track_id)
	}

	/// Checks that the filename agrees with itself and with the body
	pub fn verify(&self) -> Result<(), GhostError> {
		if !self.record.ghost_number_consistent() {
			log::warn!(
				"Ghost number {} does not match track id {} of this {}",
				self.record.ghost_number,
				self.record.track_id,
				self.record.ghost_type
			);
			return Err(GhostError::corrupted(format!(
				"ghost number {} should be track id {} - {FIRST_COURSE_ID}",
				self.record.ghost_number, self.record.track_id
			)));
		}

		let course = self.file.track_slot()?;
		if course.id() != self.record.track_id {
			log::warn!(
				"Track id in filename ({}) and body ({}) differ",
				self.record.track_id,
				course.id()
			);
			return Err(GhostError::corrupted(format!(
				"filename names track {}, body holds track {}",
				self.record.track_id,
				course.id()
			)));
		}
		Ok(())
	}

	/// Moves the ghost to another course, optionally linking it to a custom track
	///
	/// Returns the new path of the ghost.
	pub fn change_track(&mut self, course_id: u32, linkage: Option<&ModLinkage>) -> Result<&Path, GhostError> {
		let course = GameData::wii_u().course(course_id).ok_or(GhostError::UnknownCourse(course_id))?;

		let mut record = self.record.clone();
		record.track_id = course.id();
		if record.ghost_type.numbers_by_track() {
			record.ghost_number = course.ghost_number();
		}

		let mut file = self.file.clone();
		file.set_track_slot(course.id())?;
		file.set_mod_linkage(linkage)?;
		file.recompute_checksum()?;

		log::info!("Moving ghost to {course} ({})", course.id());
		self.commit(record, file)
	}

	/// Replaces the Mii and renames the ghost after the new Mii's nickname
	///
	/// Returns the new path of the ghost.
	pub fn replace_mii(&mut self, mii: &MiiData) -> Result<&Path, GhostError> {
		let mut file = self.file.clone();
		file.replace_mii(self.mii_location(), mii)?;

		let mut record = self.record.clone();
		record.playername = mii.name();

		log::info!("Replacing Mii with {:?}", record.playername);
		self.commit(record, file)
	}

	/// Reads the Mii payload, honouring the configured strictness
	pub fn extract_mii(&self) -> Result<MiiData, GhostError> {
		self.extract_mii_with(self.config.strict_mii)
	}

	/// Reads the Mii payload with explicit strictness
	pub fn extract_mii_with(&self, strict: bool) -> Result<MiiData, GhostError> {
		self.file.extract_mii(self.mii_location(), strict)
	}

	/// Nickname of the embedded Mii
	pub fn mii_name(&self) -> Result<String, GhostError> {
		self.file.mii_name(self.mii_location())
	}

	/// Custom track linkage stored in the body
	pub fn mod_linkage(&self) -> Result<Option<ModLinkage>, GhostError> {
		self.file.mod_linkage()
	}

	/// Resolves the linked custom track; a store miss yields `None`
	pub fn custom_track(&self, store: &impl ModStore) -> Result<Option<CustomTrack>, GhostError> {
		let Some(linkage) = self.file.mod_linkage()? else {
			return Ok(None);
		};
		let track = store.resolve(&linkage);
		if track.is_none() {
			log::info!("Mod {linkage} is not in the store");
		}
		Ok(track)
	}

	/// Writes a converted copy into `output_dir`
	pub fn export(&self, output_dir: impl AsRef<Path>, target: ConversionTarget) -> Result<PathBuf, GhostError> {
		convert::export(&self.path, &self.record, target, &self.layout, output_dir)
	}

	/// Writes a staff ghost copy into `output_dir`
	pub fn export_as_staff(&self, output_dir: impl AsRef<Path>) -> Result<PathBuf, GhostError> {
		self.export(output_dir, ConversionTarget::Staff)
	}

	/// Writes a downloaded ghost copy for `slot` into `output_dir`
	pub fn export_as_downloaded(&self, output_dir: impl AsRef<Path>, slot: u32) -> Result<PathBuf, GhostError> {
		self.export(
			output_dir,
			ConversionTarget::Downloaded {
				slot,
			},
		)
	}

	/// Re-reads filename and body from disk
	pub fn reload(&mut self) -> Result<(), GhostError> {
		*self = Self::open(&self.path, &self.config)?;
		Ok(())
	}

	/// Writes `file` back and renames the ghost after `record`
	///
	/// The new body is staged in a temporary file next to the ghost and moved into place, so a
	/// failure leaves both the disk and this session unchanged.
	fn commit(&mut self, record: GhostFilename, file: GhostFile) -> Result<&Path, GhostError> {
		let name = self.layout.filename(&record)?;
		let target = self.path.with_file_name(&name);
		let renamed = target != self.path;
		if renamed && target.exists() {
			return Err(GhostError::precondition(format!("{} already exists", target.display())));
		}

		let dir = match self.path.parent() {
			Some(dir) if !dir.as_os_str().is_empty() => dir,
			_ => Path::new("."),
		};
		let mut staged = tempfile::NamedTempFile::new_in(dir)?;
		file.to_writer(staged.as_file_mut())?;
		if renamed {
			staged.persist_noclobber(&target).map_err(|e| e.error)?;
		} else {
			staged.persist(&target).map_err(|e| e.error)?;
		}

		let previous = std::mem::replace(&mut self.path, target);
		self.record = record;
		self.file = file;
		if renamed {
			std::fs::remove_file(&previous)?;
			log::info!("Renamed to {name}");
		}
		Ok(&self.path)
	}
}
