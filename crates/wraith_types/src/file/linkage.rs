//! Custom track ("mod") linkage stored in ghost files.
//!
//! The editor injects three fields just before the Mii sub-record to remember which custom track
//! a ghost was driven on: a version triple, the id of the site hosting the mod and the mod id on
//! that site. Metadata about the mod itself (name, author) lives outside the ghost and is looked
//! up through a [`ModStore`].

use std::{collections::HashMap, fmt::Formatter, io::Read, path::Path};

use serde::{Deserialize, Serialize};

use super::GhostError;

/// Website hosting custom tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModSite {
	/// Custom Mario Kart 8 Wiki (`mk8.tockdom.com`)
	CtWiki,
	/// GameBanana
	GameBanana,
}

impl ModSite {
	/// All known sites, in id order
	pub const ALL: [ModSite; 2] = [ModSite::CtWiki, ModSite::GameBanana];

	/// Resolves a site id as stored in ghost files
	pub fn from_id(id: u8) -> Option<Self> {
		match id {
			0 => Some(Self::CtWiki),
			1 => Some(Self::GameBanana),
			_ => None,
		}
	}

	/// Site id as stored in ghost files
	pub fn id(self) -> u8 {
		match self {
			Self::CtWiki => 0,
			Self::GameBanana => 1,
		}
	}

	/// Human-readable site name
	pub fn name(self) -> &'static str {
		match self {
			Self::CtWiki => "CT Wiki",
			Self::GameBanana => "GameBanana",
		}
	}

	/// Page of a mod on this site
	pub fn url_for_mod(self, mod_id: u32) -> String {
		match self {
			Self::CtWiki => format!("https://mk8.tockdom.com/w/index.php?curid={mod_id}"),
			Self::GameBanana => format!("https://gamebanana.com/mods/{mod_id}"),
		}
	}
}

impl std::fmt::Display for ModSite {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.name())
	}
}

/// Version of a custom track
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModVersion {
	/// Major version
	pub major: u8,
	/// Minor version
	pub minor: u8,
	/// Patch version
	pub patch: u8,
}

impl ModVersion {
	/// Creates a new version triple
	pub const fn new(major: u8, minor: u8, patch: u8) -> Self {
		Self {
			major,
			minor,
			patch,
		}
	}

	/// Version triple as stored in ghost files
	pub fn to_bytes(self) -> [u8; 3] {
		[self.major, self.minor, self.patch]
	}
}

impl From<[u8; 3]> for ModVersion {
	fn from(bytes: [u8; 3]) -> Self {
		Self::new(bytes[0], bytes[1], bytes[2])
	}
}

impl std::fmt::Display for ModVersion {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)
	}
}

/// Link between a ghost and the custom track it was driven on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModLinkage {
	/// Mod id on the hosting site; never zero
	pub mod_id: u32,
	/// Raw site id, kept even when it names no known site
	pub site_id: u8,
	/// Version of the mod
	pub version: ModVersion,
}

impl ModLinkage {
	/// Creates a linkage to a mod on a known site
	pub fn new(site: ModSite, mod_id: u32, version: ModVersion) -> Self {
		Self {
			mod_id,
			site_id: site.id(),
			version,
		}
	}

	/// Hosting site, or `None` if the stored id is out of range
	pub fn site(&self) -> Option<ModSite> {
		ModSite::from_id(self.site_id)
	}

	/// Page of the mod, if the site is known
	pub fn url(&self) -> Option<String> {
		self.site().map(|site| site.url_for_mod(self.mod_id))
	}
}

impl std::fmt::Display for ModLinkage {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.site() {
			Some(site) => write!(f, "[{site}] #{} {}", self.mod_id, self.version),
			None => write!(f, "[site {}] #{} {}", self.site_id, self.mod_id, self.version),
		}
	}
}

/// Metadata of a custom track
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomTrack {
	/// Track name
	pub name: String,
	/// Hosting site
	pub site: ModSite,
	/// Mod id on the hosting site
	pub mod_id: u32,
	/// Author(s), if known
	#[serde(default)]
	pub author: Option<String>,
}

impl CustomTrack {
	/// Page of the mod
	pub fn url(&self) -> String {
		self.site.url_for_mod(self.mod_id)
	}
}

impl std::fmt::Display for CustomTrack {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "[{}] {}", self.site, self.name)
	}
}

/// Source of custom track metadata
pub trait ModStore {
	/// Looks up a mod; a miss is not an error
	fn find_mod(&self, mod_id: u32, site: ModSite) -> Option<CustomTrack>;

	/// Resolves the mod a linkage points to
	fn resolve(&self, linkage: &ModLinkage) -> Option<CustomTrack> {
		let Some(site) = linkage.site() else {
			log::warn!("Mod site id {} is out of range; treating mod as unknown", linkage.site_id);
			return None;
		};
		self.find_mod(linkage.mod_id, site)
	}
}

/// In-memory [`ModStore`]
#[derive(Debug, Default, Clone)]
pub struct MemoryModStore {
	mods: HashMap<(ModSite, u32), CustomTrack>,
}

impl MemoryModStore {
	/// Creates an empty store
	pub fn new() -> Self {
		Self::default()
	}

	/// Loads a JSON array of [`CustomTrack`]s
	pub fn from_json(json: &str) -> Result<Self, GhostError> {
		let tracks: Vec<CustomTrack> = serde_json::from_str(json)?;
		Ok(tracks.into_iter().collect())
	}

	/// Loads a JSON array of [`CustomTrack`]s from any reader
	pub fn from_reader<R: Read>(reader: R) -> Result<Self, GhostError> {
		let tracks: Vec<CustomTrack> = serde_json::from_reader(reader)?;
		Ok(tracks.into_iter().collect())
	}

	/// Loads a JSON file of [`CustomTrack`]s
	pub fn open(path: impl AsRef<Path>) -> Result<Self, GhostError> {
		let file = std::fs::File::open(path)?;
		Self::from_reader(std::io::BufReader::new(file))
	}

	/// Adds a mod, replacing an existing entry with the same site and id
	pub fn add_or_update(&mut self, track: CustomTrack) -> Option<CustomTrack> {
		self.mods.insert((track.site, track.mod_id), track)
	}

	/// Iterates over all stored mods in no particular order
	pub fn iter(&self) -> impl Iterator<Item = &CustomTrack> {
		self.mods.values()
	}

	/// Number of stored mods
	pub fn len(&self) -> usize {
		self.mods.len()
	}

	/// Returns `true` if the store holds no mods
	pub fn is_empty(&self) -> bool {
		self.mods.is_empty()
	}
}

impl FromIterator<CustomTrack> for MemoryModStore {
	fn from_iter<I: IntoIterator<Item = CustomTrack>>(iter: I) -> Self {
		let mut store = Self::new();
		for track in iter {
			store.add_or_update(track);
		}
		store
	}
}

impl ModStore for MemoryModStore {
	fn find_mod(&self, mod_id: u32, site: ModSite) -> Option<CustomTrack> {
		self.mods.get(&(site, mod_id)).cloned()
	}
}
