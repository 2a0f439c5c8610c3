//! Lookup tables mapping ids found in ghost data to display names.
//!
//! The tables are immutable and versioned through [`GameData::revision`]. They are incomplete by
//! design: ids added by later DLC are missing until observed. Lookups therefore return
//! [`Option`], and [`GameData::display`] falls back to an `Unknown <Kind> (<id>)` label instead of
//! failing. Only [`GameData::course`] is used structurally, by the body codec, where an unknown id
//! is an error.
//!
//! # Examples
//!
//! ```
//! use wraith_types::gamedata::{GameData, Lookup};
//!
//! let data = GameData::wii_u();
//! assert_eq!(data.course(33).unwrap().name(), "Wii Moo Moo Meadows");
//! assert_eq!(data.display(Lookup::Kart, 200), "Unknown Kart (200)");
//! ```

mod tables;

use std::{borrow::Cow, fmt::Formatter};

use serde::Serialize;

/// Course id of the first course; ghost numbers of non-downloaded ghosts count from here
pub const FIRST_COURSE_ID: u32 = 16;

/// A course (track slot) of the base game or its DLC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Course {
	id: u32,
	name: &'static str,
}

impl Course {
	/// Course id as stored in ghost files
	pub fn id(&self) -> u32 {
		self.id
	}

	/// English course name
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Ghost number staff and player ghosts use for this course
	pub fn ghost_number(&self) -> u32 {
		self.id - FIRST_COURSE_ID
	}
}

impl std::fmt::Display for Course {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.name)
	}
}

/// Kind of id being looked up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lookup {
	/// Course id
	Course,
	/// Character id
	Character,
	/// Kart body id
	Kart,
	/// Wheels id
	Wheels,
	/// Glider id
	Glider,
	/// Region flag id
	Flag,
}

impl std::fmt::Display for Lookup {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Course => write!(f, "Course"),
			Self::Character => write!(f, "Character"),
			Self::Kart => write!(f, "Kart"),
			Self::Wheels => write!(f, "Wheels"),
			Self::Glider => write!(f, "Glider"),
			Self::Flag => write!(f, "Flag"),
		}
	}
}

/// A revision of the game's lookup tables
#[derive(Debug)]
pub struct GameData {
	revision: &'static str,
	courses: &'static [(u32, &'static str)],
	characters: &'static [&'static str],
	karts: &'static [&'static str],
	wheels: &'static [&'static str],
	gliders: &'static [&'static str],
	flags: &'static [Option<&'static str>],
}

static WII_U: GameData = GameData {
	revision: "wii-u-4.1",
	courses: tables::COURSES,
	characters: tables::CHARACTERS,
	karts: tables::KARTS,
	wheels: tables::WHEELS,
	gliders: tables::GLIDERS,
	flags: tables::FLAGS,
};

impl GameData {
	/// Tables for the Wii U release, including the DLC courses
	pub fn wii_u() -> &'static GameData {
		&WII_U
	}

	/// Name of this table revision
	pub fn revision(&self) -> &'static str {
		self.revision
	}

	/// Looks up a course by id
	pub fn course(&self, id: u32) -> Option<Course> {
		self.courses.iter().find(|&&(course_id, _)| course_id == id).map(|&(id, name)| Course {
			id,
			name,
		})
	}

	/// Iterates over all known courses in id order
	pub fn courses(&self) -> impl Iterator<Item = Course> + '_ {
		self.courses.iter().map(|&(id, name)| Course {
			id,
			name,
		})
	}

	/// Looks up a character by id
	pub fn character(&self, id: u32) -> Option<&'static str> {
		Self::indexed(self.characters, id)
	}

	/// Looks up a kart body by id
	pub fn kart(&self, id: u32) -> Option<&'static str> {
		Self::indexed(self.karts, id)
	}

	/// Looks up a set of wheels by id
	pub fn wheels(&self, id: u32) -> Option<&'static str> {
		Self::indexed(self.wheels, id)
	}

	/// Looks up a glider by id
	pub fn glider(&self, id: u32) -> Option<&'static str> {
		Self::indexed(self.gliders, id)
	}

	/// Looks up the region code of a flag id
	pub fn flag(&self, id: u32) -> Option<&'static str> {
		self.flags.get(id as usize).copied().flatten()
	}

	/// Looks up any kind of id
	pub fn lookup(&self, kind: Lookup, id: u32) -> Option<&'static str> {
		match kind {
			Lookup::Course => self.course(id).map(|course| course.name),
			Lookup::Character => self.character(id),
			Lookup::Kart => self.kart(id),
			Lookup::Wheels => self.wheels(id),
			Lookup::Glider => self.glider(id),
			Lookup::Flag => self.flag(id),
		}
	}

	/// Display name for an id, or `Unknown <Kind> (<id>)` if the table has no entry
	pub fn display(&self, kind: Lookup, id: u32) -> Cow<'static, str> {
		match self.lookup(kind, id) {
			Some(name) => Cow::Borrowed(name),
			None => {
				log::debug!("No {kind} with id {id} in table revision {}", self.revision);
				Cow::Owned(format!("Unknown {kind} ({id})"))
			}
		}
	}

	fn indexed(table: &'static [&'static str], id: u32) -> Option<&'static str> {
		table.get(id as usize).copied()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_course_lookup() {
		let data = GameData::wii_u();
		let course = data.course(27).unwrap();
		assert_eq!(course.name(), "Mario Kart Stadium");
		assert_eq!(course.ghost_number(), 11);
		assert!(data.course(15).is_none());
		assert!(data.course(67).is_none());
	}

	#[test]
	fn test_courses_are_contiguous() {
		let ids: Vec<u32> = GameData::wii_u().courses().map(|c| c.id()).collect();
		assert_eq!(ids, (16..=66).collect::<Vec<_>>());
	}

	#[test]
	fn test_vehicle_lookups() {
		let data = GameData::wii_u();
		assert_eq!(data.character(0), Some("Mario"));
		assert_eq!(data.character(29), Some("Mii (Standard)"));
		assert_eq!(data.kart(12), Some("Sports Coupé"));
		assert_eq!(data.wheels(17), Some("Gold Wheels"));
		assert_eq!(data.glider(11), Some("Gold Glider"));
		assert_eq!(data.glider(12), None);
	}

	#[test]
	fn test_flag_lookup() {
		let data = GameData::wii_u();
		assert_eq!(data.flag(1), Some("JP"));
		assert_eq!(data.flag(49), Some("US"));
		assert_eq!(data.flag(0), None);
		assert_eq!(data.flag(10_000), None);
	}

	#[test]
	fn test_display_fallback() {
		let data = GameData::wii_u();
		assert_eq!(data.display(Lookup::Character, 3), "Daisy");
		assert_eq!(data.display(Lookup::Glider, 99), "Unknown Glider (99)");
		assert_eq!(data.display(Lookup::Course, 1), "Unknown Course (1)");
	}
}
