use wraith_rs::prelude::*;

use crate::fixtures::{STAFF_V3, body, mii, player_stem, write_ghost};

#[test]
fn test_lenient_mii_setting() {
	let dir = tempfile::tempdir().unwrap();
	let mut data = body(0x21, &mii("Chris", 0x10), false);
	// Break the sub-record padding
	data[0x244 + 0x5C] = 0xAA;
	let path = write_ghost(dir.path(), STAFF_V3, &data);

	let strict = Ghost::open(&path, &CodecConfig::default()).unwrap();
	assert!(matches!(strict.extract_mii(), Err(GhostError::InvalidMiiPadding([0xAA, 0x00]))));

	let settings = dir.path().join("wraith.toml");
	std::fs::write(&settings, "strict_mii = false\n").unwrap();
	let config = CodecConfig::load(Some(&settings)).unwrap();
	let lenient = Ghost::open(&path, &config).unwrap();
	assert_eq!(lenient.extract_mii().unwrap().name(), "Chris");
}

#[test]
fn test_ghost_type_mii_offsets() {
	let dir = tempfile::tempdir().unwrap();
	// Player ghosts without a header still read the Mii at the headed offset under this policy
	let mut data = vec![0u8; 0x48];
	data.extend_from_slice(&body(0x21, &mii("Chris", 0), false));
	let path = write_ghost(dir.path(), &player_stem(), &data);

	let config = CodecConfig::from_toml("mii_offsets = \"ghost_type\"").unwrap();
	let ghost = Ghost::open(&path, &config).unwrap();
	assert!(!ghost.has_header());
	assert_eq!(ghost.mii_location(), MiiLocation::Headed);
	assert_eq!(ghost.mii_name().unwrap(), "Chris");

	let by_header = Ghost::open(&path, &CodecConfig::default()).unwrap();
	assert_eq!(by_header.mii_location(), MiiLocation::Headerless);
}

#[test]
fn test_legacy_layout_setting() {
	let config = CodecConfig::from_toml("layout = \"legacy\"").unwrap();
	let layout = config.filename_layout();
	assert_eq!(layout.lengths(), vec![102, 114]);
	let legacy = layout.parse(STAFF_V3).unwrap();
	let current = GhostFilename::parse(STAFF_V3).unwrap();
	assert_eq!(legacy.playername, current.playername);
	assert_eq!(legacy.total_time, current.total_time);
	// Laps 4 and 5 are padding in the legacy layout, sentinel times in the current one
	assert_eq!(legacy.lap(4), None);
	assert_eq!(current.lap(4), Some(LapTime::UNSET));
	assert_eq!(layout.serialize(&legacy).unwrap(), STAFF_V3);

	// The 100-character stem only exists in the current layout
	let short = &STAFF_V3[..100];
	assert!(GhostFilename::parse(short).is_ok());
	assert!(matches!(layout.parse(short), Err(GhostError::InvalidLength { .. })));
}
