use wraith_rs::prelude::file::body::HEADER_SIZE;
use wraith_rs::prelude::*;

use crate::fixtures::{STAFF_V3, body, mii, player_stem, write_ghost};

#[test_log::test]
fn test_swap_mii_between_ghosts() {
	let dir = tempfile::tempdir().unwrap();
	let config = CodecConfig::default();
	let donor = write_ghost(dir.path(), STAFF_V3, &body(0x21, &mii("Mario", 0x31), false));
	let target = write_ghost(dir.path(), &player_stem(), &body(0x21, &mii("Nin★Chris", 0x42), true));

	// Export the donor's Mii to a file, then import it into the target
	let mii_path = dir.path().join("mario.mii");
	Ghost::open(&donor, &config).unwrap().extract_mii().unwrap().save(&mii_path).unwrap();
	let imported = MiiData::open(&mii_path).unwrap();
	assert_eq!(imported.name(), "Mario");

	let mut ghost = Ghost::open(&target, &config).unwrap();
	let renamed = ghost.replace_mii(&imported).unwrap().to_path_buf();
	assert!(!target.exists());
	assert!(renamed.exists());

	let reopened = Ghost::open(&renamed, &config).unwrap();
	assert_eq!(reopened.record().playername, "Mario");
	assert_eq!(reopened.extract_mii().unwrap(), imported);
	reopened.verify().unwrap();
	reopened.file().verify_checksum().unwrap();
}

#[test_log::test]
fn test_custom_track_round_trip() {
	let dir = tempfile::tempdir().unwrap();
	let config = CodecConfig::default();
	let path = write_ghost(dir.path(), &player_stem(), &body(0x21, &mii("Chris", 0), true));

	let store_path = dir.path().join("mods.json");
	std::fs::write(
		&store_path,
		r#"[{"name":"Big Blue","site":"game_banana","mod_id":100039,"author":"Ray"}]"#,
	)
	.unwrap();
	let store = MemoryModStore::open(&store_path).unwrap();

	let linkage = ModLinkage::new(ModSite::GameBanana, 100039, ModVersion::new(1, 2, 3));
	let mut ghost = Ghost::open(&path, &config).unwrap();
	ghost.change_track(27, Some(&linkage)).unwrap();

	let ghost = Ghost::open(ghost.path(), &config).unwrap();
	assert_eq!(ghost.course().unwrap().name(), "Mario Kart Stadium");
	assert_eq!(ghost.record().ghost_number, 11);
	assert_eq!(ghost.mod_linkage().unwrap(), Some(linkage));
	assert_eq!(linkage.url().unwrap(), "https://gamebanana.com/mods/100039");

	let track = ghost.custom_track(&store).unwrap().unwrap();
	assert_eq!(track.name, "Big Blue");
	assert_eq!(track.author.as_deref(), Some("Ray"));

	// Moving back to a stock course drops the link
	let mut ghost = ghost;
	ghost.change_track(0x21, None).unwrap();
	assert_eq!(ghost.mod_linkage().unwrap(), None);
	ghost.file().verify_checksum().unwrap();
}

#[test_log::test]
fn test_convert_player_ghost_for_every_target() {
	let dir = tempfile::tempdir().unwrap();
	let out = tempfile::tempdir().unwrap();
	let source = body(0x21, &mii("Chris", 0), true);
	let path = write_ghost(dir.path(), &player_stem(), &source);
	let ghost = Ghost::open(&path, &CodecConfig::default()).unwrap();

	let staff = ghost.export_as_staff(out.path()).unwrap();
	assert_eq!(staff.file_name().unwrap().to_str().unwrap(), format!("{STAFF_V3}.dat"));

	let downloaded = ghost.export_as_downloaded(out.path(), 15).unwrap();
	let player = ghost
		.export(
			out.path(),
			ConversionTarget::Player {
				number: 0x11,
			},
		)
		.unwrap();
	assert!(downloaded.file_name().unwrap().to_str().unwrap().starts_with("dg0f21"));
	assert_eq!(player.file_name().unwrap().to_str().unwrap(), format!("{}.dat", player_stem()));

	// Every copy lost the header, the source kept it
	for copy in [&staff, &downloaded, &player] {
		let file = GhostFile::open(copy).unwrap();
		assert!(!file.has_header());
		assert_eq!(file.as_bytes(), &source[HEADER_SIZE..]);
	}
	assert_eq!(std::fs::read(&path).unwrap(), source);

	assert!(matches!(ghost.export_as_downloaded(out.path(), 16), Err(GhostError::Precondition(_))));
}

#[test]
fn test_tampered_header_checksum() {
	let dir = tempfile::tempdir().unwrap();
	let mut data = body(0x21, &mii("Chris", 0), true);
	data[0x48 + 0x10] ^= 0xFF;
	let path = write_ghost(dir.path(), &player_stem(), &data);

	let ghost = Ghost::open(&path, &CodecConfig::default()).unwrap();
	// Filename and body still agree; only the checksum is stale
	ghost.verify().unwrap();
	assert!(matches!(
		ghost.file().verify_checksum(),
		Err(GhostError::ChecksumMismatch {
			section: Section::Header,
			..
		})
	));
}

#[test]
fn test_rename_refuses_to_clobber() {
	let dir = tempfile::tempdir().unwrap();
	let config = CodecConfig::default();
	let path = write_ghost(dir.path(), STAFF_V3, &body(0x21, &mii("Chris", 0), false));
	let mut ghost = Ghost::open(&path, &config).unwrap();

	let mut blocker = ghost.record().clone();
	blocker.track_id = 27;
	blocker.ghost_number = 11;
	let blocker_path = dir.path().join(blocker.to_filename().unwrap());
	std::fs::write(&blocker_path, b"keep me").unwrap();

	assert!(matches!(ghost.change_track(27, None), Err(GhostError::Precondition(_))));
	assert_eq!(std::fs::read(&blocker_path).unwrap(), b"keep me");
	assert_eq!(std::fs::read(&path).unwrap(), body(0x21, &mii("Chris", 0), false));
}
