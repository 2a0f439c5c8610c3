//! Benchmark helper utilities for wraith-rs
//!
//! Generates synthetic ghost filenames and bodies so the codecs can be measured without
//! shipping game files.

use wraith_types::file::{
	GameVersion, GhostFilename, GhostType, LapTime, MiiData, NameCodec, checksum::crc32, mii::PAYLOAD_SIZE,
};

/// Size of the synthetic ghost payload (without header)
pub const PAYLOAD_LEN: usize = 0x4000;

/// Builds a three-lap player ghost record for the given version
pub fn sample_record(game_version: GameVersion) -> GhostFilename {
	GhostFilename {
		game_version,
		ghost_type: GhostType::Player,
		ghost_number: 0x11,
		track_id: 0x21,
		character_id: 0x1d,
		character_variant_id: 2,
		mii_weight_class_id: 1,
		kart_id: 0x13,
		wheels_id: 0x0c,
		glider_id: 0x0a,
		total_time: LapTime::new(1, 46, 99),
		laps: [
			Some(LapTime::new(0, 35, 1)),
			Some(LapTime::new(0, 35, 500)),
			Some(LapTime::new(0, 35, 598)),
			None,
			None,
			None,
			None,
		],
		playername: "Nin★Chris".to_string(),
		flag_id: 49,
		motion_control_flag: 0,
	}
}

/// Builds a ghost body on `course`, optionally with a valid `CTG0` header
///
/// The payload is filled with a repeating byte pattern so the checksum has real work to do.
pub fn generate_ghost_body(course: u32, header: bool) -> Vec<u8> {
	let mut payload: Vec<u8> = (0..PAYLOAD_LEN).map(|i| (i * 31 % 251) as u8).collect();
	payload[0x17C..0x180].copy_from_slice(&course.to_be_bytes());
	payload[0x234..0x23C].fill(0);

	let mut mii = [0x5Au8; PAYLOAD_SIZE];
	if let Ok(slot) = NameCodec::mii().encode("Chris") {
		mii[0x1A..0x1A + slot.len()].copy_from_slice(&slot);
	}
	payload[0x244..0x2A4].copy_from_slice(&MiiData::from(mii).record());

	if !header {
		return payload;
	}

	let mut data = b"CTG0".to_vec();
	data.resize(0x48, 0);
	data[0x38..0x3C].copy_from_slice(&crc32(&payload).to_be_bytes());
	data.extend_from_slice(&payload);
	data
}
