use std::path::{Path, PathBuf};

use wraith_rs::prelude::file::{checksum::crc32, mii::PAYLOAD_SIZE};
use wraith_rs::prelude::*;

/// Staff ghost for Wii Moo Moo Meadows (track 0x21), driven by "Nin★Chris"
pub(crate) const STAFF_V3: &str = "sg1121030000130c0012e0630230fd0231950231b993b3e793b3e7004e0069006e26050043006800720069007300006e000000";

/// Same ghost, saved as player ghost
pub(crate) fn player_stem() -> String {
	format!("gs{}", &STAFF_V3[2..])
}

/// A Mii payload with the given nickname
pub(crate) fn mii(name: &str, fill: u8) -> MiiData {
	let mut data = [fill; PAYLOAD_SIZE];
	let slot = NameCodec::mii().encode(name).unwrap();
	data[0x1A..0x1A + slot.len()].copy_from_slice(&slot);
	MiiData::from(data)
}

/// A ghost body recorded on `course`, optionally prefixed with a valid `CTG0` header
pub(crate) fn body(course: u32, driver: &MiiData, header: bool) -> Vec<u8> {
	let mut payload = vec![0u8; 0x400];
	payload[0x17C..0x180].copy_from_slice(&course.to_be_bytes());
	payload[0x244..0x2A4].copy_from_slice(&driver.record());
	if !header {
		return payload;
	}

	let mut data = b"CTG0".to_vec();
	data.resize(0x48, 0);
	data[0x38..0x3C].copy_from_slice(&crc32(&payload).to_be_bytes());
	data.extend_from_slice(&payload);
	data
}

/// Writes `<stem>.dat` into `dir`
pub(crate) fn write_ghost(dir: &Path, stem: &str, data: &[u8]) -> PathBuf {
	let path = dir.join(format!("{stem}.dat"));
	std::fs::write(&path, data).unwrap();
	path
}
