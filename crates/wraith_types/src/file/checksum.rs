//! Checksums used by ghost files.
//!
//! - CRC-16/XMODEM protects the embedded Mii sub-record.
//! - CRC-32 (ISO-HDLC, the zlib polynomial) protects everything after the `CTG0` header.

/// CRC-16/XMODEM generator polynomial
const CRC16_POLY: u16 = 0x1021;

/// Lookup table for CRC-16/XMODEM, one entry per leading byte.
const CRC16_TABLE: [u16; 0x100] = build_crc16_table();

const fn build_crc16_table() -> [u16; 0x100] {
	let mut table = [0u16; 0x100];
	let mut i = 0;
	while i < 0x100 {
		let mut crc = (i as u16) << 8;
		let mut bit = 0;
		while bit < 8 {
			crc = if crc & 0x8000 != 0 {
				(crc << 1) ^ CRC16_POLY
			} else {
				crc << 1
			};
			bit += 1;
		}
		table[i] = crc;
		i += 1;
	}
	table
}

/// Computes the CRC-16/XMODEM checksum (initial value 0) of `data`.
pub fn crc16_xmodem(data: &[u8]) -> u16 {
	data.iter().fold(0u16, |crc, &byte| {
		let index = ((crc >> 8) as u8 ^ byte) as usize;
		(crc << 8) ^ CRC16_TABLE[index]
	})
}

/// Computes the CRC-32 checksum of `data`.
#[inline]
pub fn crc32(data: &[u8]) -> u32 {
	crc32fast::hash(data)
}
