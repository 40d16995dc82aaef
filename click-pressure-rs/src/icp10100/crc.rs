//! CRC-8 used on every 16-bit word the ICP-10100 returns
//! (polynomial 0x31, initial value 0xFF, no reflection).

const POLYNOMIAL: u8 = 0x31;
const INIT: u8 = 0xFF;

pub(crate) fn crc8(data: &[u8]) -> u8 {
    let mut crc = INIT;
    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ POLYNOMIAL
            } else {
                crc << 1
            };
        }
    }
    crc
}

/// Check a `[msb, lsb, crc]` triplet and return the word.
pub(crate) fn checked_word(triplet: &[u8]) -> Option<u16> {
    if crc8(&triplet[..2]) == triplet[2] {
        Some(u16::from_be_bytes([triplet[0], triplet[1]]))
    } else {
        None
    }
}
