//! Bounds-checked typed views over raw sample buffers.
//!
//! Raw frames arrive as plain byte buffers; the decoders need to read them
//! as 16-bit or signed 8-bit sample streams. These helpers derive every
//! access from the declared sample count, so a short buffer surfaces as a
//! decode error instead of undefined behavior.

use crate::error::{Error, Result};

/// View a raw buffer as `count` little-endian u16 samples.
pub fn u16_samples(raw: &[u8], count: usize) -> Result<impl Iterator<Item = u16> + '_> {
    let needed = count * 2;
    if raw.len() < needed {
        return Err(Error::Decode(format!(
            "u16 sample buffer too short: {} bytes, need {}",
            raw.len(),
            needed
        )));
    }
    Ok(raw[..needed]
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]])))
}

/// View a raw buffer as `count` signed byte samples.
pub fn i8_samples(raw: &[u8], count: usize) -> Result<impl Iterator<Item = i8> + '_> {
    if raw.len() < count {
        return Err(Error::Decode(format!(
            "i8 sample buffer too short: {} bytes, need {}",
            raw.len(),
            count
        )));
    }
    Ok(raw[..count].iter().map(|&b| b as i8))
}

/// Read a little-endian i32 field at a byte offset.
pub fn read_i32_le(raw: &[u8], offset: usize) -> Result<i32> {
    let end = offset + 4;
    if raw.len() < end {
        return Err(Error::Decode(format!(
            "i32 field at offset {} out of bounds ({} bytes)",
            offset,
            raw.len()
        )));
    }
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&raw[offset..end]);
    Ok(i32::from_le_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u16_samples_little_endian() {
        let raw = [0x01, 0x00, 0xFF, 0xFF, 0x00, 0x10];
        let values: Vec<u16> = u16_samples(&raw, 3).unwrap().collect();
        assert_eq!(values, vec![1, 65535, 4096]);
    }

    #[test]
    fn test_u16_samples_rejects_short_buffer() {
        let raw = [0u8; 5];
        assert!(u16_samples(&raw, 3).is_err());
    }

    #[test]
    fn test_i8_samples_signed() {
        let raw = [0x00, 0x05, 0xFF];
        let values: Vec<i8> = i8_samples(&raw, 3).unwrap().collect();
        assert_eq!(values, vec![0, 5, -1]);
    }

    #[test]
    fn test_read_i32_le() {
        let raw = [0x2A, 0x00, 0x00, 0x00, 0xFF];
        assert_eq!(read_i32_le(&raw, 0).unwrap(), 42);
        assert!(read_i32_le(&raw, 2).is_err());
    }
}
