//! Little-endian accessors on raw byte buffers.
//!
//! Offsets are not checked beyond slice indexing. Callers derive every
//! offset from a [`HeaderLayout`](crate::HeaderLayout) after checking the
//! buffer against its header size.

/// Write `value` at `off`, least-significant byte first.
///
/// # Panics
/// Panics if `off + 4` exceeds the buffer.
#[inline]
pub fn write_u32_le(buf: &mut [u8], off: usize, value: u32) {
    buf[off..off + 4].copy_from_slice(&value.to_le_bytes());
}

/// Read the little-endian `u32` stored at `off`.
///
/// # Panics
/// Panics if `off + 4` exceeds the buffer.
#[inline]
#[must_use]
pub fn read_u32_le(buf: &[u8], off: usize) -> u32 {
    u32::from_le_bytes([buf[off], buf[off + 1], buf[off + 2], buf[off + 3]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_least_significant_byte_first() {
        let mut buf = [0u8; 6];
        write_u32_le(&mut buf, 1, 0x1122_3344);
        assert_eq!(buf, [0, 0x44, 0x33, 0x22, 0x11, 0]);
        assert_eq!(read_u32_le(&buf, 1), 0x1122_3344);
    }

    #[test]
    fn reads_signature_as_magic() {
        assert_eq!(read_u32_le(b"NSIH", 0), crate::SIGNATURE_MAGIC);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn write_past_end_panics() {
        let mut buf = [0u8; 4];
        write_u32_le(&mut buf, 1, 0);
    }
}
