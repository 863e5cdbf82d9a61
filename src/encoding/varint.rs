//! Little-endian base-128 varints and the ZigZag signed mapping.
//!
//! Seven payload bits per byte, high bit set while more bytes follow. A
//! `u64` therefore never needs more than ten bytes, and the reader rejects
//! anything longer as an overflow rather than silently wrapping.

use super::constants::{VARINT_CONT, VARINT_DATA};
use crate::errors::DecodeError;

/// Maps a signed integer onto the unsigned line, small magnitudes first.
pub(crate) fn zigzag(n: i64) -> u64 { ((n as u64) << 1) ^ ((n >> 63) as u64) }

/// Inverse of [`zigzag`].
pub(crate) fn unzigzag(u: u64) -> i64 { ((u >> 1) as i64) ^ -((u & 1) as i64) }

/// Appends `n` to `out` as a varint.
pub(crate) fn write_uvarint(out: &mut Vec<u8>, mut n: u64) {
    loop {
        let byte = (n & u64::from(VARINT_DATA)) as u8;
        n >>= 7;
        if n == 0 {
            out.push(byte);
            break;
        }
        out.push(byte | VARINT_CONT);
    }
}

/// Reads a varint starting at `*pos`, advancing the cursor past it.
///
/// Fails with `Truncated` when the input ends mid-varint and with
/// `VarintOverflow` once the accumulated payload would pass 64 bits.
pub(crate) fn read_uvarint(data: &[u8], pos: &mut usize) -> Result<u64, DecodeError> {
    let mut out: u64 = 0;
    let mut shift: u32 = 0;
    loop {
        let byte = match data.get(*pos) {
            Some(&b) => b,
            None => {
                return Err(DecodeError::Truncated {
                    offset: *pos,
                    needed: 1,
                });
            }
        };
        *pos += 1;

        if shift > 63 {
            return Err(DecodeError::VarintOverflow);
        }
        out |= u64::from(byte & VARINT_DATA) << shift;

        if byte & VARINT_CONT == 0 {
            return Ok(out);
        }
        shift += 7;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn roundtrip(n: u64) -> u64 {
        let mut buf = Vec::new();
        write_uvarint(&mut buf, n);
        let mut pos = 0;
        let out = read_uvarint(&buf, &mut pos).unwrap();
        assert_eq!(pos, buf.len());
        out
    }

    #[test]
    fn known_encodings() {
        let mut buf = Vec::new();
        write_uvarint(&mut buf, 0);
        assert_eq!(buf, [0x00]);

        buf.clear();
        write_uvarint(&mut buf, 127);
        assert_eq!(buf, [0x7f]);

        buf.clear();
        write_uvarint(&mut buf, 128);
        assert_eq!(buf, [0x80, 0x01]);

        buf.clear();
        write_uvarint(&mut buf, 600);
        assert_eq!(buf, [0xd8, 0x04]);
    }

    #[test]
    fn max_is_ten_bytes() {
        let mut buf = Vec::new();
        write_uvarint(&mut buf, u64::max_value());
        assert_eq!(buf.len(), 10);
        assert_eq!(buf[9], 0x01);
        assert_eq!(roundtrip(u64::max_value()), u64::max_value());
    }

    #[test]
    fn eleven_bytes_overflow() {
        let bad = [VARINT_CONT; 10];
        let mut input = bad.to_vec();
        input.push(0x01);
        let mut pos = 0;
        assert_eq!(
            read_uvarint(&input, &mut pos),
            Err(DecodeError::VarintOverflow)
        );
    }

    #[test]
    fn truncated_mid_varint() {
        let mut pos = 0;
        assert_eq!(
            read_uvarint(&[0x80], &mut pos),
            Err(DecodeError::Truncated { offset: 1, needed: 1 })
        );
    }

    #[test]
    fn zigzag_known_points() {
        assert_eq!(zigzag(0), 0);
        assert_eq!(zigzag(-1), 1);
        assert_eq!(zigzag(1), 2);
        assert_eq!(zigzag(-2), 3);
        assert_eq!(zigzag(300), 600);
        assert_eq!(zigzag(i64::min_value()), u64::max_value());
        assert_eq!(zigzag(i64::max_value()), u64::max_value() - 1);
    }

    proptest! {
        #[test]
        fn zigzag_law_signed(n in proptest::num::i64::ANY) {
            prop_assert_eq!(unzigzag(zigzag(n)), n);
        }

        #[test]
        fn zigzag_law_unsigned(u in proptest::num::u64::ANY) {
            prop_assert_eq!(zigzag(unzigzag(u)), u);
        }

        #[test]
        fn varint_roundtrip(n in proptest::num::u64::ANY) {
            prop_assert_eq!(roundtrip(n), n);
        }
    }
}
