//! Bit access over packed byte buffers.
//!
//! Offsets are absolute bit positions: byte `offset / 8`, bit `offset % 8`,
//! least-significant bit first. Neither accessor checks the offset against the
//! logical size of the data; an offset past the end of the buffer panics on the
//! slice bounds check.
//!
//! # Layout
//!
//! Coefficient buffers are bit-plane major. For a sequence of `len` positions
//! coded in `rounds` rounds, the bit for `(round, pos)` lives at
//! `round * len + pos`:
//!
//! ```text
//! round 0: | p0 p1 p2 ... p(len-1) |   most significant index bit
//! round 1: | p0 p1 p2 ... p(len-1) |
//! ...
//! ```

/// Return true if bit `offset` of `buf` is set. O(1).
#[inline]
pub fn get_bit(buf: &[u8], offset: usize) -> bool {
    (buf[offset / 8] & (1u8 << (offset % 8))) != 0
}

/// Set or clear bit `offset` of `buf`. O(1).
#[inline]
pub fn set_bit(buf: &mut [u8], offset: usize, value: bool) {
    let mask = 1u8 << (offset % 8);
    if value {
        buf[offset / 8] |= mask;
    } else {
        buf[offset / 8] &= !mask;
    }
}

/// Number of bytes needed to hold `rounds * len` bits.
#[inline]
pub fn plane_bytes(rounds: usize, len: usize) -> usize {
    (rounds * len).div_ceil(8)
}

/// Exclusive owner of a coefficient buffer while it is being written.
///
/// The buffer only leaves the builder through [`PlaneBuilder::finish`], after
/// which it is immutable.
#[derive(Debug)]
pub struct PlaneBuilder {
    buf: Vec<u8>,
    rounds: usize,
    len: usize,
}

impl PlaneBuilder {
    /// Allocate a zeroed buffer for `rounds` planes of `len` bits each.
    pub fn new(rounds: usize, len: usize) -> Self {
        Self {
            buf: vec![0u8; plane_bytes(rounds, len)],
            rounds,
            len,
        }
    }

    /// Number of planes.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Number of positions per plane.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return true if the planes have no positions.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Write the bit for `pos` in plane `round`.
    #[inline]
    pub fn set(&mut self, round: usize, pos: usize, value: bool) {
        debug_assert!(round < self.rounds && pos < self.len);
        set_bit(&mut self.buf, round * self.len + pos, value);
    }

    /// Consume the builder and return the finished buffer.
    pub fn finish(self) -> Box<[u8]> {
        self.buf.into_boxed_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_lsb_first() {
        let mut buf = [0u8; 2];
        set_bit(&mut buf, 0, true);
        set_bit(&mut buf, 9, true);
        assert_eq!(buf, [0b0000_0001, 0b0000_0010]);
        assert!(get_bit(&buf, 0));
        assert!(!get_bit(&buf, 1));
        assert!(get_bit(&buf, 9));
    }

    #[test]
    fn test_bits_clear() {
        let mut buf = [0xFFu8];
        set_bit(&mut buf, 3, false);
        assert_eq!(buf, [0b1111_0111]);
        assert!(!get_bit(&buf, 3));
        set_bit(&mut buf, 3, true);
        assert_eq!(buf, [0xFF]);
    }

    #[test]
    #[should_panic]
    fn test_bits_out_of_buffer() {
        let buf = [0u8; 1];
        get_bit(&buf, 8);
    }

    #[test]
    fn test_plane_builder_layout() {
        let mut b = PlaneBuilder::new(2, 5);
        assert_eq!(b.rounds(), 2);
        assert_eq!(b.len(), 5);
        b.set(0, 4, true);
        b.set(1, 0, true);
        let buf = b.finish();
        assert_eq!(buf.len(), 2);
        assert!(get_bit(&buf, 4));
        assert!(get_bit(&buf, 5));
        assert_eq!(buf[0], 0b0011_0000);
        assert_eq!(buf[1], 0);
    }

    #[test]
    fn test_plane_bytes() {
        assert_eq!(plane_bytes(0, 100), 0);
        assert_eq!(plane_bytes(1, 16), 2);
        assert_eq!(plane_bytes(2, 64), 16);
        assert_eq!(plane_bytes(3, 3), 2);
    }
}
