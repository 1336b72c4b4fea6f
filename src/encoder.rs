//! Bit-plane encoder.
//!
//! Writes each position's dictionary index one bit per round, most significant
//! round first. Round `r` covers a span of `init_span >> r` indices; an index `x`
//! gets a 1 in that round when it falls in the upper half of its span:
//!
//! ```text
//! source "ADACBBAD", dictionary [A, B, C, D] -> indices 0 3 0 2 1 1 0 3
//!
//! span 4 (round 0): x % 4 >= 2    0 1 0 1 0 0 0 1
//! span 2 (round 1): x % 2 >= 1    0 1 0 0 1 1 0 1
//! ```
//!
//! This is the plain binary expansion of each index, stored so that all
//! positions' bit `k` are contiguous before any bit `k + 1`.

use crate::bits::PlaneBuilder;
use crate::dictionary::Dictionary;

/// Encode `source` against `dict` into bit-plane coefficients.
///
/// Every code unit of `source` must be present in `dict`.
pub(crate) fn encode_planes(source: &[u16], dict: &Dictionary) -> Box<[u8]> {
    let len = source.len();
    let rounds = dict.rounds();
    let mut planes = PlaneBuilder::new(rounds, len);
    if rounds == 0 {
        return planes.finish();
    }

    let indices: Vec<usize> = source
        .iter()
        .map(|&unit| dict.index_of(u32::from(unit)).map_or(0, |idx| idx as usize))
        .collect();

    let init_span = dict.len().next_power_of_two();
    let mut span = init_span;
    let mut round = 0;
    while span > 1 {
        let half_span = span.div_ceil(2);
        for (pos, &x) in indices.iter().enumerate() {
            if x % span >= half_span {
                planes.set(round, pos, true);
            }
        }
        log::trace!("encoded round {round} (span {span})");
        span /= 2;
        round += 1;
    }
    debug_assert_eq!(round, rounds);

    planes.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::get_bit;
    use crate::dictionary::DictionaryOrder;

    fn plane_bits(buf: &[u8], round: usize, len: usize) -> Vec<u8> {
        (0..len)
            .map(|i| get_bit(buf, round * len + i) as u8)
            .collect()
    }

    #[test]
    fn test_encode_adacbbad() {
        let src: Vec<u16> = "ADACBBAD".encode_utf16().collect();
        let dict = Dictionary::build(&src, DictionaryOrder::Ascending);
        let planes = encode_planes(&src, &dict);
        assert_eq!(planes.len(), 2);
        assert_eq!(plane_bits(&planes, 0, 8), vec![0, 1, 0, 1, 0, 0, 0, 1]);
        assert_eq!(plane_bits(&planes, 1, 8), vec![0, 1, 0, 0, 1, 1, 0, 1]);
    }

    #[test]
    fn test_encode_non_power_of_two_alphabet() {
        // Three symbols still take two rounds; index 2 is binary 10.
        let src: Vec<u16> = "ABC".encode_utf16().collect();
        let dict = Dictionary::build(&src, DictionaryOrder::FirstOccurrence);
        let planes = encode_planes(&src, &dict);
        assert_eq!(plane_bits(&planes, 0, 3), vec![0, 0, 1]);
        assert_eq!(plane_bits(&planes, 1, 3), vec![0, 1, 0]);
    }

    #[test]
    fn test_encode_single_symbol_has_no_planes() {
        let src: Vec<u16> = "zzzz".encode_utf16().collect();
        let dict = Dictionary::build(&src, DictionaryOrder::default());
        assert!(encode_planes(&src, &dict).is_empty());
    }
}
