//! Read-only strings with random access over bit-plane coefficients.
//!
//! A [`SparseString`] stores three things: the number of positions, the
//! dictionary of distinct code units, and `rounds * len` coefficient bits where
//! `rounds = ceil(log2(dictionary_size))`. Looking up a position reads one bit
//! from each plane and maps the assembled index back through the dictionary.
//!
//! # Code units
//!
//! Positions are UTF-16 code units, not characters. A character outside the
//! Basic Multilingual Plane is a surrogate pair: it occupies two positions and
//! its halves are two separate dictionary symbols.
//!
//! # Space
//!
//! | Component    | Bytes                          |
//! |--------------|--------------------------------|
//! | coefficients | `ceil(rounds * len / 8)`       |
//! | dictionary   | `4 * dictionary_size`          |
//! | bookkeeping  | `4 + 2`                        |
//!
//! Compared to 4 bytes per position for UTF-32, this wins whenever the
//! alphabet is small relative to the length.

use std::fmt;
use std::str::FromStr;

use crate::bits::get_bit;
use crate::dictionary::{Dictionary, DictionaryOrder};
use crate::encoder::encode_planes;
use crate::error::{Error, Result};

/// Options for building a [`SparseString`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Order in which dictionary indices are assigned.
    pub dictionary_order: DictionaryOrder,
}

impl EncodeOptions {
    /// Set the dictionary order.
    pub fn with_dictionary_order(mut self, order: DictionaryOrder) -> Self {
        self.dictionary_order = order;
        self
    }
}

/// Encode `source`, failing if it is absent.
///
/// This is the checked entry point for callers whose source may be missing;
/// nothing is allocated when it is.
pub fn encode(source: Option<&[u16]>) -> Result<SparseString> {
    encode_with(source, EncodeOptions::default())
}

/// Encode `source` with explicit options, failing if it is absent.
pub fn encode_with(source: Option<&[u16]>, options: EncodeOptions) -> Result<SparseString> {
    let source =
        source.ok_or_else(|| Error::InvalidArgument("source sequence is absent".to_string()))?;
    Ok(SparseString::with_options(source, options))
}

/// An immutable, bit-plane coded sequence of UTF-16 code units.
#[derive(Clone, PartialEq, Eq)]
pub struct SparseString {
    len: usize,
    dictionary: Box<[u32]>,
    coefficients: Box<[u8]>,
}

impl fmt::Debug for SparseString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SparseString")
            .field("len", &self.len)
            .field("dictionary_size", &self.dictionary.len())
            .field("rounds", &self.rounds())
            .field("coefficient_bytes", &self.coefficients.len())
            .finish()
    }
}

impl SparseString {
    /// Encode a sequence of UTF-16 code units.
    pub fn from_utf16(source: &[u16]) -> Self {
        Self::with_options(source, EncodeOptions::default())
    }

    /// Encode a sequence of UTF-16 code units with explicit options.
    pub fn with_options(source: &[u16], options: EncodeOptions) -> Self {
        let dict = Dictionary::build(source, options.dictionary_order);
        let coefficients = encode_planes(source, &dict);
        let s = Self {
            len: source.len(),
            dictionary: dict.into_symbols(),
            coefficients,
        };
        log::debug!(
            "encoded {} code units: {} symbols, {} rounds, {} bytes",
            s.len,
            s.dictionary.len(),
            s.rounds(),
            s.byte_size()
        );
        s
    }

    /// Assemble a sparse string from parts already known to be consistent.
    pub(crate) fn from_raw_parts(
        len: usize,
        dictionary: Box<[u32]>,
        coefficients: Box<[u8]>,
    ) -> Self {
        Self {
            len,
            dictionary,
            coefficients,
        }
    }

    /// Number of code unit positions.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return true if there are no positions.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct code units.
    pub fn dictionary_size(&self) -> usize {
        self.dictionary.len()
    }

    /// Bits stored per position.
    pub fn rounds(&self) -> usize {
        crate::dictionary::rounds_for(self.dictionary.len())
    }

    /// Distinct code units in index order.
    pub fn dictionary(&self) -> &[u32] {
        &self.dictionary
    }

    /// Bit-plane coefficients, plane 0 first.
    pub fn coefficients(&self) -> &[u8] {
        &self.coefficients
    }

    /// Return the dictionary index stored at `pos`. Requires `pos < len`.
    #[inline]
    pub(crate) fn index_at(&self, pos: usize) -> usize {
        let mut idx = 0usize;
        for round in 0..self.rounds() {
            idx <<= 1;
            if get_bit(&self.coefficients, round * self.len + pos) {
                idx |= 1;
            }
        }
        idx
    }

    /// Return the code unit at `pos`, or `0` if `pos` is out of range.
    ///
    /// Out-of-range access is absorbed rather than reported; use
    /// [`SparseString::get`] to tell the two apart.
    #[inline]
    pub fn char_at(&self, pos: usize) -> u16 {
        self.get(pos).unwrap_or(0)
    }

    /// Return the code unit at `pos`, or `None` if `pos` is out of range.
    pub fn get(&self, pos: usize) -> Option<u16> {
        if pos >= self.len {
            return None;
        }
        // Dictionary symbols are built from u16 code units.
        Some(self.dictionary[self.index_at(pos)] as u16)
    }

    /// Iterate over all code units in order.
    pub fn iter(&self) -> Iter<'_> {
        Iter { s: self, pos: 0 }
    }

    /// Decode every position.
    pub fn to_utf16(&self) -> Vec<u16> {
        self.iter().collect()
    }

    /// Decode into a `String`, failing on unpaired surrogates.
    ///
    /// `to_string()` (via `Display`) substitutes U+FFFD instead.
    pub fn to_string_checked(&self) -> Result<String> {
        let mut out = String::with_capacity(self.len);
        let mut pos = 0;
        for c in char::decode_utf16(self.iter()) {
            match c {
                Ok(c) => {
                    pos += c.len_utf16();
                    out.push(c);
                }
                Err(_) => return Err(Error::InvalidUtf16(pos)),
            }
        }
        Ok(out)
    }

    /// Estimated memory footprint in bytes.
    ///
    /// Counts coefficients, 4 bytes per dictionary entry, and 4 + 2 bytes for
    /// the length and dictionary size. The 2-byte dictionary size field assumes
    /// fewer than 65536 distinct symbols.
    pub fn byte_size(&self) -> usize {
        self.coefficients.len() + self.dictionary.len() * 4 + 4 + 2
    }

    /// Size figures for this string.
    pub fn stats(&self) -> SizeStats {
        SizeStats {
            len: self.len,
            dictionary_size: self.dictionary.len(),
            rounds: self.rounds(),
            coefficient_bytes: self.coefficients.len(),
            byte_size: self.byte_size(),
            utf32_bytes: self.len * 4,
        }
    }
}

impl fmt::Display for SparseString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        for c in char::decode_utf16(self.iter()) {
            f.write_char(c.unwrap_or(char::REPLACEMENT_CHARACTER))?;
        }
        Ok(())
    }
}

impl From<&str> for SparseString {
    fn from(s: &str) -> Self {
        let units: Vec<u16> = s.encode_utf16().collect();
        Self::from_utf16(&units)
    }
}

impl FromStr for SparseString {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self::from(s))
    }
}

impl<'a> IntoIterator for &'a SparseString {
    type Item = u16;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Iterator over the code units of a [`SparseString`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    s: &'a SparseString,
    pos: usize,
}

impl Iterator for Iter<'_> {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        let unit = self.s.get(self.pos)?;
        self.pos += 1;
        Some(unit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.s.len - self.pos;
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for Iter<'_> {}

/// Size figures of a [`SparseString`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeStats {
    /// Code unit positions.
    pub len: usize,
    /// Distinct code units.
    pub dictionary_size: usize,
    /// Bits per position.
    pub rounds: usize,
    /// Bytes of coefficient storage.
    pub coefficient_bytes: usize,
    /// Estimated total footprint, see [`SparseString::byte_size`].
    pub byte_size: usize,
    /// Footprint of the same positions at 4 bytes each.
    pub utf32_bytes: usize,
}

impl fmt::Display for SizeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} code units, {} unique, {} rounds: {} bytes ({} coefficients) vs {} as UTF-32",
            self.len,
            self.dictionary_size,
            self.rounds,
            self.byte_size,
            self.coefficient_bytes,
            self.utf32_bytes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn test_char_at_hello_world() {
        let s = SparseString::from("Hello, world");
        assert_eq!(s.char_at(0), 'H' as u16);
        assert_eq!(s.char_at(11), 'd' as u16);
        assert_eq!(s.char_at(4), 'o' as u16);
        assert_eq!(s.char_at(7), 'w' as u16);
        assert_eq!(s.char_at(9), 'r' as u16);
    }

    #[test]
    fn test_out_of_range_is_sentinel() {
        let s = SparseString::from("Hello, world");
        assert_eq!(s.char_at(12), 0);
        assert_eq!(s.char_at(usize::MAX), 0);
        assert_eq!(s.get(12), None);
    }

    #[test]
    fn test_absent_source_is_invalid_argument() {
        assert!(matches!(encode(None), Err(Error::InvalidArgument(_))));
        let src = units("abc");
        assert_eq!(encode(Some(src.as_slice())).unwrap().to_string(), "abc");
    }

    #[test]
    fn test_empty_source() {
        let s = SparseString::from_utf16(&[]);
        assert_eq!(s.len(), 0);
        assert!(s.is_empty());
        assert_eq!(s.dictionary_size(), 0);
        assert_eq!(s.rounds(), 0);
        assert!(s.coefficients().is_empty());
        assert_eq!(s.char_at(0), 0);
        assert_eq!(s.to_string(), "");
        assert_eq!(s.byte_size(), 6);
    }

    #[test]
    fn test_single_symbol() {
        let s = SparseString::from("qqqqqqqqqq");
        assert_eq!(s.rounds(), 0);
        assert!(s.coefficients().is_empty());
        assert!((0..10).all(|i| s.char_at(i) == 'q' as u16));
        assert_eq!(s.char_at(10), 0);
    }

    #[test]
    fn test_byte_size() {
        let s = SparseString::from("ABBBABABABABAAAB");
        assert_eq!(s.byte_size(), 2 + 2 * 4 + 4 + 2);
        let stats = s.stats();
        assert_eq!(stats.utf32_bytes, 64);
        assert_eq!(stats.coefficient_bytes, 2);
        assert_eq!(stats.rounds, 1);
    }

    #[test]
    fn test_unpaired_surrogate() {
        let src = vec![b'a' as u16, 0xD800, b'b' as u16];
        let s = SparseString::from_utf16(&src);
        assert_eq!(s.to_utf16(), src);
        assert_eq!(s.to_string(), "a\u{FFFD}b");
        assert!(matches!(s.to_string_checked(), Err(Error::InvalidUtf16(1))));
    }

    #[test]
    fn test_iter_is_exact_size() {
        let s = SparseString::from("abcabc");
        let mut it = s.iter();
        assert_eq!(it.len(), 6);
        it.next();
        assert_eq!(it.len(), 5);
        assert_eq!((&s).into_iter().count(), 6);
    }

    #[test]
    fn test_debug_omits_contents() {
        let s = SparseString::from("secret");
        let dbg = format!("{s:?}");
        assert!(dbg.contains("dictionary_size"));
        assert!(!dbg.contains("secret"));
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SparseString>();
    }
}
