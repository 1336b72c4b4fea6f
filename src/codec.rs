//! Stable binary encoding of a [`SparseString`] (little-endian).
//!
//! Format (versioned):
//! - magic: 8 bytes (`SPSTR001`)
//! - len: u64, number of code unit positions
//! - dict_len: u64, then `dict_len` u32 symbols
//! - coeff_len: u64, then `coeff_len` bytes

use std::collections::HashSet;

use crate::bits::plane_bytes;
use crate::dictionary::rounds_for;
use crate::error::{Error, Result};
use crate::sparse_string::SparseString;

const MAGIC: &[u8; 8] = b"SPSTR001";

fn invalid(msg: impl Into<String>) -> Error {
    Error::InvalidEncoding(msg.into())
}

impl SparseString {
    /// Serialize this string to its stable binary encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        let dict = self.dictionary();
        let coeffs = self.coefficients();
        let mut out = Vec::with_capacity(8 + 8 * 3 + dict.len() * 4 + coeffs.len());
        out.extend_from_slice(MAGIC);

        out.extend_from_slice(&(self.len() as u64).to_le_bytes());

        out.extend_from_slice(&(dict.len() as u64).to_le_bytes());
        for &sym in dict {
            out.extend_from_slice(&sym.to_le_bytes());
        }

        out.extend_from_slice(&(coeffs.len() as u64).to_le_bytes());
        out.extend_from_slice(coeffs);

        out
    }

    /// Deserialize a `SparseString` from `to_bytes()` output.
    ///
    /// Every structural invariant is checked, so a successfully decoded string
    /// never panics on lookup.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut r = Reader { bytes, off: 0 };

        if r.take(8)? != MAGIC {
            return Err(invalid("bad magic for SparseString"));
        }

        let len = r.read_len()?;

        let dict_len = r.read_len()?;
        let dict_bytes = r.take(
            dict_len
                .checked_mul(4)
                .ok_or_else(|| invalid("dictionary length overflows"))?,
        )?;
        let dictionary: Vec<u32> = dict_bytes
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();

        let coeff_len = r.read_len()?;
        let coefficients = r.take(coeff_len)?.to_vec();

        if r.off != bytes.len() {
            return Err(invalid("trailing bytes after SparseString"));
        }

        check_dictionary(len, &dictionary)?;
        let rounds = rounds_for(dictionary.len());
        if rounds.checked_mul(len).is_none() {
            return Err(invalid("coefficient size overflows"));
        }
        let expected = plane_bytes(rounds, len);
        if coefficients.len() != expected {
            return Err(invalid(format!(
                "coefficient buffer is {} bytes, expected {}",
                coefficients.len(),
                expected
            )));
        }

        let s = Self::from_raw_parts(
            len,
            dictionary.into_boxed_slice(),
            coefficients.into_boxed_slice(),
        );

        // Non-power-of-two alphabets leave index codes that map to no symbol.
        let d = s.dictionary_size();
        if !d.is_power_of_two() && rounds > 0 {
            if let Some(pos) = (0..len).find(|&pos| s.index_at(pos) >= d) {
                return Err(invalid(format!("index out of dictionary at position {pos}")));
            }
        }

        Ok(s)
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    off: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self
            .off
            .checked_add(n)
            .filter(|&end| end <= self.bytes.len())
            .ok_or_else(|| invalid("unexpected end of input"))?;
        let slice = &self.bytes[self.off..end];
        self.off = end;
        Ok(slice)
    }

    fn read_len(&mut self) -> Result<usize> {
        let mut word = [0u8; 8];
        word.copy_from_slice(self.take(8)?);
        usize::try_from(u64::from_le_bytes(word)).map_err(|_| invalid("length overflows usize"))
    }
}

fn check_dictionary(len: usize, dictionary: &[u32]) -> Result<()> {
    if len > 0 && dictionary.is_empty() {
        return Err(invalid("non-empty string with empty dictionary"));
    }
    if dictionary.len() > len {
        return Err(invalid("more dictionary symbols than positions"));
    }
    if let Some(&sym) = dictionary.iter().find(|&&sym| sym > u32::from(u16::MAX)) {
        return Err(invalid(format!("symbol {sym:#x} is not a UTF-16 code unit")));
    }
    let mut seen = HashSet::with_capacity(dictionary.len());
    if let Some(&dup) = dictionary.iter().find(|&&sym| !seen.insert(sym)) {
        return Err(invalid(format!("duplicate dictionary symbol {dup:#x}")));
    }
    Ok(())
}
