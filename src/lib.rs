//! # Sparse Strings
//!
//! *Random access into text without storing every character at full width.*
//!
//! ## Intuition First
//!
//! A page of English prose uses maybe sixty distinct characters, yet a UTF-32
//! string spends 32 bits on each one. Write down the sixty characters once, number
//! them, and six bits per position are enough to say which one sits there.
//!
//! Rather than packing each position's six bits together, a sparse string stores
//! the most significant bit of every position first, then the next bit of every
//! position, and so on. Each of these "planes" is one level of a binary wavelet
//! tree with every node flattened into a single row.
//!
//! ## The Problem
//!
//! - **Fixed width** (UTF-32): $O(1)$ access, $32n$ bits.
//! - **Variable width** (UTF-8): compact for ASCII, but finding position $i$ is $O(n)$.
//! - **General compression**: smallest, but no random access at all.
//!
//! A sparse string keeps $O(\log \sigma)$ access at $n \lceil \log_2 \sigma \rceil$ bits
//! plus the alphabet.
//!
//! ## Mathematical Formulation
//!
//! For a source $S$ of length $n$ over an alphabet $\Sigma$ with $\sigma = |\Sigma|$,
//! let $D : \Sigma \to [0, \sigma)$ be the dictionary and $r = \lceil \log_2 \sigma \rceil$.
//! Bit $k$ of plane $j$ is
//!
//! $$ B[j \cdot n + k] = \left\lfloor D(S_k) / 2^{r - 1 - j} \right\rfloor \bmod 2 $$
//!
//! and access reassembles $D(S_k) = \sum_j B[j \cdot n + k] \, 2^{r - 1 - j}$.
//!
//! ## What Could Go Wrong
//!
//! 1. **Large alphabets**: with thousands of distinct symbols the dictionary itself
//!    (4 bytes per entry) dominates and UTF-16 may be smaller.
//! 2. **Surrogates**: positions are UTF-16 code units, so a character outside the
//!    BMP takes two positions and two dictionary entries.
//! 3. **Fixed-width codes**: frequent symbols cost as many bits as rare ones; the
//!    dictionary order does not change the size.
//!
//! ## Implementation Notes
//!
//! - [`dictionary`]: first-occurrence (or explicit) ordering, symbol→index map.
//! - `encoder`: bit-plane construction.
//! - [`bits`]: LSB-first get/set on packed bytes, scoped plane builder.
//! - [`SparseString`]: immutable result with `char_at`, full decode and size
//!   reporting, plus a stable binary encoding.
//!
//! ```
//! use sparse_string::SparseString;
//!
//! let s = SparseString::from("Hello, world");
//! assert_eq!(s.char_at(0), 'H' as u16);
//! assert_eq!(s.char_at(11), 'd' as u16);
//! assert_eq!(s.char_at(12), 0);
//! assert_eq!(s.to_string(), "Hello, world");
//! ```
//!
//! ## References
//!
//! - Grossi, R., et al. (2003). "High-order entropy-compressed text indexes."
//! - Navarro, G. (2014). "Wavelet trees for all."

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bits;
mod codec;
pub mod dictionary;
mod encoder;
pub mod error;
pub mod sparse_string;

pub use dictionary::DictionaryOrder;
pub use error::{Error, Result};
pub use sparse_string::{encode, encode_with, EncodeOptions, SizeStats, SparseString};
