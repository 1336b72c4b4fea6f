//! Alphabet extraction.
//!
//! Scans a source once and assigns every distinct symbol an index. Index
//! assignment is always deterministic: the same source and order give the same
//! dictionary on every run and platform.
//!
//! Every index is later written with the same fixed width, `rounds` bits, no
//! matter how often the symbol occurs. Putting frequent symbols first therefore
//! does not shrink the coefficients; [`DictionaryOrder::Frequency`] only affects
//! which indices the common symbols receive.

use std::collections::HashMap;

/// How dictionary entries are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DictionaryOrder {
    /// Order of first appearance in the source.
    #[default]
    FirstOccurrence,
    /// Ascending symbol value.
    Ascending,
    /// Most frequent first; ties keep first-appearance order.
    Frequency,
}

/// Distinct symbols of a source together with their reverse index.
#[derive(Debug, Clone)]
pub struct Dictionary {
    symbols: Vec<u32>,
    index: HashMap<u32, u32>,
}

impl Dictionary {
    /// Build the dictionary of `source`.
    pub fn build(source: &[u16], order: DictionaryOrder) -> Self {
        let mut symbols = Vec::new();
        let mut counts: Vec<usize> = Vec::new();
        let mut index = HashMap::<u32, u32>::new();

        for &unit in source {
            let sym = u32::from(unit);
            let idx = *index.entry(sym).or_insert_with(|| {
                symbols.push(sym);
                counts.push(0);
                (symbols.len() - 1) as u32
            });
            counts[idx as usize] += 1;
        }

        match order {
            DictionaryOrder::FirstOccurrence => {}
            DictionaryOrder::Ascending => symbols.sort_unstable(),
            DictionaryOrder::Frequency => {
                // `symbols` is in first-appearance order, so a stable sort keeps ties in that order.
                let mut ranked: Vec<(u32, usize)> = symbols.iter().copied().zip(counts).collect();
                ranked.sort_by(|a, b| b.1.cmp(&a.1));
                symbols = ranked.into_iter().map(|(sym, _)| sym).collect();
            }
        }

        if order != DictionaryOrder::FirstOccurrence {
            for (i, &sym) in symbols.iter().enumerate() {
                index.insert(sym, i as u32);
            }
        }

        Self { symbols, index }
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Return true if the source was empty.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Index of `symbol`, if present.
    #[inline]
    pub fn index_of(&self, symbol: u32) -> Option<u32> {
        self.index.get(&symbol).copied()
    }

    /// Symbols in index order.
    pub fn symbols(&self) -> &[u32] {
        &self.symbols
    }

    /// Bits needed per index.
    pub fn rounds(&self) -> usize {
        rounds_for(self.symbols.len())
    }

    /// Drop the reverse index and keep the symbols.
    pub fn into_symbols(self) -> Box<[u32]> {
        self.symbols.into_boxed_slice()
    }
}

/// `ceil(log2(d))`, and 0 when `d <= 1`.
#[inline]
pub fn rounds_for(d: usize) -> usize {
    if d <= 1 {
        0
    } else {
        d.next_power_of_two().trailing_zeros() as usize
    }
}
