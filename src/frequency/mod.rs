use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Occurrence count of every distinct byte of an input buffer.
///
/// Symbols with a zero count are never stored, so `len()` is the number of
/// distinct symbols and `total()` is the input length.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyTable {
    counts: BTreeMap<u8, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans `bytes` once and counts every symbol.
    pub fn count(bytes: &[u8]) -> Self {
        let mut histogram = [0u64; 256];

        for &byte in bytes {
            histogram[byte as usize] += 1;
        }

        histogram
            .iter()
            .enumerate()
            .map(|(symbol, &count)| (symbol as u8, count))
            .collect()
    }

    /// Adds the counts of `other` to this table.
    pub fn merge(&mut self, other: &FrequencyTable) {
        for (&symbol, &count) in other.counts.iter() {
            *self.counts.entry(symbol).or_insert(0) += count;
        }
    }

    pub fn get(&self, symbol: u8) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }
}

impl FromIterator<(u8, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();

        for (symbol, count) in iter {
            if count == 0 {
                continue;
            }
            *counts.entry(symbol).or_insert(0) += count;
        }

        FrequencyTable { counts }
    }
}

#[cfg(test)]
mod tests;
