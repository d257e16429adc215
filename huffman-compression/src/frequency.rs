use std::{
    collections::BTreeMap,
    io::{BufRead, Seek, SeekFrom},
};

use crate::error::Result;

/// Occurrence count of every byte value present in an input.
///
/// Symbols that never occur are absent rather than stored with a zero count.
/// Iteration is in ascending symbol order, which is also the order the
/// header persists pairs in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable(BTreeMap<u8, u64>);

impl FrequencyTable {
    /// Rewinds `reader` and counts every byte until the end of the stream.
    pub fn from_reader<R: BufRead + Seek>(reader: &mut R) -> Result<Self> {
        reader.seek(SeekFrom::Start(0))?;

        let mut counts = [0_u64; 256];
        loop {
            let chunk = reader.fill_buf()?;
            if chunk.is_empty() {
                break;
            }
            for &byte in chunk {
                counts[byte as usize] += 1;
            }
            let consumed = chunk.len();
            reader.consume(consumed);
        }

        let table = counts
            .into_iter()
            .enumerate()
            .filter(|(_, count)| *count > 0)
            .map(|(symbol, count)| (symbol as u8, count))
            .collect();

        Ok(Self(table))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, symbol: u8) -> Option<u64> {
        self.0.get(&symbol).copied()
    }

    /// Total number of symbols in the input the table was built from.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.0.iter().map(|(&symbol, &count)| (symbol, count))
    }

    pub(crate) fn insert(&mut self, symbol: u8, count: u64) -> Option<u64> {
        self.0.insert(symbol, count)
    }
}

impl FromIterator<(u8, u64)> for FrequencyTable {
    fn from_iter<T: IntoIterator<Item = (u8, u64)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .filter(|(_, count)| *count > 0)
                .collect(),
        )
    }
}

impl From<&[u8]> for FrequencyTable {
    fn from(data: &[u8]) -> Self {
        let mut table = BTreeMap::new();
        for &byte in data {
            *table.entry(byte).or_insert(0) += 1;
        }
        Self(table)
    }
}
