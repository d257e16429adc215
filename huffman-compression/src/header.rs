//! Container header: the frequency table the decoder rebuilds the tree from.
//!
//! All integers are little-endian.
//!
//! ```text
//! [count: u64]
//! count times:
//!   [symbol: u8][frequency: u64]
//! ```

use std::io::{self, Read, Write};

use bytes::{Buf, BufMut, BytesMut};

use crate::{
    error::{HuffmanError, Result},
    frequency::FrequencyTable,
};

const COUNT_LEN: usize = 8;
const PAIR_LEN: usize = 1 + 8;
const MAX_SYMBOLS: u64 = 256;

/// Writes `table` in ascending symbol order and returns the number of bytes
/// written.
pub fn write_header<W: Write>(writer: &mut W, table: &FrequencyTable) -> io::Result<usize> {
    let mut buffer = BytesMut::with_capacity(COUNT_LEN + table.len() * PAIR_LEN);
    buffer.put_u64_le(table.len() as u64);
    for (symbol, frequency) in table.iter() {
        buffer.put_u8(symbol);
        buffer.put_u64_le(frequency);
    }

    writer.write_all(&buffer)?;
    Ok(buffer.len())
}

pub fn read_header<R: Read>(reader: &mut R) -> Result<FrequencyTable> {
    let mut count = [0; COUNT_LEN];
    reader.read_exact(&mut count).map_err(|err| match err.kind() {
        io::ErrorKind::UnexpectedEof => {
            HuffmanError::malformed_header("stream ended before the symbol count")
        }
        _ => HuffmanError::Io(err),
    })?;
    let count = u64::from_le_bytes(count);
    if count == 0 || count > MAX_SYMBOLS {
        return Err(HuffmanError::malformed_header(format!(
            "declared {count} symbols, expected between 1 and {MAX_SYMBOLS}"
        )));
    }

    let expected_len = count as usize * PAIR_LEN;
    let mut pairs = Vec::with_capacity(expected_len);
    reader
        .take(expected_len as u64)
        .read_to_end(&mut pairs)?;
    if pairs.len() < expected_len {
        return Err(HuffmanError::malformed_header(format!(
            "declared {count} symbols but only {} are present",
            pairs.len() / PAIR_LEN
        )));
    }

    let mut pairs = &pairs[..];
    let mut table = FrequencyTable::default();
    let mut total: u64 = 0;
    while pairs.has_remaining() {
        let symbol = pairs.get_u8();
        let frequency = pairs.get_u64_le();
        if frequency == 0 {
            return Err(HuffmanError::malformed_header(format!(
                "symbol {symbol:#04x} has a frequency of zero"
            )));
        }
        total = total.checked_add(frequency).ok_or_else(|| {
            HuffmanError::malformed_header("total symbol count overflows a u64")
        })?;
        if table.insert(symbol, frequency).is_some() {
            return Err(HuffmanError::malformed_header(format!(
                "symbol {symbol:#04x} appears more than once"
            )));
        }
    }

    Ok(table)
}
