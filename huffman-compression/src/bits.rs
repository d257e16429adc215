use std::io::{self, Bytes, Read, Write};

use crate::{
    error::{HuffmanError, Result},
    tree::{Node, Tree},
};

/// Packs bits most-significant first into bytes.
pub struct BitWriter<W: Write> {
    writer: W,
    buffer: u8,
    bit_count: u8,
    bytes_written: u64,
}

impl<W: Write> BitWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: 0,
            bit_count: 0,
            bytes_written: 0,
        }
    }

    /// `bit` is `0` or `1`; anything non-zero counts as `1`.
    pub fn write_bit(&mut self, bit: u8) -> io::Result<()> {
        self.buffer = (self.buffer << 1) | u8::from(bit != 0);
        self.bit_count += 1;
        if self.bit_count == 8 {
            self.emit()?;
        }
        Ok(())
    }

    pub fn write_code(&mut self, code: &[u8]) -> io::Result<()> {
        for &bit in code {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    /// Pads a partially filled byte with trailing zeros, writes it out and
    /// hands the writer back.
    pub fn finish(mut self) -> io::Result<(W, u64)> {
        if self.bit_count > 0 {
            self.buffer <<= 8 - self.bit_count;
            self.emit()?;
        }
        Ok((self.writer, self.bytes_written))
    }

    fn emit(&mut self) -> io::Result<()> {
        self.writer.write_all(&[self.buffer])?;
        self.buffer = 0;
        self.bit_count = 0;
        self.bytes_written += 1;
        Ok(())
    }
}

/// Reads bits most-significant first out of a byte stream.
pub struct BitReader<R: Read> {
    bytes: Bytes<R>,
    current: u8,
    remaining: u8,
}

impl<R: Read> BitReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            bytes: reader.bytes(),
            current: 0,
            remaining: 0,
        }
    }

    /// Returns `None` once the underlying stream is exhausted.
    pub fn read_bit(&mut self) -> io::Result<Option<u8>> {
        if self.remaining == 0 {
            match self.bytes.next().transpose()? {
                Some(byte) => {
                    self.current = byte;
                    self.remaining = 8;
                }
                None => return Ok(None),
            }
        }
        self.remaining -= 1;
        Ok(Some((self.current >> self.remaining) & 1))
    }
}

/// Walks `tree` bit by bit, writing one symbol each time a leaf is reached,
/// and stops as soon as `expected` symbols have been written. Bits left over
/// after that are padding.
pub fn decode_symbols<R: Read, W: Write>(
    tree: &Tree,
    expected: u64,
    bits: &mut BitReader<R>,
    writer: &mut W,
) -> Result<()> {
    let mut decoded = 0;
    let mut current = tree.root();

    while decoded < expected {
        let corrupt = || HuffmanError::CorruptStream { expected, decoded };

        let bit = bits.read_bit()?.ok_or_else(corrupt)?;
        let next = match tree.node(current) {
            Node::Internal { left, right, .. } => {
                if bit == 0 {
                    Some(*left)
                } else {
                    *right
                }
            }
            // the root of a built tree is never a leaf
            Node::Leaf { .. } => None,
        };
        current = next.ok_or_else(corrupt)?;

        if let Node::Leaf { symbol, .. } = tree.node(current) {
            writer.write_all(&[*symbol])?;
            decoded += 1;
            current = tree.root();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rstest::rstest;

    use super::{decode_symbols, BitReader, BitWriter};
    use crate::{error::HuffmanError, frequency::FrequencyTable, tree::Tree};

    #[rstest]
    #[case(&[1, 0, 1], vec![0b1010_0000])]
    #[case(&[1, 1, 1, 1, 0, 0, 0, 0], vec![0b1111_0000])]
    #[case(&[0, 0, 0, 0, 0, 0, 0, 1, 1], vec![0b0000_0001, 0b1000_0000])]
    #[case(&[], vec![])]
    fn test_packing_pads_with_zeros(#[case] bits: &[u8], #[case] expected: Vec<u8>) {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_code(bits).unwrap();
        let (packed, written) = writer.finish().unwrap();

        assert_eq!(packed, expected);
        assert_eq!(written, expected.len() as u64);
    }

    #[test]
    fn test_reading_is_msb_first() {
        let mut reader = BitReader::new(Cursor::new(vec![0b1000_0001, 0b0100_0000]));

        let mut bits = vec![];
        while let Some(bit) = reader.read_bit().unwrap() {
            bits.push(bit);
        }

        assert_eq!(bits, vec![1, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_decoding_ignores_padding() {
        // a=0 c=10 b=11 for this table
        let tree = Tree::new(&FrequencyTable::from(&b"aaabbc"[..])).unwrap();
        let packed = vec![0b0001_1111, 0b0000_0000];

        let mut output = vec![];
        decode_symbols(&tree, 6, &mut BitReader::new(Cursor::new(packed)), &mut output).unwrap();

        assert_eq!(output, b"aaabbc");
    }

    #[test]
    fn test_decoding_fails_when_bits_run_out() {
        let tree = Tree::new(&FrequencyTable::from(&b"aaabbc"[..])).unwrap();
        let packed = vec![0b0001_1111];

        let mut output = vec![];
        let err = decode_symbols(&tree, 6, &mut BitReader::new(Cursor::new(packed)), &mut output)
            .unwrap_err();

        assert!(matches!(
            err,
            HuffmanError::CorruptStream {
                expected: 6,
                decoded: 5
            }
        ));
    }

    #[test]
    fn test_decoding_rejects_missing_right_branch() {
        let tree = Tree::new(&FrequencyTable::from_iter([(b'x', 3)])).unwrap();
        let packed = vec![0b0010_0000];

        let mut output = vec![];
        let err = decode_symbols(&tree, 3, &mut BitReader::new(Cursor::new(packed)), &mut output)
            .unwrap_err();

        assert!(matches!(err, HuffmanError::CorruptStream { decoded: 2, .. }));
        assert_eq!(output, b"xx");
    }
}
