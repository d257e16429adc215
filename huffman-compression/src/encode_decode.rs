use std::io::{self, BufRead, BufReader, BufWriter, Cursor, Read, Seek, SeekFrom, Write};

use log::{debug, info};

use crate::{
    bits::{decode_symbols, BitReader, BitWriter},
    error::{HuffmanError, Result},
    frequency::FrequencyTable,
    header::{read_header, write_header},
    prefix_code_table::generate_codes,
    tree::Tree,
};

/// Compresses everything `input` holds into `output`.
///
/// The input is read twice, once to count symbols and once to encode them,
/// and is rewound to its start before each pass. An empty input produces an
/// empty output.
pub fn compress<R: Read + Seek, W: Write>(input: R, output: W) -> Result<()> {
    let mut reader = BufReader::new(input);
    let mut writer = BufWriter::new(output);

    info!("Building frequency table...");
    let table = FrequencyTable::from_reader(&mut reader)?;

    info!("Building Huffman tree...");
    let Some(tree) = Tree::new(&table) else {
        info!("Input is empty, writing an empty compressed stream");
        writer.flush()?;
        return Ok(());
    };
    debug!(
        "{} distinct symbols, {} symbols in total",
        table.len(),
        table.total()
    );

    info!("Generating Huffman codes...");
    let codes = generate_codes(&tree);
    for (symbol, code) in codes.iter() {
        debug!("symbol {symbol:#04x}: {} bits", code.len());
    }

    info!("Writing header...");
    let header_len = write_header(&mut writer, &table)?;

    info!("Writing compressed data...");
    reader.seek(SeekFrom::Start(0))?;
    let lookup = codes.to_lookup();
    let mut bits = BitWriter::new(&mut writer);
    loop {
        let chunk = reader.fill_buf()?;
        if chunk.is_empty() {
            break;
        }
        for &byte in chunk {
            let code = lookup[byte as usize].as_ref().ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("byte {byte:#04x} has no code, the input changed between passes"),
                )
            })?;
            bits.write_code(code)?;
        }
        let consumed = chunk.len();
        reader.consume(consumed);
    }
    let (_, packed_len) = bits.finish()?;
    writer.flush()?;

    debug!("wrote {header_len} header bytes and {packed_len} packed bytes");
    info!("Compression successful!");
    Ok(())
}

/// Restores the original bytes from a stream produced by [`compress`].
///
/// An empty input is treated as a compressed empty file and produces an empty
/// output without a header being read.
pub fn decompress<R: Read, W: Write>(input: R, output: W) -> Result<()> {
    let mut reader = BufReader::new(input);
    let mut writer = BufWriter::new(output);

    if reader.fill_buf()?.is_empty() {
        info!("Input is empty, writing an empty decompressed stream");
        writer.flush()?;
        return Ok(());
    }

    info!("Reading header...");
    let table = read_header(&mut reader)?;

    info!("Rebuilding Huffman tree...");
    let tree = Tree::new(&table)
        .ok_or_else(|| HuffmanError::malformed_header("header declares no symbols"))?;
    let expected = table.total();
    debug!(
        "{} distinct symbols, expecting {expected} symbols",
        table.len()
    );

    info!("Decoding data...");
    decode_symbols(&tree, expected, &mut BitReader::new(&mut reader), &mut writer)?;
    writer.flush()?;

    info!("Decompression successful!");
    Ok(())
}

pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut compressed = Vec::new();
    compress(Cursor::new(data), &mut compressed)?;
    Ok(compressed)
}

pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut decompressed = Vec::new();
    decompress(data, &mut decompressed)?;
    Ok(decompressed)
}
