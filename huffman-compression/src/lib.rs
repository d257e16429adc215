//! Lossless byte-stream compression with Huffman prefix codes.
//!
//! A compressed stream is a header holding the frequency table of the input
//! followed by the packed codes of every input byte. The decoder rebuilds the
//! tree from the header, so the tree itself is never stored.
//!
//! ```
//! let compressed = huffman_compression::compress_bytes(b"aaabbc")?;
//! let restored = huffman_compression::decompress_bytes(&compressed)?;
//! assert_eq!(restored, b"aaabbc");
//! # Ok::<(), huffman_compression::HuffmanError>(())
//! ```

pub mod bits;
pub mod encode_decode;
pub mod error;
pub mod frequency;
pub mod header;
pub mod prefix_code_table;
pub mod tree;

pub use bits::{decode_symbols, BitReader, BitWriter};
pub use encode_decode::{compress, compress_bytes, decompress, decompress_bytes};
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use header::{read_header, write_header};
pub use prefix_code_table::{generate_codes, Code, CodeTable};
pub use tree::{Node, NodeId, Tree};
