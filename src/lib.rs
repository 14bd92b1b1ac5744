//! # huffpack
//!
//! Static Huffman compression over the byte alphabet. Each call counts the
//! symbols of one in-memory buffer, builds an optimal prefix code for it and
//! stores the leaf list alongside the packed codes, so the output is
//! self-describing.
//!
//! ## Quick Start
//!
//! ```rust
//! let input = b"AAAAABBBCC";
//!
//! let compressed = huffpack::compress(input)?;
//! let restored = huffpack::decompress(&compressed)?;
//! assert_eq!(restored, input);
//! # Ok::<(), huffpack::HuffmanError>(())
//! ```
//!
//! Output is not guaranteed to be smaller than the input. Small or
//! near-random buffers can grow; callers should fall back to storing raw
//! bytes when that happens.

pub mod compressed_data;
pub mod error;
pub mod frequency;
pub mod huffman_codec;
pub mod hufftree;

// Internal modules - not part of public API
mod bit_vec;
mod sorted_queue;

pub use error::{CorruptKind, HuffmanError, Result};
pub use huffman_codec::{
    compress, compress_into, decompress, decompress_into, decompressed_len, max_compressed_len,
    HuffmanCodec,
};
pub use hufftree::HuffmanTree;
