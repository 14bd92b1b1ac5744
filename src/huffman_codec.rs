use crate::bit_vec::{BitReader, BitVec};
use crate::compressed_data::{self, CompressedData, LEAF_LEN};
use crate::error::{CorruptKind, HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::hufftree::{CodeTable, HuffmanTree, NodeKind};

/// A tree built for one input together with its code table.
pub struct HuffmanCodec {
    tree: HuffmanTree,
    encode_table: CodeTable,
}

impl HuffmanCodec {
    pub fn new(tree: HuffmanTree) -> Self {
        let encode_table = tree.generate_table();
        HuffmanCodec { tree, encode_table }
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    /// Packs the code of every byte of `data`, in order, into `out`.
    pub fn encode(&self, data: &[u8], out: &mut BitVec) -> Result<()> {
        for &byte in data {
            let code = self
                .encode_table
                .get(byte)
                .ok_or(HuffmanError::UnknownSymbol(byte))?;
            out.extend_from(code);
        }
        Ok(())
    }
}

/// Compresses `input` into a self-describing buffer.
///
/// The result is not guaranteed to be smaller than the input: the leaf list
/// costs five bytes per distinct symbol, so near-random data grows. Callers
/// that care should compare sizes and store the raw bytes instead.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    let frequencies = FrequencyTable::from_bytes(input)?;
    let leaves = frequencies.leaves();
    log::trace!("byte frequencies: {:?}", frequencies);

    let mut out = Vec::with_capacity(compressed_data::header_len(leaves.len()) + input.len() / 2);
    compressed_data::write_header(&mut out, input.len() as u32, &leaves);

    let Some(tree) = HuffmanTree::build(&leaves) else {
        log::debug!("compressed empty input to {} bytes", out.len());
        return Ok(out);
    };
    log::trace!("huffman tree:\n{}", tree);

    let codec = HuffmanCodec::new(tree);
    let mut bits = BitVec::new();
    codec.encode(input, &mut bits)?;
    out.extend_from_slice(bits.as_bytes());

    log::debug!(
        "compressed {} bytes with {} leaves into {} bytes ({} payload bits)",
        input.len(),
        leaves.len(),
        out.len(),
        bits.len()
    );
    Ok(out)
}

/// Compresses `input` into `dest`, returning the number of bytes written.
///
/// A `dest` of [`max_compressed_len`] bytes is always large enough. On
/// error the contents of `dest` are unspecified.
pub fn compress_into(input: &[u8], dest: &mut [u8]) -> Result<usize> {
    let compressed = compress(input)?;
    let available = dest.len();
    let target = dest
        .get_mut(..compressed.len())
        .ok_or(HuffmanError::CapacityExceeded {
            required: compressed.len(),
            available,
        })?;
    target.copy_from_slice(&compressed);
    Ok(compressed.len())
}

/// Upper bound on the compressed size of an input of `input_len` bytes.
///
/// The payload never exceeds the input: a Huffman code is never worse than
/// the fixed eight-bit code.
pub fn max_compressed_len(input_len: usize) -> usize {
    compressed_data::HEADER_LEN + 256 * LEAF_LEN + input_len
}

/// Reconstructs the original bytes from a buffer produced by [`compress`].
pub fn decompress(compressed: &[u8]) -> Result<Vec<u8>> {
    let data = CompressedData::parse(compressed).inspect_err(|e| log::warn!("{e}"))?;
    let mut out = vec![0u8; data.original_length];
    decode_into(&data, &mut out).inspect_err(|e| log::warn!("{e}"))?;

    log::debug!(
        "decompressed {} bytes with {} leaves into {} bytes",
        compressed.len(),
        data.leaf_count(),
        out.len()
    );
    Ok(out)
}

/// Decompresses into `dest`, returning the original length.
///
/// Only the first `original_length` bytes of `dest` are written.
pub fn decompress_into(compressed: &[u8], dest: &mut [u8]) -> Result<usize> {
    let data = CompressedData::parse(compressed).inspect_err(|e| log::warn!("{e}"))?;
    let available = dest.len();
    let target = dest
        .get_mut(..data.original_length)
        .ok_or(HuffmanError::CapacityExceeded {
            required: data.original_length,
            available,
        })?;
    decode_into(&data, target).inspect_err(|e| log::warn!("{e}"))?;
    Ok(data.original_length)
}

/// Length of the original input, read from the header alone.
pub fn decompressed_len(compressed: &[u8]) -> Result<usize> {
    compressed_data::read_original_length(compressed)
}

/// Walks the rebuilt tree one bit at a time, filling all of `out`.
fn decode_into(data: &CompressedData<'_>, out: &mut [u8]) -> Result<()> {
    debug_assert_eq!(out.len(), data.original_length);
    let Some(tree) = HuffmanTree::build(&data.leaves) else {
        return Ok(());
    };

    let root = tree.root();
    let mut reader = BitReader::new(data.payload);
    for (decoded, slot) in out.iter_mut().enumerate() {
        let mut current = root;
        loop {
            match tree.node(current).kind {
                NodeKind::Leaf { symbol } => {
                    *slot = symbol;
                    break;
                }
                NodeKind::Internal { left, right } => {
                    let bit = reader.read_bit().ok_or(CorruptKind::TruncatedPayload {
                        decoded,
                        expected: data.original_length,
                    })?;
                    current = if bit { right } else { left };
                }
            }
        }
    }

    log::trace!("read {} payload bits", reader.bits_read());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_roundtrip() {
        let input = b"AAAAABBBCC";
        let compressed = compress(input).unwrap();

        // 4 + 1 + 3 * 5 header bytes, then 5*1 + 3*2 + 2*2 = 15 bits
        assert_eq!(compressed.len(), 20 + 2);
        assert_eq!(compressed[4], 2);
        assert_eq!(&compressed[5..10], &[5, 0, 0, 0, b'A']);
        assert_eq!(decompress(&compressed).unwrap(), input);
    }

    #[test]
    fn empty_input() {
        let compressed = compress(&[]).unwrap();
        assert_eq!(compressed, vec![0, 0, 0, 0]);
        assert_eq!(decompress(&compressed).unwrap(), Vec::<u8>::new());
        assert_eq!(decompressed_len(&compressed).unwrap(), 0);
    }

    #[test]
    fn single_symbol_has_no_payload() {
        let compressed = compress(&[0x41, 0x41, 0x41]).unwrap();
        assert_eq!(compressed, vec![3, 0, 0, 0, 0, 3, 0, 0, 0, 0x41]);
        assert_eq!(decompress(&compressed).unwrap(), vec![0x41, 0x41, 0x41]);
    }

    #[test]
    fn payload_bits_are_root_first_lsb_first() {
        // C = 00, B = 01, A = 1 (see the tree tests)
        let compressed = compress(b"ABCAABAABC").unwrap();
        // A 1 | B 01 | C 00 | A 1 | A 1 | B 01 | A 1 | A 1 | B 01 | C 00
        let bits = "101001101110100";
        let payload = &compressed[20..];
        let mut reader = BitReader::new(payload);
        let read: String = (0..bits.len())
            .map(|_| if reader.read_bit().unwrap() { '1' } else { '0' })
            .collect();
        assert_eq!(read, bits);
        assert_eq!(payload.len(), 2);
        assert_eq!(payload[1] >> 7, 0);
    }

    #[test]
    fn encode_rejects_symbols_outside_the_tree() {
        let leaves = FrequencyTable::from_bytes(b"ab").unwrap().leaves();
        let codec = HuffmanCodec::new(HuffmanTree::build(&leaves).unwrap());
        let mut bits = BitVec::new();
        assert_eq!(
            codec.encode(b"abc", &mut bits),
            Err(HuffmanError::UnknownSymbol(b'c'))
        );
        assert_eq!(codec.tree().leaf_count(), 2);
    }

    #[test]
    fn codes_wider_than_a_word_survive_packing() {
        use crate::hufftree::Leaf;

        let mut weights = vec![1u32, 1];
        while weights.len() < 40 {
            weights.push(weights[weights.len() - 1] + weights[weights.len() - 2]);
        }
        let leaves: Vec<Leaf> = weights
            .iter()
            .enumerate()
            .rev()
            .map(|(i, &w)| Leaf::new(i as u8, w))
            .collect();

        let codec = HuffmanCodec::new(HuffmanTree::build(&leaves).unwrap());
        let input = [0u8, 39, 1, 0, 20];
        let mut bits = BitVec::new();
        codec.encode(&input, &mut bits).unwrap();
        assert_eq!(bits.len(), 39 + 1 + 39 + 39 + 20);

        let data = CompressedData {
            original_length: input.len(),
            leaves,
            payload: bits.as_bytes(),
        };
        let mut out = [0u8; 5];
        decode_into(&data, &mut out).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn truncated_payload_is_corrupt() {
        let input = b"AAAAABBBCC";
        let compressed = compress(input).unwrap();
        let err = decompress(&compressed[..compressed.len() - 1]).unwrap_err();
        assert!(matches!(
            err,
            HuffmanError::CorruptStream(CorruptKind::TruncatedPayload { expected: 10, .. })
        ));
    }

    #[test]
    fn into_variants_check_capacity() {
        let input = b"mississippi river";
        let mut dest = vec![0u8; max_compressed_len(input.len())];
        let written = compress_into(input, &mut dest).unwrap();
        assert_eq!(&dest[..written], compress(input).unwrap().as_slice());

        let mut small = [0u8; 4];
        assert_eq!(
            compress_into(input, &mut small),
            Err(HuffmanError::CapacityExceeded {
                required: written,
                available: 4
            })
        );

        let mut out = vec![0u8; input.len() + 3];
        let len = decompress_into(&dest[..written], &mut out).unwrap();
        assert_eq!(&out[..len], input);

        let mut short = vec![0u8; input.len() - 1];
        assert_eq!(
            decompress_into(&dest[..written], &mut short),
            Err(HuffmanError::CapacityExceeded {
                required: input.len(),
                available: input.len() - 1
            })
        );
    }

    #[test]
    fn decompressed_len_reads_header_only() {
        let compressed = compress(b"hello world").unwrap();
        assert_eq!(decompressed_len(&compressed[..4]).unwrap(), 11);
        assert!(decompressed_len(&compressed[..3]).is_err());
    }
}
