//! Layout of a compressed buffer.
//!
//! ```text
//! original_length : u32 LE
//! leaf_count - 1  : u8            (absent when original_length == 0)
//! leaves          : leaf_count x (frequency: u32 LE, symbol: u8)
//! payload         : packed codes, see `BitVec` for the bit order
//! ```
//!
//! Leaves are stored in the order that seeded the tree builder's queue, which
//! is what lets the decoder rebuild the exact same tree.

use crate::error::{CorruptKind, Result};
use crate::hufftree::Leaf;

/// Size of the `original_length` field.
pub const LENGTH_FIELD_LEN: usize = 4;
/// Size of the full header: length field plus leaf count byte.
pub const HEADER_LEN: usize = LENGTH_FIELD_LEN + 1;
/// Size of one serialized leaf entry.
pub const LEAF_LEN: usize = 5;

/// A parsed, validated view over a compressed buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedData<'a> {
    pub original_length: usize,
    pub leaves: Vec<Leaf>,
    pub payload: &'a [u8],
}

impl<'a> CompressedData<'a> {
    pub fn parse(bytes: &'a [u8]) -> Result<Self> {
        let original_length = read_original_length(bytes)?;
        if original_length == 0 {
            return Ok(CompressedData {
                original_length,
                leaves: Vec::new(),
                payload: &bytes[LENGTH_FIELD_LEN..],
            });
        }

        let count_byte = *bytes
            .get(LENGTH_FIELD_LEN)
            .ok_or(CorruptKind::TruncatedHeader {
                needed: HEADER_LEN,
                actual: bytes.len(),
            })?;
        let leaf_count = count_byte as usize + 1;

        let tree_end = HEADER_LEN + leaf_count * LEAF_LEN;
        if bytes.len() < tree_end {
            return Err(CorruptKind::TruncatedLeaves {
                leaves: leaf_count,
                needed: tree_end,
                actual: bytes.len(),
            }
            .into());
        }

        let leaves: Vec<Leaf> = bytes[HEADER_LEN..tree_end]
            .chunks_exact(LEAF_LEN)
            .map(|entry| Leaf {
                frequency: u32::from_le_bytes([entry[0], entry[1], entry[2], entry[3]]),
                symbol: entry[4],
            })
            .collect();
        validate_leaves(original_length, &leaves)?;

        Ok(CompressedData {
            original_length,
            leaves,
            payload: &bytes[tree_end..],
        })
    }

    /// Number of distinct symbols the buffer was built from.
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }
}

/// Reads just the `original_length` field.
pub fn read_original_length(bytes: &[u8]) -> Result<usize> {
    let field: [u8; LENGTH_FIELD_LEN] = bytes
        .get(..LENGTH_FIELD_LEN)
        .and_then(|field| field.try_into().ok())
        .ok_or(CorruptKind::TruncatedHeader {
            needed: LENGTH_FIELD_LEN,
            actual: bytes.len(),
        })?;
    Ok(u32::from_le_bytes(field) as usize)
}

/// Appends the header and leaf list.
///
/// `leaves` must be empty exactly when `original_length` is zero.
pub fn write_header(out: &mut Vec<u8>, original_length: u32, leaves: &[Leaf]) {
    debug_assert_eq!(original_length == 0, leaves.is_empty());
    debug_assert!(leaves.len() <= 256);

    out.extend_from_slice(&original_length.to_le_bytes());
    if leaves.is_empty() {
        return;
    }

    // stored minus one so that 256 leaves fit
    out.push((leaves.len() - 1) as u8);
    for leaf in leaves {
        out.extend_from_slice(&leaf.frequency.to_le_bytes());
        out.push(leaf.symbol);
    }
}

/// Size of the header plus leaf list for `leaf_count` leaves.
pub fn header_len(leaf_count: usize) -> usize {
    if leaf_count == 0 {
        LENGTH_FIELD_LEN
    } else {
        HEADER_LEN + leaf_count * LEAF_LEN
    }
}

fn validate_leaves(original_length: usize, leaves: &[Leaf]) -> Result<()> {
    let mut seen = [false; 256];
    let mut sum = 0u64;
    for (index, leaf) in leaves.iter().enumerate() {
        if leaf.frequency == 0 {
            return Err(CorruptKind::ZeroFrequency { index }.into());
        }
        if index > 0 && leaves[index - 1].frequency < leaf.frequency {
            return Err(CorruptKind::UnorderedLeaves { index }.into());
        }
        if std::mem::replace(&mut seen[leaf.symbol as usize], true) {
            return Err(CorruptKind::DuplicateSymbol(leaf.symbol).into());
        }
        sum += u64::from(leaf.frequency);
    }

    if sum != original_length as u64 {
        return Err(CorruptKind::FrequencyMismatch {
            declared: original_length as u64,
            sum,
        }
        .into());
    }
    Ok(())
}
