use std::fmt;

use crate::bit_vec::BitVec;
use crate::sorted_queue::SortedQueue;

/// Index of a node inside its tree's arena.
pub type NodeId = usize;

/// One symbol and its count, as stored in the compressed leaf list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leaf {
    pub frequency: u32,
    pub symbol: u8,
}

impl Leaf {
    pub fn new(symbol: u8, frequency: u32) -> Self {
        Leaf { frequency, symbol }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Leaf { symbol: u8 },
    Internal { left: NodeId, right: NodeId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    pub frequency: u64,
    /// Back-reference for code assignment; never used for ownership.
    pub parent: Option<NodeId>,
    pub kind: NodeKind,
}

/// A full binary Huffman tree held in an arena.
///
/// The first `leaf_count` slots hold the leaves in the order they seeded the
/// queue; merged parents follow in creation order, so the root is always the
/// last node.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    leaf_count: usize,
}

impl HuffmanTree {
    /// Builds the tree by repeatedly merging the two cheapest nodes.
    ///
    /// `leaves` must be in non-increasing frequency order; equal frequencies
    /// are resolved by their position in the slice, so the encoder and the
    /// decoder get the same tree from the same list. Returns `None` for an
    /// empty list.
    pub fn build(leaves: &[Leaf]) -> Option<Self> {
        if leaves.is_empty() {
            return None;
        }

        let mut nodes = Vec::with_capacity(2 * leaves.len() - 1);
        let mut queue = SortedQueue::with_capacity(leaves.len());
        for leaf in leaves {
            let id = nodes.len();
            nodes.push(Node {
                frequency: u64::from(leaf.frequency),
                parent: None,
                kind: NodeKind::Leaf {
                    symbol: leaf.symbol,
                },
            });
            queue.push_back(u64::from(leaf.frequency), id);
        }

        while queue.len() > 1 {
            let (left_freq, left) = queue.pop_min()?;
            let (right_freq, right) = queue.pop_min()?;

            let parent = nodes.len();
            let frequency = left_freq + right_freq;
            nodes.push(Node {
                frequency,
                parent: None,
                kind: NodeKind::Internal { left, right },
            });
            nodes[left].parent = Some(parent);
            nodes[right].parent = Some(parent);

            queue.insert(frequency, parent);
        }

        Some(HuffmanTree {
            nodes,
            leaf_count: leaves.len(),
        })
    }

    pub fn root(&self) -> NodeId {
        self.nodes.len() - 1
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Code of the leaf at `id`: one bit per level, root first, `0` for a
    /// left child and `1` for a right child.
    pub fn code_of(&self, id: NodeId) -> BitVec {
        let mut path = Vec::new();
        let mut current = id;
        while let Some(parent) = self.nodes[current].parent {
            let is_right = matches!(
                self.nodes[parent].kind,
                NodeKind::Internal { right, .. } if right == current
            );
            path.push(is_right);
            current = parent;
        }
        path.into_iter().rev().collect()
    }

    /// Assigns codes to every leaf.
    pub fn generate_table(&self) -> CodeTable {
        let mut table = CodeTable::default();
        for id in 0..self.leaf_count {
            if let NodeKind::Leaf { symbol } = self.nodes[id].kind {
                table.codes[symbol as usize] = Some(self.code_of(id));
            }
        }
        table
    }
}

impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![(self.root(), 0usize, "root")];
        while let Some((id, depth, label)) = stack.pop() {
            let node = &self.nodes[id];
            let indent = "  ".repeat(depth);
            match node.kind {
                NodeKind::Leaf { symbol } => writeln!(
                    f,
                    "{indent}{label}-> Leaf {symbol:#04x} [weight: {}]",
                    node.frequency
                )?,
                NodeKind::Internal { left, right } => {
                    writeln!(f, "{indent}{label}-> Internal [weight: {}]", node.frequency)?;
                    stack.push((right, depth + 1, "R"));
                    stack.push((left, depth + 1, "L"));
                }
            }
        }
        Ok(())
    }
}

/// Per-symbol codes produced by [`HuffmanTree::generate_table`].
///
/// Codes are variable-length bit sequences; a degenerate tree over 256
/// symbols produces codes up to 255 bits long.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: Vec<Option<BitVec>>,
}

impl CodeTable {
    pub fn get(&self, symbol: u8) -> Option<&BitVec> {
        self.codes[symbol as usize].as_ref()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitVec)> {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_ref().map(|code| (symbol as u8, code)))
    }
}

impl Default for CodeTable {
    fn default() -> Self {
        CodeTable {
            codes: vec![None; 256],
        }
    }
}
