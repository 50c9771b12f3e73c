pub mod code_table;
pub mod serialization;

use std::{cmp::Reverse, collections::BinaryHeap};

use tracing::debug;

use crate::{error::CodecError, frequency::FrequencyTable};

use self::code_table::CodeTable;

/// Longest root-to-leaf path a tree over the byte alphabet can have.
pub const MAX_TREE_HEIGHT: usize = 255;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    pub fn leaf(symbol: u8, weight: u64) -> Self {
        HuffmanNode::Leaf { symbol, weight }
    }

    /// Joins two subtrees under a new internal node weighing their sum.
    pub fn merge(left: HuffmanNode, right: HuffmanNode) -> Self {
        HuffmanNode::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { weight, .. } => *weight,
            HuffmanNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }

    /// Compares shape and leaf symbols, ignoring weights.
    pub fn same_shape(&self, other: &HuffmanNode) -> bool {
        let mut stack = vec![(self, other)];

        while let Some(pair) = stack.pop() {
            match pair {
                (HuffmanNode::Leaf { symbol: a, .. }, HuffmanNode::Leaf { symbol: b, .. }) => {
                    if a != b {
                        return false;
                    }
                }
                (
                    HuffmanNode::Internal { left: l1, right: r1, .. },
                    HuffmanNode::Internal { left: l2, right: r2, .. },
                ) => {
                    stack.push((&**r1, &**r2));
                    stack.push((&**l1, &**l2));
                }
                _ => return false,
            }
        }

        true
    }
}

/// Priority queue entry. Ties on weight are broken by insertion order so the
/// tree is reproducible for a given frequency table.
#[derive(Debug)]
struct HeapNode {
    weight: u64,
    seq: usize,
    node: HuffmanNode,
}

impl Ord for HeapNode {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.weight, self.seq).cmp(&(other.weight, other.seq))
    }
}

impl PartialOrd for HeapNode {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for HeapNode {}

impl PartialEq for HeapNode {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffmanNode,
}

impl HuffmanTree {
    /// Builds the tree by repeatedly merging the two lightest nodes.
    ///
    /// Leaves are seeded in ascending symbol order and each merged node gets
    /// the next sequence number, so equal weights are extracted in insertion
    /// order. The first extracted node becomes the left child.
    ///
    /// A table with a single symbol produces a tree whose root is that leaf.
    pub fn build(frequencies: &FrequencyTable) -> Result<Self, CodecError> {
        if frequencies.is_empty() {
            return Err(CodecError::EmptyInput);
        }

        let mut freq_tree = BinaryHeap::with_capacity(frequencies.len());
        let mut seq = 0;

        for (symbol, count) in frequencies.iter() {
            freq_tree.push(Reverse(HeapNode { weight: count, seq, node: HuffmanNode::leaf(symbol, count) }));
            seq += 1;
        }

        loop {
            let Reverse(first) = freq_tree.pop().ok_or(CodecError::EmptyInput)?;

            let Some(Reverse(second)) = freq_tree.pop() else {
                let tree = HuffmanTree { root: first.node };
                debug!(symbols = frequencies.len(), height = tree.height(), "built Huffman tree");
                return Ok(tree);
            };

            let merged = HuffmanNode::merge(first.node, second.node);
            freq_tree.push(Reverse(HeapNode { weight: merged.weight(), seq, node: merged }));
            seq += 1;
        }
    }

    pub fn from_root(root: HuffmanNode) -> Self {
        HuffmanTree { root }
    }

    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    pub fn into_root(self) -> HuffmanNode {
        self.root
    }

    /// Weight of the root, i.e. the length of the input the tree was built from.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().len()
    }

    /// Length of the longest root-to-leaf path. A lone leaf has height 0.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(&self.root, 0)];

        while let Some((node, depth)) = stack.pop() {
            match node {
                HuffmanNode::Leaf { .. } => height = height.max(depth),
                HuffmanNode::Internal { left, right, .. } => {
                    stack.push((&**right, depth + 1));
                    stack.push((&**left, depth + 1));
                }
            }
        }

        height
    }

    /// `(symbol, weight)` of every leaf, left to right.
    pub fn leaves(&self) -> Vec<(u8, u64)> {
        let mut leaves = Vec::new();
        let mut stack = vec![&self.root];

        while let Some(node) = stack.pop() {
            match node {
                HuffmanNode::Leaf { symbol, weight } => leaves.push((*symbol, *weight)),
                HuffmanNode::Internal { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }

        leaves
    }

    pub fn code_table(&self) -> CodeTable {
        CodeTable::from_root(&self.root)
    }

    pub fn serialize(&self) -> Vec<u8> {
        serialization::serialize(&self.root)
    }

    /// Rebuilds a tree from its serialized form, returning it with the number
    /// of bytes consumed.
    pub fn deserialize(bytes: &[u8]) -> Result<(Self, usize), CodecError> {
        let (root, consumed) = serialization::deserialize(bytes)?;
        Ok((HuffmanTree { root }, consumed))
    }
}

#[cfg(test)]
mod tests;
