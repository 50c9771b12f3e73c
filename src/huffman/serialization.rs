//! Tree section format.
//!
//! The tree is written in pre-order as a bit stream packed MSB-first: a `1`
//! bit is an internal node (its left subtree follows, then its right one), a
//! `0` bit is a leaf followed by the 8-bit symbol. The last byte is padded
//! with zero bits. Weights are not stored.

use crate::{
    bitstreams::{BitReader, BitWriter},
    error::CodecError,
};

use super::{HuffmanNode, MAX_TREE_HEIGHT};

pub fn serialize(root: &HuffmanNode) -> Vec<u8> {
    let mut writer = BitWriter::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        match node {
            HuffmanNode::Internal { left, right, .. } => {
                writer.push_bit(true);
                stack.push(right);
                stack.push(left);
            }
            HuffmanNode::Leaf { symbol, .. } => {
                writer.push_bit(false);
                writer.push_bits(*symbol as u64, 8);
            }
        }
    }

    writer.build().0
}

/// Reads one tree from the front of `bytes` and returns it with the number
/// of bytes it occupied. Rebuilt nodes have weight 0.
pub fn deserialize(bytes: &[u8]) -> Result<(HuffmanNode, usize), CodecError> {
    let mut reader = BitReader::new(bytes);
    let mut seen = [false; 256];

    // One entry per open internal node; it holds the left child once that
    // subtree is complete.
    let mut pending: Vec<Option<HuffmanNode>> = Vec::new();

    loop {
        let is_internal = reader
            .read_bit()
            .ok_or(CodecError::CorruptTree("tree section ended early"))?;

        if is_internal {
            if pending.len() >= MAX_TREE_HEIGHT {
                return Err(CodecError::CorruptTree("tree is deeper than the byte alphabet allows"));
            }
            pending.push(None);
            continue;
        }

        let symbol = reader
            .read_int(8)
            .ok_or(CodecError::CorruptTree("leaf symbol is truncated"))? as u8;

        if std::mem::replace(&mut seen[symbol as usize], true) {
            return Err(CodecError::CorruptTree("symbol appears in more than one leaf"));
        }

        let mut node = HuffmanNode::leaf(symbol, 0);

        loop {
            match pending.pop() {
                None => {
                    if !reader.padding_is_zero() {
                        return Err(CodecError::CorruptTree("non-zero padding after the tree"));
                    }
                    return Ok((node, reader.bytes_consumed()));
                }
                Some(None) => {
                    pending.push(Some(node));
                    break;
                }
                Some(Some(left)) => node = HuffmanNode::merge(left, node),
            }
        }
    }
}
