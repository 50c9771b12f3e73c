use std::{collections::BTreeMap, fmt};

use crate::{bitstreams::BitWriter, error::CodecError, frequency::FrequencyTable};

use super::HuffmanNode;

/// The bit string assigned to one symbol, first bit first.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }

    fn extended(&self, bit: bool) -> Code {
        let mut code = self.clone();
        code.push(bit);
        code
    }
}

impl From<Vec<bool>> for Code {
    fn from(bits: Vec<bool>) -> Self {
        Code { bits }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in self.bits.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Maps each symbol of a tree to the path leading to its leaf
/// (`0` = left, `1` = right). Iteration is in ascending symbol order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    /// Derives the table from `root`, failing with [`CodecError::EmptyTree`]
    /// when there is no tree.
    pub fn generate(root: Option<&HuffmanNode>) -> Result<Self, CodecError> {
        root.map(Self::from_root).ok_or(CodecError::EmptyTree)
    }

    /// A root that is itself a leaf gets the one-bit code `0`, so every
    /// occurrence of the symbol still costs one payload bit.
    pub(crate) fn from_root(root: &HuffmanNode) -> Self {
        let mut codes = BTreeMap::new();

        if let HuffmanNode::Leaf { symbol, .. } = root {
            codes.insert(*symbol, Code::from(vec![false]));
            return CodeTable { codes };
        }

        // The stack never holds more than height + 1 entries.
        let mut stack = vec![(root, Code::new())];

        while let Some((node, code)) = stack.pop() {
            match node {
                HuffmanNode::Leaf { symbol, .. } => {
                    codes.insert(*symbol, code);
                }
                HuffmanNode::Internal { left, right, .. } => {
                    stack.push((&**right, code.extended(true)));
                    stack.push((&**left, code.extended(false)));
                }
            }
        }

        CodeTable { codes }
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    /// Checks that no code is a prefix of another. After sorting, any prefix
    /// relation shows up between neighbours.
    pub fn is_prefix_free(&self) -> bool {
        let mut sorted: Vec<&Code> = self.codes.values().collect();
        sorted.sort();

        sorted.windows(2).all(|pair| !pair[0].is_prefix_of(pair[1]))
    }

    /// Total payload bits needed to encode an input with these frequencies.
    pub fn encoded_bits(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .iter()
            .map(|(symbol, count)| count * self.get(symbol).map_or(0, |code| code.len() as u64))
            .sum()
    }

    /// Appends the code of every byte of `data`, in order, to `writer`.
    pub fn encode_into(&self, data: &[u8], writer: &mut BitWriter) -> Result<(), CodecError> {
        for &byte in data {
            let code = self.get(byte).ok_or(CodecError::MissingCode(byte))?;
            writer.push_slice(code.bits());
        }

        Ok(())
    }
}
