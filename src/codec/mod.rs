use tracing::debug;

use crate::{
    bitstreams::{BitReader, BitWriter},
    container::EncodedContainer,
    error::CodecError,
    frequency::FrequencyTable,
    huffman::{HuffmanNode, HuffmanTree},
    stats::CompressionStats,
};

/// Whole-buffer Huffman encoder/decoder. It holds no state; every call works
/// only on its arguments.
#[derive(Clone, Copy, Debug, Default)]
pub struct HuffmanCodec;

impl HuffmanCodec {
    pub fn new() -> Self {
        HuffmanCodec
    }

    /// Compresses `data` into a container holding the serialized tree and
    /// the packed code bits.
    pub fn encode(&self, data: &[u8]) -> Result<EncodedContainer, CodecError> {
        let frequencies = FrequencyTable::count(data);
        if frequencies.is_empty() {
            return Err(CodecError::EmptyInput);
        }

        let tree = HuffmanTree::build(&frequencies)?;
        let table = tree.code_table();

        let mut writer = BitWriter::with_capacity(table.encoded_bits(&frequencies) as usize);
        table.encode_into(data, &mut writer)?;
        let (payload, valid_bits) = writer.build();

        let container = EncodedContainer { tree: tree.serialize(), valid_bits, payload };

        debug!(
            input = data.len(),
            symbols = frequencies.len(),
            tree_bytes = container.tree.len(),
            valid_bits,
            "encoded buffer"
        );

        Ok(container)
    }

    /// Rebuilds the original bytes. Nothing is returned unless the whole
    /// payload decodes cleanly.
    pub fn decode(&self, container: &EncodedContainer) -> Result<Vec<u8>, CodecError> {
        let (tree, consumed) = HuffmanTree::deserialize(&container.tree)?;
        if consumed != container.tree.len() {
            return Err(CodecError::CorruptTree("trailing bytes after the tree"));
        }

        if container.valid_bits == 0 {
            return Err(CodecError::CorruptContainer("container carries no payload bits".to_string()));
        }

        let reader = BitReader::with_limit(&container.payload, container.valid_bits)?;
        let root = tree.root();

        let output = match root {
            HuffmanNode::Leaf { symbol, .. } => Self::decode_single(*symbol, reader)?,
            HuffmanNode::Internal { .. } => Self::decode_walk(root, reader, tree.height())?,
        };

        debug!(valid_bits = container.valid_bits, output = output.len(), "decoded buffer");

        Ok(output)
    }

    /// Every symbol of a one-leaf tree is the single bit `0`.
    fn decode_single(symbol: u8, reader: BitReader<'_>) -> Result<Vec<u8>, CodecError> {
        let mut output = Vec::with_capacity(reader.remaining() as usize);

        for bit in reader {
            if bit {
                return Err(CodecError::CorruptContainer(
                    "payload of a single-symbol tree contains a 1 bit".to_string(),
                ));
            }
            output.push(symbol);
        }

        Ok(output)
    }

    fn decode_walk(root: &HuffmanNode, reader: BitReader<'_>, height: usize) -> Result<Vec<u8>, CodecError> {
        let mut output = Vec::with_capacity(reader.remaining() as usize / height.max(1));
        let mut node = root;
        let mut depth = 0;

        for bit in reader {
            if let HuffmanNode::Internal { left, right, .. } = node {
                node = if bit { &**right } else { &**left };
                depth += 1;
            }

            if let HuffmanNode::Leaf { symbol, .. } = node {
                output.push(*symbol);
                node = root;
                depth = 0;
            }
        }

        if depth != 0 {
            return Err(CodecError::TruncatedData("payload ended in the middle of a code"));
        }

        Ok(output)
    }

    /// Encodes `data` and serializes the container in one step.
    pub fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        self.encode(data)?.to_bytes()
    }

    /// Parses container bytes and decodes them.
    pub fn decompress(&self, bytes: &[u8]) -> Result<Vec<u8>, CodecError> {
        let container = EncodedContainer::from_bytes(bytes)?;
        self.decode(&container)
    }

    /// Encodes `data` and reports what the encoder produced along the way.
    pub fn analyze(&self, data: &[u8]) -> Result<CompressionStats, CodecError> {
        let frequencies = FrequencyTable::count(data);
        let tree = HuffmanTree::build(&frequencies)?;
        let container = self.encode(data)?;

        Ok(CompressionStats::new(&frequencies, &tree, &container))
    }
}
