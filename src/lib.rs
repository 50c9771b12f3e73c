pub mod bitstreams;
pub mod codec;
pub mod container;
pub mod error;
pub mod frequency;
pub mod huffman;
pub mod io;
pub mod properties;
pub mod stats;
pub mod utils;

pub use codec::HuffmanCodec;
pub use container::EncodedContainer;
pub use error::CodecError;
pub use frequency::FrequencyTable;
pub use huffman::{code_table::{Code, CodeTable}, HuffmanNode, HuffmanTree};

/// Supplies the raw bytes handed to the encoder (or the container bytes
/// handed to the decoder). The codec itself never opens files.
pub trait ByteSource {
    fn read_bytes(&mut self) -> std::io::Result<Vec<u8>>;
}

/// Receives the bytes produced by the codec.
pub trait ByteSink {
    fn write_bytes(&mut self, bytes: &[u8]) -> std::io::Result<()>;
}
