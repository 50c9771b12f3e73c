use bincode::Options;
use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// Bytes taken by the three fixed-width fields (tree length, valid bit
/// count, payload length) of an empty container.
pub const MIN_CONTAINER_LEN: usize = 24;

/// The persisted output of an encode.
///
/// On disk the fields appear in declaration order, little-endian and
/// fixed-width: `u64` tree length, tree bytes, `u64` valid bit count,
/// `u64` payload length, payload bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedContainer {
    pub tree: Vec<u8>,
    pub valid_bits: u64,
    pub payload: Vec<u8>,
}

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .reject_trailing_bytes()
}

impl EncodedContainer {
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        options()
            .serialize(self)
            .map_err(|e| CodecError::CorruptContainer(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() < MIN_CONTAINER_LEN {
            return Err(CodecError::CorruptContainer(format!(
                "{} bytes is shorter than the {} byte minimum",
                bytes.len(),
                MIN_CONTAINER_LEN
            )));
        }

        options()
            .deserialize(bytes)
            .map_err(|e| CodecError::CorruptContainer(e.to_string()))
    }

    /// Size of the serialized container in bytes.
    pub fn byte_len(&self) -> usize {
        MIN_CONTAINER_LEN + self.tree.len() + self.payload.len()
    }
}
