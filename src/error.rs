use thiserror::Error;

/// Failures of the codec core. Every encode/decode path reports one of these
/// instead of producing partial output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Encode was asked to compress a zero-length buffer.
    #[error("cannot encode an empty input")]
    EmptyInput,

    /// Code generation was requested without a tree.
    #[error("no Huffman tree to derive codes from")]
    EmptyTree,

    /// The serialized tree is truncated or structurally invalid.
    #[error("corrupt tree section: {0}")]
    CorruptTree(&'static str),

    /// The payload ran out of bits, or declares more bits than it carries.
    #[error("truncated payload: {0}")]
    TruncatedData(&'static str),

    /// The container cannot be split into its sections.
    #[error("corrupt container: {0}")]
    CorruptContainer(String),

    /// A byte was handed to a code table that has no code for it.
    #[error("symbol {0:#04x} has no code in the table")]
    MissingCode(u8),
}

impl CodecError {
    /// Returns true if the error came from decoding damaged data rather
    /// than from a caller mistake.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            CodecError::CorruptTree(_) | CodecError::TruncatedData(_) | CodecError::CorruptContainer(_)
        )
    }
}
