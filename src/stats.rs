use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{container::EncodedContainer, frequency::FrequencyTable, huffman::HuffmanTree};

/// One row of the frequency/code table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolStats {
    pub symbol: u8,
    pub count: u64,
    pub code: String,
}

/// What an encode produced, for diagnostics and the properties sidecar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompressionStats {
    pub original_length: u64,
    pub distinct_symbols: usize,
    pub tree_height: usize,
    pub tree_bytes: usize,
    pub payload_bits: u64,
    pub payload_bytes: usize,
    pub container_bytes: usize,
    /// Container size over input size.
    pub ratio: f64,
    pub symbols: Vec<SymbolStats>,
}

impl CompressionStats {
    pub fn new(frequencies: &FrequencyTable, tree: &HuffmanTree, container: &EncodedContainer) -> Self {
        let table = tree.code_table();
        let original_length = frequencies.total();
        let container_bytes = container.byte_len();

        let symbols = frequencies
            .iter()
            .map(|(symbol, count)| SymbolStats {
                symbol,
                count,
                code: table.get(symbol).map(|code| code.to_string()).unwrap_or_default(),
            })
            .collect();

        CompressionStats {
            original_length,
            distinct_symbols: frequencies.len(),
            tree_height: tree.height(),
            tree_bytes: container.tree.len(),
            payload_bits: container.valid_bits,
            payload_bytes: container.payload.len(),
            container_bytes,
            ratio: if original_length == 0 { 0.0 } else { container_bytes as f64 / original_length as f64 },
            symbols,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Printable ASCII is shown as-is, everything else as hex.
pub fn display_symbol(symbol: u8) -> String {
    if symbol.is_ascii_graphic() || symbol == b' ' {
        format!("'{}'", symbol as char)
    } else {
        format!("{:#04x}", symbol)
    }
}

impl fmt::Display for CompressionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "original length  {}", self.original_length)?;
        writeln!(f, "distinct symbols {}", self.distinct_symbols)?;
        writeln!(f, "tree height      {}", self.tree_height)?;
        writeln!(f, "tree bytes       {}", self.tree_bytes)?;
        writeln!(f, "payload bits     {}", self.payload_bits)?;
        writeln!(f, "container bytes  {}", self.container_bytes)?;
        writeln!(f, "ratio            {:.3}", self.ratio)?;
        writeln!(f)?;
        writeln!(f, "{:>8} | {:>10} | code", "symbol", "count")?;

        for row in self.symbols.iter() {
            writeln!(f, "{:>8} | {:>10} | {}", display_symbol(row.symbol), row.count, row.code)?;
        }

        Ok(())
    }
}
