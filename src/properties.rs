use std::{collections::HashMap, io::Read, str::FromStr};

use thiserror::Error;

use crate::stats::CompressionStats;

pub const PROPERTIES_VERSION: u32 = 0;

#[derive(Debug, Error)]
pub enum PropertiesError {
    #[error("missing property {0}")]
    Missing(&'static str),

    #[error("malformed property {key}={value}")]
    Malformed { key: &'static str, value: String },

    #[error("unsupported properties version {0}")]
    Version(u32),

    #[error(transparent)]
    Parse(#[from] java_properties::PropertiesError),
}

/// Summary of a container, stored next to it as `<container>.properties`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContainerProperties {
    pub version: u32,
    pub original_length: u64,
    pub distinct_symbols: usize,
    pub tree_bytes: usize,
    pub payload_bits: u64,
    pub container_bytes: usize,
}

impl ContainerProperties {
    pub fn read<R: Read>(reader: R) -> Result<Self, PropertiesError> {
        let map = java_properties::read(reader)?;
        Self::try_from(map)
    }
}

impl From<&CompressionStats> for ContainerProperties {
    fn from(stats: &CompressionStats) -> Self {
        ContainerProperties {
            version: PROPERTIES_VERSION,
            original_length: stats.original_length,
            distinct_symbols: stats.distinct_symbols,
            tree_bytes: stats.tree_bytes,
            payload_bits: stats.payload_bits,
            container_bytes: stats.container_bytes,
        }
    }
}

fn parse_field<T: FromStr>(map: &HashMap<String, String>, key: &'static str) -> Result<T, PropertiesError> {
    let value = map.get(key).ok_or(PropertiesError::Missing(key))?;

    value
        .trim()
        .parse()
        .map_err(|_| PropertiesError::Malformed { key, value: value.clone() })
}

impl TryFrom<HashMap<String, String>> for ContainerProperties {
    type Error = PropertiesError;

    fn try_from(value: HashMap<String, String>) -> Result<Self, Self::Error> {
        let version = parse_field(&value, "version")?;
        if version != PROPERTIES_VERSION {
            return Err(PropertiesError::Version(version));
        }

        Ok(ContainerProperties {
            version,
            original_length: parse_field(&value, "originallength")?,
            distinct_symbols: parse_field(&value, "distinctsymbols")?,
            tree_bytes: parse_field(&value, "treebytes")?,
            payload_bits: parse_field(&value, "payloadbits")?,
            container_bytes: parse_field(&value, "containerbytes")?,
        })
    }
}

impl From<ContainerProperties> for String {
    fn from(val: ContainerProperties) -> Self {
        let mut s = String::new();

        s.push_str("#Huffman container properties\n");
        s.push_str(&format!("version={}\n", val.version));
        s.push_str(&format!("originallength={}\n", val.original_length));
        s.push_str(&format!("distinctsymbols={}\n", val.distinct_symbols));
        s.push_str(&format!("treebytes={}\n", val.tree_bytes));
        s.push_str(&format!("payloadbits={}\n", val.payload_bits));
        s.push_str(&format!("containerbytes={}\n", val.container_bytes));

        s
    }
}
