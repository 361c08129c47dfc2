use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Settings for reading and writing matrix files.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatrixFileConfig {
    #[serde(default)]
    pub header_width: HeaderWidth,
}

/// Width of each of the two shape fields at the start of a matrix file.
///
/// Files written on 64-bit hosts use `U64`. `U32` exists to exchange files
/// with 32-bit hosts, where the shape was stored as a 4-byte `size_t`.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum HeaderWidth {
    U32,
    #[default]
    U64,
}

impl HeaderWidth {
    /// Bytes occupied by one shape field.
    pub fn size(self) -> usize {
        match self {
            HeaderWidth::U32 => 4,
            HeaderWidth::U64 => 8,
        }
    }

    /// Largest dimension representable by a header field of this width.
    pub fn max_dim(self) -> u64 {
        match self {
            HeaderWidth::U32 => u32::MAX as u64,
            HeaderWidth::U64 => u64::MAX,
        }
    }
}

impl FromStr for HeaderWidth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "u64" | "64" => Ok(HeaderWidth::U64),
            "u32" | "32" => Ok(HeaderWidth::U32),
            _ => Err(format!(
                "Unknown header width: {}. Expected one of `u64`, `64`, `u32`, `32`",
                s
            )),
        }
    }
}

impl MatrixFileConfig {
    pub fn new(header_width: HeaderWidth) -> Self {
        Self { header_width }
    }

    /// Byte offset of the first payload element.
    pub fn header_len(&self) -> usize {
        2 * self.header_width.size()
    }
}
