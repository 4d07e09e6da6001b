use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

/// A numeric field as supplied by the caller.
///
/// Nothing is validated here; negative, fractional or unparsable values are
/// rejected when the transaction is encoded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    /// Decimal, or hex with a `0x` prefix.
    Text(String),
    Big(U256),
}

impl Default for Quantity {
    fn default() -> Self {
        Self::Unsigned(0)
    }
}

impl From<u64> for Quantity {
    fn from(v: u64) -> Self {
        Self::Unsigned(v)
    }
}

impl From<u32> for Quantity {
    fn from(v: u32) -> Self {
        Self::Unsigned(v.into())
    }
}

impl From<u8> for Quantity {
    fn from(v: u8) -> Self {
        Self::Unsigned(v.into())
    }
}

impl From<i64> for Quantity {
    fn from(v: i64) -> Self {
        Self::Signed(v)
    }
}

impl From<i32> for Quantity {
    fn from(v: i32) -> Self {
        Self::Signed(v.into())
    }
}

impl From<f64> for Quantity {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<U256> for Quantity {
    fn from(v: U256) -> Self {
        Self::Big(v)
    }
}

impl From<u128> for Quantity {
    fn from(v: u128) -> Self {
        Self::Big(U256::from(v))
    }
}

impl From<&str> for Quantity {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for Quantity {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// A byte-string field (`to`, `data`, `r`, `s`): hex text or raw bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HexData {
    Text(String),
    Raw(Bytes),
}

impl From<&str> for HexData {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for HexData {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Bytes> for HexData {
    fn from(v: Bytes) -> Self {
        Self::Raw(v)
    }
}

impl From<Vec<u8>> for HexData {
    fn from(v: Vec<u8>) -> Self {
        Self::Raw(v.into())
    }
}

impl From<&[u8]> for HexData {
    fn from(v: &[u8]) -> Self {
        Self::Raw(Bytes::copy_from_slice(v))
    }
}

impl From<[u8; 32]> for HexData {
    fn from(v: [u8; 32]) -> Self {
        Self::Raw(Bytes::copy_from_slice(&v))
    }
}

impl From<Address> for HexData {
    fn from(v: Address) -> Self {
        Self::Raw(Bytes::copy_from_slice(v.as_slice()))
    }
}
