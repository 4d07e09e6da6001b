//! Normalization of caller-supplied field values into canonical byte form.
//!
//! Integers become big-endian bytes without leading zeros (zero is the empty
//! string), `to` must be exactly one address long, and opaque byte strings
//! (`data`, `r`, `s`) pass through untouched.

use crate::error::{Result, TxError};
use crate::types::input::{HexData, Quantity};
use crate::types::transaction::Transaction;
use alloy_primitives::{Bytes, U256};

/// Byte length of an account address.
pub const ADDRESS_LENGTH: usize = 20;

/// 2^53; at or above it a float no longer pins down a single integer, so a
/// number written by the caller may already have been rounded.
const F64_EXACT_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Decodes hex text with an optional `0x` prefix.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    hex::decode(digits)
}

/// Encodes bytes as lowercase hex with a `0x` prefix.
pub fn encode_hex(bytes: impl AsRef<[u8]>) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Strips leading zero bytes, the canonical RLP integer form.
pub fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

/// Interprets a quantity as a non-negative 256-bit integer.
pub fn to_u256(field: &'static str, value: &Quantity) -> Result<U256> {
    match value {
        Quantity::Unsigned(v) => Ok(U256::from(*v)),
        Quantity::Big(v) => Ok(*v),
        Quantity::Signed(v) => u64::try_from(*v)
            .map(U256::from)
            .map_err(|_| TxError::amount(field, format!("negative value {v}"))),
        Quantity::Float(v) => {
            if !v.is_finite() {
                Err(TxError::amount(field, format!("{v} is not finite")))
            } else if *v < 0.0 {
                Err(TxError::amount(field, format!("negative value {v}")))
            } else if v.fract() != 0.0 {
                Err(TxError::amount(field, format!("{v} is not an integer")))
            } else if *v >= F64_EXACT_LIMIT {
                Err(TxError::amount(
                    field,
                    format!("{v} exceeds exact float range, pass as string"),
                ))
            } else {
                Ok(U256::from(*v as u64))
            }
        }
        Quantity::Text(s) => parse_text(field, s),
    }
}

fn parse_text(field: &'static str, s: &str) -> Result<U256> {
    let s = s.trim();
    if s.starts_with('-') {
        return Err(TxError::amount(field, format!("negative value {s}")));
    }
    // `from_str_radix` skips underscores
    if s.contains('_') {
        return Err(TxError::amount(field, format!("{s}: invalid digit")));
    }
    if let Some(digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if digits.is_empty() {
            return Ok(U256::ZERO);
        }
        return U256::from_str_radix(digits, 16)
            .map_err(|e| TxError::amount(field, format!("{s}: {e}")));
    }
    if s.is_empty() {
        return Err(TxError::amount(field, "empty string"));
    }
    U256::from_str_radix(s, 10).map_err(|e| TxError::amount(field, format!("{s}: {e}")))
}

/// Canonical integer bytes for a numeric field.
pub fn uint(field: &'static str, value: &Quantity) -> Result<Bytes> {
    let be = to_u256(field, value)?.to_be_bytes::<32>();
    Ok(Bytes::copy_from_slice(trim_leading_zeros(&be)))
}

/// Canonical bytes for the `to` field; absent means contract creation.
pub fn address(value: Option<&HexData>) -> Result<Bytes> {
    let Some(value) = value else {
        return Ok(Bytes::new());
    };
    let bytes = match value {
        HexData::Text(s) => decode_hex(s)
            .map(Bytes::from)
            .map_err(|e| TxError::InvalidAddress(format!("{s}: {e}")))?,
        HexData::Raw(b) => b.clone(),
    };
    if bytes.len() != ADDRESS_LENGTH {
        return Err(TxError::InvalidAddress(format!(
            "expected {ADDRESS_LENGTH} bytes, got {}",
            bytes.len()
        )));
    }
    Ok(bytes)
}

/// Bytes of an opaque field, unchanged.
pub fn bytes(field: &'static str, value: &HexData) -> Result<Bytes> {
    match value {
        HexData::Text(s) => decode_hex(s)
            .map(Bytes::from)
            .map_err(|e| TxError::data(field, format!("{s}: {e}"))),
        HexData::Raw(b) => Ok(b.clone()),
    }
}

fn required_uint(field: &'static str, value: Option<&Quantity>) -> Result<Bytes> {
    match value {
        Some(v) => uint(field, v),
        None => Err(TxError::amount(field, "missing")),
    }
}

/// All nine transaction slots in wire order, canonicalized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalFields {
    pub nonce: Bytes,
    pub gas_price: Bytes,
    pub gas: Bytes,
    pub to: Bytes,
    pub value: Bytes,
    pub data: Bytes,
    pub v: Option<Bytes>,
    pub r: Option<Bytes>,
    pub s: Option<Bytes>,
}

impl CanonicalFields {
    pub fn from_transaction(tx: &Transaction) -> Result<Self> {
        Ok(Self {
            nonce: required_uint("nonce", tx.nonce.as_ref())?,
            gas_price: required_uint("gasPrice", tx.gas_price.as_ref())?,
            gas: required_uint("gas", tx.gas.as_ref())?,
            to: address(tx.to.as_ref())?,
            value: tx.value.as_ref().map_or(Ok(Bytes::new()), |v| uint("value", v))?,
            data: tx.data.as_ref().map_or(Ok(Bytes::new()), |d| bytes("data", d))?,
            v: tx.v.as_ref().map(|v| uint("v", v)).transpose()?,
            r: tx.r.as_ref().map(|r| bytes("r", r)).transpose()?,
            s: tx.s.as_ref().map(|s| bytes("s", s)).transpose()?,
        })
    }

    /// The six fields covered by the signature, in wire order.
    pub fn unsigned(&self) -> [&Bytes; 6] {
        [&self.nonce, &self.gas_price, &self.gas, &self.to, &self.value, &self.data]
    }

    /// `(v, r, s)` when all three are present.
    pub fn signature(&self) -> Result<(&Bytes, &Bytes, &Bytes)> {
        let v = self.v.as_ref().ok_or(TxError::MissingSignature("v"))?;
        let r = self.r.as_ref().ok_or(TxError::MissingSignature("r"))?;
        let s = self.s.as_ref().ok_or(TxError::MissingSignature("s"))?;
        Ok((v, r, s))
    }
}
