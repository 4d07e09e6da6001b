//! Recursive length-prefixed encoding over a tree of byte strings and lists.
//!
//! Prefix selection is delegated to `alloy_rlp`: byte strings go through the
//! `[u8]` encoder (which keeps single bytes below `0x80` bare), lists get an
//! explicit list `Header` over the concatenated payload of their children.

use alloy_primitives::Bytes;
use alloy_rlp::{BufMut, Encodable, Header};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RlpItem {
    Bytes(Bytes),
    List(Vec<RlpItem>),
}

impl RlpItem {
    pub fn bytes(value: impl Into<Bytes>) -> Self {
        Self::Bytes(value.into())
    }

    pub fn list(items: impl IntoIterator<Item = RlpItem>) -> Self {
        Self::List(items.into_iter().collect())
    }

    /// Encodes the whole tree into a fresh buffer.
    pub fn to_rlp(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.length());
        self.encode(&mut out);
        out
    }

    fn payload_length(items: &[RlpItem]) -> usize {
        items.iter().map(Encodable::length).sum()
    }

    /// Decodes one item from the front of `buf`, advancing it past the item.
    pub fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        let header = Header::decode(buf)?;
        if buf.len() < header.payload_length {
            return Err(alloy_rlp::Error::InputTooShort);
        }
        let (payload, rest) = buf.split_at(header.payload_length);
        *buf = rest;

        if !header.list {
            return Ok(Self::Bytes(Bytes::copy_from_slice(payload)));
        }

        let mut body = payload;
        let mut items = Vec::new();
        while !body.is_empty() {
            items.push(Self::decode(&mut body)?);
        }
        Ok(Self::List(items))
    }

    /// Decodes `buf` as exactly one item with nothing trailing.
    pub fn decode_exact(mut buf: &[u8]) -> alloy_rlp::Result<Self> {
        let item = Self::decode(&mut buf)?;
        if !buf.is_empty() {
            return Err(alloy_rlp::Error::Custom("trailing bytes after RLP item"));
        }
        Ok(item)
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Bytes(b) => Some(b),
            Self::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[RlpItem]> {
        match self {
            Self::List(items) => Some(items),
            Self::Bytes(_) => None,
        }
    }
}

impl Encodable for RlpItem {
    fn encode(&self, out: &mut dyn BufMut) {
        match self {
            Self::Bytes(b) => b[..].encode(out),
            Self::List(items) => {
                Header { list: true, payload_length: Self::payload_length(items) }.encode(out);
                for item in items {
                    item.encode(out);
                }
            }
        }
    }

    fn length(&self) -> usize {
        match self {
            Self::Bytes(b) => b[..].length(),
            Self::List(items) => {
                let payload_length = Self::payload_length(items);
                Header { list: true, payload_length }.length() + payload_length
            }
        }
    }
}
