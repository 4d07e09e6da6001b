use crate::canonical::{self, CanonicalFields};
use crate::config::NetworkConfig;
use crate::crypto::{self, keccak256};
use crate::error::{Result, TxError};
use crate::rlp::RlpItem;
use crate::types::input::{HexData, Quantity};
use alloy_primitives::{Address, Bytes, B256, B512, U256};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// A legacy transaction record.
///
/// Fields hold whatever the caller supplied; they are canonicalized each time
/// the record is encoded, so every accessor below recomputes from scratch.
/// `v`, `r` and `s` are either all set (signed) or all unset (unsigned).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<Quantity>,
    /// `None` creates a contract.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<HexData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<HexData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<HexData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s: Option<HexData>,
}

fn rlp_item(fields: &CanonicalFields, include_signature: bool) -> Result<RlpItem> {
    let unsigned = RlpItem::list(fields.unsigned().into_iter().cloned().map(RlpItem::Bytes));
    if !include_signature {
        return Ok(unsigned);
    }
    let (v, r, s) = fields.signature()?;
    Ok(RlpItem::list([
        unsigned,
        RlpItem::Bytes(v.clone()),
        RlpItem::Bytes(r.clone()),
        RlpItem::Bytes(s.clone()),
    ]))
}

fn recovery_id(v: &Bytes) -> Result<u8> {
    match &v[..] {
        [] => Ok(0),
        [id] => Ok(*id),
        _ => Err(TxError::InvalidSignature(format!(
            "recovery id {} does not fit a byte",
            canonical::encode_hex(v)
        ))),
    }
}

impl Transaction {
    /// RLP of `[nonce, gasPrice, gas, to, value, data]`, or of
    /// `[[nonce, gasPrice, gas, to, value, data], v, r, s]` when
    /// `include_signature` is set.
    pub fn encode(&self, include_signature: bool) -> Result<Vec<u8>> {
        let fields = CanonicalFields::from_transaction(self)?;
        Ok(rlp_item(&fields, include_signature)?.to_rlp())
    }

    /// Keccak-256 of the unsigned encoding; the digest that gets signed.
    pub fn signing_hash(&self) -> Result<B256> {
        Ok(keccak256(self.encode(false)?))
    }

    /// Keccak-256 of the signed encoding, or `None` if the record is not
    /// fully signed or does not encode.
    pub fn hash(&self) -> Option<B256> {
        match self.encode(true) {
            Ok(encoded) => Some(keccak256(encoded)),
            Err(e) => {
                debug!(target: "txcraft::tx", "Transaction hash unavailable: {}", e);
                None
            }
        }
    }

    /// Signs the unsigned encoding and stores `r`, `s` and `v` on `self`.
    ///
    /// The key is only borrowed for the duration of the call.
    pub fn sign(&mut self, private_key: &[u8]) -> Result<&mut Self> {
        let digest = self.signing_hash()?;
        let signature = crypto::sign_prehash(&digest, private_key)?;
        trace!(target: "txcraft::tx", "Signed digest {} (v={})", digest, signature.v);

        self.r = Some(HexData::from(signature.r.0));
        self.s = Some(HexData::from(signature.s.0));
        self.v = Some(Quantity::from(signature.v));
        Ok(self)
    }

    /// Recovers the 64-byte public key of the signer.
    pub fn recover(&self) -> Result<B512> {
        let fields = CanonicalFields::from_transaction(self)?;
        let (v, r, s) = fields.signature()?;
        let digest = keccak256(rlp_item(&fields, false)?.to_rlp());
        crypto::recover_public_key(&digest, r, s, recovery_id(v)?)
    }

    /// Address of the signer on the default network, or `None` when it
    /// cannot be recovered.
    pub fn sender(&self) -> Option<Address> {
        self.sender_on(&NetworkConfig::default())
    }

    pub fn sender_on(&self, network: &NetworkConfig) -> Option<Address> {
        match self.recover() {
            Ok(public_key) => Some(crypto::public_key_to_address(&public_key, network.address_scheme)),
            Err(e) => {
                debug!(target: "txcraft::tx", "Sender unavailable on {}: {}", network.name, e);
                None
            }
        }
    }

    /// `0x`-prefixed hex of the signed encoding, ready for submission.
    pub fn serialize(&self) -> Result<String> {
        Ok(canonical::encode_hex(self.encode(true)?))
    }

    /// Parses a wire payload, signed (`[[..], v, r, s]`) or unsigned (`[..]`).
    ///
    /// Integer slots tolerate leading zero bytes.
    pub fn decode(raw: &[u8]) -> Result<Self> {
        let item = RlpItem::decode_exact(raw)?;
        let items = item
            .as_list()
            .ok_or_else(|| TxError::Encoding("transaction must be an RLP list".into()))?;

        match items {
            [RlpItem::List(fields), v, r, s] => Ok(Self {
                v: Some(quantity(v, "v")?),
                r: Some(HexData::Raw(leaf(r, "r")?.clone())),
                s: Some(HexData::Raw(leaf(s, "s")?.clone())),
                ..Self::from_unsigned_items(fields)?
            }),
            fields if fields.len() == 6 => Self::from_unsigned_items(fields),
            _ => Err(TxError::Encoding(format!(
                "unexpected transaction shape with {} items",
                items.len()
            ))),
        }
    }

    pub fn from_raw_hex(raw: &str) -> Result<Self> {
        let bytes =
            canonical::decode_hex(raw).map_err(|e| TxError::Encoding(format!("invalid hex: {e}")))?;
        Self::decode(&bytes)
    }

    fn from_unsigned_items(items: &[RlpItem]) -> Result<Self> {
        let [nonce, gas_price, gas, to, value, data] = items else {
            return Err(TxError::Encoding(format!(
                "expected 6 transaction fields, got {}",
                items.len()
            )));
        };
        let to = leaf(to, "to")?;

        Ok(Self {
            nonce: Some(quantity(nonce, "nonce")?),
            gas_price: Some(quantity(gas_price, "gasPrice")?),
            gas: Some(quantity(gas, "gas")?),
            to: (!to.is_empty()).then(|| HexData::Raw(to.clone())),
            value: Some(quantity(value, "value")?),
            data: Some(HexData::Raw(leaf(data, "data")?.clone())),
            v: None,
            r: None,
            s: None,
        })
    }
}

fn leaf<'a>(item: &'a RlpItem, field: &str) -> Result<&'a Bytes> {
    item.as_bytes()
        .ok_or_else(|| TxError::Encoding(format!("`{field}` must be a byte string")))
}

fn quantity(item: &RlpItem, field: &str) -> Result<Quantity> {
    let bytes = canonical::trim_leading_zeros(leaf(item, field)?);
    if bytes.len() > 32 {
        return Err(TxError::Encoding(format!("`{field}` overflows 256 bits")));
    }
    Ok(Quantity::Big(U256::from_be_slice(bytes)))
}
