use super::*;
use crate::canonical::CanonicalFields;
use crate::config::NetworkConfig;
use crate::crypto;
use crate::error::TxError;
use alloy_primitives::{Address, B256, U256};
use hex_literal::hex;

const KEY_ONE: [u8; 32] = hex!("0000000000000000000000000000000000000000000000000000000000000001");
const TO: &str = "0x0123456789abcdef0123456789abcdef01234567";

fn zero_tx() -> Transaction {
    Transaction {
        nonce: Some(0u64.into()),
        gas_price: Some(0u64.into()),
        gas: Some(0u64.into()),
        to: None,
        value: Some(0u64.into()),
        data: Some("".into()),
        ..Default::default()
    }
}

fn transfer_tx() -> Transaction {
    Transaction {
        nonce: Some(1u64.into()),
        gas_price: Some("0x3b9aca00".into()),
        gas: Some(21000u64.into()),
        to: Some(TO.into()),
        value: Some("1000000000000000000".into()),
        data: Some("0xdeadbeef".into()),
        ..Default::default()
    }
}

fn with_fixed_signature(mut tx: Transaction) -> Transaction {
    tx.v = Some(1u64.into());
    tx.r = Some(HexData::from([0x11; 32]));
    tx.s = Some(HexData::from([0x22; 32]));
    tx
}

#[test]
fn test_all_zero_transaction_vector() {
    let tx = zero_tx();
    assert_eq!(tx.encode(false).unwrap(), hex!("c6808080808080"));
    assert_eq!(
        tx.signing_hash().unwrap(),
        B256::from(hex!("5460be86ce1e4ca0564b5761c6e7070d9f054b671f5404268335000806423d75"))
    );
}

#[test]
fn test_transfer_vectors() {
    let tx = with_fixed_signature(transfer_tx());

    assert_eq!(
        tx.encode(false).unwrap(),
        hex!("ec01843b9aca00825208940123456789abcdef0123456789abcdef01234567880de0b6b3a764000084deadbeef")
    );
    assert_eq!(
        tx.signing_hash().unwrap(),
        B256::from(hex!("c3ab102ff454abb0006f90ad043480e5c206e772bf50c359513a731096e1a059"))
    );
    assert_eq!(
        tx.serialize().unwrap(),
        concat!(
            "0xf870ec01843b9aca00825208940123456789abcdef0123456789abcdef01234567",
            "880de0b6b3a764000084deadbeef01",
            "a01111111111111111111111111111111111111111111111111111111111111111",
            "a02222222222222222222222222222222222222222222222222222222222222222",
        )
    );
    assert_eq!(
        tx.hash(),
        Some(B256::from(hex!("cc5e02f19e2dcd5578dca05ce611a0e62d88497951acb72363df05ec1adda0ef")))
    );
}

#[test]
fn test_input_representations_agree() {
    let reference = transfer_tx().encode(false).unwrap();

    let mut tx = transfer_tx();
    tx.nonce = Some("0x01".into());
    tx.gas_price = Some(1e9.into());
    tx.gas = Some("21000".into());
    tx.value = Some(U256::from(1_000_000_000_000_000_000u64).into());
    tx.to = Some(HexData::from(hex!("0123456789abcdef0123456789abcdef01234567").to_vec()));
    tx.data = Some(HexData::from(vec![0xde, 0xad, 0xbe, 0xef]));
    assert_eq!(tx.encode(false).unwrap(), reference);
}

#[test]
fn test_value_and_data_default() {
    let mut tx = zero_tx();
    tx.value = None;
    tx.data = None;
    assert_eq!(tx.encode(false).unwrap(), hex!("c6808080808080"));
}

#[test]
fn test_unsigned_encoding_is_repeatable() {
    let tx = transfer_tx();
    let first = tx.encode(false).unwrap();
    assert_eq!(tx.encode(false).unwrap(), first);
    assert_eq!(tx, transfer_tx());
}

#[test]
fn test_unsigned_encoding_ignores_signature() {
    let unsigned = transfer_tx();
    let signed = with_fixed_signature(transfer_tx());
    let mut other = with_fixed_signature(transfer_tx());
    other.v = Some(0u64.into());
    other.r = Some(HexData::from([0x33; 32]));

    assert_eq!(unsigned.encode(false).unwrap(), signed.encode(false).unwrap());
    assert_eq!(signed.signing_hash().unwrap(), other.signing_hash().unwrap());
    assert_ne!(signed.hash(), other.hash());
}

#[test]
fn test_unsigned_transaction_has_no_hash_or_sender() {
    let tx = transfer_tx();
    assert!(tx.encode(false).is_ok());
    assert_eq!(tx.hash(), None);
    assert_eq!(tx.sender(), None);
    assert_eq!(tx.encode(true), Err(TxError::MissingSignature("v")));
    assert_eq!(tx.serialize(), Err(TxError::MissingSignature("v")));
    assert_eq!(tx.recover(), Err(TxError::MissingSignature("v")));
}

#[test]
fn test_partial_signature() {
    let mut tx = transfer_tx();
    tx.v = Some(0u64.into());
    assert!(tx.encode(false).is_ok());
    assert_eq!(tx.encode(true), Err(TxError::MissingSignature("r")));
    assert_eq!(tx.hash(), None);
    assert_eq!(tx.sender(), None);
}

#[test]
fn test_sign_then_recover() {
    let mut tx = transfer_tx();
    let public = crypto::private_key_to_public_key(&KEY_ONE).unwrap();

    let raw = tx.sign(&KEY_ONE).unwrap().serialize().unwrap();
    assert!(raw.starts_with("0xf8"));
    assert!(tx.r.is_some() && tx.s.is_some() && tx.v.is_some());

    assert_eq!(tx.recover().unwrap(), public);
    assert_eq!(tx.sender(), Some(Address::from(hex!("1e5f4552091a69125d5dfcb7b8c2659029395bdf"))));
    assert_eq!(
        tx.sender_on(&NetworkConfig::ethereum()),
        Some(Address::from(hex!("7e5f4552091a69125d5dfcb7b8c2659029395bdf")))
    );
    assert!(tx.hash().is_some());
}

#[test]
fn test_sign_is_deterministic_and_in_place() {
    let key = [0x42; 32];
    let mut a = transfer_tx();
    let mut b = transfer_tx();
    a.sign(&key).unwrap();
    b.sign(&key).unwrap();
    assert_eq!(a.serialize().unwrap(), b.serialize().unwrap());

    // re-signing a signed record covers the same unsigned payload
    let before = a.hash();
    a.sign(&key).unwrap();
    assert_eq!(a.hash(), before);
}

#[test]
fn test_sign_rejects_bad_keys() {
    let mut tx = transfer_tx();
    assert_eq!(tx.sign(&[0u8; 32]).unwrap_err(), TxError::InvalidKey);
    assert_eq!(tx.sign(&[1u8; 16]).unwrap_err(), TxError::InvalidKey);
    assert!(tx.r.is_none() && tx.s.is_none() && tx.v.is_none());
}

#[test]
fn test_sign_propagates_field_errors() {
    let mut tx = transfer_tx();
    tx.value = Some((-1i64).into());
    assert!(matches!(
        tx.sign(&KEY_ONE),
        Err(TxError::InvalidAmount { field: "value", .. })
    ));
}

#[test]
fn test_tampered_transaction_changes_sender() {
    let mut tx = transfer_tx();
    tx.sign(&KEY_ONE).unwrap();
    let sender = tx.sender();

    tx.value = Some(2u64.into());
    assert_ne!(tx.sender(), sender);
}

#[test]
fn test_corrupted_signature() {
    let mut tx = transfer_tx();
    tx.sign(&KEY_ONE).unwrap();

    let mut zero_r = tx.clone();
    zero_r.r = Some(HexData::from([0u8; 32]));
    assert!(zero_r.hash().is_some());
    assert_eq!(zero_r.sender(), None);
    assert!(matches!(zero_r.recover(), Err(TxError::InvalidSignature(_))));

    let mut bad_v = tx.clone();
    bad_v.v = Some(4u64.into());
    assert!(matches!(bad_v.recover(), Err(TxError::InvalidSignature(_))));
    assert_eq!(bad_v.sender(), None);

    let mut wide_v = tx.clone();
    wide_v.v = Some(256u64.into());
    assert!(matches!(wide_v.recover(), Err(TxError::InvalidSignature(_))));

    let mut bad_hex = tx;
    bad_hex.s = Some("0xnothex".into());
    assert_eq!(bad_hex.hash(), None);
    assert_eq!(bad_hex.sender(), None);
    assert!(matches!(bad_hex.encode(false), Err(TxError::InvalidData { field: "s", .. })));
}

#[test]
fn test_field_errors() {
    let mut tx = transfer_tx();
    tx.to = Some("0x0123".into());
    assert!(matches!(tx.encode(false), Err(TxError::InvalidAddress(_))));

    let mut tx = transfer_tx();
    tx.gas = Some(1.5.into());
    assert!(matches!(tx.encode(false), Err(TxError::InvalidAmount { field: "gas", .. })));

    let mut tx = transfer_tx();
    tx.nonce = None;
    assert!(matches!(tx.encode(false), Err(TxError::InvalidAmount { field: "nonce", .. })));
}

#[test]
fn test_contract_creation_encodes_empty_to() {
    let mut tx = transfer_tx();
    tx.to = None;
    let encoded = tx.encode(false).unwrap();
    // nonce, gasPrice and gas precede `to`
    let to_offset = 1 + 1 + 5 + 3;
    assert_eq!(encoded[to_offset], 0x80);
}

#[test]
fn test_decode_signed_round_trip() {
    let mut tx = transfer_tx();
    tx.sign(&KEY_ONE).unwrap();
    let raw = tx.serialize().unwrap();

    let decoded = Transaction::from_raw_hex(&raw).unwrap();
    assert_eq!(
        CanonicalFields::from_transaction(&decoded).unwrap(),
        CanonicalFields::from_transaction(&tx).unwrap()
    );
    assert_eq!(decoded.serialize().unwrap(), raw);
    assert_eq!(decoded.sender(), tx.sender());
}

#[test]
fn test_decode_unsigned_and_contract_creation() {
    let decoded = Transaction::decode(&hex!("c6808080808080")).unwrap();
    assert_eq!(decoded.to, None);
    assert_eq!(decoded.v, None);
    assert_eq!(decoded.encode(false).unwrap(), hex!("c6808080808080"));
}

#[test]
fn test_decode_tolerates_leading_zeros() {
    // nonce encoded as 0x0001
    let decoded = Transaction::decode(&hex!("c782000180808080")).unwrap_err();
    assert!(matches!(decoded, TxError::Encoding(_)), "five fields is not a transaction");

    let decoded = Transaction::decode(&hex!("c88200018080808080")).unwrap();
    assert_eq!(decoded.encode(false).unwrap(), hex!("c6018080808080"));
}

#[test]
fn test_decode_rejects_malformed() {
    assert!(matches!(Transaction::decode(&hex!("80")), Err(TxError::Encoding(_))));
    assert!(matches!(Transaction::decode(&hex!("c3808080")), Err(TxError::Encoding(_))));
    assert!(matches!(Transaction::decode(&hex!("c6c08080808080")), Err(TxError::Encoding(_))));
    assert!(matches!(Transaction::decode(&hex!("c6808080808080ff")), Err(TxError::Encoding(_))));
    assert!(matches!(Transaction::from_raw_hex("0xzz"), Err(TxError::Encoding(_))));
}

#[test]
fn test_json_initialization_record() {
    let tx: Transaction = serde_json::from_str(
        r#"{
            "nonce": 1,
            "gasPrice": "0x3b9aca00",
            "gas": 21000,
            "to": "0x0123456789abcdef0123456789abcdef01234567",
            "value": "1000000000000000000",
            "data": "0xdeadbeef"
        }"#,
    )
    .unwrap();
    assert_eq!(tx.encode(false).unwrap(), transfer_tx().encode(false).unwrap());

    let creation: Transaction =
        serde_json::from_str(r#"{"nonce": 0, "gasPrice": 0, "gas": 0, "to": null}"#).unwrap();
    assert_eq!(creation.encode(false).unwrap(), hex!("c6808080808080"));

    let negative: Transaction =
        serde_json::from_str(r#"{"nonce": -1, "gasPrice": 0, "gas": 0}"#).unwrap();
    assert!(matches!(negative.encode(false), Err(TxError::InvalidAmount { field: "nonce", .. })));
}

#[test]
fn test_json_integer_beyond_u64_is_not_rounded() {
    // serde_json yields an f64 for this literal, which cannot hold it exactly
    let tx: Transaction = serde_json::from_str(
        r#"{"nonce": 0, "gasPrice": 0, "gas": 0, "value": 100000000000000000001}"#,
    )
    .unwrap();
    assert!(matches!(tx.encode(false), Err(TxError::InvalidAmount { field: "value", .. })));

    let exact: Transaction = serde_json::from_str(
        r#"{"nonce": 0, "gasPrice": 0, "gas": 0, "value": "100000000000000000001"}"#,
    )
    .unwrap();
    let fields = CanonicalFields::from_transaction(&exact).unwrap();
    assert_eq!(
        U256::from_be_slice(&fields.value),
        U256::from(100_000_000_000_000_000_001u128)
    );
}

#[test]
fn test_json_output_uses_wire_names() {
    let mut tx = transfer_tx();
    tx.sign(&KEY_ONE).unwrap();
    let json = serde_json::to_value(&tx).unwrap();
    assert!(json.get("gasPrice").is_some());
    assert!(json.get("r").is_some());

    let back: Transaction = serde_json::from_value(json).unwrap();
    assert_eq!(back.serialize().unwrap(), tx.serialize().unwrap());
}
