//! secp256k1 / keccak-256 adapters used by the transaction record.
//!
//! Public keys are handled as 64-byte uncompressed points without the SEC1
//! `0x04` tag, which is what address derivation hashes.

use crate::canonical::{decode_hex, trim_leading_zeros};
use crate::config::AddressScheme;
use crate::error::{Result, TxError};
use alloy_primitives::{Address, B256, B512};
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use k256::elliptic_curve::zeroize::Zeroizing;

pub use alloy_primitives::keccak256;

/// Byte length of a secp256k1 private key.
pub const PRIVATE_KEY_LENGTH: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecoverableSignature {
    pub r: B256,
    pub s: B256,
    /// Recovery id, 0 or 1.
    pub v: u8,
}

/// Parses a hex private key (optional `0x` prefix) into a buffer that is
/// wiped on drop.
pub fn parse_private_key(s: &str) -> Result<Zeroizing<[u8; PRIVATE_KEY_LENGTH]>> {
    let s = s.trim();
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    let mut key = Zeroizing::new([0u8; PRIVATE_KEY_LENGTH]);
    hex::decode_to_slice(digits, &mut key[..]).map_err(|_| TxError::InvalidKey)?;
    Ok(key)
}

fn signing_key(private_key: &[u8]) -> Result<SigningKey> {
    if private_key.len() != PRIVATE_KEY_LENGTH {
        return Err(TxError::InvalidKey);
    }
    SigningKey::from_slice(private_key).map_err(|_| TxError::InvalidKey)
}

fn public_key_bytes(key: &VerifyingKey) -> B512 {
    let point = key.to_encoded_point(false);
    B512::from_slice(&point.as_bytes()[1..]) // skip 0x04 prefix
}

/// Signs a 32-byte digest, returning `r`, `s` and the recovery id.
pub fn sign_prehash(digest: &B256, private_key: &[u8]) -> Result<RecoverableSignature> {
    let key = signing_key(private_key)?;
    let (signature, recovery_id) = key
        .sign_prehash_recoverable(digest.as_slice())
        .map_err(|e| TxError::InvalidSignature(format!("Signing failed: {e}")))?;

    let bytes = signature.to_bytes();
    Ok(RecoverableSignature {
        r: B256::from_slice(&bytes[..32]),
        s: B256::from_slice(&bytes[32..]),
        v: recovery_id.to_byte(),
    })
}

fn put_scalar(out: &mut [u8], value: &[u8], name: &str) -> Result<()> {
    let value = trim_leading_zeros(value);
    if value.len() > out.len() {
        return Err(TxError::InvalidSignature(format!(
            "`{name}` is {} bytes, expected at most {}",
            value.len(),
            out.len()
        )));
    }
    let offset = out.len() - value.len();
    out[offset..].copy_from_slice(value);
    Ok(())
}

/// Recovers the signer's public key from a digest and `(r, s, v)`.
///
/// Scalars shorter than 32 bytes are left-padded; `v` must be a valid
/// recovery id.
pub fn recover_public_key(digest: &B256, r: &[u8], s: &[u8], v: u8) -> Result<B512> {
    let mut raw = [0u8; 64];
    put_scalar(&mut raw[..32], r, "r")?;
    put_scalar(&mut raw[32..], s, "s")?;

    let signature = Signature::from_slice(&raw)
        .map_err(|e| TxError::InvalidSignature(format!("Invalid signature format: {e}")))?;
    let recovery_id = RecoveryId::from_byte(v)
        .ok_or_else(|| TxError::InvalidSignature(format!("Invalid recovery id {v}")))?;

    let key = VerifyingKey::recover_from_prehash(digest.as_slice(), &signature, recovery_id)
        .map_err(|e| TxError::InvalidSignature(format!("Failed to recover public key: {e}")))?;
    Ok(public_key_bytes(&key))
}

/// Derives an account address from a 64-byte public key.
pub fn public_key_to_address(public_key: &B512, scheme: AddressScheme) -> Address {
    let hash = keccak256(public_key.as_slice());
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash[12..]);
    if scheme == AddressScheme::UserTyped {
        bytes[0] = (bytes[0] & 0x0f) | 0x10;
    }
    Address::from(bytes)
}

pub fn private_key_to_public_key(private_key: &[u8]) -> Result<B512> {
    let key = signing_key(private_key)?;
    Ok(public_key_bytes(key.verifying_key()))
}

pub fn private_key_to_address(private_key: &[u8], scheme: AddressScheme) -> Result<Address> {
    Ok(public_key_to_address(&private_key_to_public_key(private_key)?, scheme))
}

/// Hex public key (optional `0x` prefix), 64 bytes or 65 with the `0x04` tag.
pub fn parse_public_key(s: &str) -> Result<B512> {
    let bytes = decode_hex(s).map_err(|e| TxError::InvalidSignature(format!("{s}: {e}")))?;
    match bytes.len() {
        64 => Ok(B512::from_slice(&bytes)),
        65 if bytes[0] == 0x04 => Ok(B512::from_slice(&bytes[1..])),
        n => Err(TxError::InvalidSignature(format!("public key of {n} bytes"))),
    }
}
