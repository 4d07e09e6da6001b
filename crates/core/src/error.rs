use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TxError {
    #[error("Invalid amount for `{field}`: {reason}")]
    InvalidAmount { field: &'static str, reason: String },

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid bytes for `{field}`: {reason}")]
    InvalidData { field: &'static str, reason: String },

    #[error("Invalid private key")]
    InvalidKey,

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Transaction is not fully signed: `{0}` is missing")]
    MissingSignature(&'static str),

    #[error("RLP encoding error: {0}")]
    Encoding(String),
}

impl TxError {
    pub(crate) fn amount(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidAmount { field, reason: reason.into() }
    }

    pub(crate) fn data(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidData { field, reason: reason.into() }
    }
}

impl From<alloy_rlp::Error> for TxError {
    fn from(e: alloy_rlp::Error) -> Self {
        Self::Encoding(e.to_string())
    }
}

pub type Result<T, E = TxError> = std::result::Result<T, E>;
