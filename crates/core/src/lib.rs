pub mod canonical;
pub mod config;
pub mod crypto;
pub mod error;
pub mod rlp;
pub mod types;

pub use config::{AddressScheme, NetworkConfig};
pub use error::{Result, TxError};
pub use rlp::RlpItem;
pub use types::{HexData, Quantity, Transaction};
