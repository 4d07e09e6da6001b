pub mod input;
pub mod transaction;

pub use input::{HexData, Quantity};
pub use transaction::Transaction;

#[cfg(test)]
mod tests;
