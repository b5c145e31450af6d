//! Durable blocklist store for the relay.
//!
//! A correspondent id is either present (blocked) or absent; presence is the
//! sole state. Every mutation is persisted before it returns, so a crash
//! never loses a block the operator was told about.

mod error;
mod store;

pub use error::StoreError;
pub use store::BlocklistStore;
