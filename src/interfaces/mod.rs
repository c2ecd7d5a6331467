//! Abstract interfaces for orderit components.
//!
//! These traits define the contracts for:
//! - Record persistence (the key-value store behind cart, promo and ledger)

pub mod kv_store;

pub use kv_store::{KeyValueStore, StoreError, WriteOp};
