//! Persisted record layout.
//!
//! Three independent JSON records live in the key-value store: the cart
//! (id → quantity object), the promo (code string) and the order ledger
//! (array of orders). A record that fails to parse reads as its empty
//! default.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::interfaces::kv_store::{KeyValueStore, Result, WriteOp};

/// Store keys for one storefront's records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordKeys {
    pub cart: String,
    pub promo: String,
    pub orders: String,
}

impl RecordKeys {
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            cart: format!("{}_cart", prefix),
            promo: format!("{}_promo", prefix),
            orders: format!("{}_orders", prefix),
        }
    }
}

impl Default for RecordKeys {
    fn default() -> Self {
        Self::with_prefix("orderit")
    }
}

/// Key under which an unreadable copy of `key` is set aside.
pub fn unreadable_key(key: &str) -> String {
    format!("{}_unreadable", key)
}

/// Read and decode a record, falling back to `T::default()` when the record
/// is absent or unreadable as `T`.
///
/// Store failures still propagate.
pub async fn load<T>(store: &dyn KeyValueStore, key: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    Ok(load_or_unreadable(store, key).await?.0)
}

/// Like [`load`], but also hands back the raw text of a record that failed
/// to decode, so a caller about to overwrite it can keep a copy.
pub async fn load_or_unreadable<T>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<(T, Option<String>)>
where
    T: DeserializeOwned + Default,
{
    let Some(raw) = store.get(key).await? else {
        return Ok((T::default(), None));
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok((value, None)),
        Err(e) => {
            warn!(key, error = %e, "Discarding corrupt record");
            Ok((T::default(), Some(raw)))
        }
    }
}

/// Encode a record as a put op.
pub fn put_op<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<WriteOp> {
    Ok(WriteOp::put(key, serde_json::to_string(value)?))
}

/// Encode and write a single record.
pub async fn save<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    store.put(key, serde_json::to_string(value)?).await
}
