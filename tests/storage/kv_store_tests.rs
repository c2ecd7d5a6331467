//! KeyValueStore interface tests.
//!
//! These tests verify the contract of the KeyValueStore trait.
//! Each storage implementation should run these tests.

use orderit::{KeyValueStore, WriteOp};

// =============================================================================
// KeyValueStore::get / put tests
// =============================================================================

pub async fn test_get_missing_key<S: KeyValueStore>(store: &S) {
    let value = store.get("test_missing").await.expect("get should succeed");
    assert!(value.is_none(), "missing key should read as None");
}

pub async fn test_put_then_get<S: KeyValueStore>(store: &S) {
    store
        .put("test_put_get", r#"{"m1":2}"#.to_string())
        .await
        .expect("put should succeed");

    let value = store.get("test_put_get").await.expect("get should succeed");
    assert_eq!(value.as_deref(), Some(r#"{"m1":2}"#));
}

pub async fn test_put_overwrites<S: KeyValueStore>(store: &S) {
    store.put("test_overwrite", "1".to_string()).await.unwrap();
    store.put("test_overwrite", "2".to_string()).await.unwrap();

    let value = store.get("test_overwrite").await.unwrap();
    assert_eq!(value.as_deref(), Some("2"), "latest put should win");
}

pub async fn test_put_preserves_unicode<S: KeyValueStore>(store: &S) {
    let value = r#"{"name":"Gulab Jamun (2) – ₹ 99"}"#.to_string();
    store.put("test_unicode", value.clone()).await.unwrap();

    assert_eq!(store.get("test_unicode").await.unwrap(), Some(value));
}

pub async fn test_keys_are_independent<S: KeyValueStore>(store: &S) {
    store.put("test_indep_a", "a".to_string()).await.unwrap();
    store.put("test_indep_b", "b".to_string()).await.unwrap();
    store.delete("test_indep_a").await.unwrap();

    assert!(store.get("test_indep_a").await.unwrap().is_none());
    assert_eq!(store.get("test_indep_b").await.unwrap().as_deref(), Some("b"));
}

// =============================================================================
// KeyValueStore::delete tests
// =============================================================================

pub async fn test_delete_existing<S: KeyValueStore>(store: &S) {
    store.put("test_delete", "x".to_string()).await.unwrap();
    store.delete("test_delete").await.expect("delete should succeed");

    assert!(store.get("test_delete").await.unwrap().is_none());
}

pub async fn test_delete_missing_is_ok<S: KeyValueStore>(store: &S) {
    store
        .delete("test_delete_missing")
        .await
        .expect("deleting a missing key should succeed");
}

// =============================================================================
// KeyValueStore::write_batch tests
// =============================================================================

pub async fn test_batch_applies_all_ops<S: KeyValueStore>(store: &S) {
    store.put("test_batch_promo", "\"COMBO50\"".to_string()).await.unwrap();

    store
        .write_batch(vec![
            WriteOp::put("test_batch_orders", "[]"),
            WriteOp::put("test_batch_cart", "{}"),
            WriteOp::delete("test_batch_promo"),
        ])
        .await
        .expect("batch should succeed");

    assert_eq!(store.get("test_batch_orders").await.unwrap().as_deref(), Some("[]"));
    assert_eq!(store.get("test_batch_cart").await.unwrap().as_deref(), Some("{}"));
    assert!(store.get("test_batch_promo").await.unwrap().is_none());
}

pub async fn test_batch_empty_is_ok<S: KeyValueStore>(store: &S) {
    store
        .write_batch(Vec::new())
        .await
        .expect("empty batch should succeed");
}

pub async fn test_batch_overwrites_existing<S: KeyValueStore>(store: &S) {
    store.put("test_batch_over", "old".to_string()).await.unwrap();
    store
        .write_batch(vec![WriteOp::put("test_batch_over", "new")])
        .await
        .unwrap();

    assert_eq!(store.get("test_batch_over").await.unwrap().as_deref(), Some("new"));
}

pub async fn test_batch_repeated_key_keeps_last_op<S: KeyValueStore>(store: &S) {
    store
        .write_batch(vec![
            WriteOp::put("test_batch_repeat", "first"),
            WriteOp::put("test_batch_repeat", "second"),
            WriteOp::put("test_batch_gone", "x"),
            WriteOp::delete("test_batch_gone"),
        ])
        .await
        .unwrap();

    assert_eq!(store.get("test_batch_repeat").await.unwrap().as_deref(), Some("second"));
    assert!(store.get("test_batch_gone").await.unwrap().is_none());
}

// =============================================================================
// Test runner macro
// =============================================================================

/// Run all KeyValueStore interface tests against a store implementation.
#[macro_export]
macro_rules! run_kv_store_tests {
    ($store:expr) => {
        use $crate::storage::kv_store_tests::*;

        // get / put tests
        test_get_missing_key($store).await;
        println!("  test_get_missing_key: PASSED");

        test_put_then_get($store).await;
        println!("  test_put_then_get: PASSED");

        test_put_overwrites($store).await;
        println!("  test_put_overwrites: PASSED");

        test_put_preserves_unicode($store).await;
        println!("  test_put_preserves_unicode: PASSED");

        test_keys_are_independent($store).await;
        println!("  test_keys_are_independent: PASSED");

        // delete tests
        test_delete_existing($store).await;
        println!("  test_delete_existing: PASSED");

        test_delete_missing_is_ok($store).await;
        println!("  test_delete_missing_is_ok: PASSED");

        // write_batch tests
        test_batch_applies_all_ops($store).await;
        println!("  test_batch_applies_all_ops: PASSED");

        test_batch_empty_is_ok($store).await;
        println!("  test_batch_empty_is_ok: PASSED");

        test_batch_overwrites_existing($store).await;
        println!("  test_batch_overwrites_existing: PASSED");

        test_batch_repeated_key_keeps_last_op($store).await;
        println!("  test_batch_repeated_key_keeps_last_op: PASSED");
    };
}
