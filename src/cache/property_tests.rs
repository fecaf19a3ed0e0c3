//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache's counting, capacity and eviction rules.

use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::thread::sleep;
use std::time::Duration;

use crate::cache::{estimate_size, CacheManager};

// == Test Configuration ==
const TEST_MAX_ENTRIES: usize = 100;
const TEST_MAX_MEMORY: usize = 50 * 1024 * 1024;
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates cache keys shaped like the ones the service builds
fn key_strategy() -> impl Strategy<Value = String> {
    ("[a-z0-9]{1,8}", prop::sample::select(vec!["5", "h", "d", "m", "y"]))
        .prop_map(|(iface, period)| CacheManager::generate_key("stats", &[iface.as_str(), period]))
}

/// Generates `{ "data": [...] }` payloads
fn payload_strategy() -> impl Strategy<Value = Value> {
    prop::collection::vec("[a-zA-Z0-9 |.]{0,40}", 0..6).prop_map(|lines| json!({ "data": lines }))
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: Value },
    Get { key: String },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), payload_strategy()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Delete { key }),
    ]
}

fn unique(keys: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    keys.into_iter().filter(|k| seen.insert(k.clone())).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Counters track exactly what happened and memory usage matches the entries held
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mut cache = CacheManager::new(TEST_MAX_ENTRIES, TEST_MAX_MEMORY);
        let (mut hits, mut misses, mut sets, mut deletes) = (0u64, 0u64, 0u64, 0u64);
        let mut live: std::collections::HashMap<String, Value> = Default::default();

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    cache.set(key.clone(), value.clone(), TEST_TTL);
                    live.insert(key, value);
                    sets += 1;
                }
                CacheOp::Get { key } => match cache.get(&key) {
                    Some(_) => hits += 1,
                    None => misses += 1,
                },
                CacheOp::Delete { key } => {
                    if cache.delete(&key) {
                        live.remove(&key);
                        deletes += 1;
                    }
                }
            }
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.hits, hits);
        prop_assert_eq!(stats.misses, misses);
        prop_assert_eq!(stats.sets, sets);
        prop_assert_eq!(stats.deletes, deletes);
        prop_assert_eq!(stats.entries, live.len());
        let expected_bytes: usize = live.values().map(estimate_size).sum();
        prop_assert_eq!(stats.memory_bytes, expected_bytes);
    }

    // hit rate is hits / (hits + misses) as a percentage
    #[test]
    fn prop_hit_rate_formula(gets in prop::collection::vec(any::<bool>(), 0..40)) {
        let mut cache = CacheManager::new(TEST_MAX_ENTRIES, TEST_MAX_MEMORY);
        cache.set("present", json!("x"), TEST_TTL);

        for hit in &gets {
            let _ = cache.get(if *hit { "present" } else { "absent" });
        }

        let stats = cache.stats();
        let total = stats.hits + stats.misses;
        if total == 0 {
            prop_assert_eq!(stats.hit_rate(), 0.0);
        } else {
            let expected = stats.hits as f64 / total as f64 * 100.0;
            prop_assert!((stats.hit_rate() - expected).abs() < 1e-9);
        }
    }

    // A value read back before its TTL is the value stored
    #[test]
    fn prop_roundtrip_before_ttl(key in key_strategy(), value in payload_strategy()) {
        let mut cache = CacheManager::new(TEST_MAX_ENTRIES, TEST_MAX_MEMORY);
        cache.set(key.clone(), value.clone(), TEST_TTL);
        prop_assert_eq!(cache.get(&key), Some(value));
    }

    // Entry count never exceeds max_entries once a set returns
    #[test]
    fn prop_capacity_enforcement(
        entries in prop::collection::vec((key_strategy(), payload_strategy()), 1..200)
    ) {
        let max_entries = 20;
        let mut cache = CacheManager::new(max_entries, TEST_MAX_MEMORY);

        for (key, value) in entries {
            cache.set(key, value, TEST_TTL);
            prop_assert!(
                cache.len() <= max_entries,
                "Cache size {} exceeds max {}",
                cache.len(),
                max_entries
            );
        }
    }

    // Filling to capacity then inserting a new key evicts the first inserted key
    #[test]
    fn prop_lru_eviction_order(
        keys in prop::collection::vec(key_strategy(), 3..10),
        new_key in key_strategy()
    ) {
        let keys = unique(keys);
        prop_assume!(keys.len() >= 2);
        prop_assume!(!keys.contains(&new_key));

        let mut cache = CacheManager::new(keys.len(), TEST_MAX_MEMORY);
        for key in &keys {
            cache.set(key.clone(), json!(key), TEST_TTL);
        }

        cache.set(new_key.clone(), json!("new"), TEST_TTL);

        prop_assert_eq!(cache.len(), keys.len());
        prop_assert_eq!(cache.get(&keys[0]), None);
        prop_assert!(cache.get(&new_key).is_some());
        for key in keys.iter().skip(1) {
            prop_assert!(cache.get(key).is_some(), "Key '{}' should survive", key);
        }
    }

    // Reading a key protects it from the next eviction
    #[test]
    fn prop_lru_access_tracking(
        keys in prop::collection::vec(key_strategy(), 3..8),
        new_key in key_strategy()
    ) {
        let keys = unique(keys);
        prop_assume!(keys.len() >= 3);
        prop_assume!(!keys.contains(&new_key));

        let mut cache = CacheManager::new(keys.len(), TEST_MAX_MEMORY);
        for key in &keys {
            cache.set(key.clone(), json!(key), TEST_TTL);
        }

        let _ = cache.get(&keys[0]);
        cache.set(new_key.clone(), json!("new"), TEST_TTL);

        prop_assert!(cache.get(&keys[0]).is_some());
        prop_assert_eq!(cache.get(&keys[1]), None);
        prop_assert!(cache.get(&new_key).is_some());
    }
}

// Fewer cases for the time-sensitive TTL property
proptest! {
    #![proptest_config(ProptestConfig::with_cases(5))]

    #[test]
    fn prop_ttl_expiration_behavior(key in key_strategy(), value in payload_strategy()) {
        let mut cache = CacheManager::new(TEST_MAX_ENTRIES, TEST_MAX_MEMORY);

        cache.set(key.clone(), value.clone(), Duration::from_millis(40));
        prop_assert_eq!(cache.get(&key), Some(value));

        sleep(Duration::from_millis(100));

        prop_assert_eq!(cache.get(&key), None);
        prop_assert!(cache.is_empty());
    }
}

// Concurrent access through the shared lock leaves the cache consistent
proptest! {
    #![proptest_config(ProptestConfig::with_cases(30))]

    #[test]
    fn prop_concurrent_operation_correctness(
        operations in prop::collection::vec(cache_op_strategy(), 10..50)
    ) {
        use std::sync::Arc;
        use tokio::sync::RwLock;

        let rt = tokio::runtime::Runtime::new().unwrap();
        let max_entries = 10;

        rt.block_on(async {
            let cache = Arc::new(RwLock::new(CacheManager::new(max_entries, TEST_MAX_MEMORY)));
            let mut handles = vec![];

            for op in operations {
                let cache = Arc::clone(&cache);
                handles.push(tokio::spawn(async move {
                    let mut guard = cache.write().await;
                    match op {
                        CacheOp::Set { key, value } => guard.set(key, value, TEST_TTL),
                        CacheOp::Get { key } => {
                            if let Some(value) = guard.get(&key) {
                                assert!(value.get("data").is_some(), "Partial payload for {}", key);
                            }
                        }
                        CacheOp::Delete { key } => {
                            guard.delete(&key);
                        }
                    }
                }));
            }

            for handle in handles {
                handle.await.expect("Task should not panic");
            }

            let guard = cache.read().await;
            let stats = guard.stats();
            prop_assert!(stats.entries <= max_entries);
            prop_assert!(stats.hit_rate() >= 0.0 && stats.hit_rate() <= 100.0);
            Ok(())
        })?;
    }
}
