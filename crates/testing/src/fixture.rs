// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 shardkey contributors

use shardkey_type::{KeyMap, Value};

/// A single generated `id` column.
pub fn key(id: i64) -> KeyMap {
	KeyMap::single("id", id)
}

/// One single-column key map per id, in order.
pub fn keys(ids: impl IntoIterator<Item = i64>) -> Vec<KeyMap> {
	ids.into_iter().map(key).collect()
}

/// The ids as generated-key values, in order.
pub fn ids(ids: impl IntoIterator<Item = i64>) -> Vec<Value> {
	ids.into_iter().map(Value::Int8).collect()
}

/// Splits the row indices `0..rows` round-robin over `shards` groups, the
/// way a sharding strategy keyed on `id % shards` would.
///
/// # Panics
/// Panics if `shards` is zero.
pub fn scatter(rows: usize, shards: usize) -> Vec<Vec<usize>> {
	assert!(shards > 0, "scatter needs at least one shard");
	let mut result = vec![Vec::new(); shards];
	for index in 0..rows {
		result[index % shards].push(index);
	}
	result
}
