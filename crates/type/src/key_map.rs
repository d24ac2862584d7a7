// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 shardkey contributors

use std::{
	fmt::{Display, Formatter},
	ops::Deref,
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::Value;

/// The keys a shard generated for one inserted row, by column name.
///
/// A row normally carries exactly one entry: its auto-increment column.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyMap(IndexMap<String, Value>);

impl KeyMap {
	pub fn new() -> Self {
		Self(IndexMap::new())
	}

	/// A key map holding a single generated column.
	pub fn single(column: impl Into<String>, value: impl Into<Value>) -> Self {
		let mut result = Self::new();
		result.insert(column, value);
		result
	}

	pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
		self.0.insert(column.into(), value.into())
	}

	/// Returns the only entry, or `None` when the map is empty or holds
	/// more than one column.
	pub fn single_entry(&self) -> Option<(&str, &Value)> {
		if self.0.len() != 1 {
			return None;
		}
		self.0.first().map(|(column, value)| (column.as_str(), value))
	}
}

impl Deref for KeyMap {
	type Target = IndexMap<String, Value>;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for KeyMap {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}
}

impl Display for KeyMap {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("{")?;
		for (i, (column, value)) in self.0.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{}: {}", column, value)?;
		}
		f.write_str("}")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_single_entry() {
		let keys = KeyMap::single("id", 42i64);
		assert_eq!(keys.single_entry(), Some(("id", &Value::Int8(42))));
	}

	#[test]
	fn test_single_entry_empty() {
		assert_eq!(KeyMap::new().single_entry(), None);
	}

	#[test]
	fn test_single_entry_multiple_columns() {
		let keys: KeyMap = [("a", 1i64), ("b", 2i64)].into_iter().collect();
		assert_eq!(keys.len(), 2);
		assert_eq!(keys.single_entry(), None);
	}

	#[test]
	fn test_insertion_order_preserved() {
		let keys: KeyMap = [("z", 1i32), ("a", 2i32)].into_iter().collect();
		let columns: Vec<_> = keys.keys().cloned().collect();
		assert_eq!(columns, vec!["z".to_string(), "a".to_string()]);
	}

	#[test]
	fn test_display() {
		let keys: KeyMap = [("a", 1i64), ("b", 2i64)].into_iter().collect();
		assert_eq!(keys.to_string(), "{a: 1, b: 2}");
		assert_eq!(KeyMap::new().to_string(), "{}");
	}
}
