// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 shardkey contributors

use std::{
	sync::atomic::{AtomicBool, AtomicUsize, Ordering},
	time::{Duration, Instant},
};

use dashmap::DashMap;
use shardkey_runtime::sync::{Condvar, Mutex, RwLock, RwLockReadGuard};
use shardkey_type::{KeyMap, Value};
use tracing::{debug, instrument, trace, warn};

use crate::{KeyHolderError, Result};

/// Generated keys of one logical insert batch.
///
/// Keys of a single-shard batch are appended in row order with
/// [`add_key`](Self::add_key) and are readable immediately.
///
/// A batch scattered across shards is marked with
/// [`require_merge`](Self::require_merge) and sized with
/// [`set_size`](Self::set_size). Each shard reports its rows with
/// [`add_partial`](Self::add_partial), in any order and from any thread. Once
/// every row index `0..size` has been reported the holder rebuilds the row
/// order exactly once and becomes merged. Merged is terminal.
#[derive(Debug, Default)]
pub struct KeyHolder {
	expected: AtomicUsize,
	require_merge: AtomicBool,
	merged: AtomicBool,
	ordered: RwLock<Vec<KeyMap>>,
	partial: DashMap<usize, KeyMap>,
	merge_lock: Mutex<()>,
	merge_signal: Condvar,
}

impl KeyHolder {
	pub fn new() -> Self {
		Self::default()
	}

	/// A holder for a batch of `size` rows spread over several shards.
	pub fn cross_shard(size: usize) -> Self {
		let result = Self::new();
		result.set_size(size);
		result.require_merge();
		result
	}

	/// Records the number of rows of a cross-shard batch. Must be called
	/// before the first partial result is added.
	pub fn set_size(&self, size: usize) {
		self.expected.store(size, Ordering::Release);
	}

	/// The recorded batch size, or the number of keys added so far when no
	/// size was recorded.
	pub fn size(&self) -> usize {
		match self.expected() {
			0 => self.ordered.read().len(),
			expected => expected,
		}
	}

	/// Marks the batch as spread over several shards. Irreversible.
	pub fn require_merge(&self) {
		self.require_merge.store(true, Ordering::Release);
	}

	pub fn is_require_merge(&self) -> bool {
		self.require_merge.load(Ordering::Acquire)
	}

	pub fn is_merged(&self) -> bool {
		self.merged.load(Ordering::Acquire)
	}

	/// Number of distinct rows reported through partial results.
	pub fn received(&self) -> usize {
		self.partial.len()
	}

	/// Blocks until the partial results have been merged.
	///
	/// Never returns for a holder that does not require merge.
	#[instrument(name = "keyholder::wait_for_merge", level = "trace", skip(self))]
	pub fn wait_for_merge(&self) {
		let mut guard = self.merge_lock.lock();
		while !self.is_merged() {
			self.merge_signal.wait(&mut guard);
		}
	}

	/// Blocks until the partial results have been merged or `timeout` has
	/// elapsed, whichever comes first.
	///
	/// Running out of time is not an error. The returned flag is the merge
	/// state observed on return; callers that did not get `true` must not
	/// rely on the strict accessors.
	#[instrument(name = "keyholder::wait_for_merge_timeout", level = "trace", skip(self))]
	pub fn wait_for_merge_timeout(&self, timeout: Duration) -> bool {
		let Some(deadline) = Instant::now().checked_add(timeout) else {
			self.wait_for_merge();
			return true;
		};

		let mut guard = self.merge_lock.lock();
		while !self.is_merged() {
			if self.merge_signal.wait_until(&mut guard, deadline).timed_out() {
				let merged = self.is_merged();
				if !merged {
					warn!(
						?timeout,
						received = self.received(),
						expected = self.expected(),
						"gave up waiting for generated keys to merge"
					);
				}
				return merged;
			}
		}
		true
	}

	/// Appends the generated keys of the next row of a single-shard batch.
	pub fn add_key(&self, keys: KeyMap) -> Result<()> {
		if self.is_require_merge() {
			return Err(KeyHolderError::MergeRequired);
		}
		self.ordered.write().push(keys);
		Ok(())
	}

	/// Adds the keys one shard generated for a cross-shard batch.
	///
	/// `indices[i]` is the position in the logical batch of the `i`-th row
	/// held by `partial`. Results may arrive in any order and concurrently;
	/// the contribution that completes the batch triggers the merge.
	#[instrument(name = "keyholder::add_partial", level = "trace", skip(self, indices, partial), fields(rows = indices.len()))]
	pub fn add_partial(&self, indices: &[usize], partial: &KeyHolder) -> Result<()> {
		let expected = self.expected();
		{
			let keys = partial.ordered.read();
			if indices.len() != keys.len() {
				return Err(KeyHolderError::PartialLengthMismatch {
					indices: indices.len(),
					keys: keys.len(),
				});
			}

			if expected != 0 {
				if let Some(&index) = indices.iter().find(|&&index| index >= expected) {
					return Err(KeyHolderError::IndexOutOfRange {
						index,
						len: expected,
					});
				}
			}

			for (&index, key) in indices.iter().zip(keys.iter()) {
				self.partial.insert(index, key.clone());
			}
		}

		let received = self.received();
		trace!(received, expected, "partial generated keys added");

		if expected != 0 && received == expected {
			self.merge()?;
		}
		Ok(())
	}

	#[instrument(name = "keyholder::merge", level = "debug", skip(self))]
	fn merge(&self) -> Result<()> {
		let _guard = self.merge_lock.lock();
		if self.is_merged() {
			return Ok(());
		}

		let expected = self.expected();
		let mut merged = Vec::with_capacity(expected);
		for index in 0..expected {
			match self.partial.get(&index) {
				Some(entry) => merged.push(entry.value().clone()),
				None => {
					return Err(KeyHolderError::MergeIncomplete {
						expected,
						received: self.received(),
					});
				}
			}
		}

		*self.ordered.write() = merged;
		// readers that observe the flag must also observe the rebuilt rows
		self.merged.store(true, Ordering::Release);
		self.merge_signal.notify_all();

		debug!(rows = expected, "cross-shard generated keys merged");
		Ok(())
	}

	/// The generated key of a single-row batch.
	pub fn get_key(&self) -> Result<Value> {
		let keys = self.get_keys()?;
		extract_id(&keys, 0)
	}

	/// The generated key of row `index`.
	///
	/// Unlike [`get_key_list`](Self::get_key_list) this does not insist on a
	/// completed merge: when the shard owning `index` has already reported,
	/// its key is returned even while other shards are still running. Rows
	/// whose shard has not reported yet fail with `MergeIncomplete`.
	pub fn get_key_at(&self, index: usize) -> Result<Value> {
		if self.size() != 0 && self.is_require_merge() && !self.is_merged() {
			if let Some(keys) = self.partial.get(&index) {
				return extract_id(keys.value(), index);
			}
		}

		let ordered = self.ordered_checked()?;
		let keys = ordered.get(index).ok_or(KeyHolderError::IndexOutOfRange {
			index,
			len: ordered.len(),
		})?;
		extract_id(keys, index)
	}

	/// The generated keys of a single-row batch.
	pub fn get_keys(&self) -> Result<KeyMap> {
		let size = self.size();
		if size != 1 {
			return Err(KeyHolderError::SizeMismatch {
				actual: size,
			});
		}

		let ordered = self.ordered_checked()?;
		ordered.first().cloned().ok_or(KeyHolderError::IndexOutOfRange {
			index: 0,
			len: 0,
		})
	}

	/// The generated keys of every row, in batch order.
	pub fn get_key_list(&self) -> Result<Vec<KeyMap>> {
		Ok(self.ordered_checked()?.clone())
	}

	/// The generated key of every row, in batch order.
	pub fn get_id_list(&self) -> Result<Vec<Value>> {
		let ordered = self.ordered_checked()?;
		ordered.iter().enumerate().map(|(row, keys)| extract_id(keys, row)).collect()
	}

	fn expected(&self) -> usize {
		self.expected.load(Ordering::Acquire)
	}

	fn ordered_checked(&self) -> Result<RwLockReadGuard<'_, Vec<KeyMap>>> {
		if self.is_require_merge() && !self.is_merged() {
			return Err(KeyHolderError::MergeIncomplete {
				expected: self.expected(),
				received: self.received(),
			});
		}
		Ok(self.ordered.read())
	}
}

fn extract_id(keys: &KeyMap, row: usize) -> Result<Value> {
	let (column, value) = keys.single_entry().ok_or_else(|| KeyHolderError::MalformedKeyMapping {
		row,
		entries: keys.len(),
		keys: keys.clone(),
	})?;

	if !value.is_number() {
		return Err(KeyHolderError::NonNumericKey {
			row,
			column: column.to_string(),
			value: value.clone(),
		});
	}
	Ok(value.clone())
}
