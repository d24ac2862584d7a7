// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 shardkey contributors

//! RwLock synchronization primitive.

pub type RwLockReadGuard<'a, T> = parking_lot::RwLockReadGuard<'a, T>;

/// A reader-writer lock.
#[derive(Debug, Default)]
pub struct RwLock<T> {
	inner: parking_lot::RwLock<T>,
}

impl<T> RwLock<T> {
	#[inline]
	pub fn new(value: T) -> Self {
		Self {
			inner: parking_lot::RwLock::new(value),
		}
	}

	/// Acquires shared read access, blocking while a writer holds the lock.
	#[inline]
	pub fn read(&self) -> RwLockReadGuard<'_, T> {
		self.inner.read()
	}

	/// Acquires exclusive write access.
	#[inline]
	pub fn write(&self) -> parking_lot::RwLockWriteGuard<'_, T> {
		self.inner.write()
	}
}
