// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 shardkey contributors

//! Mutex synchronization primitive.

use std::ops::{Deref, DerefMut};

/// A mutual exclusion primitive for protecting shared data.
pub struct Mutex<T> {
	inner: parking_lot::Mutex<T>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Mutex<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Mutex").field("data", &self.inner).finish()
	}
}

impl<T> Mutex<T> {
	/// Creates a new mutex.
	#[inline]
	pub fn new(value: T) -> Self {
		Self {
			inner: parking_lot::Mutex::new(value),
		}
	}

	/// Acquires the mutex, blocking the current thread until it is able to do so.
	#[inline]
	pub fn lock(&self) -> MutexGuard<'_, T> {
		MutexGuard {
			inner: self.inner.lock(),
		}
	}
}

impl<T: Default> Default for Mutex<T> {
	fn default() -> Self {
		Self::new(T::default())
	}
}

/// A guard providing mutable access to the data protected by a Mutex.
pub struct MutexGuard<'a, T> {
	pub(in crate::sync) inner: parking_lot::MutexGuard<'a, T>,
}

impl<'a, T> Deref for MutexGuard<'a, T> {
	type Target = T;

	fn deref(&self) -> &T {
		&self.inner
	}
}

impl<'a, T> DerefMut for MutexGuard<'a, T> {
	fn deref_mut(&mut self) -> &mut T {
		&mut self.inner
	}
}
