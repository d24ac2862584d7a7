// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 shardkey contributors

//! Synchronization primitives backed by `parking_lot`.
//!
//! None of these locks poison: a panic while holding a guard releases the
//! lock and leaves the protected data as it was.

pub mod condvar;
pub mod mutex;
pub mod rwlock;

pub use condvar::{Condvar, WaitTimeoutResult};
pub use mutex::{Mutex, MutexGuard};
pub use rwlock::{RwLock, RwLockReadGuard};
