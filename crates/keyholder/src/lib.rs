// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 shardkey contributors

//! Collects the keys generated by sharded batch inserts and sets them back
//! onto the inserted entities.
//!
//! A [`KeyHolder`] is created per logical insert batch. Single-shard batches
//! append one [`KeyMap`] per row with [`KeyHolder::add_key`]. Batches that were
//! scattered across shards are marked with [`KeyHolder::require_merge`]; every
//! shard then reports its rows through [`KeyHolder::add_partial`] and the holder
//! merges them into batch order once the last row has arrived.
//!
//! [`KeyBackWriter`] copies the resolved keys into the primary-key field that
//! an [`Entity`] declares.

pub mod backfill;
pub mod entity;
pub mod error;
pub mod hints;
pub mod holder;

pub use backfill::KeyBackWriter;
pub use entity::{Entity, KeyField, KeySetter};
pub use error::KeyHolderError;
pub use hints::{IdentityInsert, InsertHints};
pub use holder::KeyHolder;
pub use shardkey_type::{KeyMap, Type, Value};

pub type Result<T> = std::result::Result<T, KeyHolderError>;
