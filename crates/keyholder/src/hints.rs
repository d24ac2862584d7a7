// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 shardkey contributors

use std::sync::Arc;

use crate::KeyHolder;

/// Whether an insert may supply explicit values for identity columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentityInsert {
	/// The store generates identity values; inserted rows never carry them.
	#[default]
	Disabled,
	/// Inserted rows carry their own identity values.
	Enabled,
}

/// Per-call options of a batch insert.
#[derive(Debug, Clone, Default)]
pub struct InsertHints {
	/// Collects the keys generated by the insert
	pub key_holder: Option<Arc<KeyHolder>>,
	/// Write generated keys back into the inserted entities
	pub set_identity_back: bool,
	pub identity_insert: IdentityInsert,
}

impl InsertHints {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_key_holder(mut self, key_holder: Arc<KeyHolder>) -> Self {
		self.key_holder = Some(key_holder);
		self
	}

	pub fn with_identity_back(mut self) -> Self {
		self.set_identity_back = true;
		self
	}

	pub fn with_identity_insert(mut self, identity_insert: IdentityInsert) -> Self {
		self.identity_insert = identity_insert;
		self
	}

	pub fn key_holder(&self) -> Option<&KeyHolder> {
		self.key_holder.as_deref()
	}

	/// Generated keys are set back only when requested and when the store,
	/// not the caller, produced the identity values.
	pub fn backfill_enabled(&self) -> bool {
		self.set_identity_back && self.identity_insert == IdentityInsert::Disabled
	}
}
