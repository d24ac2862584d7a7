// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 shardkey contributors

use shardkey_type::{KeyMap, Type, Value};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KeyHolderError {
	#[error("expected exactly one generated row, batch holds {actual}")]
	SizeMismatch {
		actual: usize,
	},

	#[error("generated keys are not merged yet: {received} of {expected} rows received")]
	MergeIncomplete {
		expected: usize,
		received: usize,
	},

	#[error("generated keys of row {row} have {entries} entries, expected exactly one: {keys}")]
	MalformedKeyMapping {
		row: usize,
		entries: usize,
		keys: KeyMap,
	},

	#[error("generated key '{column}' of row {row} is not numeric: {value}")]
	NonNumericKey {
		row: usize,
		column: String,
		value: Value,
	},

	#[error("primary key field '{field}' of {entity} has unsupported type {ty}")]
	UnsupportedKeyFieldType {
		entity: &'static str,
		field: &'static str,
		ty: Type,
	},

	#[error("failed to set primary key field '{field}' of {entity}: {reason}")]
	BackfillAssignmentFailed {
		entity: &'static str,
		field: &'static str,
		reason: String,
	},

	#[error("row index {index} out of range for {len} rows")]
	IndexOutOfRange {
		index: usize,
		len: usize,
	},

	#[error("single-shard keys cannot be added to a batch that requires merge")]
	MergeRequired,

	#[error("partial result holds {keys} generated keys for {indices} row indices")]
	PartialLengthMismatch {
		indices: usize,
		keys: usize,
	},

	#[error("{entity} declares no primary key")]
	MissingPrimaryKey {
		entity: &'static str,
	},

	#[error("{entity} declares a composite primary key {columns:?}, only single-column keys can be set back")]
	CompositePrimaryKey {
		entity: &'static str,
		columns: Vec<&'static str>,
	},
}

impl KeyHolderError {
	/// Stable identifier of the error kind.
	pub fn code(&self) -> &'static str {
		match self {
			KeyHolderError::SizeMismatch {
				..
			} => "KEY_001",
			KeyHolderError::MergeIncomplete {
				..
			} => "KEY_002",
			KeyHolderError::MalformedKeyMapping {
				..
			} => "KEY_003",
			KeyHolderError::NonNumericKey {
				..
			} => "KEY_004",
			KeyHolderError::UnsupportedKeyFieldType {
				..
			} => "KEY_005",
			KeyHolderError::BackfillAssignmentFailed {
				..
			} => "KEY_006",
			KeyHolderError::IndexOutOfRange {
				..
			} => "KEY_007",
			KeyHolderError::MergeRequired => "KEY_008",
			KeyHolderError::PartialLengthMismatch {
				..
			} => "KEY_009",
			KeyHolderError::MissingPrimaryKey {
				..
			} => "KEY_010",
			KeyHolderError::CompositePrimaryKey {
				..
			} => "KEY_011",
		}
	}
}
