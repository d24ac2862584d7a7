// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 shardkey contributors

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// The type tag of a [`Value`](crate::Value).
///
/// Also used by entity metadata to describe the declared type of a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
	Undefined,
	Boolean,
	Float4,
	Float8,
	Int1,
	Int2,
	Int4,
	Int8,
	Int16,
	Uint1,
	Uint2,
	Uint4,
	Uint8,
	Uint16,
	Utf8,
}

impl Type {
	pub fn is_number(&self) -> bool {
		self.is_integer() || matches!(self, Type::Float4 | Type::Float8)
	}

	pub fn is_integer(&self) -> bool {
		self.is_signed_integer() || self.is_unsigned_integer()
	}

	pub fn is_signed_integer(&self) -> bool {
		matches!(self, Type::Int1 | Type::Int2 | Type::Int4 | Type::Int8 | Type::Int16)
	}

	pub fn is_unsigned_integer(&self) -> bool {
		matches!(self, Type::Uint1 | Type::Uint2 | Type::Uint4 | Type::Uint8 | Type::Uint16)
	}
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Type::Undefined => f.write_str("UNDEFINED"),
			Type::Boolean => f.write_str("BOOL"),
			Type::Float4 => f.write_str("FLOAT4"),
			Type::Float8 => f.write_str("FLOAT8"),
			Type::Int1 => f.write_str("INT1"),
			Type::Int2 => f.write_str("INT2"),
			Type::Int4 => f.write_str("INT4"),
			Type::Int8 => f.write_str("INT8"),
			Type::Int16 => f.write_str("INT16"),
			Type::Uint1 => f.write_str("UINT1"),
			Type::Uint2 => f.write_str("UINT2"),
			Type::Uint4 => f.write_str("UINT4"),
			Type::Uint8 => f.write_str("UINT8"),
			Type::Uint16 => f.write_str("UINT16"),
			Type::Utf8 => f.write_str("UTF8"),
		}
	}
}
