// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 shardkey contributors

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

pub mod number;
mod r#type;

use number::SafeConvert;
pub use r#type::Type;

/// A value generated by a shard, represented as a native Rust type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
	/// Value is not defined (think null in common programming languages)
	Undefined,
	/// A boolean: true or false.
	Boolean(bool),
	/// A 4-byte floating point
	Float4(f32),
	/// An 8-byte floating point
	Float8(f64),
	/// A 1-byte signed integer
	Int1(i8),
	/// A 2-byte signed integer
	Int2(i16),
	/// A 4-byte signed integer
	Int4(i32),
	/// An 8-byte signed integer
	Int8(i64),
	/// A 16-byte signed integer
	Int16(i128),
	/// A 1-byte unsigned integer
	Uint1(u8),
	/// A 2-byte unsigned integer
	Uint2(u16),
	/// A 4-byte unsigned integer
	Uint4(u32),
	/// A 8-byte unsigned integer
	Uint8(u64),
	/// A 16-byte unsigned integer
	Uint16(u128),
	/// A UTF-8 encoded text
	Utf8(String),
}

impl Value {
	pub fn get_type(&self) -> Type {
		match self {
			Value::Undefined => Type::Undefined,
			Value::Boolean(_) => Type::Boolean,
			Value::Float4(_) => Type::Float4,
			Value::Float8(_) => Type::Float8,
			Value::Int1(_) => Type::Int1,
			Value::Int2(_) => Type::Int2,
			Value::Int4(_) => Type::Int4,
			Value::Int8(_) => Type::Int8,
			Value::Int16(_) => Type::Int16,
			Value::Uint1(_) => Type::Uint1,
			Value::Uint2(_) => Type::Uint2,
			Value::Uint4(_) => Type::Uint4,
			Value::Uint8(_) => Type::Uint8,
			Value::Uint16(_) => Type::Uint16,
			Value::Utf8(_) => Type::Utf8,
		}
	}

	pub fn is_number(&self) -> bool {
		self.get_type().is_number()
	}

	/// Narrows a numeric value to `i64`, keeping the low 64 bits of wider
	/// integers. Floats are truncated toward zero and clamped to the `i64`
	/// range. Returns `None` for non-numeric values.
	pub fn to_i64_wrapping(&self) -> Option<i64> {
		match self {
			Value::Int1(v) => Some(v.wrapping_convert()),
			Value::Int2(v) => Some(v.wrapping_convert()),
			Value::Int4(v) => Some(v.wrapping_convert()),
			Value::Int8(v) => Some(*v),
			Value::Int16(v) => Some(v.wrapping_convert()),
			Value::Uint1(v) => Some(v.wrapping_convert()),
			Value::Uint2(v) => Some(v.wrapping_convert()),
			Value::Uint4(v) => Some(v.wrapping_convert()),
			Value::Uint8(v) => Some(v.wrapping_convert()),
			Value::Uint16(v) => Some(v.wrapping_convert()),
			Value::Float4(v) => Some(*v as i64),
			Value::Float8(v) => Some(*v as i64),
			Value::Undefined | Value::Boolean(_) | Value::Utf8(_) => None,
		}
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Undefined => f.write_str("undefined"),
			Value::Boolean(value) => Display::fmt(value, f),
			Value::Float4(value) => Display::fmt(value, f),
			Value::Float8(value) => Display::fmt(value, f),
			Value::Int1(value) => Display::fmt(value, f),
			Value::Int2(value) => Display::fmt(value, f),
			Value::Int4(value) => Display::fmt(value, f),
			Value::Int8(value) => Display::fmt(value, f),
			Value::Int16(value) => Display::fmt(value, f),
			Value::Uint1(value) => Display::fmt(value, f),
			Value::Uint2(value) => Display::fmt(value, f),
			Value::Uint4(value) => Display::fmt(value, f),
			Value::Uint8(value) => Display::fmt(value, f),
			Value::Uint16(value) => Display::fmt(value, f),
			Value::Utf8(value) => Display::fmt(value, f),
		}
	}
}

macro_rules! impl_from_primitive {
	($($t:ty => $variant:ident),+ $(,)?) => {
		$(
			impl From<$t> for Value {
				fn from(v: $t) -> Self {
					Value::$variant(v)
				}
			}
		)+
	};
}

impl_from_primitive!(
	bool => Boolean,
	f32 => Float4,
	f64 => Float8,
	i8 => Int1,
	i16 => Int2,
	i32 => Int4,
	i64 => Int8,
	i128 => Int16,
	u8 => Uint1,
	u16 => Uint2,
	u32 => Uint4,
	u64 => Uint8,
	u128 => Uint16,
	String => Utf8,
);

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::Utf8(v.to_string())
	}
}
