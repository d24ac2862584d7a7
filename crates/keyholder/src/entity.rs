// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 shardkey contributors

use std::fmt::{Debug, Formatter};

use shardkey_type::Type;

/// Writes a generated key of one integer width into an entity field.
pub enum KeySetter<E> {
	Int1(fn(&mut E, i8)),
	Int2(fn(&mut E, i16)),
	Int4(fn(&mut E, i32)),
	Int8(fn(&mut E, i64)),
}

impl<E> KeySetter<E> {
	/// The width the setter accepts.
	pub fn get_type(&self) -> Type {
		match self {
			KeySetter::Int1(_) => Type::Int1,
			KeySetter::Int2(_) => Type::Int2,
			KeySetter::Int4(_) => Type::Int4,
			KeySetter::Int8(_) => Type::Int8,
		}
	}
}

impl<E> Clone for KeySetter<E> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<E> Copy for KeySetter<E> {}

impl<E> Debug for KeySetter<E> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "KeySetter({})", self.get_type())
	}
}

/// Describes one primary-key field of an entity.
pub struct KeyField<E> {
	pub name: &'static str,
	/// Declared type of the field
	pub ty: Type,
	/// `None` for fields that cannot be written
	pub setter: Option<KeySetter<E>>,
}

impl<E> KeyField<E> {
	pub const fn new(name: &'static str, ty: Type, setter: KeySetter<E>) -> Self {
		Self {
			name,
			ty,
			setter: Some(setter),
		}
	}

	pub const fn read_only(name: &'static str, ty: Type) -> Self {
		Self {
			name,
			ty,
			setter: None,
		}
	}
}

impl<E> Clone for KeyField<E> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<E> Copy for KeyField<E> {}

impl<E> Debug for KeyField<E> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("KeyField").field("name", &self.name).field("ty", &self.ty).field("setter", &self.setter).finish()
	}
}

/// Metadata of an insertable entity.
///
/// Implementations are usually generated alongside the entity definition.
pub trait Entity: Sized + 'static {
	/// Name used in error messages
	const NAME: &'static str;

	/// The primary-key fields, in key order.
	fn primary_key() -> &'static [KeyField<Self>];
}
