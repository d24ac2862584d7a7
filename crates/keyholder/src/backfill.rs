// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 shardkey contributors

use shardkey_type::{SafeConvert, Type, Value};
use tracing::{debug, instrument};

use crate::{Entity, InsertHints, KeyField, KeyHolder, KeyHolderError, KeySetter, Result};

/// Sets generated keys back into the primary-key field of inserted entities.
///
/// Entities are matched to generated keys by position: the entity at index
/// `i` receives the key of row `i`. Keys are narrowed to the declared width
/// of the field by keeping their low bits.
///
/// Nothing is written when the hints carry no key holder, when back-setting
/// was not requested, or when identity insert is enabled.
pub struct KeyBackWriter<'a> {
	hints: &'a InsertHints,
}

impl<'a> KeyBackWriter<'a> {
	pub fn new(hints: &'a InsertHints) -> Self {
		Self {
			hints,
		}
	}

	/// Sets the generated key of every row.
	#[instrument(name = "backfill::write_back", level = "debug", skip_all, fields(entity = E::NAME, rows = entities.len()))]
	pub fn write_back<E: Entity>(&self, entities: &mut [E]) -> Result<()> {
		let Some((holder, field)) = self.prepare::<E>(entities.len())? else {
			return Ok(());
		};

		for (index, entity) in entities.iter_mut().enumerate() {
			let key = holder.get_key_at(index)?;
			assign(field, entity, index, &key)?;
		}

		debug!(rows = entities.len(), "generated keys set back");
		Ok(())
	}

	/// Sets the generated keys of the rows at `indices` only.
	#[instrument(name = "backfill::write_back_at", level = "debug", skip_all, fields(entity = E::NAME, rows = indices.len()))]
	pub fn write_back_at<E: Entity>(&self, entities: &mut [E], indices: &[usize]) -> Result<()> {
		let Some((holder, field)) = self.prepare::<E>(entities.len())? else {
			return Ok(());
		};

		let len = entities.len();
		for &index in indices {
			let entity = entities.get_mut(index).ok_or(KeyHolderError::IndexOutOfRange {
				index,
				len,
			})?;
			let key = holder.get_key_at(index)?;
			assign(field, entity, index, &key)?;
		}

		debug!(rows = indices.len(), "generated keys set back");
		Ok(())
	}

	fn prepare<E: Entity>(&self, rows: usize) -> Result<Option<(&'a KeyHolder, &'static KeyField<E>)>> {
		let Some(holder) = self.hints.key_holder() else {
			return Ok(None);
		};
		if rows == 0 || !self.hints.backfill_enabled() {
			return Ok(None);
		}

		let field = primary_key_field::<E>()?;
		Ok(Some((holder, field)))
	}
}

/// Resolves the single primary-key field of `E` and checks that a generated
/// key can be written into it.
pub fn primary_key_field<E: Entity>() -> Result<&'static KeyField<E>> {
	let field = match E::primary_key() {
		[] => {
			return Err(KeyHolderError::MissingPrimaryKey {
				entity: E::NAME,
			});
		}
		[field] => field,
		fields => {
			return Err(KeyHolderError::CompositePrimaryKey {
				entity: E::NAME,
				columns: fields.iter().map(|field| field.name).collect(),
			});
		}
	};

	if !matches!(field.ty, Type::Int1 | Type::Int2 | Type::Int4 | Type::Int8) {
		return Err(KeyHolderError::UnsupportedKeyFieldType {
			entity: E::NAME,
			field: field.name,
			ty: field.ty,
		});
	}

	let Some(setter) = field.setter else {
		return Err(KeyHolderError::BackfillAssignmentFailed {
			entity: E::NAME,
			field: field.name,
			reason: "field is read-only".to_string(),
		});
	};

	if setter.get_type() != field.ty {
		return Err(KeyHolderError::BackfillAssignmentFailed {
			entity: E::NAME,
			field: field.name,
			reason: format!("field is declared as {} but its setter accepts {}", field.ty, setter.get_type()),
		});
	}

	Ok(field)
}

fn assign<E: Entity>(field: &KeyField<E>, entity: &mut E, row: usize, key: &Value) -> Result<()> {
	let raw = key.to_i64_wrapping().ok_or_else(|| KeyHolderError::NonNumericKey {
		row,
		column: field.name.to_string(),
		value: key.clone(),
	})?;

	match field.setter {
		Some(KeySetter::Int8(set)) => set(entity, raw),
		Some(KeySetter::Int4(set)) => set(entity, raw.wrapping_convert()),
		Some(KeySetter::Int2(set)) => set(entity, raw.wrapping_convert()),
		Some(KeySetter::Int1(set)) => set(entity, raw.wrapping_convert()),
		None => {
			return Err(KeyHolderError::BackfillAssignmentFailed {
				entity: E::NAME,
				field: field.name,
				reason: "field is read-only".to_string(),
			});
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use shardkey_type::KeyMap;

	use super::*;
	use crate::IdentityInsert;

	#[derive(Debug, Default, PartialEq)]
	struct Order {
		id: i32,
	}

	fn set_order_id(order: &mut Order, id: i32) {
		order.id = id;
	}

	impl Entity for Order {
		const NAME: &'static str = "Order";

		fn primary_key() -> &'static [KeyField<Self>] {
			const FIELDS: &[KeyField<Order>] = &[KeyField::new("id", Type::Int4, KeySetter::Int4(set_order_id))];
			FIELDS
		}
	}

	#[derive(Debug, Default)]
	struct Flag {
		code: i8,
	}

	fn set_flag_code(flag: &mut Flag, code: i8) {
		flag.code = code;
	}

	impl Entity for Flag {
		const NAME: &'static str = "Flag";

		fn primary_key() -> &'static [KeyField<Self>] {
			const FIELDS: &[KeyField<Flag>] = &[KeyField::new("code", Type::Int1, KeySetter::Int1(set_flag_code))];
			FIELDS
		}
	}

	#[derive(Debug, Default)]
	struct Invoice {
		number: i16,
	}

	fn set_invoice_number(invoice: &mut Invoice, number: i16) {
		invoice.number = number;
	}

	impl Entity for Invoice {
		const NAME: &'static str = "Invoice";

		fn primary_key() -> &'static [KeyField<Self>] {
			const FIELDS: &[KeyField<Invoice>] =
				&[KeyField::new("number", Type::Int2, KeySetter::Int2(set_invoice_number))];
			FIELDS
		}
	}

	struct Unkeyed;

	impl Entity for Unkeyed {
		const NAME: &'static str = "Unkeyed";

		fn primary_key() -> &'static [KeyField<Self>] {
			&[]
		}
	}

	struct Named;

	impl Entity for Named {
		const NAME: &'static str = "Named";

		fn primary_key() -> &'static [KeyField<Self>] {
			const FIELDS: &[KeyField<Named>] = &[KeyField::read_only("name", Type::Utf8)];
			FIELDS
		}
	}

	struct Frozen;

	impl Entity for Frozen {
		const NAME: &'static str = "Frozen";

		fn primary_key() -> &'static [KeyField<Self>] {
			const FIELDS: &[KeyField<Frozen>] = &[KeyField::read_only("id", Type::Int8)];
			FIELDS
		}
	}

	fn holder(keys: &[i64]) -> Arc<KeyHolder> {
		let result = KeyHolder::new();
		for &key in keys {
			result.add_key(KeyMap::single("id", key)).unwrap();
		}
		Arc::new(result)
	}

	fn hints(keys: &[i64]) -> InsertHints {
		InsertHints::new().with_key_holder(holder(keys)).with_identity_back()
	}

	#[test]
	fn test_write_back_all_rows() {
		let hints = hints(&[101, 102]);
		let mut orders = vec![Order::default(), Order::default()];

		KeyBackWriter::new(&hints).write_back(&mut orders).unwrap();

		assert_eq!(orders, vec![Order { id: 101 }, Order { id: 102 }]);
	}

	#[test]
	fn test_write_back_selected_rows() {
		let hints = hints(&[1, 2, 3]);
		let mut orders = vec![Order::default(), Order::default(), Order::default()];

		KeyBackWriter::new(&hints).write_back_at(&mut orders, &[0, 2]).unwrap();

		assert_eq!(orders, vec![Order { id: 1 }, Order { id: 0 }, Order { id: 3 }]);
	}

	#[test]
	fn test_write_back_narrows_by_truncation() {
		let hints = hints(&[300]);
		let mut flags = vec![Flag::default()];

		KeyBackWriter::new(&hints).write_back(&mut flags).unwrap();

		assert_eq!(flags[0].code, 44);
	}

	#[test]
	fn test_write_back_into_int2_field() {
		let hints = hints(&[1234, 100000, -40000]);
		let mut invoices = vec![Invoice::default(), Invoice::default(), Invoice::default()];

		KeyBackWriter::new(&hints).write_back(&mut invoices).unwrap();

		let numbers: Vec<i16> = invoices.iter().map(|invoice| invoice.number).collect();
		assert_eq!(numbers, vec![1234, -31072, 25536]);
	}

	#[test]
	fn test_no_op_without_holder() {
		let hints = InsertHints::new().with_identity_back();
		let mut orders = vec![Order::default()];

		KeyBackWriter::new(&hints).write_back(&mut orders).unwrap();

		assert_eq!(orders[0].id, 0);
	}

	#[test]
	fn test_no_op_when_not_requested() {
		let hints = InsertHints::new().with_key_holder(holder(&[5]));
		let mut orders = vec![Order::default()];

		KeyBackWriter::new(&hints).write_back(&mut orders).unwrap();

		assert_eq!(orders[0].id, 0);
	}

	#[test]
	fn test_no_op_with_identity_insert() {
		let hints = hints(&[5]).with_identity_insert(IdentityInsert::Enabled);
		let mut orders = vec![Order::default()];

		KeyBackWriter::new(&hints).write_back(&mut orders).unwrap();

		assert_eq!(orders[0].id, 0);
	}

	#[test]
	fn test_no_op_for_empty_entities() {
		let hints = hints(&[]);
		let mut unkeyed: Vec<Unkeyed> = vec![];

		KeyBackWriter::new(&hints).write_back(&mut unkeyed).unwrap();
	}

	#[test]
	fn test_missing_primary_key() {
		let hints = hints(&[1]);
		let mut rows = vec![Unkeyed];

		assert_eq!(
			KeyBackWriter::new(&hints).write_back(&mut rows),
			Err(KeyHolderError::MissingPrimaryKey {
				entity: "Unkeyed"
			})
		);
	}

	#[test]
	fn test_unsupported_field_type() {
		let hints = hints(&[1]);
		let mut rows = vec![Named];

		assert_eq!(
			KeyBackWriter::new(&hints).write_back(&mut rows),
			Err(KeyHolderError::UnsupportedKeyFieldType {
				entity: "Named",
				field: "name",
				ty: Type::Utf8,
			})
		);
	}

	#[test]
	fn test_read_only_field() {
		let hints = hints(&[1]);
		let mut rows = vec![Frozen];

		let err = KeyBackWriter::new(&hints).write_back(&mut rows).unwrap_err();
		assert_eq!(err.code(), "KEY_006");
		assert_eq!(err.to_string(), "failed to set primary key field 'id' of Frozen: field is read-only");
	}

	#[test]
	fn test_index_out_of_range() {
		let hints = hints(&[1, 2]);
		let mut orders = vec![Order::default()];

		assert_eq!(
			KeyBackWriter::new(&hints).write_back_at(&mut orders, &[1]),
			Err(KeyHolderError::IndexOutOfRange {
				index: 1,
				len: 1
			})
		);
	}

	#[test]
	fn test_more_entities_than_keys() {
		let hints = hints(&[1]);
		let mut orders = vec![Order::default(), Order::default()];

		assert_eq!(
			KeyBackWriter::new(&hints).write_back(&mut orders),
			Err(KeyHolderError::IndexOutOfRange {
				index: 1,
				len: 1
			})
		);
		assert_eq!(orders[0].id, 1);
	}
}
