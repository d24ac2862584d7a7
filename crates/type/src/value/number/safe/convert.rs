// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 shardkey contributors

//! Narrowing between primitive integer widths.

pub trait SafeConvert<T>: Sized {
	/// Keeps the low bits of `self` (two's complement truncation).
	fn wrapping_convert(self) -> T;
}

macro_rules! impl_safe_convert {
	($src:ty => $($dst:ty),+) => {
		$(
			impl SafeConvert<$dst> for $src {
				#[inline]
				fn wrapping_convert(self) -> $dst {
					self as $dst
				}
			}
		)+
	};
}

impl_safe_convert!(i8 => i8, i16, i32, i64);
impl_safe_convert!(i16 => i8, i16, i32, i64);
impl_safe_convert!(i32 => i8, i16, i32, i64);
impl_safe_convert!(i64 => i8, i16, i32, i64);
impl_safe_convert!(i128 => i8, i16, i32, i64);
impl_safe_convert!(u8 => i8, i16, i32, i64);
impl_safe_convert!(u16 => i8, i16, i32, i64);
impl_safe_convert!(u32 => i8, i16, i32, i64);
impl_safe_convert!(u64 => i8, i16, i32, i64);
impl_safe_convert!(u128 => i8, i16, i32, i64);

#[cfg(test)]
mod tests {
	use super::SafeConvert;

	mod i8 {
		use super::*;

		#[test]
		fn test_wrapping_convert_in_range() {
			let x: i64 = 42;
			let y: i8 = x.wrapping_convert();
			assert_eq!(y, 42i8);
		}

		#[test]
		fn test_wrapping_convert() {
			let x: u64 = 500;
			let y: i8 = x.wrapping_convert();
			assert_eq!(y, -12i8);
		}
	}

	mod i16 {
		use super::*;

		#[test]
		fn test_wrapping_convert() {
			let x: i64 = 100000;
			let y: i16 = x.wrapping_convert();
			assert_eq!(y, -31072i16);
		}
	}

	mod i32 {
		use super::*;

		#[test]
		fn test_wrapping_convert() {
			let x: i64 = 5000000000;
			let y: i32 = x.wrapping_convert();
			assert_eq!(y, 705032704i32);
		}
	}

	mod i64 {
		use super::*;

		#[test]
		fn test_wrapping_convert_widening() {
			let x: i8 = -3;
			let y: i64 = x.wrapping_convert();
			assert_eq!(y, -3i64);
		}

		#[test]
		fn test_wrapping_convert() {
			let x: u64 = 10000000000000000000;
			let y: i64 = x.wrapping_convert();
			assert_eq!(y, -8446744073709551616i64);
		}
	}
}
