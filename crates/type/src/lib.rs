// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 shardkey contributors

pub mod key_map;
pub mod value;

pub use key_map::KeyMap;
pub use value::{Type, Value, number::SafeConvert};
