// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 shardkey contributors

pub mod wait;
