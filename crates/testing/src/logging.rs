// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 shardkey contributors

//! Log output for tests.
//!
//! Honours `RUST_LOG`; without it only warnings are printed. Output goes
//! through the test harness writer so it is captured per test.

use once_cell::sync::Lazy;
use tracing_subscriber::EnvFilter;

static SUBSCRIBER: Lazy<()> = Lazy::new(|| {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
	// another harness may already have installed a global subscriber
	let _ = tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().try_init();
});

/// Installs the test subscriber once per process.
pub fn init() {
	Lazy::force(&SUBSCRIBER);
}
