// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber honouring `RUST_LOG` (default `info`).
///
/// Safe to call repeatedly; only the first call installs anything. Unit tests
/// of this crate route output through libtest's capture.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    #[cfg(test)]
    let builder = builder.with_test_writer();
    let _ = builder.try_init();
}
