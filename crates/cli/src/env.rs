// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the cook binary.

use tracing_subscriber::EnvFilter;

/// Cookbook path, read by `--file`.
pub const FILE: &str = "COOK_FILE";

/// Concurrency limit, read by `--cooks`.
pub const MAX_COOKS: &str = "COOK_MAX_COOKS";

/// Log filter directives (`tracing_subscriber` syntax).
pub const LOG: &str = "COOK_LOG";

/// Log filter from `COOK_LOG`, falling back to warnings only.
pub fn log_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG).unwrap_or_else(|_| EnvFilter::new("warn"))
}
