// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod kubernetes;
pub mod logging;
pub mod resources;
pub mod template;
pub mod types;
pub mod wait;

#[cfg(test)]
pub mod test_utils;
