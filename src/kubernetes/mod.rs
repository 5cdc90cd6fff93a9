// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes CRUD primitives shared by the resource helpers.

pub mod operations;

pub use operations::{create_or_replace, delete_foreground, replace_resource};
