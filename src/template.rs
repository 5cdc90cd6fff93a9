// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! YAML resource templates

use crate::error::{HarnessError, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::{debug, instrument};

/// Read a YAML file and deserialize it into `K`
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn config_from_yaml<K: DeserializeOwned>(path: impl AsRef<Path>) -> Result<K> {
    let path = path.as_ref();
    debug!("Loading template {}", path.display());

    let content = fs::read_to_string(path).map_err(|e| HarnessError::Deserialization {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    serde_yaml::from_str(&content).map_err(|e| HarnessError::Deserialization {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
