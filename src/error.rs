// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Failed to deserialize {}: {reason}", .path.display())]
    Deserialization { path: PathBuf, reason: String },

    #[error("Object {name} is still being deleted")]
    TransientConflict { name: String },

    #[error("Kubernetes API error: {0}")]
    Submission(#[from] kube::Error),

    #[error("{kind} {name} not found")]
    NotFound { kind: String, name: String },

    #[error("Timeout after {timeout:?} waiting for {operation}")]
    Timeout { operation: String, timeout: Duration },

    #[error("Cleanup failed: {0}")]
    Cleanup(String),
}

impl HarnessError {
    pub fn is_transient_conflict(&self) -> bool {
        matches!(self, HarnessError::TransientConflict { .. })
    }
}

pub type Result<T> = std::result::Result<T, HarnessError>;
