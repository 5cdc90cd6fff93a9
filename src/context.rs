// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Explicit client and namespace handed to every resource operation.

use crate::config::Config;
use anyhow::{Context, Result};
use kube::Client;
use tracing::info;

/// Kubernetes connection and namespace a test runs against
#[derive(Clone)]
pub struct TestContext {
    pub client: Client,
    pub namespace: String,
    pub config: Config,
}

impl TestContext {
    pub fn new(client: Client, namespace: impl Into<String>, config: Config) -> Self {
        Self {
            client,
            namespace: namespace.into(),
            config,
        }
    }

    /// Build a context from the environment and the inferred kubeconfig
    pub async fn from_env() -> Result<Self> {
        let config = Config::from_env()?;
        let client = Client::try_default()
            .await
            .context("Failed to create Kubernetes client")?;

        let namespace = config
            .namespace
            .clone()
            .unwrap_or_else(|| client.default_namespace().to_string());
        info!("Using test namespace {}", namespace);

        Ok(Self::new(client, namespace, config))
    }
}
