// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{poll, DEFAULT_KAFKA_REBALANCE_TEMPLATE};
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// System-test configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace override; the client's default namespace is used when unset
    pub namespace: Option<String>,
    /// Path of the KafkaRebalance YAML template
    pub kafka_rebalance_template: PathBuf,
    pub creation_poll_interval: Duration,
    pub readiness_poll_interval: Duration,
    pub creation_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            namespace: None,
            kafka_rebalance_template: PathBuf::from(DEFAULT_KAFKA_REBALANCE_TEMPLATE),
            creation_poll_interval: Duration::from_secs(poll::RESOURCE_CREATION_INTERVAL_SECS),
            readiness_poll_interval: Duration::from_secs(poll::RESOURCE_READINESS_INTERVAL_SECS),
            creation_timeout: Duration::from_secs(poll::CR_CREATION_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let secs = |key: &str, default: Duration| -> Result<Duration> {
            match lookup(key) {
                Some(value) => value
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .with_context(|| {
                        format!("{} must be a whole number of seconds, got '{}'", key, value)
                    }),
                None => Ok(default),
            }
        };

        Ok(Config {
            namespace: lookup("TEST_NAMESPACE").filter(|ns| !ns.is_empty()),
            kafka_rebalance_template: lookup("KAFKA_REBALANCE_TEMPLATE")
                .map(PathBuf::from)
                .unwrap_or(defaults.kafka_rebalance_template),
            creation_poll_interval: secs(
                "POLL_INTERVAL_FOR_RESOURCE_CREATION_SECS",
                defaults.creation_poll_interval,
            )?,
            readiness_poll_interval: secs(
                "POLL_INTERVAL_FOR_RESOURCE_READINESS_SECS",
                defaults.readiness_poll_interval,
            )?,
            creation_timeout: secs("CR_CREATION_TIMEOUT_SECS", defaults.creation_timeout)?,
        })
    }
}
