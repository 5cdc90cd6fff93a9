// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Create, wait on, edit and delete KafkaRebalance resources in system tests.

use crate::constants::{annotations, labels};
use crate::context::TestContext;
use crate::error::Result;
use crate::kubernetes::{create_or_replace, delete_foreground, replace_resource};
use crate::resources::manager::{ResourceLifecycle, ResourceManager};
use crate::resources::operation::timeout_for_kafka_rebalance_state;
use crate::template::config_from_yaml;
use crate::types::kafka_rebalance::{KafkaRebalance, KafkaRebalanceState, RebalanceAnnotation};
use crate::wait::wait_for;
use kube::{Api, ResourceExt};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

const CREATION_OPERATION: &str = "KafkaRebalance creation";

/// Stamp identity and the cluster label onto a KafkaRebalance template.
///
/// Labels carried by the template are dropped.
pub fn default_kafka_rebalance(
    mut template: KafkaRebalance,
    name: &str,
    namespace: &str,
) -> KafkaRebalance {
    template.metadata.name = Some(name.to_string());
    template.metadata.namespace = Some(namespace.to_string());
    template.metadata.labels = Some(BTreeMap::from([(
        labels::CLUSTER.to_string(),
        name.to_string(),
    )]));
    template
}

pub struct KafkaRebalanceResource<'a, L = ResourceManager> {
    ctx: &'a TestContext,
    lifecycle: &'a L,
}

impl<'a, L: ResourceLifecycle> KafkaRebalanceResource<'a, L> {
    pub fn new(ctx: &'a TestContext, lifecycle: &'a L) -> Self {
        Self { ctx, lifecycle }
    }

    pub fn kafka_rebalance_client(&self) -> Api<KafkaRebalance> {
        Api::namespaced(self.ctx.client.clone(), &self.ctx.namespace)
    }

    /// Load the configured template and prepare it for the cluster `name`
    pub fn kafka_rebalance(&self, name: &str) -> Result<KafkaRebalance> {
        let template: KafkaRebalance = config_from_yaml(&self.ctx.config.kafka_rebalance_template)?;
        Ok(default_kafka_rebalance(template, name, &self.ctx.namespace))
    }

    /// Submit `rebalance`, schedule it for cleanup and wait for `PendingProposal`.
    ///
    /// Submission is retried while a previous object of the same name is
    /// still terminating; any other API error fails on the spot.
    #[instrument(skip_all, fields(name = %rebalance.name_any(), namespace = %self.ctx.namespace))]
    pub async fn create_and_wait_for_readiness(
        &self,
        rebalance: KafkaRebalance,
    ) -> Result<KafkaRebalance> {
        let api = self.kafka_rebalance_client();
        let config = &self.ctx.config;

        {
            let api = &api;
            let rebalance = &rebalance;
            wait_for(
                CREATION_OPERATION,
                config.creation_poll_interval,
                config.creation_timeout,
                || async move {
                    match create_or_replace(api, rebalance).await {
                        Ok(_) => Ok(true),
                        Err(e) if e.is_transient_conflict() => {
                            debug!("{}, retrying", e);
                            Ok(false)
                        }
                        Err(e) => Err(e),
                    }
                },
            )
            .await?;
        }
        info!("KafkaRebalance {} submitted", rebalance.name_any());

        let rebalance = self.lifecycle.schedule_delete(rebalance);
        self.wait_for_rebalance(&api, &rebalance.name_any(), KafkaRebalanceState::PendingProposal)
            .await
    }

    /// Submit `rebalance` once, without retrying, cleanup or waiting
    #[instrument(skip_all, fields(name = %rebalance.name_any(), namespace = %self.ctx.namespace))]
    pub async fn kafka_rebalance_without_wait(
        &self,
        rebalance: KafkaRebalance,
    ) -> Result<KafkaRebalance> {
        create_or_replace(&self.kafka_rebalance_client(), &rebalance).await?;
        Ok(rebalance)
    }

    /// Request foreground deletion of `name` and return immediately
    pub async fn delete_kafka_rebalance_without_wait(&self, name: &str) -> Result<()> {
        info!("Deleting KafkaRebalance {}/{}", self.ctx.namespace, name);
        delete_foreground(&self.kafka_rebalance_client(), name).await
    }

    /// Wait until `name` reports `state`, bounded by that state's timeout
    pub async fn wait_for_state(
        &self,
        name: &str,
        state: KafkaRebalanceState,
    ) -> Result<KafkaRebalance> {
        self.wait_for_rebalance(&self.kafka_rebalance_client(), name, state).await
    }

    async fn wait_for_rebalance(
        &self,
        api: &Api<KafkaRebalance>,
        name: &str,
        state: KafkaRebalanceState,
    ) -> Result<KafkaRebalance> {
        let timeout = timeout_for_kafka_rebalance_state(state);
        self.lifecycle.wait_for_status(api, name, state, timeout).await
    }

    /// Fetch `name`, let `editor` change it and write it back
    pub async fn replace_kafka_rebalance_resource<F>(
        &self,
        name: &str,
        editor: F,
    ) -> Result<KafkaRebalance>
    where
        F: FnOnce(&mut KafkaRebalance),
    {
        replace_resource(&self.kafka_rebalance_client(), name, editor).await
    }

    /// Set the `strimzi.io/rebalance` annotation on `name`
    pub async fn annotate_kafka_rebalance(
        &self,
        name: &str,
        annotation: RebalanceAnnotation,
    ) -> Result<KafkaRebalance> {
        info!("Annotating KafkaRebalance {} with {}", name, annotation);
        self.replace_kafka_rebalance_resource(name, |rebalance| {
            rebalance
                .annotations_mut()
                .insert(annotations::REBALANCE.to_string(), annotation.to_string());
        })
        .await
    }
}
