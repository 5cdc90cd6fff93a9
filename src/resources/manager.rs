// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Deferred cleanup and status waiting shared by the resource helpers.

use crate::error::{HarnessError, Result};
use crate::wait::wait_for_value;
use kube::{
    api::{ApiResource, DeleteParams, DynamicObject},
    Api, Client, Resource, ResourceExt,
};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::{Debug, Display};
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// A resource whose status reports a single lifecycle state
pub trait StatefulResource:
    Resource<DynamicType = ()>
    + Clone
    + DeserializeOwned
    + Serialize
    + Debug
    + Send
    + Sync
    + 'static
{
    type State: Copy + PartialEq + Display + Debug + Send + Sync;

    fn current_state(&self) -> Option<Self::State>;

    /// Human-readable status conditions, for diagnostics
    fn status_summary(&self) -> String;
}

/// Registry and waiting capability injected into the resource helpers
pub trait ResourceLifecycle: Send + Sync {
    /// Register `resource` for deletion at teardown and hand it back
    fn schedule_delete<K>(&self, resource: K) -> K
    where
        K: Resource<DynamicType = ()>;

    /// Poll `name` until its state equals `target`
    fn wait_for_status<K>(
        &self,
        api: &Api<K>,
        name: &str,
        target: K::State,
        timeout: Duration,
    ) -> impl Future<Output = Result<K>> + Send
    where
        K: StatefulResource;
}

struct ScheduledDeletion {
    resource: ApiResource,
    namespace: Option<String>,
    name: String,
}

/// Cluster-backed [`ResourceLifecycle`] keeping a LIFO deletion registry
pub struct ResourceManager {
    client: Client,
    poll_interval: Duration,
    scheduled: Mutex<Vec<ScheduledDeletion>>,
}

impl ResourceManager {
    pub fn new(client: Client, poll_interval: Duration) -> Self {
        Self {
            client,
            poll_interval,
            scheduled: Mutex::new(Vec::new()),
        }
    }

    /// Number of resources waiting for teardown
    pub fn scheduled_len(&self) -> usize {
        self.scheduled.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Delete every scheduled resource, newest first.
    ///
    /// Resources that are already gone are skipped. Every entry is attempted
    /// even when an earlier deletion fails.
    #[instrument(skip(self))]
    pub async fn delete_scheduled(&self) -> Result<()> {
        let scheduled =
            std::mem::take(&mut *self.scheduled.lock().unwrap_or_else(|e| e.into_inner()));
        info!("Deleting {} scheduled resources", scheduled.len());

        let mut failures = Vec::new();
        for entry in scheduled.into_iter().rev() {
            let api: Api<DynamicObject> = match &entry.namespace {
                Some(ns) => Api::namespaced_with(self.client.clone(), ns, &entry.resource),
                None => Api::all_with(self.client.clone(), &entry.resource),
            };

            match api.delete(&entry.name, &DeleteParams::foreground()).await {
                Ok(_) => info!("Deleted {} {}", entry.resource.kind, entry.name),
                Err(kube::Error::Api(err)) if err.code == 404 => {
                    debug!("{} {} already deleted", entry.resource.kind, entry.name)
                }
                Err(e) => {
                    warn!("Failed to delete {} {}: {}", entry.resource.kind, entry.name, e);
                    failures.push(format!("{} {}: {}", entry.resource.kind, entry.name, e));
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(HarnessError::Cleanup(failures.join("; ")))
        }
    }
}

impl ResourceLifecycle for ResourceManager {
    fn schedule_delete<K>(&self, resource: K) -> K
    where
        K: Resource<DynamicType = ()>,
    {
        let entry = ScheduledDeletion {
            resource: ApiResource::erase::<K>(&()),
            namespace: resource.namespace(),
            name: resource.name_any(),
        };
        debug!("Scheduling {} {} for deletion", entry.resource.kind, entry.name);
        self.scheduled
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(entry);
        resource
    }

    #[instrument(skip(self, api))]
    async fn wait_for_status<K>(
        &self,
        api: &Api<K>,
        name: &str,
        target: K::State,
        timeout: Duration,
    ) -> Result<K>
    where
        K: StatefulResource,
    {
        let description = format!("{} {} to reach state {}", K::kind(&()), name, target);
        info!("Waiting for {}", description);

        let last_status = Mutex::new("not found".to_string());
        let result = wait_for_value(&description, self.poll_interval, timeout, || {
            let last_status = &last_status;
            async move {
                let observed = api.get_opt(name).await?;
                if let Some(r) = &observed {
                    *last_status.lock().unwrap_or_else(|e| e.into_inner()) = r.status_summary();
                }
                Ok::<_, HarnessError>(observed.filter(|r| r.current_state() == Some(target)))
            }
        })
        .await;

        if let Err(HarnessError::Timeout { .. }) = &result {
            warn!(
                "{} {} did not reach {} in time, last observed status: {}",
                K::kind(&()),
                name,
                target,
                last_status.into_inner().unwrap_or_else(|e| e.into_inner())
            );
        }
        result
    }
}
