// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Generic create-or-replace, edit and delete calls on namespaced resources

use crate::constants::OBJECT_BEING_DELETED;
use crate::error::{HarnessError, Result};
use kube::{
    api::{DeleteParams, PostParams},
    Api, Resource, ResourceExt,
};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use tracing::{debug, info, instrument};

/// Map an API failure to a transient conflict when the object is still terminating
pub fn classify(error: kube::Error, name: &str) -> HarnessError {
    if is_being_deleted(&error) {
        HarnessError::TransientConflict {
            name: name.to_string(),
        }
    } else {
        HarnessError::Submission(error)
    }
}

fn is_being_deleted(error: &kube::Error) -> bool {
    matches!(error, kube::Error::Api(err) if err.message.contains(OBJECT_BEING_DELETED))
}

/// Create `resource`, or replace the live object of the same name
#[instrument(skip_all, fields(name = %resource.name_any()))]
pub async fn create_or_replace<K>(api: &Api<K>, resource: &K) -> Result<K>
where
    K: Resource + Clone + DeserializeOwned + Serialize + Debug,
{
    let name = resource.name_any();

    match api.create(&PostParams::default(), resource).await {
        Ok(created) => {
            debug!("Created {}", name);
            Ok(created)
        }
        Err(e) if is_being_deleted(&e) => Err(classify(e, &name)),
        Err(kube::Error::Api(err)) if err.code == 409 => {
            let existing = match api.get(&name).await {
                Ok(existing) => existing,
                Err(kube::Error::Api(err)) if err.code == 404 => {
                    debug!("{} vanished between create and get", name);
                    return Err(HarnessError::TransientConflict { name });
                }
                Err(e) => return Err(classify(e, &name)),
            };
            if existing.meta().deletion_timestamp.is_some() {
                debug!("{} exists but is terminating", name);
                return Err(HarnessError::TransientConflict { name });
            }

            let mut replacement = resource.clone();
            replacement.meta_mut().resource_version = existing.resource_version();

            let replaced = api
                .replace(&name, &PostParams::default(), &replacement)
                .await
                .map_err(|e| classify(e, &name))?;
            debug!("Replaced {}", name);
            Ok(replaced)
        }
        Err(e) => Err(classify(e, &name)),
    }
}

/// Fetch `name`, apply `editor` and write the result back
#[instrument(skip(api, editor))]
pub async fn replace_resource<K, F>(api: &Api<K>, name: &str, editor: F) -> Result<K>
where
    K: Resource<DynamicType = ()> + Clone + DeserializeOwned + Serialize + Debug,
    F: FnOnce(&mut K),
{
    let mut resource = match api.get(name).await {
        Ok(r) => r,
        Err(kube::Error::Api(err)) if err.code == 404 => {
            return Err(HarnessError::NotFound {
                kind: K::kind(&()).to_string(),
                name: name.to_string(),
            })
        }
        Err(e) => return Err(HarnessError::Submission(e)),
    };

    editor(&mut resource);

    let replaced = api.replace(name, &PostParams::default(), &resource).await?;
    info!("{} {} replaced", K::kind(&()), name);
    Ok(replaced)
}

/// Issue a single foreground delete without waiting for the object to go away
#[instrument(skip(api))]
pub async fn delete_foreground<K>(api: &Api<K>, name: &str) -> Result<()>
where
    K: Resource + Clone + DeserializeOwned + Debug,
{
    api.delete(name, &DeleteParams::foreground()).await?;
    debug!("Foreground deletion of {} requested", name);
    Ok(())
}
