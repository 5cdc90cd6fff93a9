// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use http::{Request, Response};
use http_body_util::BodyExt;
use kube::client::Body;
use kube::Client;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A request observed by [`MockService`]
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

type Routes = HashMap<(String, String), VecDeque<(u16, String)>>;

/// A mock HTTP service that returns predefined responses based on request paths.
///
/// Responses registered for the same method and path are served in order;
/// the last one keeps being served once the others are used up.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<Routes>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back((status, body.to_string()));
        self
    }

    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on("POST", path, status, body)
    }

    pub fn on_put(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PUT", path, status, body)
    }

    pub fn on_delete(self, path: &str, status: u16, body: &str) -> Self {
        self.on("DELETE", path, status, body)
    }

    /// Build a kube Client from this mock service.
    ///
    /// The returned handle shares the request log with the client.
    pub fn into_client(self) -> (Client, MockService) {
        let handle = self.clone();
        (Client::new(self, "default"), handle)
    }

    /// Requests seen so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    fn next_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        let mut responses = self.responses.lock().unwrap();

        let key = match responses.get(&(method.to_string(), path.to_string())) {
            Some(_) => (method.to_string(), path.to_string()),
            // Prefix match for paths like /apis/.../kafkarebalances/foo
            None => responses
                .keys()
                .find(|(m, p)| m == method && path.starts_with(p.as_str()))
                .cloned()?,
        };

        let queue = responses.get_mut(&key)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        let response = self.next_response(&method, &path);
        let requests = self.requests.clone();

        Box::pin(async move {
            let body = req
                .into_body()
                .collect()
                .await
                .map(|collected| collected.to_bytes().to_vec())
                .unwrap_or_default();
            requests
                .lock()
                .unwrap()
                .push(RecordedRequest { method, path, body });

            let (status, body) = response.unwrap_or_else(|| {
                (404, status_json(404, "NotFound", "not found"))
            });
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Collection path for KafkaRebalance resources in `namespace`
pub fn rebalance_path(namespace: &str) -> String {
    format!(
        "/apis/kafka.strimzi.io/v1beta2/namespaces/{}/kafkarebalances",
        namespace
    )
}

/// Object path for a single KafkaRebalance
pub fn rebalance_object_path(namespace: &str, name: &str) -> String {
    format!("{}/{}", rebalance_path(namespace), name)
}

/// Create a mock KafkaRebalance JSON response
pub fn kafka_rebalance_json(
    name: &str,
    namespace: &str,
    resource_version: &str,
    state: Option<&str>,
) -> String {
    let mut rebalance = serde_json::json!({
        "apiVersion": "kafka.strimzi.io/v1beta2",
        "kind": "KafkaRebalance",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "resourceVersion": resource_version,
            "uid": "test-uid",
            "labels": { "strimzi.io/cluster": name }
        },
        "spec": {}
    });
    if let Some(state) = state {
        rebalance["status"] = serde_json::json!({
            "conditions": [{ "type": state, "status": "True" }]
        });
    }
    rebalance.to_string()
}

/// Create a Status failure response
pub fn status_json(code: u16, reason: &str, message: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}

/// The conflict returned when creating over an object that is still terminating
pub fn being_deleted_json(name: &str) -> String {
    status_json(
        409,
        "AlreadyExists",
        &format!(
            "object is being deleted: kafkarebalances.kafka.strimzi.io \"{}\" already exists",
            name
        ),
    )
}

/// The conflict returned when creating over a live object
pub fn already_exists_json(name: &str) -> String {
    status_json(
        409,
        "AlreadyExists",
        &format!("kafkarebalances.kafka.strimzi.io \"{}\" already exists", name),
    )
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    status_json(
        404,
        "NotFound",
        &format!("{} \"{}\" not found", resource, name),
    )
}
