// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Kubernetes label keys understood by the operator
pub mod labels {
    /// Binds a custom resource to the Kafka cluster of the same name
    pub const CLUSTER: &str = "strimzi.io/cluster";
}

/// Kubernetes annotation keys understood by the operator
pub mod annotations {
    /// Drives a KafkaRebalance through approve/refresh/stop
    pub const REBALANCE: &str = "strimzi.io/rebalance";
}

/// Message fragment the API server returns while an object is terminating
pub const OBJECT_BEING_DELETED: &str = "object is being deleted";

/// Location of the KafkaRebalance template, relative to the working directory
pub const DEFAULT_KAFKA_REBALANCE_TEMPLATE: &str =
    "packaging/examples/cruise-control/kafka-rebalance.yaml";

/// Polling configuration for resource creation and readiness
pub mod poll {
    /// Interval between create-or-replace attempts
    pub const RESOURCE_CREATION_INTERVAL_SECS: u64 = 3;
    /// Interval between status checks
    pub const RESOURCE_READINESS_INTERVAL_SECS: u64 = 1;
    /// Overall budget for the create-or-replace loop
    pub const CR_CREATION_TIMEOUT_SECS: u64 = 7 * 60;
}
