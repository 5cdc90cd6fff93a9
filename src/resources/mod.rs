// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test-resource lifecycle: deferred cleanup, status waiting and the
//! KafkaRebalance helper built on them.

pub mod kafka_rebalance;
pub mod manager;
pub mod operation;

pub use kafka_rebalance::{default_kafka_rebalance, KafkaRebalanceResource};
pub use manager::{ResourceLifecycle, ResourceManager, StatefulResource};
pub use operation::timeout_for_kafka_rebalance_state;
