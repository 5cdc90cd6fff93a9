// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Custom resource definitions managed by the test helpers.

pub mod kafka_rebalance;

pub use kafka_rebalance::{
    KafkaRebalance, KafkaRebalanceSpec, KafkaRebalanceState, RebalanceAnnotation,
};
