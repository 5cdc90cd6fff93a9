// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::types::kafka_rebalance::KafkaRebalanceState;
use std::time::Duration;

/// How long the operator may take to move a KafkaRebalance into `state`
pub fn timeout_for_kafka_rebalance_state(state: KafkaRebalanceState) -> Duration {
    match state {
        KafkaRebalanceState::PendingProposal => Duration::from_secs(3 * 60),
        KafkaRebalanceState::ProposalReady
        | KafkaRebalanceState::Rebalancing
        | KafkaRebalanceState::Ready => Duration::from_secs(10 * 60),
        _ => Duration::from_secs(6 * 60),
    }
}
