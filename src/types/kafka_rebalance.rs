// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::resources::StatefulResource;
use kube::CustomResource;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(group = "kafka.strimzi.io", version = "v1beta2", kind = "KafkaRebalance")]
#[kube(namespaced)]
#[kube(status = "KafkaRebalanceStatus")]
#[kube(shortname = "kr")]
#[serde(rename_all = "camelCase")]
pub struct KafkaRebalanceSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<RebalanceMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brokers: Option<Vec<i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_hard_goal_check: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rebalance_disk: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excluded_topics: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrent_partition_movements_per_broker: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrent_intra_broker_partition_movements: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrent_leader_movements: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replication_throttle: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replica_movement_strategies: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, schemars::JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum RebalanceMode {
    Full,
    AddBrokers,
    RemoveBrokers,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KafkaRebalanceStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Condition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimization_result: Option<serde_json::Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type")]
    pub condition_type: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<String>,
}

/// Lifecycle phases the operator reports through status conditions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KafkaRebalanceState {
    New,
    PendingProposal,
    ProposalReady,
    Rebalancing,
    Stopped,
    NotReady,
    Ready,
    ReconciliationPaused,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown KafkaRebalance state: {0}")]
pub struct UnknownState(pub String);

impl KafkaRebalanceState {
    pub fn as_str(&self) -> &'static str {
        match self {
            KafkaRebalanceState::New => "New",
            KafkaRebalanceState::PendingProposal => "PendingProposal",
            KafkaRebalanceState::ProposalReady => "ProposalReady",
            KafkaRebalanceState::Rebalancing => "Rebalancing",
            KafkaRebalanceState::Stopped => "Stopped",
            KafkaRebalanceState::NotReady => "NotReady",
            KafkaRebalanceState::Ready => "Ready",
            KafkaRebalanceState::ReconciliationPaused => "ReconciliationPaused",
        }
    }
}

impl fmt::Display for KafkaRebalanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KafkaRebalanceState {
    type Err = UnknownState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "New" => Ok(KafkaRebalanceState::New),
            "PendingProposal" => Ok(KafkaRebalanceState::PendingProposal),
            "ProposalReady" => Ok(KafkaRebalanceState::ProposalReady),
            "Rebalancing" => Ok(KafkaRebalanceState::Rebalancing),
            "Stopped" => Ok(KafkaRebalanceState::Stopped),
            "NotReady" => Ok(KafkaRebalanceState::NotReady),
            "Ready" => Ok(KafkaRebalanceState::Ready),
            "ReconciliationPaused" => Ok(KafkaRebalanceState::ReconciliationPaused),
            other => Err(UnknownState(other.to_string())),
        }
    }
}

/// Values of the `strimzi.io/rebalance` annotation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RebalanceAnnotation {
    Approve,
    Refresh,
    Stop,
}

impl fmt::Display for RebalanceAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RebalanceAnnotation::Approve => "approve",
            RebalanceAnnotation::Refresh => "refresh",
            RebalanceAnnotation::Stop => "stop",
        })
    }
}

impl KafkaRebalance {
    /// The state reported by the first true condition naming a known state
    pub fn state(&self) -> Option<KafkaRebalanceState> {
        self.conditions()
            .iter()
            .filter(|c| c.status == "True")
            .find_map(|c| c.condition_type.parse().ok())
    }

    pub fn conditions(&self) -> &[Condition] {
        self.status
            .as_ref()
            .and_then(|s| s.conditions.as_deref())
            .unwrap_or_default()
    }
}

impl StatefulResource for KafkaRebalance {
    type State = KafkaRebalanceState;

    fn current_state(&self) -> Option<KafkaRebalanceState> {
        self.state()
    }

    fn status_summary(&self) -> String {
        if self.conditions().is_empty() {
            return "no conditions".to_string();
        }
        self.conditions()
            .iter()
            .map(|c| {
                let mut line = format!("{}={}", c.condition_type, c.status);
                if let Some(reason) = &c.reason {
                    line.push_str(&format!(" reason={}", reason));
                }
                if let Some(message) = &c.message {
                    line.push_str(&format!(" message={}", message));
                }
                line
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}
