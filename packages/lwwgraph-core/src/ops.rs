use std::cmp::Ordering;

use crate::ids::{EdgeKey, Timestamp};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single graph mutation, as recorded by a replica that wants to replay or ship its writes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Operation<T> {
    AddVertex { vertex: T, timestamp: Timestamp },
    RemoveVertex { vertex: T, timestamp: Timestamp },
    AddEdge { edge: EdgeKey<T>, timestamp: Timestamp },
    RemoveEdge { edge: EdgeKey<T>, timestamp: Timestamp },
}

impl<T> Operation<T> {
    pub fn add_vertex(vertex: T, timestamp: Timestamp) -> Self {
        Operation::AddVertex { vertex, timestamp }
    }

    pub fn remove_vertex(vertex: T, timestamp: Timestamp) -> Self {
        Operation::RemoveVertex { vertex, timestamp }
    }

    pub fn add_edge(from: T, to: T, timestamp: Timestamp) -> Self {
        Operation::AddEdge {
            edge: EdgeKey(from, to),
            timestamp,
        }
    }

    pub fn remove_edge(edge: impl Into<EdgeKey<T>>, timestamp: Timestamp) -> Self {
        Operation::RemoveEdge {
            edge: edge.into(),
            timestamp,
        }
    }

    pub fn timestamp(&self) -> Timestamp {
        match self {
            Operation::AddVertex { timestamp, .. }
            | Operation::RemoveVertex { timestamp, .. }
            | Operation::AddEdge { timestamp, .. }
            | Operation::RemoveEdge { timestamp, .. } => *timestamp,
        }
    }

    /// Rank used to order operations that share a timestamp: vertex adds before edge adds,
    /// edge removes before vertex removes.
    fn replay_rank(&self) -> u8 {
        match self {
            Operation::AddVertex { .. } => 0,
            Operation::AddEdge { .. } => 1,
            Operation::RemoveEdge { .. } => 2,
            Operation::RemoveVertex { .. } => 3,
        }
    }
}

/// Replay order: by timestamp (total order, so NaN sorts last), then by kind.
pub fn cmp_ops<T>(a: &Operation<T>, b: &Operation<T>) -> Ordering {
    a.timestamp()
        .total_cmp(&b.timestamp())
        .then_with(|| a.replay_rank().cmp(&b.replay_rank()))
}
