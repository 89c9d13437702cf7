use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, trace};

use crate::config::{GraphConfig, MergePolicy};
use crate::error::{Error, Result};
use crate::ids::{EdgeKey, Timestamp};
use crate::ops::Operation;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Last-writer-wins element graph.
///
/// Holds four grow-only timestamped sets: vertex adds, vertex removes, edge adds and edge
/// removes. Presence of a vertex or edge is derived from those sets on every read; nothing is
/// ever deleted, so replicas can be reconciled at any time with [`LwwGraphState::merge`].
///
/// An add wins only when its timestamp is strictly greater than the matching remove; equal
/// timestamps resolve to removed.
#[derive(Clone, Debug, PartialEq)]
pub struct LwwGraphState<T> {
    config: GraphConfig,
    add_vertices: BTreeMap<T, Timestamp>,
    remove_vertices: BTreeMap<T, Timestamp>,
    add_edges: BTreeMap<EdgeKey<T>, Timestamp>,
    remove_edges: BTreeMap<EdgeKey<T>, Timestamp>,
}

/// Flat form of the four sets, suitable for shipping a replica to a peer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StateExport<T> {
    #[cfg_attr(feature = "serde", serde(default))]
    pub config: GraphConfig,
    pub add_vertices: Vec<(T, Timestamp)>,
    pub remove_vertices: Vec<(T, Timestamp)>,
    pub add_edges: Vec<(EdgeKey<T>, Timestamp)>,
    pub remove_edges: Vec<(EdgeKey<T>, Timestamp)>,
}

impl<T> Default for LwwGraphState<T> {
    fn default() -> Self {
        Self::with_config(GraphConfig::default())
    }
}

impl<T> LwwGraphState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            config,
            add_vertices: BTreeMap::new(),
            remove_vertices: BTreeMap::new(),
            add_edges: BTreeMap::new(),
            remove_edges: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn set_merge_policy(&mut self, policy: MergePolicy) {
        self.config.merge_policy = policy;
    }

    /// Every vertex ever added, with the timestamp of its latest add.
    pub fn add_vertices(&self) -> &BTreeMap<T, Timestamp> {
        &self.add_vertices
    }

    /// Every vertex ever removed, with the timestamp of its latest remove.
    pub fn remove_vertices(&self) -> &BTreeMap<T, Timestamp> {
        &self.remove_vertices
    }

    /// Every edge ever added, with the timestamp of its latest add.
    pub fn add_edges(&self) -> &BTreeMap<EdgeKey<T>, Timestamp> {
        &self.add_edges
    }

    /// Every edge ever removed, with the timestamp of its latest remove.
    pub fn remove_edges(&self) -> &BTreeMap<EdgeKey<T>, Timestamp> {
        &self.remove_edges
    }
}

impl<T> LwwGraphState<T>
where
    T: Ord + Clone + fmt::Debug,
{
    /// Record an add for `vertex`, replacing any earlier add timestamp.
    pub fn add_vertex(&mut self, vertex: T, timestamp: Timestamp) {
        trace!(?vertex, timestamp, "add vertex");
        self.add_vertices.insert(vertex, timestamp);
    }

    pub fn vertex_exists(&self, vertex: &T) -> bool {
        match (self.add_vertices.get(vertex), self.remove_vertices.get(vertex)) {
            (Some(added), Some(removed)) => added > removed,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    /// Whether a present `vertex` appears in any recorded edge key.
    ///
    /// Removed edges still count: the add record is never dropped.
    pub fn is_vertex_in_edge(&self, vertex: &T) -> bool {
        self.vertex_exists(vertex) && self.add_edges.keys().any(|edge| edge.contains(vertex))
    }

    /// Logically remove `vertex`. Returns `false` without writing when the vertex is absent
    /// or still referenced by an edge key.
    pub fn remove_vertex(&mut self, vertex: T, timestamp: Timestamp) -> bool {
        self.try_remove_vertex(vertex, timestamp).is_ok()
    }

    pub fn try_remove_vertex(&mut self, vertex: T, timestamp: Timestamp) -> Result<()> {
        if !self.vertex_exists(&vertex) {
            debug!(?vertex, timestamp, "remove vertex rejected: vertex not present");
            return Err(Error::VertexMissing(format!("{vertex:?}")));
        }
        if self.is_vertex_in_edge(&vertex) {
            debug!(?vertex, timestamp, "remove vertex rejected: vertex in use");
            return Err(Error::VertexInUse(format!("{vertex:?}")));
        }
        trace!(?vertex, timestamp, "remove vertex");
        self.remove_vertices.insert(vertex, timestamp);
        Ok(())
    }

    /// Record an edge keyed `(from, to)`. Returns `false` without writing unless both
    /// endpoints are present.
    pub fn add_edge(&mut self, from: T, to: T, timestamp: Timestamp) -> bool {
        self.try_add_edge(from, to, timestamp).is_ok()
    }

    pub fn try_add_edge(&mut self, from: T, to: T, timestamp: Timestamp) -> Result<()> {
        for endpoint in [&from, &to] {
            if !self.vertex_exists(endpoint) {
                debug!(?from, ?to, timestamp, missing = ?endpoint, "add edge rejected");
                return Err(Error::VertexMissing(format!("{endpoint:?}")));
            }
        }
        trace!(?from, ?to, timestamp, "add edge");
        self.add_edges.insert(EdgeKey(from, to), timestamp);
        Ok(())
    }

    pub fn edge_exists(&self, edge: &EdgeKey<T>) -> bool {
        if !self.vertex_exists(edge.source()) || !self.vertex_exists(edge.target()) {
            return false;
        }
        match (self.add_edges.get(edge), self.remove_edges.get(edge)) {
            (Some(added), Some(removed)) => added > removed,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    /// Logically remove `edge`. Returns `false` without writing unless the edge is present.
    pub fn remove_edge(&mut self, edge: EdgeKey<T>, timestamp: Timestamp) -> bool {
        self.try_remove_edge(edge, timestamp).is_ok()
    }

    pub fn try_remove_edge(&mut self, edge: EdgeKey<T>, timestamp: Timestamp) -> Result<()> {
        if !self.edge_exists(&edge) {
            debug!(?edge, timestamp, "remove edge rejected: edge not present");
            return Err(Error::EdgeMissing(format!("{edge:?}")));
        }
        trace!(?edge, timestamp, "remove edge");
        self.remove_edges.insert(edge, timestamp);
        Ok(())
    }

    /// Endpoints opposite `vertex` across every recorded edge key, in key order.
    ///
    /// The edges themselves are not checked for removal. Empty when `vertex` is not present.
    pub fn connected_vertices(&self, vertex: &T) -> Vec<T> {
        if !self.vertex_exists(vertex) {
            return Vec::new();
        }
        self.add_edges
            .keys()
            .filter_map(|edge| edge.other(vertex).cloned())
            .collect()
    }

    /// Present vertices in key order.
    pub fn vertices(&self) -> impl Iterator<Item = &T> + '_ {
        self.add_vertices
            .keys()
            .filter(move |vertex| self.vertex_exists(vertex))
    }

    /// Present edges in key order.
    pub fn edges(&self) -> impl Iterator<Item = &EdgeKey<T>> + '_ {
        self.add_edges.keys().filter(move |edge| self.edge_exists(edge))
    }

    /// Every present vertex mapped to its connected vertices.
    pub fn adjacency(&self) -> BTreeMap<T, Vec<T>> {
        self.vertices()
            .map(|vertex| (vertex.clone(), self.connected_vertices(vertex)))
            .collect()
    }

    /// Number of present vertices.
    pub fn len_vertices(&self) -> usize {
        self.vertices().count()
    }

    /// True when no vertex is present. Removed history may still be held.
    pub fn is_empty(&self) -> bool {
        self.vertices().next().is_none()
    }

    /// Apply a logged mutation, reporting why it was rejected.
    pub fn apply(&mut self, op: &Operation<T>) -> Result<()> {
        match op {
            Operation::AddVertex { vertex, timestamp } => {
                self.add_vertex(vertex.clone(), *timestamp);
                Ok(())
            }
            Operation::RemoveVertex { vertex, timestamp } => {
                self.try_remove_vertex(vertex.clone(), *timestamp)
            }
            Operation::AddEdge { edge, timestamp } => {
                self.try_add_edge(edge.0.clone(), edge.1.clone(), *timestamp)
            }
            Operation::RemoveEdge { edge, timestamp } => {
                self.try_remove_edge(edge.clone(), *timestamp)
            }
        }
    }

    /// Fold `other` into this replica using the configured merge policy.
    pub fn merge(&mut self, other: &LwwGraphState<T>) {
        self.merge_with(other, self.config.merge_policy);
    }

    /// Fold `other` into this replica using `policy` for this merge only.
    pub fn merge_with(&mut self, other: &LwwGraphState<T>, policy: MergePolicy) {
        let changed = merge_records(&mut self.add_vertices, &other.add_vertices, policy)
            + merge_records(&mut self.remove_vertices, &other.remove_vertices, policy)
            + merge_records(&mut self.add_edges, &other.add_edges, policy)
            + merge_records(&mut self.remove_edges, &other.remove_edges, policy);
        debug!(
            %policy,
            incoming_vertices = other.add_vertices.len() + other.remove_vertices.len(),
            incoming_edges = other.add_edges.len() + other.remove_edges.len(),
            changed,
            "merged replica"
        );
    }

    pub fn export(&self) -> StateExport<T> {
        fn entries<K: Clone>(map: &BTreeMap<K, Timestamp>) -> Vec<(K, Timestamp)> {
            map.iter().map(|(k, ts)| (k.clone(), *ts)).collect()
        }
        StateExport {
            config: self.config,
            add_vertices: entries(&self.add_vertices),
            remove_vertices: entries(&self.remove_vertices),
            add_edges: entries(&self.add_edges),
            remove_edges: entries(&self.remove_edges),
        }
    }

    /// Rebuild a replica from an export. Duplicate keys keep the last entry.
    pub fn from_export(export: StateExport<T>) -> Self {
        Self {
            config: export.config,
            add_vertices: export.add_vertices.into_iter().collect(),
            remove_vertices: export.remove_vertices.into_iter().collect(),
            add_edges: export.add_edges.into_iter().collect(),
            remove_edges: export.remove_edges.into_iter().collect(),
        }
    }
}

#[cfg(feature = "serde")]
impl<T> LwwGraphState<T>
where
    T: Ord + Clone + fmt::Debug + Serialize + DeserializeOwned,
{
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.export()).map_err(|e| Error::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let export: StateExport<T> =
            serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
        Ok(Self::from_export(export))
    }
}

/// Fold `incoming` into `target`, returning how many records were inserted or replaced.
fn merge_records<K: Ord + Clone>(
    target: &mut BTreeMap<K, Timestamp>,
    incoming: &BTreeMap<K, Timestamp>,
    policy: MergePolicy,
) -> usize {
    let mut changed = 0;
    for (key, &timestamp) in incoming {
        match target.get_mut(key) {
            Some(current) => {
                let replace = match policy {
                    MergePolicy::Overwrite => *current != timestamp,
                    MergePolicy::MaxTimestamp => timestamp > *current,
                };
                if replace {
                    *current = timestamp;
                    changed += 1;
                }
            }
            None => {
                target.insert(key.clone(), timestamp);
                changed += 1;
            }
        }
    }
    changed
}
