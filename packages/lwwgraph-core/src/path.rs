//! Greedy path search over the live graph.
//!
//! The walk is single-branch and never backtracks: from the current vertex it commits to
//! admissible neighbours in ascending order and moves on. It is cheap and deterministic but
//! can miss paths that exist, so a `None` result means "not found", not "unreachable".

use std::fmt;

use tracing::debug;

use crate::ids::EdgeKey;
use crate::state::LwwGraphState;

/// How a path search terminated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathOutcome<T> {
    /// A live edge keyed `(from, to)` joins the endpoints.
    Direct(Vec<T>),
    /// The walk reached the target after `steps` expansions.
    Walked { path: Vec<T>, steps: usize },
    /// One of the endpoints is not present.
    EndpointMissing,
    /// The walk ran out of vertices or retries.
    Exhausted { visited: Vec<T>, steps: usize },
}

impl<T> PathOutcome<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, PathOutcome::Direct(_) | PathOutcome::Walked { .. })
    }

    pub fn path(&self) -> Option<&[T]> {
        match self {
            PathOutcome::Direct(path) | PathOutcome::Walked { path, .. } => Some(path),
            _ => None,
        }
    }

    pub fn into_path(self) -> Option<Vec<T>> {
        match self {
            PathOutcome::Direct(path) | PathOutcome::Walked { path, .. } => Some(path),
            _ => None,
        }
    }
}

enum WalkState<T> {
    Advancing {
        current: T,
        visited: Vec<T>,
        retries: usize,
    },
    Done(PathOutcome<T>),
}

struct GreedyWalk<'a, T> {
    graph: &'a LwwGraphState<T>,
    target: &'a T,
    /// Number of vertices ever added; the walk stops once it has visited that many.
    budget: usize,
}

impl<T> GreedyWalk<'_, T>
where
    T: Ord + Clone + fmt::Debug,
{
    fn step(&self, current: T, mut visited: Vec<T>, retries: usize) -> WalkState<T> {
        if visited.len() >= self.budget {
            return WalkState::Done(PathOutcome::Exhausted {
                visited,
                steps: retries,
            });
        }

        let mut neighbours = self.graph.connected_vertices(&current);
        neighbours.sort();
        if neighbours.binary_search(self.target).is_ok() {
            visited.push(self.target.clone());
            return WalkState::Done(PathOutcome::Walked {
                path: visited,
                steps: retries + 1,
            });
        }

        // `current` moves as candidates are taken, so later candidates from the same
        // neighbour list are tested against the newest vertex.
        let mut current = current;
        for candidate in neighbours {
            if visited.contains(&candidate) {
                continue;
            }
            if self
                .graph
                .edge_exists(&EdgeKey(current.clone(), candidate.clone()))
            {
                visited.push(candidate.clone());
                current = candidate;
            }
        }

        let retries = retries + 1;
        if retries > visited.len() {
            return WalkState::Done(PathOutcome::Exhausted {
                visited,
                steps: retries,
            });
        }
        WalkState::Advancing {
            current,
            visited,
            retries,
        }
    }
}

impl<T> LwwGraphState<T>
where
    T: Ord + Clone + fmt::Debug,
{
    /// Best-effort search for a path from `from` to `to`.
    ///
    /// Returns the path and `true` when found, `(None, false)` otherwise.
    pub fn find_path(&self, from: &T, to: &T) -> (Option<Vec<T>>, bool) {
        let path = self.search_path(from, to).into_path();
        let found = path.is_some();
        (path, found)
    }

    /// Run the greedy walk and report how it terminated.
    ///
    /// The walk is seeded with the last vertex connected to `from`, then repeatedly sorts the
    /// neighbours of the current vertex: the target among them ends the search, otherwise every
    /// unvisited neighbour reachable over a live edge from the current vertex is appended. The
    /// walk gives up once it has visited as many vertices as were ever added, or when the number
    /// of expansions exceeds the number of visited vertices.
    pub fn search_path(&self, from: &T, to: &T) -> PathOutcome<T> {
        let outcome = self.walk(from, to);
        debug!(?from, ?to, ?outcome, "path search finished");
        outcome
    }

    fn walk(&self, from: &T, to: &T) -> PathOutcome<T> {
        if !self.vertex_exists(from) || !self.vertex_exists(to) {
            return PathOutcome::EndpointMissing;
        }
        if self.edge_exists(&EdgeKey(from.clone(), to.clone())) {
            return PathOutcome::Direct(vec![from.clone(), to.clone()]);
        }

        let seed = self
            .connected_vertices(from)
            .pop()
            .unwrap_or_else(|| from.clone());
        let walker = GreedyWalk {
            graph: self,
            target: to,
            budget: self.add_vertices().len(),
        };

        let mut state = WalkState::Advancing {
            visited: vec![from.clone(), seed.clone()],
            current: seed,
            retries: 0,
        };
        loop {
            match state {
                WalkState::Advancing {
                    current,
                    visited,
                    retries,
                } => state = walker.step(current, visited, retries),
                WalkState::Done(outcome) => return outcome,
            }
        }
    }
}
