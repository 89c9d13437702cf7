#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Caller-supplied timestamp attached to every add/remove record.
pub type Timestamp = f64;

/// Key under which an edge's add/remove records are stored.
///
/// Keys are order-sensitive: `EdgeKey::new(a, b)` and `EdgeKey::new(b, a)` are distinct edges.
/// Callers that want undirected identity should normalize before building the key.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeKey<T>(pub T, pub T);

impl<T> EdgeKey<T> {
    pub fn new(from: T, to: T) -> Self {
        Self(from, to)
    }

    pub fn source(&self) -> &T {
        &self.0
    }

    pub fn target(&self) -> &T {
        &self.1
    }

    /// The same endpoints in the opposite order.
    pub fn reversed(self) -> Self {
        Self(self.1, self.0)
    }
}

impl<T: PartialEq> EdgeKey<T> {
    pub fn contains(&self, vertex: &T) -> bool {
        self.0 == *vertex || self.1 == *vertex
    }

    /// Endpoint opposite `vertex`, or `None` when `vertex` is not on this edge.
    ///
    /// For a self-loop the vertex itself is returned.
    pub fn other(&self, vertex: &T) -> Option<&T> {
        if self.0 == *vertex {
            Some(&self.1)
        } else if self.1 == *vertex {
            Some(&self.0)
        } else {
            None
        }
    }
}

impl<T> From<(T, T)> for EdgeKey<T> {
    fn from((from, to): (T, T)) -> Self {
        Self(from, to)
    }
}

impl<T> From<[T; 2]> for EdgeKey<T> {
    fn from([from, to]: [T; 2]) -> Self {
        Self(from, to)
    }
}
