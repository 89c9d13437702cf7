#![forbid(unsafe_code)]
//! Core primitives for a last-writer-wins element graph CRDT.
//! Vertices and edges are tracked in four grow-only timestamped sets so replicas can be
//! mutated independently and reconciled later with a single merge. Transport and persistence
//! stay with the host; this crate only owns the state and the rules derived from it.

pub mod config;
pub mod error;
pub mod ids;
pub mod ops;
pub mod path;
pub mod state;
pub mod traits;

pub use config::{GraphConfig, MergePolicy};
pub use error::{Error, Result};
pub use ids::{EdgeKey, Timestamp};
pub use ops::{cmp_ops, Operation};
pub use path::PathOutcome;
pub use state::{LwwGraphState, StateExport};
#[cfg(feature = "wall-clock")]
pub use traits::WallClock;
pub use traits::{Clock, ManualClock};
