use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How timestamps are resolved when the same key is known on both sides of a merge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum MergePolicy {
    /// Incoming timestamps replace local ones unconditionally (right-biased union).
    ///
    /// Key sets converge regardless of merge order, but values depend on which replica
    /// was merged last.
    #[default]
    Overwrite,
    /// Keep the larger timestamp per key. Merge becomes commutative, associative and
    /// idempotent in both keys and values.
    MaxTimestamp,
}

impl MergePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MergePolicy::Overwrite => "overwrite",
            MergePolicy::MaxTimestamp => "max-timestamp",
        }
    }
}

impl fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MergePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(MergePolicy::Overwrite),
            "max-timestamp" | "max" => Ok(MergePolicy::MaxTimestamp),
            other => Err(Error::InvalidConfig(format!(
                "unknown merge policy `{other}` (expected `overwrite` or `max-timestamp`)"
            ))),
        }
    }
}

/// Per-replica settings for an `LwwGraphState`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GraphConfig {
    #[cfg_attr(feature = "serde", serde(default))]
    pub merge_policy: MergePolicy,
}

impl GraphConfig {
    pub fn with_merge_policy(mut self, merge_policy: MergePolicy) -> Self {
        self.merge_policy = merge_policy;
        self
    }
}
