// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! External lookup collaborator.
//!
//! Rules that need existence or uniqueness facts from a persistent store
//! depend on this capability, injected into the
//! [`Validator`](crate::rules::Validator). The core never resolves a
//! global store handle and never computes physical table names; both are
//! the implementor's concern, as is parametrizing the query rather than
//! interpolating raw input into query text.

use std::collections::BTreeMap;

use crate::error::LookupError;

/// Capability for counting stored rows matching `field = value`.
pub trait ExternalLookup: Send + Sync {
    /// Count rows in `table` where `field` equals `value`.
    ///
    /// Inputs arrive trimmed. Implementations should bound the call with
    /// a timeout and report faults as [`LookupError`], never as a count.
    fn count(&self, table: &str, field: &str, value: &str) -> Result<u64, LookupError>;
}

/// In-memory [`ExternalLookup`] backed by a plain map. Intended for tests
/// and examples; a real deployment injects a store-backed implementation.
#[derive(Debug, Clone, Default)]
pub struct MemoryLookup {
    rows: BTreeMap<String, Vec<(String, String)>>,
}

impl MemoryLookup {
    /// An empty lookup: every count is zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a row for `table` with the given field value.
    pub fn insert(
        &mut self,
        table: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.rows
            .entry(table.into())
            .or_default()
            .push((field.into(), value.into()));
    }
}

impl ExternalLookup for MemoryLookup {
    fn count(&self, table: &str, field: &str, value: &str) -> Result<u64, LookupError> {
        let count = self
            .rows
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|(f, v)| f.as_str() == field && v.as_str() == value)
                    .count()
            })
            .unwrap_or(0);
        Ok(count as u64)
    }
}
