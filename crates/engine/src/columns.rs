use std::collections::{HashMap, HashSet};

use crate::error::JoinError;

// ---------------------------------------------------------------------------
// Ordered set
// ---------------------------------------------------------------------------

/// Distinct strings in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedSet {
    items: Vec<String>,
    seen: HashSet<String>,
}

impl OrderedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `item` unless already present. Returns true if it was added.
    pub fn insert(&mut self, item: &str) -> bool {
        if self.seen.contains(item) {
            return false;
        }
        self.seen.insert(item.to_string());
        self.items.push(item.to_string());
        true
    }

    pub fn contains(&self, item: &str) -> bool {
        self.seen.contains(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}

impl<'a> FromIterator<&'a str> for OrderedSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = OrderedSet::new();
        for item in iter {
            set.insert(item);
        }
        set
    }
}

// ---------------------------------------------------------------------------
// Header reconciliation
// ---------------------------------------------------------------------------

/// Column layout agreed across all sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderPlan {
    /// Columns present in every source, in first-seen order. Every source
    /// derives its join keys from this one ordering.
    pub join_columns: Vec<String>,
    /// Every distinct column, in first-seen order.
    pub output_columns: Vec<String>,
}

/// Work out the join and output columns from every source's header row.
pub fn reconcile_headers(headers: &[Vec<String>]) -> Result<HeaderPlan, JoinError> {
    let output = unique_columns(headers);

    // Count each name once per source, however often it repeats in one header.
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for header in headers {
        let mut seen: HashSet<&str> = HashSet::new();
        for col in header {
            if seen.insert(col.as_str()) {
                *counts.entry(col.as_str()).or_insert(0) += 1;
            }
        }
    }

    let join_columns: Vec<String> = output
        .iter()
        .filter(|col| counts.get(col).copied() == Some(headers.len()))
        .map(str::to_string)
        .collect();

    if headers.is_empty() || join_columns.is_empty() {
        return Err(JoinError::NoJoinColumns);
    }

    Ok(HeaderPlan {
        join_columns,
        output_columns: output.into_vec(),
    })
}

/// Distinct column names across all headers, first-seen order.
pub fn unique_columns(headers: &[Vec<String>]) -> OrderedSet {
    headers
        .iter()
        .flat_map(|h| h.iter().map(String::as_str))
        .collect()
}
