//! Ordered answer-option sets indexed by name.
//!
//! Built once per metadata source and read-only afterwards, so a single
//! index can be shared across forms compiled in parallel.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use formgen_model::OptionSetRow;

/// A named, ordered sequence of answer options.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSet {
    pub name: String,
    /// Members in display order, fixed at build time.
    pub members: Vec<OptionSetRow>,
}

impl OptionSet {
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|member| member.label.as_str())
    }
}

/// Immutable lookup table from option-set name to its sorted members.
#[derive(Debug, Clone, Default)]
pub struct OptionSetIndex {
    sets: BTreeMap<String, OptionSet>,
}

impl OptionSetIndex {
    /// Groups rows by set name and sorts each set once.
    ///
    /// Rows repeating an existing set name append to that set rather than
    /// replacing it. Within a set, numerically keyed members sort ascending
    /// by value (stable on ties); members with blank or non-numeric keys
    /// follow in their original relative order.
    pub fn build(rows: Vec<OptionSetRow>) -> Self {
        let total = rows.len();
        let mut sets: BTreeMap<String, OptionSet> = BTreeMap::new();
        for row in rows {
            if let Some(key) = row.order.as_deref() {
                if !key.trim().is_empty() && parse_order_key(key).is_none() {
                    warn!(set = %row.set_name, key = %key, "order key is not numeric, sorting to tail");
                }
            }
            sets.entry(row.set_name.clone())
                .or_insert_with(|| OptionSet {
                    name: row.set_name.clone(),
                    members: Vec::new(),
                })
                .members
                .push(row);
        }
        for set in sets.values_mut() {
            sort_members(&mut set.members);
        }
        debug!(sets = sets.len(), rows = total, "built option set index");
        OptionSetIndex { sets }
    }

    /// Exact-name lookup; `None` means the set does not exist and the caller
    /// must degrade rather than fail.
    pub fn lookup(&self, name: &str) -> Option<&OptionSet> {
        self.sets.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

fn sort_members(members: &mut [OptionSetRow]) {
    members.sort_by(|a, b| {
        let (rank_a, value_a) = order_rank(a.order.as_deref());
        let (rank_b, value_b) = order_rank(b.order.as_deref());
        rank_a.cmp(&rank_b).then(value_a.total_cmp(&value_b))
    });
}

/// Two-tier sort key: numeric keys rank first by parsed value; everything
/// else shares one tail rank so the stable sort preserves input order there.
fn order_rank(key: Option<&str>) -> (u8, f64) {
    match key.and_then(parse_order_key) {
        Some(value) => (0, value),
        None => (1, 0.0),
    }
}

fn parse_order_key(key: &str) -> Option<f64> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}
