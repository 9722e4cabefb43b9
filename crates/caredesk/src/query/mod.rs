//! List query engine.
//!
//! Every management screen renders the same way: a record collection, the
//! criteria currently selected in the UI, and the filtered subsequence plus a
//! handful of summary figures. This module is that computation, factored out
//! once. Filtering and aggregation are pure functions of `(records,
//! criteria)`: same inputs, same outputs, input order preserved, nothing
//! mutated and nothing cached.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

mod aggregate;

pub use aggregate::{aggregate, AggregateOp, AggregateSpec, StatValue, Statistics};

/// Sentinel constraint value meaning "no constraint on this field".
pub const MATCH_ALL: &str = "all";

/// How a domain type exposes itself to the engine.
///
/// `field` performs categorical lookup by name and returns `None` for fields
/// the type does not carry; a missing field never satisfies a constraint and
/// never raises an error.
pub trait Record {
    /// Text fields the free-text query is matched against.
    fn search_text(&self) -> Vec<Cow<'_, str>>;

    /// Categorical field lookup by name.
    fn field(&self, name: &str) -> Option<Cow<'_, str>>;

    /// Numeric field lookup by name, used by sum aggregates.
    fn numeric_field(&self, _name: &str) -> Option<f64> {
        None
    }
}

/// The filter state of one screen: a free-text query plus categorical
/// selectors keyed by field name, with [`MATCH_ALL`] opting a selector out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryCriteria {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub constraints: BTreeMap<String, String>,
}

impl QueryCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            constraints: BTreeMap::new(),
        }
    }

    /// Add a categorical constraint, replacing any prior value for the field.
    pub fn constrain(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.constraints.insert(field.into(), value.into());
        self
    }

    /// Build criteria from HTTP query parameters: the `q` key carries the
    /// free-text query, every other key is a categorical constraint.
    pub fn from_params<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut criteria = Self::new();
        for (key, value) in params {
            let key = key.into();
            if key == "q" {
                criteria.search = value.into();
            } else {
                criteria.constraints.insert(key, value.into());
            }
        }
        criteria
    }

    /// True when these criteria match every record: no usable query text and
    /// every selector left at [`MATCH_ALL`].
    pub fn is_unconstrained(&self) -> bool {
        self.search.trim().is_empty() && self.constraints.values().all(|value| value == MATCH_ALL)
    }

    /// Whether a single record satisfies every active constraint.
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        let query = self.search.trim();
        if !query.is_empty() {
            let needle = query.to_lowercase();
            let hit = record
                .search_text()
                .iter()
                .any(|text| text.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        for (field, expected) in &self.constraints {
            if expected == MATCH_ALL {
                continue;
            }
            match record.field(field) {
                Some(value) if value.as_ref() == expected => {}
                _ => return false,
            }
        }

        true
    }
}

/// The subsequence of `records`, in original order, satisfying `criteria`.
pub fn filter<R: Record + Clone>(records: &[R], criteria: &QueryCriteria) -> Vec<R> {
    records
        .iter()
        .filter(|record| criteria.matches(*record))
        .cloned()
        .collect()
}
