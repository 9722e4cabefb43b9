//! Named aggregates over a record collection.
//!
//! The stat cards above every list view are counts and sums taken over the
//! full, unfiltered collection. An [`AggregateSpec`] names one figure and
//! reuses [`QueryCriteria`] as its predicate language; results are recomputed
//! from the current records on every call.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{QueryCriteria, Record};

/// One named aggregate definition.
#[derive(Debug, Clone)]
pub struct AggregateSpec {
    pub name: &'static str,
    pub op: AggregateOp,
}

impl AggregateSpec {
    /// Count of records satisfying `over`.
    pub fn count(name: &'static str, over: QueryCriteria) -> Self {
        Self {
            name,
            op: AggregateOp::Count(over),
        }
    }

    /// Sum of a numeric field over records satisfying `over`.
    pub fn sum(name: &'static str, field: &'static str, over: QueryCriteria) -> Self {
        Self {
            name,
            op: AggregateOp::Sum { field, over },
        }
    }
}

#[derive(Debug, Clone)]
pub enum AggregateOp {
    Count(QueryCriteria),
    Sum {
        field: &'static str,
        over: QueryCriteria,
    },
}

/// Computed scalar for one aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Count(u64),
    Sum(f64),
}

impl StatValue {
    pub fn as_f64(self) -> f64 {
        match self {
            StatValue::Count(count) => count as f64,
            StatValue::Sum(sum) => sum,
        }
    }

    pub fn as_count(self) -> u64 {
        match self {
            StatValue::Count(count) => count,
            StatValue::Sum(sum) => sum as u64,
        }
    }
}

/// Mapping from aggregate name to its computed scalar.
pub type Statistics = BTreeMap<&'static str, StatValue>;

/// Evaluate every spec against the full collection.
///
/// Records lacking the summed numeric field contribute nothing to a sum;
/// a spec whose criteria match no records yields zero.
pub fn aggregate<R: Record>(records: &[R], specs: &[AggregateSpec]) -> Statistics {
    let mut statistics = Statistics::new();

    for spec in specs {
        let value = match &spec.op {
            AggregateOp::Count(over) => StatValue::Count(
                records.iter().filter(|record| over.matches(*record)).count() as u64,
            ),
            AggregateOp::Sum { field, over } => StatValue::Sum(
                records
                    .iter()
                    .filter(|record| over.matches(*record))
                    .filter_map(|record| record.numeric_field(field))
                    .sum(),
            ),
        };
        statistics.insert(spec.name, value);
    }

    statistics
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    #[derive(Debug, Clone)]
    struct Charge {
        amount: f64,
        status: &'static str,
    }

    impl Record for Charge {
        fn search_text(&self) -> Vec<Cow<'_, str>> {
            Vec::new()
        }

        fn field(&self, name: &str) -> Option<Cow<'_, str>> {
            match name {
                "status" => Some(Cow::from(self.status)),
                _ => None,
            }
        }

        fn numeric_field(&self, name: &str) -> Option<f64> {
            match name {
                "amount" => Some(self.amount),
                _ => None,
            }
        }
    }

    fn charges() -> Vec<Charge> {
        vec![
            Charge {
                amount: 100.0,
                status: "paid",
            },
            Charge {
                amount: 50.0,
                status: "pending",
            },
        ]
    }

    #[test]
    fn sum_over_matching_records_only() {
        let specs = [AggregateSpec::sum(
            "total_paid",
            "amount",
            QueryCriteria::new().constrain("status", "paid"),
        )];
        let stats = aggregate(&charges(), &specs);
        assert_eq!(stats.get("total_paid"), Some(&StatValue::Sum(100.0)));
    }

    #[test]
    fn count_with_empty_criteria_is_collection_size() {
        let specs = [AggregateSpec::count("total", QueryCriteria::new())];
        let stats = aggregate(&charges(), &specs);
        assert_eq!(stats.get("total"), Some(&StatValue::Count(2)));
    }

    #[test]
    fn sum_of_unknown_numeric_field_is_zero() {
        let specs = [AggregateSpec::sum(
            "missing",
            "not_a_field",
            QueryCriteria::new(),
        )];
        let stats = aggregate(&charges(), &specs);
        assert_eq!(stats.get("missing"), Some(&StatValue::Sum(0.0)));
    }

    #[test]
    fn empty_collection_yields_zeroes() {
        let specs = [
            AggregateSpec::count("total", QueryCriteria::new()),
            AggregateSpec::sum("amount", "amount", QueryCriteria::new()),
        ];
        let stats = aggregate(&Vec::<Charge>::new(), &specs);
        assert_eq!(stats.get("total"), Some(&StatValue::Count(0)));
        assert_eq!(stats.get("amount"), Some(&StatValue::Sum(0.0)));
    }

    #[test]
    fn recomputation_is_deterministic() {
        let records = charges();
        let specs = [AggregateSpec::sum(
            "total_paid",
            "amount",
            QueryCriteria::new().constrain("status", "paid"),
        )];
        assert_eq!(aggregate(&records, &specs), aggregate(&records, &specs));
    }
}
