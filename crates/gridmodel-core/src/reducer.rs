//! Reducer identifiers and reduction results.
//!
//! The reduction routines live in `gridmodel-table`; the types are here so a
//! [`Field`](crate::Field) can own its cached results.

use crate::error::CoreError;
use crate::value::CellValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A named statistical reduction over a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReducerId {
    Sum,
    Max,
    Min,
    Logmin,
    Mean,
    Last,
    LastNotNull,
    First,
    FirstNotNull,
    Count,
    CountAll,
    Range,
    Diff,
    #[serde(rename = "diffperc")]
    DiffPerc,
    Delta,
    Step,
    ChangeCount,
    DistinctCount,
    AllIsZero,
    AllIsNull,
    AllValues,
    UniqueValues,
    Variance,
    StdDev,
    Median,
}

impl ReducerId {
    /// Every reducer, in registry order.
    pub const ALL: [Self; 25] = [
        Self::Sum,
        Self::Max,
        Self::Min,
        Self::Logmin,
        Self::Mean,
        Self::Last,
        Self::LastNotNull,
        Self::First,
        Self::FirstNotNull,
        Self::Count,
        Self::CountAll,
        Self::Range,
        Self::Diff,
        Self::DiffPerc,
        Self::Delta,
        Self::Step,
        Self::ChangeCount,
        Self::DistinctCount,
        Self::AllIsZero,
        Self::AllIsNull,
        Self::AllValues,
        Self::UniqueValues,
        Self::Variance,
        Self::StdDev,
        Self::Median,
    ];

    /// Identifier used in configuration.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Max => "max",
            Self::Min => "min",
            Self::Logmin => "logmin",
            Self::Mean => "mean",
            Self::Last => "last",
            Self::LastNotNull => "lastNotNull",
            Self::First => "first",
            Self::FirstNotNull => "firstNotNull",
            Self::Count => "count",
            Self::CountAll => "countAll",
            Self::Range => "range",
            Self::Diff => "diff",
            Self::DiffPerc => "diffperc",
            Self::Delta => "delta",
            Self::Step => "step",
            Self::ChangeCount => "changeCount",
            Self::DistinctCount => "distinctCount",
            Self::AllIsZero => "allIsZero",
            Self::AllIsNull => "allIsNull",
            Self::AllValues => "allValues",
            Self::UniqueValues => "uniqueValues",
            Self::Variance => "variance",
            Self::StdDev => "stdDev",
            Self::Median => "median",
        }
    }

    /// Human-readable name shown in footers.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sum => "Total",
            Self::Max => "Max",
            Self::Min => "Min",
            Self::Logmin => "Min (above zero)",
            Self::Mean => "Mean",
            Self::Last => "Last",
            Self::LastNotNull => "Last *",
            Self::First => "First",
            Self::FirstNotNull => "First *",
            Self::Count => "Count",
            Self::CountAll => "Total count",
            Self::Range => "Range",
            Self::Diff => "Difference",
            Self::DiffPerc => "Difference percent",
            Self::Delta => "Delta",
            Self::Step => "Step",
            Self::ChangeCount => "Change count",
            Self::DistinctCount => "Distinct count",
            Self::AllIsZero => "All zeros",
            Self::AllIsNull => "All nulls",
            Self::AllValues => "All values",
            Self::UniqueValues => "All unique values",
            Self::Variance => "Variance",
            Self::StdDev => "StdDev",
            Self::Median => "Median",
        }
    }
}

impl FromStr for ReducerId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.id() == s)
            .ok_or_else(|| CoreError::unknown("reducer", s))
    }
}

impl fmt::Display for ReducerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// The result of one reducer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum ReducedValue {
    /// Numeric statistic
    Number(f64),
    /// Boolean statistic
    Bool(bool),
    /// A value picked from the column
    Value(CellValue),
    /// Several values picked from the column
    List(Vec<CellValue>),
    /// Nothing to report
    #[default]
    Null,
}

impl ReducedValue {
    /// Numeric view, if any.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Value(v) => v.as_number(),
            _ => None,
        }
    }

    /// Whether there is nothing to report.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null | Self::Value(CellValue::Empty))
    }

    /// Collapse into a single cell value for display.
    #[must_use]
    pub fn to_cell_value(&self) -> CellValue {
        match self {
            Self::Number(n) => CellValue::Number(*n),
            Self::Bool(b) => CellValue::Bool(*b),
            Self::Value(v) => v.clone(),
            Self::List(values) => CellValue::Text(
                values
                    .iter()
                    .map(CellValue::display)
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            Self::Null => CellValue::Empty,
        }
    }
}

impl From<Option<f64>> for ReducedValue {
    fn from(v: Option<f64>) -> Self {
        v.map_or(Self::Null, Self::Number)
    }
}

/// Cached reducer results for one field.
pub type FieldCalcs = HashMap<ReducerId, ReducedValue>;
