//! Type-aware row comparators and sort state.

use crate::flatten::TableRow;
use gridmodel_core::{CellValue, FieldType, Frame};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Compares two cell values.
pub type Comparator = Arc<dyn Fn(&CellValue, &CellValue) -> Ordering + Send + Sync>;

/// Which differences a [`Collator`] treats as significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sensitivity {
    /// Only base letters differ: `a = á = A`
    #[default]
    Base,
    /// Base letters and accents: `a ≠ á`, `a = A`
    Accent,
    /// Base letters and case: `a ≠ A`, `a = á`
    Case,
    /// Every difference counts
    Variant,
}

/// Locale-independent string collation.
///
/// Strings are decomposed (NFD) before comparison so accents can be
/// stripped as combining marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Collator {
    /// Significant differences
    pub sensitivity: Sensitivity,
}

impl Collator {
    /// Collator ignoring case and accents.
    #[must_use]
    pub const fn base() -> Self {
        Self {
            sensitivity: Sensitivity::Base,
        }
    }

    /// Collator with the given sensitivity.
    #[must_use]
    pub const fn with_sensitivity(sensitivity: Sensitivity) -> Self {
        Self { sensitivity }
    }

    /// Comparison key for `s`.
    #[must_use]
    pub fn sort_key(&self, s: &str) -> String {
        let strip_marks = matches!(self.sensitivity, Sensitivity::Base | Sensitivity::Case);
        let fold_case = matches!(self.sensitivity, Sensitivity::Base | Sensitivity::Accent);
        s.nfd()
            .filter(|c| !(strip_marks && is_combining_mark(*c)))
            .flat_map(|c| {
                let folded: Vec<char> = if fold_case {
                    c.to_lowercase().collect()
                } else {
                    vec![c]
                };
                folded
            })
            .collect()
    }

    /// Compare two strings.
    #[must_use]
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        if self.sensitivity == Sensitivity::Variant {
            return a.cmp(b);
        }
        self.sort_key(a).cmp(&self.sort_key(b))
    }
}

/// Position of a value in numeric order: nulls, then numbers, then values
/// that do not coerce to a number.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
enum NumericKey {
    Null,
    Number(f64),
    NotANumber,
}

impl NumericKey {
    fn of(value: &CellValue) -> Self {
        if value.is_empty() {
            return Self::Null;
        }
        let n = value.to_number();
        if n.is_nan() {
            Self::NotANumber
        } else {
            Self::Number(n)
        }
    }
}

fn compare_numeric(a: &CellValue, b: &CellValue) -> Ordering {
    // NaN never reaches the key, so every pair is comparable
    NumericKey::of(a)
        .partial_cmp(&NumericKey::of(b))
        .unwrap_or(Ordering::Equal)
}

/// Comparator for values of a field type.
///
/// Time, number and boolean values compare numerically with nulls first
/// and values that are not numbers last. Everything else compares as
/// collated text.
#[must_use]
pub fn comparator_for(field_type: FieldType, collator: &Collator) -> Comparator {
    match field_type {
        FieldType::Time | FieldType::Number | FieldType::Boolean => Arc::new(compare_numeric),
        FieldType::String
        | FieldType::Enum
        | FieldType::Other
        | FieldType::NestedFrames => {
            let collator = *collator;
            Arc::new(move |a: &CellValue, b: &CellValue| collator.compare(&a.display(), &b.display()))
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "ASC")]
    Ascending,
    #[serde(rename = "DESC")]
    Descending,
}

/// One column of a multi-column sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortColumn {
    /// Field name
    pub column_key: String,
    /// Direction
    pub direction: SortDirection,
}

impl SortColumn {
    /// Create a sort column.
    #[must_use]
    pub fn new(column_key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column_key: column_key.into(),
            direction,
        }
    }
}

/// Ordered list of active sort columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    columns: Vec<SortColumn>,
}

impl SortState {
    /// Empty sort state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Active sort columns, highest priority first.
    #[must_use]
    pub fn columns(&self) -> &[SortColumn] {
        &self.columns
    }

    /// Apply a header click.
    ///
    /// A column already sorted descending is removed. Otherwise the column
    /// is appended with `direction` when multi-sorting, or becomes the only
    /// sort column.
    pub fn handle_sort(&mut self, column_key: &str, direction: SortDirection, multi_sort: bool) {
        let position = self.columns.iter().position(|c| c.column_key == column_key);
        let current = position.map(|i| self.columns.remove(i));

        if current.is_some_and(|c| c.direction == SortDirection::Descending) {
            tracing::debug!(column = column_key, "clearing sort");
            return;
        }

        let column = SortColumn::new(column_key, direction);
        if multi_sort {
            self.columns.push(column);
        } else {
            self.columns = vec![column];
        }
    }

    /// Remove every sort column.
    pub fn clear(&mut self) {
        self.columns.clear();
    }
}

/// Sort flattened rows in place.
///
/// Top-level rows are ordered by the sort columns, later columns breaking
/// ties; the sort is stable. Nested child rows stay directly after their
/// parent. Unknown column keys are ignored.
pub fn sort_rows(rows: &mut Vec<TableRow>, sort_columns: &[SortColumn], frame: &Frame, collator: &Collator) {
    let comparators: Vec<(&str, SortDirection, Comparator)> = sort_columns
        .iter()
        .filter_map(|sc| {
            let field = frame.field_by_name(&sc.column_key)?;
            Some((
                sc.column_key.as_str(),
                sc.direction,
                comparator_for(field.field_type, collator),
            ))
        })
        .collect();
    if comparators.is_empty() {
        return;
    }

    let mut groups: Vec<Vec<TableRow>> = Vec::new();
    for row in rows.drain(..) {
        match groups.last_mut() {
            Some(group) if row.is_nested() => group.push(row),
            _ => groups.push(vec![row]),
        }
    }

    let empty = CellValue::Empty;
    groups.sort_by(|a, b| {
        comparators
            .iter()
            .map(|(key, direction, cmp)| {
                let left = a[0].get(key).unwrap_or(&empty);
                let right = b[0].get(key).unwrap_or(&empty);
                let ord = cmp(left, right);
                match direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            })
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    });

    rows.extend(groups.into_iter().flatten());
}
