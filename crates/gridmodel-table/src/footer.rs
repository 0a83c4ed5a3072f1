//! Per-column footer aggregation.

use crate::flatten::TableRow;
use crate::reduce::reduce_values;
use gridmodel_core::{CellValue, Field, FieldCalcs, ReducedValue, ReducerId};
use serde::Serialize;

/// Reducers that make sense on non-numeric columns.
pub const SPECIAL_REDUCERS: [ReducerId; 10] = [
    ReducerId::AllValues,
    ReducerId::ChangeCount,
    ReducerId::Count,
    ReducerId::CountAll,
    ReducerId::DistinctCount,
    ReducerId::First,
    ReducerId::FirstNotNull,
    ReducerId::Last,
    ReducerId::LastNotNull,
    ReducerId::UniqueValues,
];

/// Whether a reducer is valid on any column type.
#[must_use]
pub fn is_special_reducer(reducer: ReducerId) -> bool {
    SPECIAL_REDUCERS.contains(&reducer)
}

/// One reducer result in a footer cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterEntry {
    /// Reducer that produced the value
    pub reducer: ReducerId,
    /// Raw result
    pub value: ReducedValue,
    /// Result passed through the field's display processor
    pub formatted_value: String,
    /// Human-readable reducer name
    pub reducer_name: String,
}

/// The footer cell of one column, entries in configured order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FooterItem {
    /// Entries, one per reducer
    pub entries: Vec<FooterEntry>,
}

impl FooterItem {
    /// Entry for a reducer.
    #[must_use]
    pub fn get(&self, reducer: ReducerId) -> Option<&FooterEntry> {
        self.entries.iter().find(|e| e.reducer == reducer)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Compute the footer cell for `field` over the currently visible rows.
///
/// Returns `None` when no reducers are configured, or when the column is
/// non-numeric and none of its reducers is special. Cached results in the
/// field's state are reused until the row count changes. Only top-level
/// rows contribute values.
pub fn compute_footer(rows: &[TableRow], field: &mut Field) -> Option<FooterItem> {
    let reducers = field.footer_reducers();
    let numeric = field.field_type.is_numeric();
    if reducers.is_empty() || (!numeric && !reducers.iter().copied().any(is_special_reducer)) {
        return None;
    }

    let results: Vec<(ReducerId, ReducedValue)> = {
        let footer = &mut field.state.footer;
        if footer.last_processed_row_count != rows.len() {
            if footer.calcs.take().is_some() {
                tracing::debug!(
                    field = %field.name,
                    previous = footer.last_processed_row_count,
                    current = rows.len(),
                    "row count changed, dropping footer cache"
                );
            }
            footer.last_processed_row_count = rows.len();
        }

        let calcs = footer.calcs.get_or_insert_with(FieldCalcs::new);
        if reducers.iter().all(|r| calcs.contains_key(r)) {
            tracing::trace!(field = %field.name, "footer served from cache");
        } else {
            let values: Vec<CellValue> = rows
                .iter()
                .filter(|row| !row.is_nested())
                .map(|row| row.get(&field.name).cloned().unwrap_or_default())
                .collect();
            reduce_values(&values, field.field_type, &reducers, calcs);
        }

        let mut results: Vec<(ReducerId, ReducedValue)> = Vec::with_capacity(reducers.len());
        for reducer in reducers {
            if !(numeric || is_special_reducer(reducer)) || results.iter().any(|(r, _)| *r == reducer) {
                continue;
            }
            if let Some(value) = calcs.get(&reducer) {
                results.push((reducer, value.clone()));
            }
        }
        results
    };

    let entries: Vec<FooterEntry> = results
        .into_iter()
        .map(|(reducer, value)| FooterEntry {
            reducer,
            formatted_value: field.display_value(&value.to_cell_value()).formatted(),
            reducer_name: reducer.name().to_string(),
            value,
        })
        .collect();

    (!entries.is_empty()).then_some(FooterItem { entries })
}
