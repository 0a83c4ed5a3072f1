//! Turning a columnar frame into row records.

use gridmodel_core::{CellValue, FieldType, Frame};
use std::collections::HashMap;
use std::sync::Arc;

/// A row record produced by [`flatten`].
#[derive(Debug, Clone, Default)]
pub struct TableRow {
    /// Nesting depth: 0 for top-level rows, 1 for nested children
    pub depth: usize,
    /// Index of the source row in the frame
    pub index: usize,
    /// Cell values by field name
    pub cells: HashMap<String, CellValue>,
    /// Sub-table shown beneath the parent row
    pub data: Option<Arc<Frame>>,
}

impl TableRow {
    /// Create an empty top-level row.
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    /// Create a nested child row carrying a sub-table.
    #[must_use]
    pub fn nested(index: usize, data: Arc<Frame>) -> Self {
        Self {
            depth: 1,
            index,
            cells: HashMap::new(),
            data: Some(data),
        }
    }

    /// Add a cell value.
    #[must_use]
    pub fn cell(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.cells.insert(key.into(), value.into());
        self
    }

    /// Get a cell value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.get(key)
    }

    /// Whether this is a nested child row.
    #[must_use]
    pub const fn is_nested(&self) -> bool {
        self.depth > 0
    }
}

/// Index of the field holding nested sub-tables, if any.
#[must_use]
pub fn nested_field_index(frame: &Frame) -> Option<usize> {
    frame
        .fields
        .iter()
        .position(|f| f.field_type == FieldType::NestedFrames)
}

/// Whether the frame carries nested sub-tables.
#[must_use]
pub fn is_nested_table(frame: &Frame) -> bool {
    nested_field_index(frame).is_some()
}

/// Flatten a frame into one record per row.
///
/// Rows whose nested field holds a non-empty frame collection are followed
/// by a depth-1 record carrying the first child frame.
#[must_use]
pub fn flatten(frame: &Frame) -> Vec<TableRow> {
    let len = frame.len();
    let nested = nested_field_index(frame);
    let mut rows = Vec::with_capacity(len);

    for index in 0..len {
        let cells = frame
            .fields
            .iter()
            .map(|field| (field.name.clone(), field.value(index)))
            .collect();
        rows.push(TableRow {
            depth: 0,
            index,
            cells,
            data: None,
        });

        let child = nested
            .and_then(|col| frame.fields[col].values.get(index))
            .and_then(CellValue::as_frames)
            .and_then(|frames| frames.first());
        if let Some(child) = child {
            rows.push(TableRow::nested(index, Arc::clone(child)));
        }
    }

    tracing::trace!(frame = %frame.name, source_rows = len, rows = rows.len(), "flattened frame");
    rows
}
