//! Columnar frames, their fields and per-field configuration.

use crate::cell_options::{migrate_display_mode, CellOptions};
use crate::reducer::{FieldCalcs, ReducerId};
use crate::value::{CellValue, DisplayValue};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Formats a raw cell value for display.
pub type DisplayProcessor = Arc<dyn Fn(&CellValue) -> DisplayValue + Send + Sync>;

/// Semantic type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    Time,
    Number,
    #[default]
    String,
    Boolean,
    Enum,
    Other,
    /// Each value is a collection of sub-frames
    NestedFrames,
}

impl FieldType {
    /// Whether values compare and reduce as numbers.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Number)
    }
}

/// Requested horizontal alignment of a field's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldTextAlign {
    /// Decide from the field type
    #[default]
    Auto,
    Left,
    Center,
    Right,
}

/// Footer settings for a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterOptions {
    /// Reducer ids to show in the footer
    pub reducer: Vec<String>,
}

/// Table-specific field options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableFieldOptions {
    /// Text alignment
    pub align: FieldTextAlign,
    /// Wrap long text instead of truncating
    pub wrap_text: bool,
    /// Allow opening the cell inspector
    pub inspect: bool,
    /// Structured cell display options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_options: Option<CellOptions>,
    /// Legacy single-value display mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_mode: Option<String>,
    /// Footer reducers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<FooterOptions>,
    /// Fixed column width in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
}

/// Field configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldConfig {
    /// Display name overriding the field name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Unit suffix appended by the default display processor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Table options
    pub custom: TableFieldOptions,
}

/// Cached footer reductions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FooterCache {
    /// Row count the cached calcs were computed for
    pub last_processed_row_count: usize,
    /// Cached reducer results
    pub calcs: Option<FieldCalcs>,
}

/// Render-time state owned by a field.
///
/// Dropped together with the field; [`FieldState::reset`] clears it in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldState {
    /// Widest display value seen for gauge alignment
    pub alignment_factors: Option<DisplayValue>,
    /// Footer reduction cache
    pub footer: FooterCache,
}

impl FieldState {
    /// Clear all cached state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A named, typed column of values.
#[derive(Clone)]
pub struct Field {
    /// Field name (row record key)
    pub name: String,
    /// Semantic type
    pub field_type: FieldType,
    /// Column values
    pub values: Vec<CellValue>,
    /// Configuration
    pub config: FieldConfig,
    /// Display processor
    display: Option<DisplayProcessor>,
    /// Render-time caches
    pub state: FieldState,
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .field("values", &self.values.len())
            .field("config", &self.config)
            .field("display", &self.display.is_some())
            .field("state", &self.state)
            .finish()
    }
}

impl Field {
    /// Create an empty field.
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            values: Vec::new(),
            config: FieldConfig::default(),
            display: None,
            state: FieldState::default(),
        }
    }

    /// Set the values.
    #[must_use]
    pub fn with_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Set the configuration.
    #[must_use]
    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the display processor.
    #[must_use]
    pub fn with_display<F>(mut self, display: F) -> Self
    where
        F: Fn(&CellValue) -> DisplayValue + Send + Sync + 'static,
    {
        self.display = Some(Arc::new(display));
        self
    }

    /// Replace or clear the display processor.
    pub fn set_display(&mut self, display: Option<DisplayProcessor>) {
        self.display = display;
    }

    /// Whether a display processor is attached.
    #[must_use]
    pub const fn has_display(&self) -> bool {
        self.display.is_some()
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the field has no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `index`, `Empty` when out of range.
    #[must_use]
    pub fn value(&self, index: usize) -> CellValue {
        self.values.get(index).cloned().unwrap_or_default()
    }

    /// Format a value with the display processor, or by raw conversion.
    ///
    /// The raw conversion appends the configured unit to non-empty values.
    #[must_use]
    pub fn display_value(&self, value: &CellValue) -> DisplayValue {
        if let Some(display) = &self.display {
            return display(value);
        }
        let raw = DisplayValue::from_raw(value);
        match self.config.unit.as_deref() {
            Some(unit) if !unit.is_empty() && !value.is_empty() => raw.suffix(format!(" {unit}")),
            _ => raw,
        }
    }

    /// Name shown in headers.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.config.display_name.as_deref().unwrap_or(&self.name)
    }

    /// Effective cell options. A legacy display mode takes precedence.
    #[must_use]
    pub fn cell_options(&self) -> CellOptions {
        if let Some(mode) = &self.config.custom.display_mode {
            return migrate_display_mode(mode);
        }
        self.config.custom.cell_options.clone().unwrap_or_default()
    }

    /// Configured footer reducers. Unknown ids are skipped.
    #[must_use]
    pub fn footer_reducers(&self) -> Vec<ReducerId> {
        let Some(footer) = &self.config.custom.footer else {
            return Vec::new();
        };
        footer
            .reducer
            .iter()
            .filter_map(|id| match id.parse() {
                Ok(reducer) => Some(reducer),
                Err(err) => {
                    tracing::debug!(field = %self.name, %err, "skipping footer reducer");
                    None
                }
            })
            .collect()
    }
}

/// An ordered collection of equally long fields.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Frame name
    pub name: String,
    /// Columns
    pub fields: Vec<Field>,
}

impl Frame {
    /// Create an empty frame.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field.
    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Row count, taken from the first field.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.first().map_or(0, Field::len)
    }

    /// Whether the frame has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find a field by name.
    #[must_use]
    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Find a field by name for mutation.
    pub fn field_by_name_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name == name)
    }
}
