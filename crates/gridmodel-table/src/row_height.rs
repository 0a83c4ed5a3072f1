//! Row heights for wrapped text columns.

use crate::flatten::TableRow;
use crate::measure::{CellHeightCalculator, MonospaceMeasurer, TextMeasurer};
use gridmodel_core::{CellHeight, Field, FieldType, Frame, Theme};
use serde::{Deserialize, Serialize};

/// Horizontal and vertical cell padding in pixels.
pub const CELL_PADDING: f32 = 6.0;

/// Height of the tallest preset row.
pub const MAX_CELL_HEIGHT: f32 = 48.0;

/// Height of the small preset row.
pub const SM_ROW_HEIGHT: f32 = 36.0;

/// Height of the medium preset row.
pub const MD_ROW_HEIGHT: f32 = 42.0;

/// Row height for a preset, or derived from the theme's body text.
#[must_use]
pub fn default_row_height(theme: &Theme, cell_height: Option<CellHeight>) -> f32 {
    match cell_height {
        Some(CellHeight::Sm) => SM_ROW_HEIGHT,
        Some(CellHeight::Md) => MD_ROW_HEIGHT,
        Some(CellHeight::Lg) => MAX_CELL_HEIGHT,
        Some(CellHeight::Auto) | None => CELL_PADDING * 2.0 + theme.typography.body_line_px(),
    }
}

/// What the row height engine needs to know about one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMeasure {
    /// Field name used as the row record key
    pub key: String,
    /// Field type
    pub field_type: FieldType,
    /// Whether text wraps in this column
    pub wrap_text: bool,
    /// Whether cells render as images
    pub is_image: bool,
    /// Column width in pixels
    pub width: f32,
}

impl ColumnMeasure {
    /// Create a measure for a column.
    #[must_use]
    pub fn new(key: impl Into<String>, field_type: FieldType, width: f32) -> Self {
        Self {
            key: key.into(),
            field_type,
            wrap_text: false,
            is_image: false,
            width,
        }
    }

    /// Enable text wrapping.
    #[must_use]
    pub const fn wrap(mut self, wrap: bool) -> Self {
        self.wrap_text = wrap;
        self
    }

    /// Mark the column as an image column.
    #[must_use]
    pub const fn image(mut self, is_image: bool) -> Self {
        self.is_image = is_image;
        self
    }

    /// Measure for a field, using its configured width or `fallback_width`.
    #[must_use]
    pub fn from_field(field: &Field, fallback_width: f32) -> Self {
        Self {
            key: field.name.clone(),
            field_type: field.field_type,
            wrap_text: field.config.custom.wrap_text,
            is_image: field.cell_options().is_image(),
            width: field.config.custom.width.unwrap_or(fallback_width),
        }
    }

    /// Whether the column can make a row taller.
    #[must_use]
    pub const fn grows_rows(&self) -> bool {
        matches!(self.field_type, FieldType::String) && self.wrap_text && !self.is_image
    }
}

/// Column measures for every field in a frame, in field order.
#[must_use]
pub fn column_measures(frame: &Frame, fallback_width: f32) -> Vec<ColumnMeasure> {
    frame
        .fields
        .iter()
        .map(|field| ColumnMeasure::from_field(field, fallback_width))
        .collect()
}

/// Picks the tallest wrapped cell of a row and measures it.
///
/// Candidates are estimated from character counts; only the column with
/// the most estimated lines is measured precisely.
#[derive(Debug, Clone)]
pub struct RowHeightEngine<M> {
    calculator: CellHeightCalculator<M>,
}

impl RowHeightEngine<MonospaceMeasurer> {
    /// Engine using the theme's body typography.
    #[must_use]
    pub fn for_theme(theme: &Theme, cell_height: Option<CellHeight>) -> Self {
        Self::new(CellHeightCalculator::new(
            MonospaceMeasurer::from_theme(theme),
            theme.typography.body_line_px(),
            default_row_height(theme, cell_height),
            CELL_PADDING,
        ))
    }
}

impl<M: TextMeasurer> RowHeightEngine<M> {
    /// Create an engine around a cell height calculator.
    #[must_use]
    pub const fn new(calculator: CellHeightCalculator<M>) -> Self {
        Self { calculator }
    }

    /// Height below which no row shrinks.
    #[must_use]
    pub const fn default_row_height(&self) -> f32 {
        self.calculator.default_row_height()
    }

    /// Height of `row` given the table's columns.
    #[must_use]
    pub fn row_height(&self, row: &TableRow, columns: &[ColumnMeasure]) -> f32 {
        let avg_char_width = self.calculator.measurer().avg_char_width();
        let mut max_lines = 1.0_f32;
        let mut tallest: Option<(&str, f32)> = None;

        for column in columns.iter().filter(|c| c.grows_rows()) {
            let Some(text) = row.get(&column.key).and_then(|v| v.as_text()) else {
                continue;
            };
            let chars_per_line = column.width / avg_char_width;
            let approx_lines = text.chars().count() as f32 / chars_per_line;
            if approx_lines > max_lines {
                max_lines = approx_lines;
                tallest = Some((text, column.width));
            }
        }

        match tallest {
            Some((text, width)) => {
                tracing::trace!(row = row.index, approx_lines = max_lines, "measuring wrapped cell");
                self.calculator.height(text, width)
            }
            None => self.default_row_height(),
        }
    }

    /// Heights for a slice of rows.
    #[must_use]
    pub fn row_heights(&self, rows: &[TableRow], columns: &[ColumnMeasure]) -> Vec<f32> {
        rows.iter().map(|row| self.row_height(row, columns)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridmodel_core::{CellOptions, CellValue};
    use proptest::prelude::*;

    fn engine() -> RowHeightEngine<MonospaceMeasurer> {
        RowHeightEngine::for_theme(&Theme::dark(), None)
    }

    // ===== Default Heights =====

    #[test]
    fn test_default_row_height_presets() {
        let theme = Theme::dark();
        assert_eq!(default_row_height(&theme, Some(CellHeight::Sm)), 36.0);
        assert_eq!(default_row_height(&theme, Some(CellHeight::Md)), 42.0);
        assert_eq!(default_row_height(&theme, Some(CellHeight::Lg)), 48.0);
    }

    #[test]
    fn test_default_row_height_from_theme() {
        // 6 * 2 + 14 * 1.5
        assert_eq!(default_row_height(&Theme::dark(), None), 33.0);
        assert_eq!(default_row_height(&Theme::dark(), Some(CellHeight::Auto)), 33.0);
    }

    // ===== Column Eligibility =====

    #[test]
    fn test_only_wrapped_string_columns_grow() {
        assert!(ColumnMeasure::new("a", FieldType::String, 100.0).wrap(true).grows_rows());
        assert!(!ColumnMeasure::new("a", FieldType::String, 100.0).grows_rows());
        assert!(!ColumnMeasure::new("a", FieldType::Number, 100.0).wrap(true).grows_rows());
        assert!(!ColumnMeasure::new("a", FieldType::String, 100.0)
            .wrap(true)
            .image(true)
            .grows_rows());
    }

    #[test]
    fn test_from_field_reads_config() {
        let mut field = Field::new("url", FieldType::String);
        field.config.custom.wrap_text = true;
        field.config.custom.width = Some(250.0);
        field.config.custom.cell_options = Some(CellOptions::Image);
        let measure = ColumnMeasure::from_field(&field, 100.0);
        assert_eq!(measure.width, 250.0);
        assert!(measure.is_image);
        assert!(!measure.grows_rows());
    }

    // ===== Row Heights =====

    #[test]
    fn test_short_text_uses_default() {
        let row = TableRow::new(0).cell("msg", "hello");
        let cols = [ColumnMeasure::new("msg", FieldType::String, 200.0).wrap(true)];
        assert_eq!(engine().row_height(&row, &cols), 33.0);
    }

    #[test]
    fn test_missing_or_empty_text_uses_default() {
        let cols = [ColumnMeasure::new("msg", FieldType::String, 200.0).wrap(true)];
        assert_eq!(engine().row_height(&TableRow::new(0), &cols), 33.0);
        let row = TableRow::new(0).cell("msg", "");
        assert_eq!(engine().row_height(&row, &cols), 33.0);
        let row = TableRow::new(0).cell("msg", CellValue::Empty);
        assert_eq!(engine().row_height(&row, &cols), 33.0);
    }

    #[test]
    fn test_long_text_grows_row() {
        // 8.4px per char, 100px column: 11 chars per line
        let text = "lorem ipsum dolor sit amet consectetur adipiscing elit";
        let row = TableRow::new(0).cell("msg", text);
        let cols = [ColumnMeasure::new("msg", FieldType::String, 100.0).wrap(true)];
        let height = engine().row_height(&row, &cols);
        assert!(height > 33.0);
        assert_eq!((height - 12.0) % 21.0, 0.0);
    }

    #[test]
    fn test_unwrapped_column_ignored() {
        let text = "x".repeat(500);
        let row = TableRow::new(0).cell("msg", text.as_str());
        let cols = [ColumnMeasure::new("msg", FieldType::String, 100.0)];
        assert_eq!(engine().row_height(&row, &cols), 33.0);
    }

    #[test]
    fn test_tallest_column_wins() {
        let short = "word ".repeat(10);
        let long = "word ".repeat(60);
        let row = TableRow::new(0)
            .cell("a", short.as_str())
            .cell("b", long.as_str());
        let cols = [
            ColumnMeasure::new("a", FieldType::String, 100.0).wrap(true),
            ColumnMeasure::new("b", FieldType::String, 100.0).wrap(true),
        ];
        let e = engine();
        let only_b = e.row_height(&row, &cols[1..]);
        assert_eq!(e.row_height(&row, &cols), only_b);
    }

    #[test]
    fn test_row_heights_batch() {
        let rows = vec![TableRow::new(0).cell("a", "x"), TableRow::new(1)];
        let cols = [ColumnMeasure::new("a", FieldType::String, 100.0).wrap(true)];
        assert_eq!(engine().row_heights(&rows, &cols), vec![33.0, 33.0]);
    }

    #[test]
    fn test_column_measures_field_order() {
        let frame = Frame::new("t")
            .with_field(Field::new("b", FieldType::String))
            .with_field(Field::new("a", FieldType::Number));
        let keys: Vec<_> = column_measures(&frame, 80.0)
            .into_iter()
            .map(|c| c.key)
            .collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    proptest! {
        #[test]
        fn prop_row_height_at_least_default(text in "[a-z ]{0,200}", width in 20.0f32..600.0) {
            let row = TableRow::new(0).cell("msg", text.as_str());
            let cols = [ColumnMeasure::new("msg", FieldType::String, width).wrap(true)];
            prop_assert!(engine().row_height(&row, &cols) >= 33.0);
        }
    }
}
