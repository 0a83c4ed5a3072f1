//! Row model build pipeline for virtualized tables.
//!
//! Turns a [`gridmodel_core::Frame`] into rows a grid can render:
//!
//! 1. [`flatten`] the frame into [`TableRow`]s, surfacing nested sub-tables
//! 2. [`sort_rows`] with comparators from [`comparator_for`]
//! 3. size each visible row with a [`RowHeightEngine`]
//! 4. aggregate footers with [`compute_footer`]
//! 5. per cell, [`resolve_colors`] and [`alignment_factor`]
//!
//! Caches live in each field's [`gridmodel_core::FieldState`]; functions that
//! update them take the field by `&mut`.

pub mod alignment;
pub mod cell_colors;
pub mod config;
pub mod error;
pub mod flatten;
pub mod footer;
pub mod layout;
pub mod measure;
pub mod reduce;
pub mod row_height;
pub mod sort;

pub use alignment::{alignment_factor, ALIGNMENT_LOOKAHEAD};
pub use cell_colors::{
    convert_rgba_to_hex, resolve_colors, text_color_for_alpha_background, Background, CellColors,
};
pub use config::{
    ConfigOverride, DynamicConfigValue, FieldConfigSource, FieldMatcher, TableConfig,
};
pub use error::ConfigError;
pub use flatten::{flatten, is_nested_table, TableRow};
pub use footer::{compute_footer, is_special_reducer, FooterEntry, FooterItem};
pub use layout::{
    calculate_footer_height, extract_pixel_value, max_reducer_count, should_text_overflow,
    text_align, JustifyContent,
};
pub use measure::{CellHeightCalculator, MonospaceMeasurer, TextMeasurer};
pub use reduce::reduce_values;
pub use row_height::{column_measures, default_row_height, ColumnMeasure, RowHeightEngine};
pub use sort::{comparator_for, sort_rows, Collator, Comparator, SortColumn, SortDirection, SortState};
