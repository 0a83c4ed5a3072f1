//! Core data types for gridmodel tables.
//!
//! This crate provides the types shared by the table row model:
//! - Colors and themes: [`Color`] with HSL operations, [`Theme`]
//! - Columnar data: [`Frame`], [`Field`], [`CellValue`], [`DisplayValue`]
//! - Field configuration: [`FieldConfig`], [`CellOptions`] and legacy
//!   display-mode migration
//! - Reducer identifiers and cached results: [`ReducerId`], [`ReducedValue`]

mod cell_options;
mod color;
mod error;
mod frame;
mod reducer;
mod theme;
mod value;

pub use cell_options::{
    migrate_display_mode, BackgroundDisplayMode, BarGaugeDisplayMode, CellHeight, CellOptions,
};
pub use color::{Color, ColorParseError};
pub use error::CoreError;
pub use frame::{
    DisplayProcessor, Field, FieldConfig, FieldState, FieldTextAlign, FieldType, FooterCache,
    FooterOptions, Frame, TableFieldOptions,
};
pub use reducer::{FieldCalcs, ReducedValue, ReducerId};
pub use theme::{ActionColors, BackgroundColors, ColorPalette, Theme, Typography};
pub use value::{CellValue, DisplayValue};
