//! Cell alignment, overflow and footer sizing helpers.

use crate::config::FieldConfigSource;
use gridmodel_core::{CellOptions, Field, FieldTextAlign, FieldType, Frame};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Footer height per reducer line, also its base padding.
pub const FOOTER_LINE_HEIGHT: f32 = 22.0;

/// Smallest footer height.
pub const MIN_FOOTER_HEIGHT: f32 = 36.0;

/// Horizontal placement of cell content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JustifyContent {
    #[default]
    FlexStart,
    FlexEnd,
    Center,
}

impl JustifyContent {
    /// CSS `justify-content` value.
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::FlexStart => "flex-start",
            Self::FlexEnd => "flex-end",
            Self::Center => "center",
        }
    }
}

impl fmt::Display for JustifyContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_css())
    }
}

/// Alignment of a column's cells.
///
/// An explicit alignment wins. Otherwise numbers are right-aligned and
/// everything else left-aligned.
#[must_use]
pub fn text_align(field: Option<&Field>) -> JustifyContent {
    let Some(field) = field else {
        return JustifyContent::FlexStart;
    };
    match field.config.custom.align {
        FieldTextAlign::Right => JustifyContent::FlexEnd,
        FieldTextAlign::Left => JustifyContent::FlexStart,
        FieldTextAlign::Center => JustifyContent::Center,
        FieldTextAlign::Auto if field.field_type == FieldType::Number => JustifyContent::FlexEnd,
        FieldTextAlign::Auto => JustifyContent::FlexStart,
    }
}

/// Whether a cell should show its full text on hover when truncated.
///
/// Only plain string columns overflow; wrapped, inspectable and image cells
/// never do.
#[must_use]
pub fn should_text_overflow(field: &Field, text_wrap: bool, cell_options: &CellOptions) -> bool {
    !(text_wrap
        || field.config.custom.inspect
        || cell_options.is_image()
        || field.field_type != FieldType::String)
}

/// Largest number of footer reducers on any numeric field.
///
/// A by-name override setting `custom.footer.reducer` takes precedence over
/// the field's own configuration.
#[must_use]
pub fn max_reducer_count(frame: &Frame, field_config: Option<&FieldConfigSource>) -> usize {
    frame
        .fields
        .iter()
        .filter(|field| field.field_type == FieldType::Number)
        .map(|field| {
            field_config
                .and_then(|source| source.footer_override(&field.name))
                .map_or_else(
                    || field.config.custom.footer.as_ref().map_or(0, |f| f.reducer.len()),
                    |reducers| reducers.len(),
                )
        })
        .max()
        .unwrap_or(0)
}

/// Footer height in pixels: one line per reducer plus padding.
#[must_use]
pub fn calculate_footer_height(frame: &Frame, field_config: Option<&FieldConfigSource>) -> f32 {
    let count = max_reducer_count(frame, field_config) as f32;
    FOOTER_LINE_HEIGHT.mul_add(count, FOOTER_LINE_HEIGHT).max(MIN_FOOTER_HEIGHT)
}

/// Numeric prefix of a spacing value such as `"12px"`.
///
/// Leading whitespace is skipped. Values with no numeric prefix, and `NaN`,
/// yield `0.0`.
#[must_use]
pub fn extract_pixel_value(spacing: &str) -> f32 {
    let trimmed = spacing.trim_start();
    let candidate_len = trimmed
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .map_or(trimmed.len(), |(i, _)| i);

    (1..=candidate_len)
        .rev()
        .find_map(|end| trimmed[..end].parse::<f32>().ok())
        .filter(|v| !v.is_nan())
        .unwrap_or(0.0)
}
