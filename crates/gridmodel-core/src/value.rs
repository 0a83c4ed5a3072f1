//! Cell values and their formatted display form.

use crate::color::Color;
use crate::frame::Frame;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A single value in a field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum CellValue {
    /// Text value
    Text(String),
    /// Numeric value
    Number(f64),
    /// Boolean value
    Bool(bool),
    /// Timestamp in epoch milliseconds
    Time(i64),
    /// Nested sub-tables attached to a row
    #[serde(skip)]
    Frames(Vec<Arc<Frame>>),
    /// Empty cell (null)
    #[default]
    Empty,
}

impl CellValue {
    /// Raw string conversion used when a field has no display processor.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => format!("{n}"),
            Self::Bool(b) => b.to_string(),
            Self::Time(t) => t.to_string(),
            Self::Frames(frames) => format!("{} frames", frames.len()),
            Self::Empty => String::new(),
        }
    }

    /// Whether the cell holds no value.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Numeric coercion. Text that does not parse is NaN.
    #[must_use]
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::Time(t) => *t as f64,
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse().unwrap_or(f64::NAN)
                }
            }
            Self::Empty => 0.0,
            Self::Frames(_) => f64::NAN,
        }
    }

    /// The value as a finite-or-not number, only for numeric variants.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Borrow text content.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow nested frames.
    #[must_use]
    pub fn as_frames(&self) -> Option<&[Arc<Frame>]> {
        match self {
            Self::Frames(frames) => Some(frames),
            _ => None,
        }
    }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Time(a), Self::Time(b)) => a == b,
            (Self::Frames(a), Self::Frames(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| Arc::ptr_eq(x, y))
            }
            (Self::Empty, Self::Empty) => true,
            _ => false,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<T: Into<Self>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Empty, Into::into)
    }
}

/// A value after it went through a field's display processor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayValue {
    /// Formatted text without affixes
    pub text: String,
    /// Numeric interpretation (NaN when not numeric)
    pub numeric: f64,
    /// Text placed before the value
    #[serde(default)]
    pub prefix: Option<String>,
    /// Text placed after the value (units)
    #[serde(default)]
    pub suffix: Option<String>,
    /// Color assigned by thresholds or value mappings
    #[serde(default)]
    pub color: Option<Color>,
}

impl DisplayValue {
    /// Create a display value with text and numeric parts.
    #[must_use]
    pub fn new(text: impl Into<String>, numeric: f64) -> Self {
        Self {
            text: text.into(),
            numeric,
            ..Self::default()
        }
    }

    /// Raw conversion used when no display processor is configured.
    #[must_use]
    pub fn from_raw(value: &CellValue) -> Self {
        Self::new(value.display(), value.to_number())
    }

    /// Set the prefix.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Set the suffix.
    #[must_use]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Set the color.
    #[must_use]
    pub const fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Prefix, text and suffix joined.
    #[must_use]
    pub fn formatted(&self) -> String {
        let mut out = String::with_capacity(self.text.len());
        if let Some(prefix) = &self.prefix {
            out.push_str(prefix);
        }
        out.push_str(&self.text);
        if let Some(suffix) = &self.suffix {
            out.push_str(suffix);
        }
        out
    }

    /// Character count of [`Self::formatted`].
    #[must_use]
    pub fn formatted_len(&self) -> usize {
        self.prefix.as_deref().map_or(0, |p| p.chars().count())
            + self.text.chars().count()
            + self.suffix.as_deref().map_or(0, |s| s.chars().count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== CellValue =====

    #[test]
    fn test_display_number_without_trailing_zero() {
        assert_eq!(CellValue::Number(9.0).display(), "9");
        assert_eq!(CellValue::Number(2.5).display(), "2.5");
    }

    #[test]
    fn test_display_other_variants() {
        assert_eq!(CellValue::Bool(true).display(), "true");
        assert_eq!(CellValue::Time(1_700_000_000_000).display(), "1700000000000");
        assert_eq!(CellValue::Empty.display(), "");
        assert_eq!(CellValue::from("x").display(), "x");
    }

    #[test]
    fn test_to_number_coercion() {
        assert_eq!(CellValue::Bool(true).to_number(), 1.0);
        assert_eq!(CellValue::Text(" 42 ".into()).to_number(), 42.0);
        assert_eq!(CellValue::Text(String::new()).to_number(), 0.0);
        assert!(CellValue::Text("abc".into()).to_number().is_nan());
        assert!(CellValue::Frames(Vec::new()).to_number().is_nan());
    }

    #[test]
    fn test_from_option() {
        assert_eq!(CellValue::from(None::<f64>), CellValue::Empty);
        assert_eq!(CellValue::from(Some(3)), CellValue::Number(3.0));
    }

    #[test]
    fn test_frames_compare_by_identity() {
        let frame = Arc::new(Frame::new("child"));
        let a = CellValue::Frames(vec![Arc::clone(&frame)]);
        let b = CellValue::Frames(vec![Arc::clone(&frame)]);
        let c = CellValue::Frames(vec![Arc::new(Frame::new("child"))]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    // ===== DisplayValue =====

    #[test]
    fn test_formatted_joins_affixes() {
        let dv = DisplayValue::new("12.5", 12.5).prefix("$").suffix(" USD");
        assert_eq!(dv.formatted(), "$12.5 USD");
        assert_eq!(dv.formatted_len(), 9);
    }

    #[test]
    fn test_formatted_len_counts_chars() {
        let dv = DisplayValue::new("héllo", f64::NAN).suffix("°");
        assert_eq!(dv.formatted_len(), 6);
    }

    #[test]
    fn test_from_raw() {
        let dv = DisplayValue::from_raw(&CellValue::Number(3.0));
        assert_eq!(dv.text, "3");
        assert_eq!(dv.numeric, 3.0);
        assert!(dv.color.is_none());
    }
}
