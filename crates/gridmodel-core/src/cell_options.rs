//! Cell display modes and migration from the legacy single-value form.
//!
//! Older configurations stored one string such as `"lcd-gauge"` or
//! `"color-background-solid"`. The structured form splits that into a cell
//! type plus an optional sub-mode. [`migrate_display_mode`] maps the former
//! to the latter.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sub-mode for colored background cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundDisplayMode {
    /// Flat fill with the value color
    Basic,
    /// Two-stop gradient ending in the value color
    Gradient,
}

impl FromStr for BackgroundDisplayMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Self::Basic),
            "gradient" => Ok(Self::Gradient),
            other => Err(CoreError::unknown("background display mode", other)),
        }
    }
}

impl BackgroundDisplayMode {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Gradient => "gradient",
        }
    }
}

/// Sub-mode for gauge cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarGaugeDisplayMode {
    Basic,
    Gradient,
    Lcd,
}

impl FromStr for BarGaugeDisplayMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Self::Basic),
            "gradient" => Ok(Self::Gradient),
            "lcd" => Ok(Self::Lcd),
            other => Err(CoreError::unknown("gauge display mode", other)),
        }
    }
}

impl BarGaugeDisplayMode {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Gradient => "gradient",
            Self::Lcd => "lcd",
        }
    }
}

/// How a cell renders its value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawCellOptions", into = "RawCellOptions")]
pub enum CellOptions {
    /// Plain formatted text
    #[default]
    Auto,
    /// Text drawn in the value color
    ColorText,
    /// Background filled with the value color (gradient when unset)
    ColorBackground { mode: Option<BackgroundDisplayMode> },
    /// Horizontal bar gauge
    Gauge { mode: Option<BarGaugeDisplayMode> },
    /// Value is an image URL
    Image,
    /// Inline time-series sparkline
    Sparkline,
    /// Pretty-printed JSON
    JsonView,
    /// Data links rendered as anchors
    DataLinks,
    /// Action buttons
    Actions,
    /// Externally provided renderer
    Custom,
    /// Unrecognized type name, kept verbatim
    Other(String),
}

impl CellOptions {
    /// Build from a structured type name with no sub-mode.
    #[must_use]
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "auto" => Self::Auto,
            "color-text" => Self::ColorText,
            "color-background" => Self::ColorBackground { mode: None },
            "gauge" => Self::Gauge { mode: None },
            "image" => Self::Image,
            "sparkline" => Self::Sparkline,
            "json-view" => Self::JsonView,
            "data-links" => Self::DataLinks,
            "actions" => Self::Actions,
            "custom" => Self::Custom,
            other => Self::Other(other.to_string()),
        }
    }

    /// Structured type name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Auto => "auto",
            Self::ColorText => "color-text",
            Self::ColorBackground { .. } => "color-background",
            Self::Gauge { .. } => "gauge",
            Self::Image => "image",
            Self::Sparkline => "sparkline",
            Self::JsonView => "json-view",
            Self::DataLinks => "data-links",
            Self::Actions => "actions",
            Self::Custom => "custom",
            Self::Other(name) => name,
        }
    }

    /// Whether cells render as images.
    #[must_use]
    pub const fn is_image(&self) -> bool {
        matches!(self, Self::Image)
    }

    /// Background sub-mode with the gradient default applied.
    #[must_use]
    pub fn background_mode(&self) -> Option<BackgroundDisplayMode> {
        match self {
            Self::ColorBackground { mode } => Some(mode.unwrap_or(BackgroundDisplayMode::Gradient)),
            _ => None,
        }
    }
}

impl fmt::Display for CellOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Map a legacy single-value display mode to structured cell options.
///
/// Unknown names pass through as their own type.
#[must_use]
pub fn migrate_display_mode(display_mode: &str) -> CellOptions {
    match display_mode {
        "basic" => CellOptions::Gauge {
            mode: Some(BarGaugeDisplayMode::Basic),
        },
        "gradient-gauge" => CellOptions::Gauge {
            mode: Some(BarGaugeDisplayMode::Gradient),
        },
        "lcd-gauge" => CellOptions::Gauge {
            mode: Some(BarGaugeDisplayMode::Lcd),
        },
        // The legacy "color-background" name meant the gradient fill.
        "color-background" => CellOptions::ColorBackground {
            mode: Some(BackgroundDisplayMode::Gradient),
        },
        "color-background-solid" => CellOptions::ColorBackground {
            mode: Some(BackgroundDisplayMode::Basic),
        },
        other => {
            let options = CellOptions::from_type_name(other);
            if matches!(options, CellOptions::Other(_)) {
                tracing::debug!(display_mode = other, "passing through unrecognized display mode");
            }
            options
        }
    }
}

/// Wire form of [`CellOptions`]: `{ "type": "...", "mode": "..." }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawCellOptions {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mode: Option<String>,
}

/// Parse a sub-mode, dropping names this version does not know.
fn known_mode<T: FromStr<Err = CoreError>>(mode: &str) -> Option<T> {
    match mode.parse() {
        Ok(mode) => Some(mode),
        Err(err) => {
            tracing::debug!(%err, "ignoring cell sub-mode");
            None
        }
    }
}

impl From<RawCellOptions> for CellOptions {
    fn from(raw: RawCellOptions) -> Self {
        match (Self::from_type_name(&raw.kind), raw.mode.as_deref()) {
            (Self::ColorBackground { .. }, Some(mode)) => Self::ColorBackground {
                mode: known_mode(mode),
            },
            (Self::Gauge { .. }, Some(mode)) => Self::Gauge {
                mode: known_mode(mode),
            },
            (options, _) => options,
        }
    }
}

impl From<CellOptions> for RawCellOptions {
    fn from(options: CellOptions) -> Self {
        let mode = match &options {
            CellOptions::ColorBackground { mode } => mode.map(|m| m.as_str().to_string()),
            CellOptions::Gauge { mode } => mode.map(|m| m.as_str().to_string()),
            _ => None,
        };
        Self {
            kind: options.type_name().to_string(),
            mode,
        }
    }
}

/// Preset row heights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellHeight {
    Sm,
    Md,
    Lg,
    Auto,
}
