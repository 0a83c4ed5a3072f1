//! Theme system for table cell styling.

use crate::color::Color;
use serde::{Deserialize, Serialize};

/// Background color roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundColors {
    /// Panel and cell background
    pub primary: Color,
}

/// Interaction overlay colors. These are translucent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionColors {
    /// Overlay for hovered rows and cells
    pub hover: Color,
}

/// A color palette for theming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorPalette {
    /// Background colors
    pub background: BackgroundColors,
    /// Action overlays
    pub action: ActionColors,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::light()
    }
}

impl ColorPalette {
    /// Create a light color palette.
    #[must_use]
    pub fn light() -> Self {
        Self {
            background: BackgroundColors {
                primary: Color::WHITE,
            },
            action: ActionColors {
                hover: Color::rgba8(36, 41, 46, 0.12),
            },
        }
    }

    /// Create a dark color palette.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            background: BackgroundColors {
                primary: Color::rgba8(24, 27, 31, 1.0),
            },
            action: ActionColors {
                hover: Color::rgba8(204, 204, 220, 0.16),
            },
        }
    }
}

/// Typography scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Typography {
    /// Body font size in pixels
    pub font_size: f32,
    /// Body line height as a multiple of the font size
    pub line_height: f32,
    /// Letter spacing in pixels
    pub letter_spacing: f32,
}

impl Default for Typography {
    fn default() -> Self {
        Self::standard()
    }
}

impl Typography {
    /// Standard typography (14px body, 1.5 line height).
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            font_size: 14.0,
            line_height: 1.5,
            letter_spacing: 0.0,
        }
    }

    /// Height of one line of body text in pixels.
    #[must_use]
    pub fn body_line_px(&self) -> f32 {
        self.font_size * self.line_height
    }
}

/// Complete theme definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Theme name
    pub name: String,
    /// Whether this is a dark theme
    pub is_dark: bool,
    /// Color palette
    pub colors: ColorPalette,
    /// Typography
    pub typography: Typography,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a light theme.
    #[must_use]
    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            is_dark: false,
            colors: ColorPalette::light(),
            typography: Typography::standard(),
        }
    }

    /// Create a dark theme.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            is_dark: true,
            colors: ColorPalette::dark(),
            typography: Typography::standard(),
        }
    }

    /// Create a theme with custom colors.
    #[must_use]
    pub fn with_colors(mut self, colors: ColorPalette) -> Self {
        self.colors = colors;
        self
    }

    /// Create a theme with custom typography.
    #[must_use]
    pub fn with_typography(mut self, typography: Typography) -> Self {
        self.typography = typography;
        self
    }
}
