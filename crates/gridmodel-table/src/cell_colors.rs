//! Theme-aware text and background colors for cells.

use gridmodel_core::{BackgroundDisplayMode, CellOptions, Color, DisplayValue, Theme};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lightness change for solid backgrounds on hover.
pub const CELL_COLOR_DARKENING_MULTIPLIER: f32 = 10.0;

/// Lightness change for gradient backgrounds on hover.
pub const CELL_GRADIENT_DARKENING_MULTIPLIER: f32 = 15.0;

/// Hue shift of the gradient's first stop.
pub const CELL_GRADIENT_HUE_ROTATION_DEGREES: f32 = 5.0;

/// Angle of background gradients.
pub const CELL_GRADIENT_ANGLE_DEG: f32 = 120.0;

/// Alpha below which a background counts as see-through.
const ALPHA_TEXT_THRESHOLD: f32 = 0.3;

/// Brightness above which dark text is used.
const BRIGHTNESS_TEXT_THRESHOLD: f32 = 180.0;

const DARK_TEXT: Color = Color {
    r: 32.0 / 255.0,
    g: 34.0 / 255.0,
    b: 38.0 / 255.0,
    a: 1.0,
};

const LIGHT_TEXT: Color = Color {
    r: 247.0 / 255.0,
    g: 248.0 / 255.0,
    b: 250.0 / 255.0,
    a: 1.0,
};

/// A cell background fill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Background {
    /// Flat color
    Solid(Color),
    /// Two-stop linear gradient
    LinearGradient {
        /// Gradient angle in degrees
        angle_deg: f32,
        /// First stop
        from: Color,
        /// Last stop
        to: Color,
    },
}

impl Background {
    /// CSS `background` value.
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Solid(color) => color.to_rgb_string(),
            Self::LinearGradient { angle_deg, from, to } => format!(
                "linear-gradient({angle_deg}deg, {}, {})",
                from.to_rgb_string(),
                to.to_rgb_string()
            ),
        }
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Resolved colors for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellColors {
    /// Text color, `None` for the theme default
    pub text_color: Option<Color>,
    /// Background, `None` for the theme default
    pub bg_color: Option<Background>,
    /// Background while hovered
    pub bg_hover_color: Background,
}

/// Blend a translucent color over a background and return opaque hex.
#[must_use]
pub fn convert_rgba_to_hex(background: &Color, rgba: &Color) -> String {
    blend(background, rgba).to_hex()
}

fn blend(background: &Color, rgba: &Color) -> Color {
    background.mix(rgba, rgba.a * 100.0).with_alpha(1.0)
}

/// Readable text color over a possibly translucent background.
///
/// Mostly transparent backgrounds let the panel show through, so the theme
/// decides; otherwise the background's brightness does.
#[must_use]
pub fn text_color_for_alpha_background(color: &Color, theme_is_dark: bool) -> Color {
    if color.a < ALPHA_TEXT_THRESHOLD {
        return if theme_is_dark { LIGHT_TEXT } else { DARK_TEXT };
    }
    if color.brightness() > BRIGHTNESS_TEXT_THRESHOLD {
        DARK_TEXT
    } else {
        LIGHT_TEXT
    }
}

/// Text, background and hover colors for a cell.
///
/// Hover colors darken on dark themes and lighten on light ones. Colored
/// display modes without a display color fall back to the uncolored result.
#[must_use]
pub fn resolve_colors(theme: &Theme, cell_options: &CellOptions, display_value: &DisplayValue) -> CellColors {
    let palette = &theme.colors;
    let auto_hover = blend(&palette.background.primary, &palette.action.hover);
    let darkening_factor = if theme.is_dark { 1.0 } else { -0.7 };

    let mut colors = CellColors {
        text_color: None,
        bg_color: None,
        bg_hover_color: Background::Solid(auto_hover),
    };

    match (cell_options, display_value.color) {
        (CellOptions::ColorText, color) => colors.text_color = color,
        (CellOptions::ColorBackground { .. }, Some(color)) => {
            colors.text_color = Some(text_color_for_alpha_background(&color, theme.is_dark));
            match cell_options.background_mode() {
                Some(BackgroundDisplayMode::Basic) => {
                    colors.bg_color = Some(Background::Solid(color));
                    colors.bg_hover_color = Background::Solid(
                        color.darken(CELL_COLOR_DARKENING_MULTIPLIER * darkening_factor),
                    );
                }
                _ => {
                    let hover = color.darken(CELL_GRADIENT_DARKENING_MULTIPLIER * darkening_factor);
                    let from = color
                        .darken(CELL_COLOR_DARKENING_MULTIPLIER * darkening_factor)
                        .spin(CELL_GRADIENT_HUE_ROTATION_DEGREES);
                    colors.bg_color = Some(Background::LinearGradient {
                        angle_deg: CELL_GRADIENT_ANGLE_DEG,
                        from,
                        to: color,
                    });
                    colors.bg_hover_color = Background::LinearGradient {
                        angle_deg: CELL_GRADIENT_ANGLE_DEG,
                        from,
                        to: hover,
                    };
                }
            }
        }
        (CellOptions::ColorBackground { .. }, None) => {
            tracing::trace!("color background without a display color");
        }
        _ => {}
    }

    colors
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn red() -> Color {
        Color::from_hex("#ff0000").unwrap()
    }

    fn red_value() -> DisplayValue {
        DisplayValue::new("1", 1.0).color(red())
    }

    fn bg(mode: BackgroundDisplayMode) -> CellOptions {
        CellOptions::ColorBackground { mode: Some(mode) }
    }

    // ===== Helpers =====

    #[test]
    fn test_convert_rgba_to_hex() {
        let bg = Color::rgba8(24, 27, 31, 1.0);
        let hover = Color::rgba8(204, 204, 220, 0.16);
        assert_eq!(convert_rgba_to_hex(&bg, &hover), "#35373d");
    }

    #[test]
    fn test_text_color_for_alpha_background() {
        let white = Color::WHITE;
        assert_eq!(text_color_for_alpha_background(&white, true), DARK_TEXT);
        assert_eq!(text_color_for_alpha_background(&Color::BLACK, false), LIGHT_TEXT);
        let faint = Color::WHITE.with_alpha(0.1);
        assert_eq!(text_color_for_alpha_background(&faint, true), LIGHT_TEXT);
        assert_eq!(text_color_for_alpha_background(&faint, false), DARK_TEXT);
    }

    #[test]
    fn test_background_css() {
        assert_eq!(Background::Solid(red()).to_css(), "rgb(255, 0, 0)");
        let gradient = Background::LinearGradient {
            angle_deg: 120.0,
            from: Color::BLACK,
            to: red(),
        };
        assert_eq!(gradient.to_string(), "linear-gradient(120deg, rgb(0, 0, 0), rgb(255, 0, 0))");
    }

    // ===== Resolution =====

    #[test]
    fn test_auto_cell_has_only_hover() {
        let colors = resolve_colors(&Theme::dark(), &CellOptions::Auto, &red_value());
        assert_eq!(colors.text_color, None);
        assert_eq!(colors.bg_color, None);
        assert_eq!(colors.bg_hover_color.to_css(), "rgb(53, 55, 61)");
    }

    #[test]
    fn test_color_text() {
        let colors = resolve_colors(&Theme::dark(), &CellOptions::ColorText, &red_value());
        assert_eq!(colors.text_color, Some(red()));
        assert_eq!(colors.bg_color, None);
    }

    #[test]
    fn test_basic_background_dark_theme() {
        let colors = resolve_colors(&Theme::dark(), &bg(BackgroundDisplayMode::Basic), &red_value());
        assert_eq!(colors.bg_color, Some(Background::Solid(red())));
        assert_eq!(colors.bg_hover_color.to_css(), "rgb(204, 0, 0)");
        assert_eq!(colors.text_color, Some(LIGHT_TEXT));
    }

    #[test]
    fn test_basic_background_light_theme_lightens() {
        let colors = resolve_colors(&Theme::light(), &bg(BackgroundDisplayMode::Basic), &red_value());
        // lightness 50% + 7%
        assert_eq!(colors.bg_hover_color.to_css(), "rgb(255, 36, 36)");
    }

    #[test]
    fn test_gradient_background() {
        let colors = resolve_colors(&Theme::dark(), &bg(BackgroundDisplayMode::Gradient), &red_value());
        let Some(Background::LinearGradient { angle_deg, from, to }) = colors.bg_color else {
            panic!("expected gradient");
        };
        assert_eq!(angle_deg, 120.0);
        assert_eq!(to, red());
        assert_eq!(from, red().darken(10.0).spin(5.0));
        let Background::LinearGradient { to: hover_to, .. } = colors.bg_hover_color else {
            panic!("expected gradient hover");
        };
        assert_eq!(hover_to, red().darken(15.0));
    }

    #[test]
    fn test_background_mode_defaults_to_gradient() {
        let options = CellOptions::ColorBackground { mode: None };
        let colors = resolve_colors(&Theme::dark(), &options, &red_value());
        assert!(matches!(colors.bg_color, Some(Background::LinearGradient { .. })));
    }

    #[test]
    fn test_missing_color_degrades_to_default() {
        let plain = DisplayValue::new("1", 1.0);
        let colors = resolve_colors(&Theme::dark(), &bg(BackgroundDisplayMode::Basic), &plain);
        let auto = resolve_colors(&Theme::dark(), &CellOptions::Auto, &plain);
        assert_eq!(colors, auto);
    }

    proptest! {
        #[test]
        fn prop_resolution_is_deterministic(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255, dark in any::<bool>()) {
            let theme = if dark { Theme::dark() } else { Theme::light() };
            let value = DisplayValue::new("x", 0.0).color(Color::rgba8(r, g, b, 1.0));
            for options in [CellOptions::ColorText, bg(BackgroundDisplayMode::Basic), bg(BackgroundDisplayMode::Gradient)] {
                prop_assert_eq!(
                    resolve_colors(&theme, &options, &value),
                    resolve_colors(&theme, &options, &value)
                );
            }
        }
    }
}
