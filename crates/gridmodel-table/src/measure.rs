//! Text measurement and wrapped cell heights.

use gridmodel_core::Theme;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Smallest width a cell is measured at.
pub const MIN_MEASURE_WIDTH: f32 = 20.0;

/// Average glyph advance as a fraction of the font size.
pub const GLYPH_WIDTH_RATIO: f32 = 0.6;

/// Measures rendered text and counts wrapped lines.
///
/// Implementors only provide widths; [`TextMeasurer::count_lines`] applies
/// `pre-line` wrapping: newlines are kept, whitespace runs collapse to one
/// space, words wrap greedily and words wider than the line break between
/// graphemes.
pub trait TextMeasurer {
    /// Rendered width of `text` in pixels.
    fn measure_width(&self, text: &str) -> f32;

    /// Average advance of one character in pixels.
    fn avg_char_width(&self) -> f32;

    /// Number of lines `text` occupies at `available_width`. Always at least 1.
    fn count_lines(&self, text: &str, available_width: f32) -> usize {
        let width = available_width.max(0.0);
        let space = self.measure_width(" ");
        let mut total = 0;

        for paragraph in text.split('\n') {
            let mut lines = 1;
            let mut line_width = 0.0_f32;
            let mut line_empty = true;

            for word in paragraph.split_whitespace() {
                let word_width = self.measure_width(word);
                if !line_empty && line_width + space + word_width <= width {
                    line_width += space + word_width;
                    continue;
                }
                if !line_empty {
                    lines += 1;
                    line_width = 0.0;
                    line_empty = true;
                }
                if word_width <= width {
                    line_width = word_width;
                    line_empty = false;
                    continue;
                }
                for grapheme in word.graphemes(true) {
                    let grapheme_width = self.measure_width(grapheme);
                    if !line_empty && line_width + grapheme_width > width {
                        lines += 1;
                        line_width = 0.0;
                    }
                    line_width += grapheme_width;
                    line_empty = false;
                }
            }
            total += lines;
        }

        total.max(1)
    }
}

/// Fixed-advance measurer based on terminal cell widths.
///
/// Each grapheme advances by its display width (0, 1 or 2 columns) times
/// `font_size * 0.6`, plus letter spacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    /// Font size in pixels
    pub font_size: f32,
    /// Extra spacing after every grapheme in pixels
    pub letter_spacing: f32,
}

impl MonospaceMeasurer {
    /// Create a measurer for a font size.
    #[must_use]
    pub const fn new(font_size: f32) -> Self {
        Self {
            font_size,
            letter_spacing: 0.0,
        }
    }

    /// Set letter spacing.
    #[must_use]
    pub const fn letter_spacing(mut self, spacing: f32) -> Self {
        self.letter_spacing = spacing;
        self
    }

    /// Measurer configured from a theme's body typography.
    #[must_use]
    pub const fn from_theme(theme: &Theme) -> Self {
        Self {
            font_size: theme.typography.font_size,
            letter_spacing: theme.typography.letter_spacing,
        }
    }

    fn column_width(&self) -> f32 {
        self.font_size * GLYPH_WIDTH_RATIO
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure_width(&self, text: &str) -> f32 {
        let column = self.column_width();
        text.graphemes(true)
            .map(|g| g.width() as f32 * column + self.letter_spacing)
            .sum()
    }

    fn avg_char_width(&self) -> f32 {
        self.column_width() + self.letter_spacing
    }
}

/// Computes the height of a wrapped text cell.
#[derive(Debug, Clone)]
pub struct CellHeightCalculator<M> {
    measurer: M,
    line_height: f32,
    default_row_height: f32,
    padding: f32,
}

impl<M: TextMeasurer> CellHeightCalculator<M> {
    /// Create a calculator.
    ///
    /// `padding` is applied on both the top and the bottom.
    #[must_use]
    pub const fn new(measurer: M, line_height: f32, default_row_height: f32, padding: f32) -> Self {
        Self {
            measurer,
            line_height,
            default_row_height,
            padding,
        }
    }

    /// The measurer in use.
    #[must_use]
    pub const fn measurer(&self) -> &M {
        &self.measurer
    }

    /// Height below which no row shrinks.
    #[must_use]
    pub const fn default_row_height(&self) -> f32 {
        self.default_row_height
    }

    /// Height of `text` wrapped into `cell_width` pixels.
    #[must_use]
    pub fn height(&self, text: &str, cell_width: f32) -> f32 {
        let width = cell_width.max(MIN_MEASURE_WIDTH);
        let lines = self.measurer.count_lines(text, width);
        let total = lines as f32 * self.line_height + self.padding * 2.0;
        total.max(self.default_row_height)
    }
}
