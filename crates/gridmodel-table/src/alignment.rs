//! Alignment factors for gauge and sparkline cells.
//!
//! Gauges in one column line up only if they reserve room for the widest
//! formatted value. Formatting every value of a large column is expensive,
//! so the widest value is estimated from a window of rows and cached on the
//! field, growing as wider values are rendered.

use gridmodel_core::{DisplayValue, Field};

/// Rows inspected when no factor is cached yet.
pub const ALIGNMENT_LOOKAHEAD: usize = 1000;

/// Widest display value known for `field`, updated with `display_value`.
///
/// With a cached factor the cache is replaced only when `display_value`
/// formats longer. Without one, rows `row_index + 1` up to the look-ahead
/// window are formatted and the longest result is cached.
pub fn alignment_factor(field: &mut Field, display_value: &DisplayValue, row_index: usize) -> DisplayValue {
    if let Some(cached) = &field.state.alignment_factors {
        if cached.formatted_len() >= display_value.formatted_len() {
            return cached.clone();
        }
        field.state.alignment_factors = Some(display_value.clone());
        return display_value.clone();
    }

    let mut widest = display_value.clone();
    let mut widest_len = widest.formatted_len();
    let end = field.len().min(row_index.saturating_add(ALIGNMENT_LOOKAHEAD));
    for i in row_index.saturating_add(1)..end {
        let next = field.display_value(&field.values[i]);
        let len = next.formatted_len();
        if len > widest_len {
            widest = next;
            widest_len = len;
        }
    }

    tracing::trace!(field = %field.name, row_index, width = widest_len, "seeded alignment factor");
    field.state.alignment_factors = Some(widest.clone());
    widest
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridmodel_core::{CellValue, FieldType};
    use proptest::prelude::*;

    fn field(values: Vec<f64>) -> Field {
        Field::new("v", FieldType::Number).with_values(values)
    }

    fn dv(text: &str) -> DisplayValue {
        DisplayValue::new(text, f64::NAN)
    }

    // ===== Seeding =====

    #[test]
    fn test_seed_scans_following_rows() {
        let mut f = field(vec![1.0, 22.0, 333.0, 4.0]);
        let factor = alignment_factor(&mut f, &dv("1"), 0);
        assert_eq!(factor.text, "333");
        assert_eq!(f.state.alignment_factors.as_ref().unwrap().text, "333");
    }

    #[test]
    fn test_seed_keeps_current_when_widest() {
        let mut f = field(vec![1.0, 2.0]);
        let factor = alignment_factor(&mut f, &dv("12345"), 0);
        assert_eq!(factor.text, "12345");
    }

    #[test]
    fn test_seed_ignores_rows_before_index() {
        let mut f = field(vec![99999.0, 1.0, 2.0]);
        let factor = alignment_factor(&mut f, &dv("1"), 1);
        assert_eq!(factor.text, "1");
    }

    #[test]
    fn test_seed_window_is_bounded() {
        let mut values = vec![1.0; ALIGNMENT_LOOKAHEAD + 10];
        values[ALIGNMENT_LOOKAHEAD + 5] = 123_456.0;
        let mut f = field(values);
        let factor = alignment_factor(&mut f, &dv("1"), 0);
        assert_eq!(factor.text, "1");
    }

    #[test]
    fn test_seed_uses_display_processor() {
        let mut f = field(vec![1.0, 2.0])
            .with_display(|v| DisplayValue::new(v.display(), v.to_number()).suffix(" requests/s"));
        let factor = alignment_factor(&mut f, &dv("1"), 0);
        assert_eq!(factor.formatted(), "2 requests/s");
    }

    #[test]
    fn test_row_index_past_end() {
        let mut f = field(vec![1.0]);
        let factor = alignment_factor(&mut f, &dv("7"), 5);
        assert_eq!(factor.text, "7");
    }

    // ===== Cached =====

    #[test]
    fn test_cached_replaced_only_when_longer() {
        let mut f = field(Vec::new());
        f.state.alignment_factors = Some(dv("100"));

        assert_eq!(alignment_factor(&mut f, &dv("5"), 0).text, "100");
        assert_eq!(alignment_factor(&mut f, &dv("1000"), 0).text, "1000");
        assert_eq!(f.state.alignment_factors.as_ref().unwrap().text, "1000");
    }

    #[test]
    fn test_equal_length_keeps_cache() {
        let mut f = field(Vec::new());
        f.state.alignment_factors = Some(dv("abc"));
        assert_eq!(alignment_factor(&mut f, &dv("xyz"), 0).text, "abc");
    }

    proptest! {
        #[test]
        fn prop_factor_never_shrinks(texts in proptest::collection::vec("[0-9]{1,8}", 1..40)) {
            let mut f = Field::new("v", FieldType::String)
                .with_values(texts.iter().map(|t| CellValue::Text(t.clone())));
            let mut previous = 0;
            for (i, text) in texts.iter().enumerate() {
                let factor = alignment_factor(&mut f, &dv(text), i);
                let len = factor.formatted_len();
                prop_assert!(len >= previous);
                prop_assert!(len >= text.len());
                previous = len;
            }
        }
    }
}
