//! Integration tests for gridmodel-core.
//!
//! These tests exercise the public API end-to-end.

use gridmodel_core::{
    migrate_display_mode, BackgroundDisplayMode, CellOptions, CellValue, Color, DisplayValue,
    Field, FieldConfig, FieldType, Frame, ReducerId, Theme,
};
use std::sync::Arc;

// =============================================================================
// Color Integration Tests
// =============================================================================

#[test]
fn test_color_roundtrip_hex() {
    let original = Color::rgb(0.5, 0.25, 0.75);
    let hex = original.to_hex();
    let parsed = Color::from_hex(&hex).expect("valid hex");

    assert!((original.r - parsed.r).abs() < 0.01);
    assert!((original.g - parsed.g).abs() < 0.01);
    assert!((original.b - parsed.b).abs() < 0.01);
}

#[test]
fn test_theme_hover_overlay_mix_hex() {
    let theme = Theme::dark();
    let hover = theme.colors.action.hover;
    let mixed = theme
        .colors
        .background
        .primary
        .mix(&hover, hover.a * 100.0);
    assert_eq!(mixed.to_hex(), "#35373d");
}

// =============================================================================
// Frame Integration Tests
// =============================================================================

#[test]
fn test_frame_with_nested_frames() {
    let child = Arc::new(
        Frame::new("child").with_field(Field::new("x", FieldType::Number).with_values([1, 2])),
    );
    let frame = Frame::new("parent")
        .with_field(Field::new("name", FieldType::String).with_values(["a", "b"]))
        .with_field(Field::new("Nested frames", FieldType::NestedFrames).with_values([
            CellValue::Frames(vec![Arc::clone(&child)]),
            CellValue::Empty,
        ]));

    assert_eq!(frame.len(), 2);
    let nested = frame.field_by_name("Nested frames").expect("nested field");
    let frames = nested.values[0].as_frames().expect("frames");
    assert_eq!(frames[0].len(), 2);
}

#[test]
fn test_field_config_from_json_drives_cell_options() {
    let config: FieldConfig = serde_json::from_str(
        r#"{"unit":"ms","custom":{"displayMode":"color-background-solid","footer":{"reducer":["sum","nope"]}}}"#,
    )
    .expect("config");
    let field = Field::new("latency", FieldType::Number).with_config(config);

    assert_eq!(
        field.cell_options(),
        CellOptions::ColorBackground {
            mode: Some(BackgroundDisplayMode::Basic)
        }
    );
    assert_eq!(field.footer_reducers(), vec![ReducerId::Sum]);
}

#[test]
fn test_display_processor_with_color() {
    let red = Color::from_hex("#ff0000").expect("hex");
    let field = Field::new("status", FieldType::Number)
        .with_display(move |v| DisplayValue::from_raw(v).color(red));
    let dv = field.display_value(&CellValue::Number(1.0));
    assert_eq!(dv.color, Some(red));
    assert_eq!(dv.text, "1");
}

#[test]
fn test_migration_matches_structured_names() {
    for name in ["auto", "color-text", "image", "json-view", "sparkline"] {
        assert_eq!(migrate_display_mode(name).type_name(), name);
    }
}
