//! Declarative table configuration.
//!
//! A configuration holds field defaults plus overrides that target fields
//! by name or type:
//!
//! ```yaml
//! cellHeight: sm
//! fieldConfig:
//!   defaults:
//!     custom:
//!       align: auto
//!   overrides:
//!     - matcher: { id: byName, options: latency }
//!       properties:
//!         - { id: custom.footer.reducer, value: [sum, mean] }
//!         - { id: custom.width, value: 120 }
//! ```

use crate::error::ConfigError;
use gridmodel_core::{CellHeight, FieldConfig, FieldType, FooterOptions, Frame};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Property id for footer reducers.
pub const FOOTER_REDUCER_PROPERTY: &str = "custom.footer.reducer";

/// Selects the fields an override applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMatcher {
    /// Matcher kind: `byName` or `byType`
    pub id: String,
    /// Matcher argument
    #[serde(default)]
    pub options: Value,
}

impl FieldMatcher {
    /// Match a field by name.
    #[must_use]
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            id: "byName".to_string(),
            options: Value::String(name.into()),
        }
    }

    /// Whether this matcher selects a field by name.
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        self.id == "byName" && self.options.as_str() == Some(name)
    }

    /// Whether this matcher selects the given field.
    #[must_use]
    pub fn matches(&self, name: &str, field_type: FieldType) -> bool {
        match self.id.as_str() {
            "byName" => self.matches_name(name),
            "byType" => serde_json::from_value::<FieldType>(self.options.clone())
                .is_ok_and(|t| t == field_type),
            other => {
                tracing::debug!(matcher = other, "skipping unsupported matcher");
                false
            }
        }
    }
}

/// One property set by an override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicConfigValue {
    /// Property id, e.g. `custom.align`
    pub id: String,
    /// New value
    #[serde(default)]
    pub value: Value,
}

impl DynamicConfigValue {
    /// Create a property value.
    #[must_use]
    pub fn new(id: impl Into<String>, value: Value) -> Self {
        Self { id: id.into(), value }
    }
}

/// Properties applied to matching fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigOverride {
    /// Which fields
    pub matcher: FieldMatcher,
    /// What to set
    #[serde(default)]
    pub properties: Vec<DynamicConfigValue>,
}

/// Field defaults plus overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfigSource {
    /// Configuration for fields without their own
    pub defaults: FieldConfig,
    /// Overrides, applied in order
    pub overrides: Vec<ConfigOverride>,
}

fn parse_value<T: DeserializeOwned>(property: &str, value: &Value) -> Result<T, ConfigError> {
    serde_json::from_value(value.clone()).map_err(|source| ConfigError::InvalidOverrideValue {
        property: property.to_string(),
        source,
    })
}

/// Set one property on a field configuration.
///
/// Unknown property ids are skipped and logged.
pub fn apply_property(config: &mut FieldConfig, property: &DynamicConfigValue) -> Result<(), ConfigError> {
    let id = property.id.as_str();
    let value = &property.value;
    let custom = &mut config.custom;
    match id {
        FOOTER_REDUCER_PROPERTY => {
            custom.footer = Some(FooterOptions {
                reducer: parse_value(id, value)?,
            });
        }
        "custom.align" => custom.align = parse_value(id, value)?,
        "custom.wrapText" => custom.wrap_text = parse_value(id, value)?,
        "custom.inspect" => custom.inspect = parse_value(id, value)?,
        "custom.cellOptions" => custom.cell_options = parse_value(id, value)?,
        "custom.displayMode" => custom.display_mode = parse_value(id, value)?,
        "custom.width" => custom.width = parse_value(id, value)?,
        "displayName" => config.display_name = parse_value(id, value)?,
        "unit" => config.unit = parse_value(id, value)?,
        other => tracing::debug!(property = other, "skipping unknown override property"),
    }
    Ok(())
}

impl FieldConfigSource {
    /// Effective configuration for a field.
    ///
    /// `own` is used as the base when it differs from the empty
    /// configuration; otherwise the defaults are. Matching overrides are
    /// then applied in order.
    pub fn resolve(&self, name: &str, field_type: FieldType, own: &FieldConfig) -> Result<FieldConfig, ConfigError> {
        let mut config = if *own == FieldConfig::default() {
            self.defaults.clone()
        } else {
            own.clone()
        };
        for over in self.overrides.iter().filter(|o| o.matcher.matches(name, field_type)) {
            for property in &over.properties {
                apply_property(&mut config, property)?;
            }
        }
        Ok(config)
    }

    /// Resolve every field of `frame` in place.
    ///
    /// Fields whose configuration changes lose their cached state.
    pub fn apply_to_frame(&self, frame: &mut Frame) -> Result<(), ConfigError> {
        for field in &mut frame.fields {
            let resolved = self.resolve(&field.name, field.field_type, &field.config)?;
            if resolved != field.config {
                field.config = resolved;
                field.state.reset();
            }
        }
        Ok(())
    }

    /// Footer reducer ids set by a by-name override, if any.
    #[must_use]
    pub fn footer_override(&self, name: &str) -> Option<Vec<String>> {
        self.overrides
            .iter()
            .find(|o| o.matcher.matches_name(name))
            .and_then(|o| o.properties.iter().find(|p| p.id == FOOTER_REDUCER_PROPERTY))
            .and_then(|p| serde_json::from_value(p.value.clone()).ok())
    }
}

const fn default_true() -> bool {
    true
}

/// Table-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    /// Row height preset, `None` to derive from the theme
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_height: Option<CellHeight>,
    /// Whether the header row is shown
    #[serde(default = "default_true")]
    pub show_header: bool,
    /// Field defaults and overrides
    #[serde(default)]
    pub field_config: FieldConfigSource,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            cell_height: None,
            show_header: true,
            field_config: FieldConfigSource::default(),
        }
    }
}

impl TableConfig {
    /// Parse from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Parse from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to a YAML string.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Apply the field configuration to a frame.
    pub fn apply_to_frame(&self, frame: &mut Frame) -> Result<(), ConfigError> {
        self.field_config.apply_to_frame(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridmodel_core::{BackgroundDisplayMode, CellOptions, Field, FieldTextAlign, ReducerId};
    use serde_json::json;

    const EXAMPLE_YAML: &str = r"
cellHeight: md
fieldConfig:
  defaults:
    custom:
      align: auto
      inspect: true
  overrides:
    - matcher: { id: byName, options: latency }
      properties:
        - { id: custom.footer.reducer, value: [sum, mean] }
        - { id: custom.width, value: 120 }
        - { id: custom.cellOptions, value: { type: color-background, mode: basic } }
    - matcher: { id: byType, options: string }
      properties:
        - { id: custom.wrapText, value: true }
";

    fn frame() -> Frame {
        Frame::new("t")
            .with_field(Field::new("host", FieldType::String).with_values(["a"]))
            .with_field(Field::new("latency", FieldType::Number).with_values([1.0]))
    }

    // ===== Parsing =====

    #[test]
    fn test_parse_yaml() {
        let config = TableConfig::from_yaml(EXAMPLE_YAML).unwrap();
        assert_eq!(config.cell_height, Some(CellHeight::Md));
        assert!(config.show_header);
        assert!(config.field_config.defaults.custom.inspect);
        assert_eq!(config.field_config.overrides.len(), 2);
    }

    #[test]
    fn test_parse_json_defaults() {
        let config = TableConfig::from_json("{}").unwrap();
        assert_eq!(config, TableConfig::default());
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = TableConfig::from_yaml("cellHeight: [");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_unknown_cell_mode_keeps_document() {
        let yaml = r"
fieldConfig:
  defaults:
    custom:
      cellOptions: { type: gauge, mode: retro }
  overrides:
    - matcher: { id: byName, options: host }
      properties:
        - { id: custom.cellOptions, value: { type: color-background, mode: glow } }
";
        let config = TableConfig::from_yaml(yaml).unwrap();
        let mut frame = frame();
        config.apply_to_frame(&mut frame).unwrap();
        assert_eq!(frame.fields[0].cell_options(), CellOptions::ColorBackground { mode: None });
        assert_eq!(frame.fields[1].cell_options(), CellOptions::Gauge { mode: None });
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = TableConfig::from_yaml(EXAMPLE_YAML).unwrap();
        let yaml = config.to_yaml().unwrap();
        assert_eq!(TableConfig::from_yaml(&yaml).unwrap(), config);
    }

    // ===== Applying =====

    #[test]
    fn test_apply_to_frame() {
        let config = TableConfig::from_yaml(EXAMPLE_YAML).unwrap();
        let mut frame = frame();
        config.apply_to_frame(&mut frame).unwrap();

        let host = frame.field_by_name("host").unwrap();
        assert!(host.config.custom.wrap_text);
        assert!(host.config.custom.inspect);

        let latency = frame.field_by_name("latency").unwrap();
        assert!(!latency.config.custom.wrap_text);
        assert_eq!(latency.config.custom.width, Some(120.0));
        assert_eq!(latency.footer_reducers(), vec![ReducerId::Sum, ReducerId::Mean]);
        assert_eq!(
            latency.cell_options(),
            CellOptions::ColorBackground {
                mode: Some(BackgroundDisplayMode::Basic)
            }
        );
    }

    #[test]
    fn test_own_config_kept_as_base() {
        let mut field = Field::new("x", FieldType::Number);
        field.config.custom.align = FieldTextAlign::Center;
        let source = FieldConfigSource {
            defaults: FieldConfig {
                unit: Some("ms".into()),
                ..FieldConfig::default()
            },
            overrides: Vec::new(),
        };
        let resolved = source.resolve("x", FieldType::Number, &field.config).unwrap();
        assert_eq!(resolved.custom.align, FieldTextAlign::Center);
        assert_eq!(resolved.unit, None);
    }

    #[test]
    fn test_changed_config_resets_state() {
        let source = FieldConfigSource {
            defaults: FieldConfig::default(),
            overrides: vec![ConfigOverride {
                matcher: FieldMatcher::by_name("latency"),
                properties: vec![DynamicConfigValue::new("custom.inspect", json!(true))],
            }],
        };
        let mut frame = frame();
        frame.fields[1].state.footer.last_processed_row_count = 10;
        frame.fields[0].state.footer.last_processed_row_count = 10;
        source.apply_to_frame(&mut frame).unwrap();
        assert_eq!(frame.fields[1].state.footer.last_processed_row_count, 0);
        assert_eq!(frame.fields[0].state.footer.last_processed_row_count, 10);
    }

    #[test]
    fn test_invalid_override_value() {
        let mut config = FieldConfig::default();
        let err = apply_property(&mut config, &DynamicConfigValue::new("custom.wrapText", json!("yes"))).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOverrideValue { ref property, .. } if property == "custom.wrapText"));
    }

    #[test]
    fn test_unknown_property_skipped() {
        let mut config = FieldConfig::default();
        apply_property(&mut config, &DynamicConfigValue::new("custom.sparkle", json!(1))).unwrap();
        assert_eq!(config, FieldConfig::default());
    }

    #[test]
    fn test_unit_property() {
        let mut config = FieldConfig::default();
        apply_property(&mut config, &DynamicConfigValue::new("unit", json!("ms"))).unwrap();
        assert_eq!(config.unit.as_deref(), Some("ms"));
    }

    #[test]
    fn test_null_width_clears() {
        let mut config = FieldConfig::default();
        config.custom.width = Some(50.0);
        apply_property(&mut config, &DynamicConfigValue::new("custom.width", Value::Null)).unwrap();
        assert_eq!(config.custom.width, None);
    }

    // ===== Matchers =====

    #[test]
    fn test_matchers() {
        assert!(FieldMatcher::by_name("a").matches("a", FieldType::Number));
        assert!(!FieldMatcher::by_name("a").matches("b", FieldType::Number));
        let by_type = FieldMatcher {
            id: "byType".into(),
            options: json!("number"),
        };
        assert!(by_type.matches("anything", FieldType::Number));
        assert!(!by_type.matches("anything", FieldType::String));
        let regex = FieldMatcher {
            id: "byRegexp".into(),
            options: json!(".*"),
        };
        assert!(!regex.matches("a", FieldType::String));
    }

    #[test]
    fn test_footer_override() {
        let config = TableConfig::from_yaml(EXAMPLE_YAML).unwrap();
        assert_eq!(
            config.field_config.footer_override("latency"),
            Some(vec!["sum".to_string(), "mean".to_string()])
        );
        assert_eq!(config.field_config.footer_override("host"), None);
    }
}
