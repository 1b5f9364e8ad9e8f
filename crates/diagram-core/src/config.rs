// File: crates/diagram-core/src/config.rs
// Summary: Raw config validation and derivation of the immutable ChartModel.
// Notes:
// - Raw input is walked as `serde_json::Value` so that "missing", "wrong type"
//   and "out of range" stay distinct failures instead of one serde message.
// - Nothing is drawn here; the host document is only consulted for the
//   target surface size.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::color::Color;
use crate::error::ConfigError;
use crate::series::DataPoint;
use crate::surface::Document;
use crate::types::{bar_spacing_for, FontSizes, AXIS_PADDING, DEFAULT_ANIMATION_SPEED, MAX_LABEL_LEN};

/// Resolved target surface. Size is captured once, at normalization.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceRef {
    pub target: String,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interactivity {
    #[serde(default)]
    pub expand: bool,
    #[serde(default, alias = "infoBoxWhenHover")]
    pub tooltip_on_hover: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationSettings {
    pub speed: f64,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self { speed: DEFAULT_ANIMATION_SPEED }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decoration {
    pub show_grid: bool,
}

impl Default for Decoration {
    fn default() -> Self {
        Self { show_grid: true }
    }
}

/// Derived, immutable chart configuration. Built once by [`normalize`].
#[derive(Clone, Debug, PartialEq)]
pub struct ChartModel {
    surface: SurfaceRef,
    points: Vec<DataPoint>,
    bar_width: f64,
    bar_spacing: f64,
    font_size: FontSizes,
    interactivity: Option<Interactivity>,
    animation: Option<AnimationSettings>,
    decoration: Decoration,
}

impl ChartModel {
    pub fn surface(&self) -> &SurfaceRef { &self.surface }
    pub fn points(&self) -> &[DataPoint] { &self.points }
    pub fn bar_width(&self) -> f64 { self.bar_width }
    pub fn bar_spacing(&self) -> f64 { self.bar_spacing }
    pub fn font_size(&self) -> FontSizes { self.font_size }
    pub fn interactivity(&self) -> Option<Interactivity> { self.interactivity }
    pub fn animation(&self) -> Option<AnimationSettings> { self.animation }
    pub fn decoration(&self) -> Decoration { self.decoration }
}

/// Typed builder for callers assembling a config in Rust rather than JSON.
/// Serializes to the same shape [`normalize`] accepts.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ChartConfig {
    pub target: String,
    pub data: Vec<RawPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interactivity: Option<Interactivity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoration: Option<Decoration>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawPoint {
    pub value: f64,
    pub label: String,
    pub color: String,
}

impl ChartConfig {
    pub fn new(target: impl Into<String>) -> Self {
        Self { target: target.into(), ..Self::default() }
    }

    pub fn point(mut self, value: f64, label: impl Into<String>, color: impl Into<String>) -> Self {
        self.data.push(RawPoint { value, label: label.into(), color: color.into() });
        self
    }

    pub fn to_value(&self) -> Value {
        // Plain data with string keys; serialization cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Validate `raw` against `host` and derive the chart model.
///
/// Checks run in a fixed order and stop at the first failure: target
/// (format, then resolution), data (presence of value/label/color per
/// entry, then their contents), interactivity, animation, decoration.
pub fn normalize(raw: &Value, host: &Document) -> Result<ChartModel, ConfigError> {
    let obj = raw.as_object().ok_or_else(|| ConfigError::wrong_type("config", "an object"))?;

    let target = read_target(obj)?;
    let surface = host
        .resolve(&target)
        .ok_or_else(|| ConfigError::UnresolvedTarget(target.clone()))?;
    let (width, height) = (surface.width(), surface.height());

    let points = read_data(obj)?;
    let interactivity = read_interactivity(obj)?;
    let animation = read_animation(obj)?;
    let decoration = read_decoration(obj)?;

    let n = points.len() as f64;
    let bar_spacing = bar_spacing_for(width);
    let bar_width = (width - n * bar_spacing - AXIS_PADDING) / n;
    if bar_width <= 0.0 {
        tracing::warn!(%target, width, points = points.len(), "surface too narrow for bar layout");
    }

    let model = ChartModel {
        surface: SurfaceRef { target, width, height },
        points,
        bar_width,
        bar_spacing,
        font_size: FontSizes::for_surface(width, height),
        interactivity,
        animation,
        decoration,
    };
    tracing::debug!(
        target = %model.surface.target,
        points = model.points.len(),
        bar_width = model.bar_width,
        "normalized chart config"
    );
    Ok(model)
}

fn present<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn read_target(obj: &Map<String, Value>) -> Result<String, ConfigError> {
    let raw = present(obj, "target")
        .or_else(|| present(obj, "elementId"))
        .ok_or(ConfigError::MissingTarget)?;
    let target = raw.as_str().ok_or_else(|| ConfigError::wrong_type("target", "a string"))?;
    match target.strip_prefix('#') {
        Some(id) if !id.trim().is_empty() => Ok(target.to_owned()),
        _ => Err(ConfigError::InvalidTarget(target.to_owned())),
    }
}

fn read_data(obj: &Map<String, Value>) -> Result<Vec<DataPoint>, ConfigError> {
    let list = present(obj, "data")
        .ok_or(ConfigError::MissingData)?
        .as_array()
        .ok_or_else(|| ConfigError::wrong_type("data", "an array"))?;
    if list.is_empty() {
        return Err(ConfigError::EmptyData);
    }
    list.iter().enumerate().map(|(i, entry)| read_point(i, entry)).collect()
}

fn read_point(index: usize, entry: &Value) -> Result<DataPoint, ConfigError> {
    let obj = entry
        .as_object()
        .ok_or_else(|| ConfigError::wrong_type(format!("data[{index}]"), "an object"))?;

    let value = present(obj, "value").ok_or(ConfigError::MissingField { index, field: "value" })?;
    let label = present(obj, "label").ok_or(ConfigError::MissingField { index, field: "label" })?;
    let color = present(obj, "color").ok_or(ConfigError::MissingField { index, field: "color" })?;

    let value = value
        .as_f64()
        .ok_or_else(|| ConfigError::wrong_type(format!("data[{index}].value"), "a number"))?;
    if !value.is_finite() {
        return Err(ConfigError::out_of_range(format!("data[{index}].value"), "must be finite"));
    }

    let label = label
        .as_str()
        .ok_or_else(|| ConfigError::wrong_type(format!("data[{index}].label"), "a string"))?;
    let len = label.chars().count();
    if len > MAX_LABEL_LEN {
        return Err(ConfigError::LabelTooLong { index, len, max: MAX_LABEL_LEN });
    }

    let color = color
        .as_str()
        .ok_or_else(|| ConfigError::wrong_type(format!("data[{index}].color"), "a string"))?;
    let color = Color::parse(color).map_err(|reason| {
        tracing::trace!(index, %reason, "rejected color");
        ConfigError::InvalidColor { index, color: color.to_owned() }
    })?;

    Ok(DataPoint { value, label: label.to_owned(), color })
}

fn read_flag(obj: &Map<String, Value>, keys: &[&str], field: &str) -> Result<bool, ConfigError> {
    match keys.iter().find_map(|k| present(obj, k)) {
        None => Ok(false),
        Some(v) => v.as_bool().ok_or_else(|| ConfigError::wrong_type(field, "a boolean")),
    }
}

fn read_interactivity(obj: &Map<String, Value>) -> Result<Option<Interactivity>, ConfigError> {
    let Some(raw) = present(obj, "interactivity") else { return Ok(None) };
    let block = raw
        .as_object()
        .ok_or_else(|| ConfigError::wrong_type("interactivity", "an object"))?;
    Ok(Some(Interactivity {
        expand: read_flag(block, &["expand"], "interactivity.expand")?,
        tooltip_on_hover: read_flag(
            block,
            &["tooltipOnHover", "infoBoxWhenHover"],
            "interactivity.tooltipOnHover",
        )?,
    }))
}

fn read_animation(obj: &Map<String, Value>) -> Result<Option<AnimationSettings>, ConfigError> {
    let Some(raw) = present(obj, "animation") else { return Ok(None) };
    let block = raw
        .as_object()
        .ok_or_else(|| ConfigError::wrong_type("animation", "an object"))?;
    let Some(speed) = present(block, "speed") else {
        return Ok(Some(AnimationSettings::default()));
    };
    let speed = speed
        .as_f64()
        .ok_or_else(|| ConfigError::wrong_type("animation.speed", "a number"))?;
    if !(speed.is_finite() && speed > 0.0) {
        return Err(ConfigError::out_of_range("animation.speed", "must be greater than zero"));
    }
    Ok(Some(AnimationSettings { speed }))
}

fn read_decoration(obj: &Map<String, Value>) -> Result<Decoration, ConfigError> {
    let Some(raw) = present(obj, "decoration") else { return Ok(Decoration::default()) };
    let block = raw
        .as_object()
        .ok_or_else(|| ConfigError::wrong_type("decoration", "an object"))?;
    let show_grid = match present(block, "showGrid") {
        None => true,
        Some(v) => v.as_bool().ok_or_else(|| ConfigError::wrong_type("decoration.showGrid", "a boolean"))?,
    };
    Ok(Decoration { show_grid })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn host() -> Document {
        let mut doc = Document::new();
        doc.add_surface("chart", 500.0, 500.0);
        doc
    }

    fn base() -> Value {
        json!({
            "target": "#chart",
            "data": [
                { "value": 10, "label": "a", "color": "red" },
                { "value": 42, "label": "b", "color": "#00ff00" },
            ]
        })
    }

    #[test]
    fn derives_layout_constants() {
        let m = normalize(&base(), &host()).unwrap();
        assert_eq!(m.bar_spacing(), 5.0);
        assert_eq!(m.bar_width(), (500.0 - 2.0 * 5.0 - 50.0) / 2.0);
        assert_eq!(m.font_size(), FontSizes { x_axis: 12.0, y_axis: 12.0 });
        assert_eq!(m.decoration(), Decoration { show_grid: true });
        assert!(m.interactivity().is_none());
        assert!(m.animation().is_none());
    }

    #[test]
    fn accepts_legacy_key_aliases() {
        let raw = json!({
            "elementId": "#chart",
            "data": [{ "value": 1, "label": "a", "color": "red" }],
            "interactivity": { "infoBoxWhenHover": true }
        });
        let m = normalize(&raw, &host()).unwrap();
        assert_eq!(m.surface().target, "#chart");
        assert_eq!(m.interactivity(), Some(Interactivity { expand: false, tooltip_on_hover: true }));
    }

    #[test]
    fn animation_defaults_speed() {
        let mut raw = base();
        raw["animation"] = json!({});
        assert_eq!(normalize(&raw, &host()).unwrap().animation(), Some(AnimationSettings { speed: 100.0 }));
        raw["animation"] = json!({ "speed": 20 });
        assert_eq!(normalize(&raw, &host()).unwrap().animation(), Some(AnimationSettings { speed: 20.0 }));
    }

    #[test]
    fn target_checks_run_first() {
        let raw = json!({ "data": "nope" });
        assert_eq!(normalize(&raw, &host()), Err(ConfigError::MissingTarget));
        let raw = json!({ "target": 5 });
        assert!(matches!(normalize(&raw, &host()), Err(ConfigError::WrongType { .. })));
        let raw = json!({ "target": "chart" });
        assert_eq!(normalize(&raw, &host()), Err(ConfigError::InvalidTarget("chart".into())));
        let raw = json!({ "target": "#" });
        assert_eq!(normalize(&raw, &host()), Err(ConfigError::InvalidTarget("#".into())));
    }

    #[test]
    fn data_shape_errors() {
        let raw = json!({ "target": "#chart" });
        assert_eq!(normalize(&raw, &host()), Err(ConfigError::MissingData));
        let raw = json!({ "target": "#chart", "data": [] });
        assert_eq!(normalize(&raw, &host()), Err(ConfigError::EmptyData));
        let raw = json!({ "target": "#chart", "data": {} });
        assert!(matches!(normalize(&raw, &host()), Err(ConfigError::WrongType { .. })));
    }

    #[test]
    fn missing_fields_fail_in_declared_order() {
        let raw = json!({ "target": "#chart", "data": [{ "color": 3 }] });
        assert_eq!(normalize(&raw, &host()), Err(ConfigError::MissingField { index: 0, field: "value" }));
        let raw = json!({ "target": "#chart", "data": [{ "value": "x" }] });
        assert_eq!(normalize(&raw, &host()), Err(ConfigError::MissingField { index: 0, field: "label" }));
    }

    #[test]
    fn zero_value_is_accepted() {
        let raw = json!({ "target": "#chart", "data": [{ "value": 0, "label": "z", "color": "red" }] });
        assert_eq!(normalize(&raw, &host()).unwrap().points()[0].value, 0.0);
    }

    #[test]
    fn non_positive_speed_is_out_of_range() {
        let mut raw = base();
        raw["animation"] = json!({ "speed": 0 });
        assert!(matches!(normalize(&raw, &host()), Err(ConfigError::OutOfRange { .. })));
    }

    #[test]
    fn show_grid_must_be_boolean() {
        let mut raw = base();
        raw["decoration"] = json!({ "showGrid": "yes" });
        assert!(matches!(normalize(&raw, &host()), Err(ConfigError::WrongType { .. })));
        raw["decoration"] = json!({ "showGrid": false });
        assert!(!normalize(&raw, &host()).unwrap().decoration().show_grid);
    }

    #[test]
    fn chart_config_builder_normalizes() {
        let cfg = ChartConfig::new("#chart").point(3.0, "a", "blue").point(4.0, "b", "navy");
        let m = normalize(&cfg.to_value(), &host()).unwrap();
        assert_eq!(m.points().len(), 2);
        assert_eq!(m.points()[1].color, Color::rgb(0, 0, 128));
    }
}
