//! Overlay configuration.
//!
//! Passed from JavaScript as a plain object (or JSON). Every field is
//! optional; missing fields take the defaults below, which reproduce the
//! stock `p-mouse-pointer` look.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use wasm_bindgen::JsValue;

use crate::buttons::{ButtonSlot, BUTTON_SLOT_COUNT};
use crate::error::{OverlayError, OverlayResult};

/// Which event coordinates drive the marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CoordinateSpace {
    /// `pageX`/`pageY`, marker positioned `absolute` (scrolls with the page).
    #[default]
    Page,
    /// `clientX`/`clientY`, marker positioned `fixed` (pinned to viewport).
    Client,
}

impl CoordinateSpace {
    /// CSS `position` value matching this coordinate space.
    pub fn css_position(self) -> &'static str {
        match self {
            CoordinateSpace::Page => "absolute",
            CoordinateSpace::Client => "fixed",
        }
    }
}

/// Ring look for one pressed button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorStyle {
    /// CSS colour of the ring.
    pub border_color: String,
    /// CSS border radius of the ring ("50%" for a circle).
    pub border_radius: String,
}

impl IndicatorStyle {
    fn new(border_color: &str, border_radius: &str) -> Self {
        Self {
            border_color: border_color.to_string(),
            border_radius: border_radius.to_string(),
        }
    }

    /// Default style for a slot.
    pub fn default_for(slot: ButtonSlot) -> Self {
        match slot {
            ButtonSlot::Primary => Self::new("rgba(0,0,255,0.9)", "50%"),
            ButtonSlot::Secondary => Self::new("rgba(0,0,255,0.9)", "50%"),
            ButtonSlot::Auxiliary => Self::new("rgba(0,0,255,0.9)", "4px"),
            ButtonSlot::Back => Self::new("rgba(255,0,0,0.9)", "50%"),
            ButtonSlot::Forward => Self::new("rgba(0,255,0,0.9)", "50%"),
        }
    }
}

/// Full overlay configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverlayConfig {
    /// Custom element tag used for the marker.
    pub tag_name: String,
    /// Class that removes the marker from rendering.
    pub hidden_class: String,
    /// Indicator class is this prefix followed by the slot index.
    pub button_class_prefix: String,
    /// Marker box edge in CSS pixels.
    pub size: u32,
    pub z_index: i32,
    /// Ring border width in CSS pixels.
    pub ring_width: u32,
    pub coordinate_space: CoordinateSpace,
    /// One entry per button slot, in slot order.
    pub indicators: Vec<IndicatorStyle>,
    /// Maximum log level ("off", "error", ... "trace"). Applied by
    /// `install()` only; the log level is page-wide, so overlays attached
    /// through `MouseHelper.attach()` leave it alone.
    pub log_level: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            tag_name: "p-mouse-pointer".to_string(),
            hidden_class: "p-mouse-pointer-hide".to_string(),
            button_class_prefix: "button-".to_string(),
            size: 20,
            z_index: 10000,
            ring_width: 4,
            coordinate_space: CoordinateSpace::Page,
            indicators: ButtonSlot::ALL
                .into_iter()
                .map(IndicatorStyle::default_for)
                .collect(),
            log_level: "info".to_string(),
        }
    }
}

impl OverlayConfig {
    /// Parse from a JS object or a JSON string. `undefined`/`null` yields
    /// the defaults.
    pub fn from_js(value: JsValue) -> OverlayResult<Self> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        if let Some(json) = value.as_string() {
            return Self::from_json(&json);
        }
        let config: Self = serde_wasm_bindgen::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse from a JSON string.
    pub fn from_json(json: &str) -> OverlayResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> OverlayResult<()> {
        if !is_custom_element_name(&self.tag_name) {
            return Err(OverlayError::InvalidConfig(format!(
                "'{}' is not a valid custom element name",
                self.tag_name
            )));
        }
        if !is_class_token(&self.hidden_class) {
            return Err(OverlayError::InvalidConfig(format!(
                "'{}' is not a valid class name",
                self.hidden_class
            )));
        }
        if !is_class_token(&self.button_class_prefix) {
            return Err(OverlayError::InvalidConfig(format!(
                "'{}' is not a valid class prefix",
                self.button_class_prefix
            )));
        }
        if self.size == 0 {
            return Err(OverlayError::InvalidConfig("size must be positive".into()));
        }
        if self.ring_width == 0 {
            return Err(OverlayError::InvalidConfig(
                "ringWidth must be positive".into(),
            ));
        }
        if self.indicators.len() != BUTTON_SLOT_COUNT {
            return Err(OverlayError::InvalidConfig(format!(
                "expected {} indicator styles, got {}",
                BUTTON_SLOT_COUNT,
                self.indicators.len()
            )));
        }
        self.log_filter()?;
        Ok(())
    }

    pub fn log_filter(&self) -> OverlayResult<log::LevelFilter> {
        log::LevelFilter::from_str(&self.log_level).map_err(|_| {
            OverlayError::InvalidConfig(format!("unknown log level '{}'", self.log_level))
        })
    }

    /// Class toggled for a held button.
    pub fn button_class(&self, slot: ButtonSlot) -> String {
        format!("{}{}", self.button_class_prefix, slot.index())
    }

    pub fn indicator(&self, slot: ButtonSlot) -> &IndicatorStyle {
        &self.indicators[slot.index()]
    }
}

/// Lowercase ASCII, starts with a letter, contains a hyphen.
fn is_custom_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
        && name.contains('-')
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_' || c == '.')
}

fn is_class_token(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = OverlayConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.size, 20);
        assert_eq!(config.z_index, 10000);
        assert_eq!(config.indicators.len(), BUTTON_SLOT_COUNT);
        assert_eq!(config.log_filter().unwrap(), log::LevelFilter::Info);
    }

    #[test]
    fn test_button_class() {
        let config = OverlayConfig::default();
        assert_eq!(config.button_class(ButtonSlot::Primary), "button-0");
        assert_eq!(config.button_class(ButtonSlot::Forward), "button-4");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config =
            OverlayConfig::from_json(r#"{"size": 32, "coordinateSpace": "client"}"#).unwrap();
        assert_eq!(config.size, 32);
        assert_eq!(config.coordinate_space, CoordinateSpace::Client);
        assert_eq!(config.tag_name, "p-mouse-pointer");
        assert_eq!(config.coordinate_space.css_position(), "fixed");
    }

    #[test]
    fn test_custom_indicators() {
        let json = r#"{"indicators": [
            {"borderColor": "red", "borderRadius": "0"},
            {"borderColor": "orange", "borderRadius": "50%"},
            {"borderColor": "yellow", "borderRadius": "50%"},
            {"borderColor": "green", "borderRadius": "50%"},
            {"borderColor": "blue", "borderRadius": "50%"}
        ]}"#;
        let config = OverlayConfig::from_json(json).unwrap();
        assert_eq!(config.indicator(ButtonSlot::Secondary).border_color, "orange");
    }

    #[test]
    fn test_rejects_bad_tag_name() {
        let err = OverlayConfig::from_json(r#"{"tagName": "div"}"#).unwrap_err();
        assert!(matches!(err, OverlayError::InvalidConfig(_)));
        assert!(OverlayConfig::from_json(r#"{"tagName": "My-Pointer"}"#).is_err());
    }

    #[test]
    fn test_rejects_zero_size_and_wrong_indicator_count() {
        assert!(OverlayConfig::from_json(r#"{"size": 0}"#).is_err());
        assert!(OverlayConfig::from_json(r#"{"ringWidth": 0}"#).is_err());
        assert!(OverlayConfig::from_json(r#"{"indicators": []}"#).is_err());
    }

    #[test]
    fn test_log_level_parses_alongside_other_fields() {
        let config = OverlayConfig::from_json(r#"{"logLevel": "trace", "size": 12}"#).unwrap();
        assert_eq!(config.log_filter().unwrap(), log::LevelFilter::Trace);
        assert_eq!(config.size, 12);
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let err = OverlayConfig::from_json(r#"{"logLevel": "chatty"}"#).unwrap_err();
        assert!(err.to_string().contains("chatty"));
        let quiet = OverlayConfig::from_json(r#"{"logLevel": "off"}"#).unwrap();
        assert_eq!(quiet.log_filter().unwrap(), log::LevelFilter::Off);
    }

    #[test]
    fn test_rejects_bad_class_names() {
        assert!(OverlayConfig::from_json(r#"{"hiddenClass": ""}"#).is_err());
        assert!(OverlayConfig::from_json(r#"{"buttonClassPrefix": "btn "}"#).is_err());
    }
}
