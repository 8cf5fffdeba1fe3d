//! Marker template and stylesheet.

use std::fmt::Write;

use crate::buttons::ButtonSlot;
use crate::config::OverlayConfig;

/// Arrow cursor graphic placed inside the marker.
pub const CURSOR_SVG: &str = include_str!("../assets/left_ptr.svg");

/// Build the stylesheet for a marker.
///
/// Each indicator rule carries its own border so any single held button
/// draws a ring; later rules win when several buttons are held.
pub fn stylesheet(config: &OverlayConfig) -> String {
    let tag = &config.tag_name;
    let mut css = String::new();

    // Writing to a String cannot fail.
    let _ = write!(
        css,
        "{tag} {{\n  pointer-events: none;\n  position: {position};\n  top: 0;\n  left: 0;\n  z-index: {z};\n  width: {size}px;\n  height: {size}px;\n}}\n",
        position = config.coordinate_space.css_position(),
        z = config.z_index,
        size = config.size,
    );

    for slot in ButtonSlot::ALL {
        let indicator = config.indicator(slot);
        let _ = write!(
            css,
            "{tag}.{class} {{\n  transition: none;\n  border: {width}px solid {color};\n  border-radius: {radius};\n}}\n",
            class = config.button_class(slot),
            width = config.ring_width,
            color = indicator.border_color,
            radius = indicator.border_radius,
        );
    }

    let _ = write!(
        css,
        "{tag}.{hidden} {{\n  display: none;\n}}\n",
        hidden = config.hidden_class,
    );

    css
}
