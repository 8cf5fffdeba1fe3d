//! Error types for the overlay.
//!
//! Event handling itself never fails in a way the page can act on; these
//! errors cover mounting the overlay and parsing its configuration. All of
//! them convert into `JsValue` so exported functions can reject with a
//! readable message.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Main error type for overlay operations.
#[derive(Error, Debug)]
pub enum OverlayError {
    /// No global `window` (not running in a browser main thread)
    #[error("No window available")]
    WindowUnavailable,

    /// Window has no document
    #[error("No document available")]
    DocumentUnavailable,

    /// Document has no <head> to receive the stylesheet
    #[error("Document has no <head> element")]
    HeadMissing,

    /// Document has no <body> to receive the marker
    #[error("Document has no <body> element")]
    BodyMissing,

    /// A DOM call threw
    #[error("DOM error: {0}")]
    Dom(String),

    /// Configuration could not be parsed or failed validation
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl From<JsValue> for OverlayError {
    fn from(value: JsValue) -> Self {
        let msg = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        OverlayError::Dom(msg)
    }
}

impl From<serde_json::Error> for OverlayError {
    fn from(err: serde_json::Error) -> Self {
        OverlayError::InvalidConfig(err.to_string())
    }
}

impl From<serde_wasm_bindgen::Error> for OverlayError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        OverlayError::InvalidConfig(err.to_string())
    }
}

impl From<OverlayError> for JsValue {
    fn from(err: OverlayError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Extension trait for turning a missing DOM object into a typed error.
pub trait OptionExt<T> {
    /// Convert None to the given error.
    fn context(self, err: OverlayError) -> OverlayResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn context(self, err: OverlayError) -> OverlayResult<T> {
        self.ok_or(err)
    }
}

/// Type alias for Results using OverlayError.
pub type OverlayResult<T> = Result<T, OverlayError>;
