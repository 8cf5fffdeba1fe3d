//! WASM Mouse Helper
//!
//! Draws a visible cursor marker over a web page so mouse movement and
//! held buttons show up in screen recordings and demos.
//!
//! Load the module and call `install()` (optionally with a config object).
//! For explicit control, `MouseHelper.attach()` returns a handle that can be
//! queried and later `detach()`ed.

pub mod buttons;
pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod style;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Element};

pub use buttons::{ButtonMask, ButtonSlot};
pub use config::{CoordinateSpace, IndicatorStyle, OverlayConfig};
pub use controller::{MarkerSurface, OverlayController, XY};
pub use error::{OverlayError, OverlayResult};

use dom::{DocumentListeners, DomMarker};

/// Initialize panic hook and logging for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("[MouseHelper] WASM module initialized");
}

/// Install an overlay for the lifetime of the page.
///
/// Mounts right away when the document has been parsed, otherwise waits for
/// `DOMContentLoaded`.
#[wasm_bindgen]
pub fn install(config: JsValue) -> Result<(), JsValue> {
    let config = OverlayConfig::from_js(config)?;
    log::set_max_level(config.log_filter()?);
    let document = dom::current_document()?;

    if document.ready_state() != "loading" {
        MouseHelper::attach_with(config)?.keep_for_page();
        return Ok(());
    }

    log::debug!("[MouseHelper] Waiting for DOMContentLoaded");
    let on_ready = Closure::once(move || match MouseHelper::attach_with(config) {
        Ok(helper) => helper.keep_for_page(),
        Err(e) => log::error!("[MouseHelper] Failed to install overlay: {}", e),
    });
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    document
        .add_event_listener_with_callback_and_add_event_listener_options(
            "DOMContentLoaded",
            on_ready.as_ref().unchecked_ref(),
            &options,
        )?;
    on_ready.forget();

    Ok(())
}

/// A mounted overlay: marker, stylesheet and document listeners.
#[wasm_bindgen]
pub struct MouseHelper {
    controller: Rc<RefCell<OverlayController<DomMarker>>>,
    listeners: DocumentListeners,
    style: Element,
}

#[wasm_bindgen]
impl MouseHelper {
    /// Mount a new overlay now. The document body must exist.
    #[wasm_bindgen]
    pub fn attach(config: JsValue) -> Result<MouseHelper, JsValue> {
        let config = OverlayConfig::from_js(config)?;
        Ok(Self::attach_with(config)?)
    }

    /// Remove listeners, marker and stylesheet.
    ///
    /// Freeing the handle without detaching still unregisters the listeners;
    /// only the now inert marker stays in the page.
    #[wasm_bindgen]
    pub fn detach(self) {
        let MouseHelper {
            controller,
            listeners,
            style,
        } = self;
        drop(listeners);
        controller.borrow().surface().element().remove();
        style.remove();
        log::info!("[MouseHelper] Detached");
    }

    #[wasm_bindgen(js_name = isHidden)]
    pub fn is_hidden(&self) -> bool {
        self.controller.borrow().is_hidden()
    }

    #[wasm_bindgen]
    pub fn x(&self) -> f64 {
        self.controller.borrow().position().x
    }

    #[wasm_bindgen]
    pub fn y(&self) -> f64 {
        self.controller.borrow().position().y
    }

    /// Indicators currently shown, as a `buttons`-style bitmask.
    #[wasm_bindgen(js_name = pressedMask)]
    pub fn pressed_mask(&self) -> u8 {
        self.controller.borrow().indicators().bits()
    }
}

impl MouseHelper {
    pub fn attach_with(config: OverlayConfig) -> OverlayResult<Self> {
        config.validate()?;

        let document = dom::current_document()?;
        let mounted = dom::mount(&document, &config)?;
        let controller = Rc::new(RefCell::new(OverlayController::new(
            mounted.marker,
            &config,
        )));
        let listeners =
            match DocumentListeners::attach(&document, Rc::clone(&controller), config.coordinate_space) {
                Ok(listeners) => listeners,
                Err(e) => {
                    controller.borrow().surface().element().remove();
                    mounted.style.remove();
                    return Err(e);
                },
            };

        Ok(Self {
            controller,
            listeners,
            style: mounted.style,
        })
    }

    /// Leak the overlay so it lives until the page unloads.
    fn keep_for_page(self) {
        std::mem::forget(self);
    }
}
