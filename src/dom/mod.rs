//! Browser binding: the marker element and the document listeners.

mod listeners;

pub use listeners::{
    translate, DocumentListeners, ListenerHost, MouseEventKind, RawMouse, Registrations,
};

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::config::OverlayConfig;
use crate::controller::{MarkerSurface, XY};
use crate::error::{OptionExt, OverlayError, OverlayResult};
use crate::style::{stylesheet, CURSOR_SVG};

/// Marker element living in the page.
pub struct DomMarker {
    element: HtmlElement,
}

impl DomMarker {
    pub fn element(&self) -> &HtmlElement {
        &self.element
    }
}

impl MarkerSurface for DomMarker {
    fn set_position(&mut self, position: XY<f64>) -> OverlayResult<()> {
        let style = self.element.style();
        style.set_property("left", &format!("{}px", position.x))?;
        style.set_property("top", &format!("{}px", position.y))?;
        Ok(())
    }

    fn set_class(&mut self, class: &str, present: bool) -> OverlayResult<()> {
        self.element
            .class_list()
            .toggle_with_force(class, present)?;
        Ok(())
    }
}

/// Elements inserted into the page for one overlay.
pub struct MountedMarker {
    pub marker: DomMarker,
    pub style: Element,
}

/// The current document, or a typed error when not running in a page.
pub fn current_document() -> OverlayResult<Document> {
    let window = web_sys::window().context(OverlayError::WindowUnavailable)?;
    window.document().context(OverlayError::DocumentUnavailable)
}

/// Create the marker and its `<style>` block and insert both into the page.
pub fn mount(document: &Document, config: &OverlayConfig) -> OverlayResult<MountedMarker> {
    let head = document.head().context(OverlayError::HeadMissing)?;
    let body = document.body().context(OverlayError::BodyMissing)?;

    let element = document
        .create_element(&config.tag_name)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| OverlayError::Dom(format!("<{}> is not an HTMLElement", config.tag_name)))?;
    element.set_inner_html(CURSOR_SVG);

    let style = document.create_element("style")?;
    style.set_text_content(Some(&stylesheet(config)));

    head.append_child(&style)?;
    body.append_child(&element)?;

    log::info!("[MouseHelper] Mounted <{}>", config.tag_name);

    Ok(MountedMarker {
        marker: DomMarker { element },
        style,
    })
}
