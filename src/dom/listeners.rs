//! Document-level mouse listeners feeding an overlay controller.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, MouseEvent};

use crate::buttons::{ButtonMask, ButtonSlot};
use crate::config::CoordinateSpace;
use crate::controller::{OverlayController, PointerInput, XY};
use crate::error::OverlayResult;

use super::DomMarker;

type MouseClosure = Closure<dyn FnMut(MouseEvent)>;

/// Shared handle between the five listeners.
pub type SharedController = Rc<RefCell<OverlayController<DomMarker>>>;

/// The mouse events the overlay subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    Move,
    Down,
    Up,
    Leave,
    Enter,
}

impl MouseEventKind {
    pub const ALL: [MouseEventKind; 5] = [
        MouseEventKind::Move,
        MouseEventKind::Down,
        MouseEventKind::Up,
        MouseEventKind::Leave,
        MouseEventKind::Enter,
    ];

    pub fn event_type(self) -> &'static str {
        match self {
            MouseEventKind::Move => "mousemove",
            MouseEventKind::Down => "mousedown",
            MouseEventKind::Up => "mouseup",
            MouseEventKind::Leave => "mouseleave",
            MouseEventKind::Enter => "mouseenter",
        }
    }
}

/// Fields read off a `MouseEvent`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawMouse {
    pub buttons: u16,
    pub button: i16,
    /// Legacy 1-based `which`; 0 when the host does not provide it.
    pub which: u32,
    pub page: XY<f64>,
    pub client: XY<f64>,
}

impl RawMouse {
    fn from_event(event: &MouseEvent) -> Self {
        Self {
            buttons: event.buttons(),
            button: event.button(),
            which: event.which(),
            page: XY::new(event.page_x() as f64, event.page_y() as f64),
            client: XY::new(event.client_x() as f64, event.client_y() as f64),
        }
    }
}

/// Turn one raw event into controller input.
pub fn translate(kind: MouseEventKind, raw: RawMouse, space: CoordinateSpace) -> PointerInput {
    let buttons = ButtonMask::from_raw(raw.buttons);
    let slot = || {
        ButtonSlot::from_event_button(raw.button)
            .or_else(|| ButtonSlot::from_legacy_which(raw.which))
    };
    match kind {
        MouseEventKind::Move => {
            let position = match space {
                CoordinateSpace::Page => raw.page,
                CoordinateSpace::Client => raw.client,
            };
            PointerInput::Move { position, buttons }
        },
        MouseEventKind::Down => PointerInput::Down {
            button: slot(),
            buttons,
        },
        MouseEventKind::Up => PointerInput::Up {
            button: slot(),
            buttons,
        },
        MouseEventKind::Leave => PointerInput::Leave { buttons },
        MouseEventKind::Enter => PointerInput::Enter { buttons },
    }
}

/// Where listeners get registered.
pub trait ListenerHost {
    type Handler;

    fn add(&self, kind: MouseEventKind, handler: &Self::Handler) -> OverlayResult<()>;

    fn remove(&self, kind: MouseEventKind, handler: &Self::Handler) -> OverlayResult<()>;
}

impl ListenerHost for Document {
    type Handler = MouseClosure;

    fn add(&self, kind: MouseEventKind, handler: &MouseClosure) -> OverlayResult<()> {
        self.add_event_listener_with_callback_and_bool(
            kind.event_type(),
            handler.as_ref().unchecked_ref(),
            true,
        )?;
        Ok(())
    }

    fn remove(&self, kind: MouseEventKind, handler: &MouseClosure) -> OverlayResult<()> {
        self.remove_event_listener_with_callback_and_bool(
            kind.event_type(),
            handler.as_ref().unchecked_ref(),
            true,
        )?;
        Ok(())
    }
}

/// Handlers currently registered on a host.
///
/// Dropping unregisters every handler before the handler itself is freed,
/// so the host never calls into a released closure.
pub struct Registrations<H: ListenerHost> {
    host: H,
    handlers: Vec<(MouseEventKind, H::Handler)>,
}

impl<H: ListenerHost> Registrations<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            handlers: Vec::with_capacity(MouseEventKind::ALL.len()),
        }
    }

    pub fn register(&mut self, kind: MouseEventKind, handler: H::Handler) -> OverlayResult<()> {
        self.host.add(kind, &handler)?;
        self.handlers.push((kind, handler));
        Ok(())
    }
}

impl<H: ListenerHost> Drop for Registrations<H> {
    fn drop(&mut self) {
        for (kind, handler) in self.handlers.drain(..) {
            if let Err(e) = self.host.remove(kind, &handler) {
                log::warn!(
                    "[MouseHelper] Failed to remove {} listener: {}",
                    kind.event_type(),
                    e
                );
            }
        }
    }
}

/// Capture-phase listeners on the document, removed on drop.
pub type DocumentListeners = Registrations<Document>;

impl Registrations<Document> {
    /// Register all five listeners. On failure the ones already added are
    /// removed again.
    pub fn attach(
        document: &Document,
        controller: SharedController,
        space: CoordinateSpace,
    ) -> OverlayResult<Self> {
        let mut listeners = Registrations::new(document.clone());

        for kind in MouseEventKind::ALL {
            let controller = Rc::clone(&controller);
            let closure = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
                let Ok(mut controller) = controller.try_borrow_mut() else {
                    log::warn!("[MouseHelper] Re-entrant {} ignored", kind.event_type());
                    return;
                };
                let input = translate(kind, RawMouse::from_event(&event), space);
                if let Err(e) = controller.apply(input) {
                    log::warn!("[MouseHelper] {} handler failed: {}", kind.event_type(), e);
                }
            });
            listeners.register(kind, closure)?;
        }

        Ok(listeners)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OverlayError;

    #[derive(Default)]
    struct FakeHost {
        active: RefCell<Vec<(MouseEventKind, u32)>>,
        removed: RefCell<Vec<MouseEventKind>>,
        fail_on: Option<MouseEventKind>,
    }

    impl ListenerHost for Rc<FakeHost> {
        type Handler = u32;

        fn add(&self, kind: MouseEventKind, handler: &u32) -> OverlayResult<()> {
            if self.fail_on == Some(kind) {
                return Err(OverlayError::Dom(format!("{} rejected", kind.event_type())));
            }
            self.active.borrow_mut().push((kind, *handler));
            Ok(())
        }

        fn remove(&self, kind: MouseEventKind, handler: &u32) -> OverlayResult<()> {
            self.active
                .borrow_mut()
                .retain(|entry| *entry != (kind, *handler));
            self.removed.borrow_mut().push(kind);
            Ok(())
        }
    }

    fn raw(buttons: u16, button: i16) -> RawMouse {
        RawMouse {
            buttons,
            button,
            which: 0,
            page: XY::new(110.0, 520.0),
            client: XY::new(10.0, 20.0),
        }
    }

    #[test]
    fn test_drop_unregisters_all_handlers() {
        let host = Rc::new(FakeHost::default());
        {
            let mut listeners = Registrations::new(Rc::clone(&host));
            for (i, kind) in MouseEventKind::ALL.into_iter().enumerate() {
                listeners.register(kind, i as u32).unwrap();
            }
            assert_eq!(host.active.borrow().len(), 5);
        }
        assert!(host.active.borrow().is_empty());
        assert_eq!(*host.removed.borrow(), MouseEventKind::ALL.to_vec());
    }

    #[test]
    fn test_failed_registration_rolls_back() {
        let host = Rc::new(FakeHost {
            fail_on: Some(MouseEventKind::Leave),
            ..FakeHost::default()
        });

        let attach = || -> OverlayResult<Registrations<Rc<FakeHost>>> {
            let mut listeners = Registrations::new(Rc::clone(&host));
            for (i, kind) in MouseEventKind::ALL.into_iter().enumerate() {
                listeners.register(kind, i as u32)?;
            }
            Ok(listeners)
        };

        assert!(matches!(attach(), Err(OverlayError::Dom(_))));
        assert!(host.active.borrow().is_empty());
        assert_eq!(
            *host.removed.borrow(),
            vec![MouseEventKind::Move, MouseEventKind::Down, MouseEventKind::Up]
        );
    }

    #[test]
    fn test_move_uses_configured_coordinates() {
        let page = translate(MouseEventKind::Move, raw(0, 0), CoordinateSpace::Page);
        assert_eq!(
            page,
            PointerInput::Move {
                position: XY::new(110.0, 520.0),
                buttons: ButtonMask::NONE
            }
        );

        let client = translate(MouseEventKind::Move, raw(1, 0), CoordinateSpace::Client);
        assert_eq!(
            client,
            PointerInput::Move {
                position: XY::new(10.0, 20.0),
                buttons: ButtonMask::from_raw(1)
            }
        );
    }

    #[test]
    fn test_press_translates_event_button() {
        let right = translate(MouseEventKind::Down, raw(0b10, 2), CoordinateSpace::Page);
        assert_eq!(
            right,
            PointerInput::Down {
                button: Some(ButtonSlot::Secondary),
                buttons: ButtonMask::from_raw(0b10)
            }
        );

        let middle = translate(MouseEventKind::Up, raw(0, 1), CoordinateSpace::Page);
        assert_eq!(
            middle,
            PointerInput::Up {
                button: Some(ButtonSlot::Auxiliary),
                buttons: ButtonMask::NONE
            }
        );
    }

    #[test]
    fn test_unknown_button_falls_back_to_which() {
        let mut event = raw(0b1, 7);
        event.which = 1;
        assert_eq!(
            translate(MouseEventKind::Down, event, CoordinateSpace::Page),
            PointerInput::Down {
                button: Some(ButtonSlot::Primary),
                buttons: ButtonMask::from_raw(1)
            }
        );

        event.which = 0;
        assert_eq!(
            translate(MouseEventKind::Down, event, CoordinateSpace::Page),
            PointerInput::Down {
                button: None,
                buttons: ButtonMask::from_raw(1)
            }
        );
    }

    #[test]
    fn test_leave_and_enter_carry_mask_only() {
        assert_eq!(
            translate(MouseEventKind::Leave, raw(0b100, 1), CoordinateSpace::Page),
            PointerInput::Leave {
                buttons: ButtonMask::from_raw(0b100)
            }
        );
        assert_eq!(
            translate(MouseEventKind::Enter, raw(0, 0), CoordinateSpace::Client),
            PointerInput::Enter {
                buttons: ButtonMask::NONE
            }
        );
    }
}
