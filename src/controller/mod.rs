//! Overlay controller.
//!
//! Maps mouse events onto a marker surface. The controller owns the surface
//! and the last state it pushed to it, so the marker never depends on any
//! page-level global.
//!
//! Every handler resyncs all indicators from the event's `buttons` mask.
//! Press/release additionally apply the discrete button index, because on
//! some platforms the mask still shows the previous state on a fast click.

use crate::buttons::{ButtonMask, ButtonSlot, BUTTON_SLOT_COUNT};
use crate::config::OverlayConfig;
use crate::error::OverlayResult;


/// 2D coordinate helper type.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct XY<T> {
    pub x: T,
    pub y: T,
}

impl<T> XY<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

/// One decoded mouse event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Move {
        position: XY<f64>,
        buttons: ButtonMask,
    },
    Down {
        button: Option<ButtonSlot>,
        buttons: ButtonMask,
    },
    Up {
        button: Option<ButtonSlot>,
        buttons: ButtonMask,
    },
    Leave {
        buttons: ButtonMask,
    },
    Enter {
        buttons: ButtonMask,
    },
}

/// Something the controller can draw the cursor state onto.
///
/// Implemented by the DOM marker element in the browser and by in-memory
/// fakes in tests.
pub trait MarkerSurface {
    /// Move the marker's top-left corner to `position` (CSS pixels).
    fn set_position(&mut self, position: XY<f64>) -> OverlayResult<()>;

    /// Add (`present == true`) or remove a class on the marker.
    fn set_class(&mut self, class: &str, present: bool) -> OverlayResult<()>;
}

/// Single overlay instance: one marker plus its last known state.
pub struct OverlayController<S: MarkerSurface> {
    surface: S,
    button_classes: [String; BUTTON_SLOT_COUNT],
    hidden_class: String,
    position: XY<f64>,
    indicators: ButtonMask,
    hidden: bool,
}

impl<S: MarkerSurface> OverlayController<S> {
    /// Wrap a freshly mounted surface. The marker starts visible at the
    /// origin with no indicators, matching a newly inserted element.
    pub fn new(surface: S, config: &OverlayConfig) -> Self {
        Self {
            surface,
            button_classes: ButtonSlot::ALL.map(|slot| config.button_class(slot)),
            hidden_class: config.hidden_class.clone(),
            position: XY::default(),
            indicators: ButtonMask::NONE,
            hidden: false,
        }
    }

    /// Route a decoded event to its handler.
    pub fn apply(&mut self, input: PointerInput) -> OverlayResult<()> {
        match input {
            PointerInput::Move { position, buttons } => self.on_pointer_move(position, buttons),
            PointerInput::Down { button, buttons } => self.on_pointer_down(button, buttons),
            PointerInput::Up { button, buttons } => self.on_pointer_up(button, buttons),
            PointerInput::Leave { buttons } => self.on_pointer_leave(buttons),
            PointerInput::Enter { buttons } => self.on_pointer_enter(buttons),
        }
    }

    pub fn on_pointer_move(&mut self, position: XY<f64>, buttons: ButtonMask) -> OverlayResult<()> {
        log::trace!("[MouseHelper] move ({}, {})", position.x, position.y);
        self.surface.set_position(position)?;
        self.position = position;
        self.set_hidden(false)?;
        self.sync_button_indicators(buttons)
    }

    pub fn on_pointer_down(
        &mut self,
        button: Option<ButtonSlot>,
        buttons: ButtonMask,
    ) -> OverlayResult<()> {
        log::debug!("[MouseHelper] down {:?} mask={:#07b}", button, buttons.bits());
        self.sync_button_indicators(buttons)?;
        if let Some(slot) = button {
            self.set_indicator(slot, true)?;
        }
        self.set_hidden(false)
    }

    pub fn on_pointer_up(
        &mut self,
        button: Option<ButtonSlot>,
        buttons: ButtonMask,
    ) -> OverlayResult<()> {
        log::debug!("[MouseHelper] up {:?} mask={:#07b}", button, buttons.bits());
        self.sync_button_indicators(buttons)?;
        if let Some(slot) = button {
            self.set_indicator(slot, false)?;
        }
        self.set_hidden(false)
    }

    pub fn on_pointer_leave(&mut self, buttons: ButtonMask) -> OverlayResult<()> {
        log::trace!("[MouseHelper] leave");
        self.sync_button_indicators(buttons)?;
        self.set_hidden(true)
    }

    pub fn on_pointer_enter(&mut self, buttons: ButtonMask) -> OverlayResult<()> {
        log::trace!("[MouseHelper] enter");
        self.sync_button_indicators(buttons)?;
        self.set_hidden(false)
    }

    /// Set every indicator from `buttons`. Idempotent.
    pub fn sync_button_indicators(&mut self, buttons: ButtonMask) -> OverlayResult<()> {
        for slot in ButtonSlot::ALL {
            self.set_indicator(slot, buttons.contains(slot))?;
        }
        Ok(())
    }

    fn set_indicator(&mut self, slot: ButtonSlot, present: bool) -> OverlayResult<()> {
        self.surface
            .set_class(&self.button_classes[slot.index()], present)?;
        self.indicators = if present {
            self.indicators.with(slot)
        } else {
            self.indicators.without(slot)
        };
        Ok(())
    }

    fn set_hidden(&mut self, hidden: bool) -> OverlayResult<()> {
        self.surface.set_class(&self.hidden_class, hidden)?;
        self.hidden = hidden;
        Ok(())
    }

    pub fn position(&self) -> XY<f64> {
        self.position
    }

    /// Indicators currently shown on the marker.
    pub fn indicators(&self) -> ButtonMask {
        self.indicators
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
