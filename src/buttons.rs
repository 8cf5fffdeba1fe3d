//! Mouse button model.
//!
//! Slots follow the bit order of `MouseEvent.buttons`:
//! 0 = primary, 1 = secondary, 2 = auxiliary (middle), 3 = back, 4 = forward.
//! `MouseEvent.button` uses a different order for secondary and auxiliary,
//! so press/release indices are translated before they touch the marker.

/// Number of button slots tracked by the overlay.
pub const BUTTON_SLOT_COUNT: usize = 5;

/// One trackable mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonSlot {
    Primary,
    Secondary,
    Auxiliary,
    Back,
    Forward,
}

impl ButtonSlot {
    /// All slots in bit order.
    pub const ALL: [ButtonSlot; BUTTON_SLOT_COUNT] = [
        ButtonSlot::Primary,
        ButtonSlot::Secondary,
        ButtonSlot::Auxiliary,
        ButtonSlot::Back,
        ButtonSlot::Forward,
    ];

    /// Bit position of this slot in a `buttons` mask.
    pub fn index(self) -> usize {
        match self {
            ButtonSlot::Primary => 0,
            ButtonSlot::Secondary => 1,
            ButtonSlot::Auxiliary => 2,
            ButtonSlot::Back => 3,
            ButtonSlot::Forward => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Translate `MouseEvent.button` (0 primary, 1 auxiliary, 2 secondary,
    /// 3 back, 4 forward). Anything else has no slot.
    pub fn from_event_button(button: i16) -> Option<Self> {
        match button {
            0 => Some(ButtonSlot::Primary),
            1 => Some(ButtonSlot::Auxiliary),
            2 => Some(ButtonSlot::Secondary),
            3 => Some(ButtonSlot::Back),
            4 => Some(ButtonSlot::Forward),
            _ => None,
        }
    }

    /// Translate the legacy 1-based `which` field (1 primary, 2 auxiliary,
    /// 3 secondary). 0 means "no button".
    pub fn from_legacy_which(which: u32) -> Option<Self> {
        match which {
            1 => Some(ButtonSlot::Primary),
            2 => Some(ButtonSlot::Auxiliary),
            3 => Some(ButtonSlot::Secondary),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        1 << self.index()
    }
}

/// Bitmask of currently held buttons, as delivered by `MouseEvent.buttons`.
///
/// Bits above the five tracked slots are dropped on construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonMask(u8);

impl ButtonMask {
    const TRACKED_BITS: u16 = (1 << BUTTON_SLOT_COUNT) - 1;

    pub const NONE: ButtonMask = ButtonMask(0);

    pub fn from_raw(buttons: u16) -> Self {
        ButtonMask((buttons & Self::TRACKED_BITS) as u8)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, slot: ButtonSlot) -> bool {
        self.0 & slot.bit() != 0
    }

    pub fn with(self, slot: ButtonSlot) -> Self {
        ButtonMask(self.0 | slot.bit())
    }

    pub fn without(self, slot: ButtonSlot) -> Self {
        ButtonMask(self.0 & !slot.bit())
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}
