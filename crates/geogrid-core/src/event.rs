#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! Both event sources that feed the overlay — map movement notifications and
//! pointer input from the container — are normalized into [`Event`] values so
//! the runtime has a single synchronous dispatch point. All events derive
//! `Clone` and `PartialEq` for use in tests and pattern matching.

use crate::geometry::PixelPoint;
use bitflags::bitflags;

/// Canonical event consumed by the overlay runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// A pointer event in container pixel coordinates.
    Pointer(PointerEvent),

    /// A keyboard event.
    Key(KeyEvent),

    /// The map moved (pan/zoom/rotate) and produced a new frame.
    MapRender,

    /// The map container was resized.
    ///
    /// Carries the device pixel ratio so the surface backing store can be
    /// rescaled together with the CSS size.
    Resized {
        /// Device pixel ratio of the hosting display.
        scale_factor: f64,
    },
}

/// A pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// The type of pointer transition.
    pub kind: PointerKind,

    /// Position in container CSS pixels.
    pub position: PixelPoint,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Create a new pointer event with no modifiers.
    #[must_use]
    pub const fn new(kind: PointerKind, position: PixelPoint) -> Self {
        Self {
            kind,
            position,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a pointer event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// The type of pointer transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Button pressed down.
    Down(PointerButton),

    /// Pointer moved (with or without a button held).
    Moved,

    /// Button released.
    Up(PointerButton),
}

/// Pointer button identifiers.
///
/// The secondary button is the designated selection button; the primary
/// button is left to the map for panning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Primary (usually left) button.
    Primary,

    /// Secondary (usually right) button.
    Secondary,

    /// Middle button.
    Middle,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Check if this is a specific character key (case-insensitive).
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&c))
    }
}

/// Key codes the overlay reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Escape key. Cancels an in-flight or committed selection.
    Escape,
}

bitflags! {
    /// Modifier keys that can be held during a pointer or key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_event_construction() {
        let ev = PointerEvent::new(
            PointerKind::Down(PointerButton::Secondary),
            PixelPoint::new(5.0, 7.0),
        );
        assert_eq!(ev.kind, PointerKind::Down(PointerButton::Secondary));
        assert_eq!(ev.position, PixelPoint::new(5.0, 7.0));
        assert_eq!(ev.modifiers, Modifiers::NONE);
    }

    #[test]
    fn pointer_event_with_modifiers() {
        let ev = PointerEvent::new(PointerKind::Moved, PixelPoint::default())
            .with_modifiers(Modifiers::SHIFT | Modifiers::CTRL);
        assert!(ev.modifiers.contains(Modifiers::SHIFT));
        assert!(ev.modifiers.contains(Modifiers::CTRL));
        assert!(!ev.modifiers.contains(Modifiers::ALT));
    }

    #[test]
    fn key_event_is_char_ignores_case() {
        let ev = KeyEvent::new(KeyCode::Char('G'));
        assert!(ev.is_char('g'));
        assert!(ev.is_char('G'));
        assert!(!ev.is_char('x'));
    }

    #[test]
    fn escape_is_not_a_char() {
        let ev = KeyEvent::new(KeyCode::Escape);
        assert!(!ev.is_char('g'));
    }

    #[test]
    fn event_variants() {
        let _pointer = Event::Pointer(PointerEvent::new(
            PointerKind::Up(PointerButton::Secondary),
            PixelPoint::new(0.0, 0.0),
        ));
        let _key = Event::Key(KeyEvent::new(KeyCode::Escape));
        let _render = Event::MapRender;
        let _resized = Event::Resized { scale_factor: 2.0 };
    }

    #[test]
    fn modifiers_default() {
        assert_eq!(Modifiers::default(), Modifiers::NONE);
    }
}
