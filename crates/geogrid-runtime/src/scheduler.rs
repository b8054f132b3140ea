#![forbid(unsafe_code)]

//! Frame scheduling and event source capabilities.
//!
//! The overlay never talks to a real animation-frame API or DOM event
//! system. It requests frames through [`FrameScheduler`] and receives
//! canonical events from the host (optionally pulled through an
//! [`EventSource`]), which keeps the whole runtime synchronous and testable.

use geogrid_core::event::Event;

/// Handle to one scheduled frame.
///
/// Held by the overlay while a paint is pending so teardown can cancel it;
/// no paint may execute against a disposed surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(pub u64);

/// The host's animation-frame capability.
///
/// `request` schedules exactly one future frame callback; the host invokes
/// the overlay's paint entry point when it fires. `cancel` revokes a frame
/// that has not fired yet.
pub trait FrameScheduler {
    /// Schedule a frame, returning its token.
    fn request(&mut self) -> FrameToken;

    /// Cancel a previously requested frame.
    fn cancel(&mut self, token: FrameToken);
}

/// A pull-based source of canonical events.
///
/// Hosts that poll (tests, headless drivers) implement this; push-style
/// hosts call the overlay's `handle_event` directly.
pub trait EventSource {
    /// The next pending event, or `None` when drained.
    fn next_event(&mut self) -> Option<Event>;
}
