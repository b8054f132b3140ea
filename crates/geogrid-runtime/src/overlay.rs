#![forbid(unsafe_code)]

//! The overlay orchestrator.
//!
//! [`GridOverlay`] owns the whole engine state — settings, runtime, and
//! selection — plus the three host capabilities (map, surface, scheduler).
//! Both event sources (map movement notifications and pointer input) arrive
//! through [`GridOverlay::handle_event`], which runs synchronously: geometry
//! recomputation always completes inside the handler, and only then is a
//! repaint scheduled. Any number of repaint requests within one tick
//! coalesce into a single pending frame; the scheduled paint rasterizes
//! already-current state and computes nothing itself.

use crate::scheduler::{EventSource, FrameScheduler, FrameToken};
use crate::selection::{SelectionEngine, SelectionLabel, SelectionState};
use geogrid_core::event::{Event, KeyCode, KeyEvent, PointerButton, PointerEvent, PointerKind};
use geogrid_core::geodesy::{meters_per_pixel, pixels_from_meters};
use geogrid_core::grid::{RuntimeState, decide, parity, phase};
use geogrid_core::map::MapAdapter;
use geogrid_core::settings::{GridSettings, SettingsUpdate};
use geogrid_render::surface::Surface;
use tracing::{debug, trace};

/// The measurement-grid overlay engine.
///
/// Generic over the host capabilities so tests run it against fakes and the
/// host runs it against its real map, canvas, and animation-frame API.
pub struct GridOverlay<M, S, F>
where
    M: MapAdapter,
    S: Surface,
    F: FrameScheduler,
{
    map: M,
    surface: S,
    scheduler: F,
    settings: GridSettings,
    runtime: RuntimeState,
    selection: SelectionEngine,
    pending_frame: Option<FrameToken>,
    needs_paint: bool,
}

impl<M, S, F> GridOverlay<M, S, F>
where
    M: MapAdapter,
    S: Surface,
    F: FrameScheduler,
{
    /// Create the overlay. Nothing is painted until the host reports
    /// readiness via [`GridOverlay::on_ready`] or an event arrives.
    pub fn new(map: M, surface: S, scheduler: F, settings: GridSettings) -> Self {
        Self {
            map,
            surface,
            scheduler,
            settings,
            runtime: RuntimeState::default(),
            selection: SelectionEngine::new(),
            pending_frame: None,
            needs_paint: false,
        }
    }

    /// First-readiness hook: anchor the grid at the current map center,
    /// size the surface, and schedule the initial paint.
    pub fn on_ready(&mut self, scale_factor: f64) {
        let center = self.map.center();
        self.settings.set_anchor(center);
        debug!(lng = center.lng, lat = center.lat, "overlay ready, grid anchored");
        self.resize_surface(scale_factor);
    }

    /// Dispatch one canonical event. Synchronous and atomic: by the time
    /// this returns, all derived state is current and at most one frame is
    /// pending.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::MapRender => {
                self.recompute_runtime();
                self.request_paint();
            }
            Event::Resized { scale_factor } => self.resize_surface(scale_factor),
            Event::Pointer(pointer) => self.handle_pointer(pointer),
            Event::Key(key) => self.handle_key(key),
        }
    }

    /// Drain a pull-based event source.
    pub fn drain(&mut self, source: &mut dyn EventSource) {
        while let Some(event) = source.next_event() {
            self.handle_event(event);
        }
    }

    /// Merge a settings change from the external controls.
    ///
    /// Disabling the grid cancels any in-flight or committed selection
    /// before the next paint.
    pub fn apply_settings(&mut self, update: SettingsUpdate) {
        self.settings.apply(update);
        if !self.settings.enabled() {
            self.selection.cancel(&mut self.map);
        }
        self.recompute_runtime();
        self.request_paint();
    }

    /// Re-anchor the grid at the current map center.
    pub fn reset_anchor(&mut self) {
        let center = self.map.center();
        self.settings.set_anchor(center);
        self.recompute_runtime();
        self.request_paint();
    }

    /// Clear the selection without touching the grid.
    pub fn clear_selection(&mut self) {
        if self.selection.cancel(&mut self.map) {
            self.request_paint();
        }
    }

    /// The scheduled frame fired: rasterize the current state.
    ///
    /// Recomputes nothing — geometry and selection snapping were already
    /// brought up to date by the handler that requested the frame.
    pub fn on_frame(&mut self) {
        self.pending_frame = None;
        if !self.needs_paint {
            return;
        }
        self.needs_paint = false;
        geogrid_render::painter::paint(
            &mut self.surface,
            &self.runtime,
            &self.settings,
            self.selection.visible_rect(),
        );
    }

    /// Tear the overlay down, cancelling any pending frame so no paint can
    /// execute against a disposed surface. Returns the capabilities to the
    /// host.
    pub fn teardown(mut self) -> (M, S, F) {
        if let Some(token) = self.pending_frame.take() {
            self.scheduler.cancel(token);
            trace!(token = token.0, "pending frame cancelled at teardown");
        }
        (self.map, self.surface, self.scheduler)
    }

    /// Current settings.
    #[inline]
    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    /// Current runtime state (telemetry surface).
    #[inline]
    pub fn runtime(&self) -> &RuntimeState {
        &self.runtime
    }

    /// Current selection state (telemetry surface).
    #[inline]
    pub fn selection(&self) -> &SelectionState {
        self.selection.state()
    }

    /// Size label for the external label display.
    #[inline]
    pub fn selection_label(&self) -> Option<SelectionLabel> {
        self.selection.label()
    }

    /// The host map capability.
    #[inline]
    pub fn map(&self) -> &M {
        &self.map
    }

    /// Mutable access to the host map capability.
    #[inline]
    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    fn handle_pointer(&mut self, pointer: PointerEvent) {
        let changed = match pointer.kind {
            PointerKind::Down(PointerButton::Secondary) => self.selection.pointer_down(
                pointer.position,
                &mut self.map,
                &self.settings,
                self.runtime.mpp,
            ),
            PointerKind::Moved => self.selection.pointer_move(
                pointer.position,
                &self.map,
                &self.settings,
                self.runtime.mpp,
            ),
            PointerKind::Up(PointerButton::Secondary) => self.selection.pointer_up(&mut self.map),
            _ => false,
        };
        if changed {
            self.request_paint();
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Escape => self.clear_selection(),
            KeyCode::Char(_) if key.is_char('g') => {
                let enabled = self.settings.enabled();
                self.apply_settings(SettingsUpdate::new().enabled(!enabled));
            }
            KeyCode::Char(_) => {}
        }
    }

    fn resize_surface(&mut self, scale_factor: f64) {
        let size = self.map.container_size();
        self.runtime.scale_factor = if scale_factor > 0.0 { scale_factor } else { 1.0 };
        self.surface.resize(size, self.runtime.scale_factor);
        self.recompute_runtime();
        self.request_paint();
    }

    /// Recompute the whole [`RuntimeState`] from the live map and settings.
    fn recompute_runtime(&mut self) {
        let size = self.map.container_size();
        let mpp = meters_per_pixel(&self.map, size.center());

        let spacing_m = self.settings.spacing_m();
        let spacing_px_x = pixels_from_meters(spacing_m, mpp.x);
        let spacing_px_y = pixels_from_meters(spacing_m, mpp.y);

        let (offset_m_x, offset_m_y) = self.settings.offset_m();
        let offset_px_x = pixels_from_meters(offset_m_x, mpp.x);
        let offset_px_y = pixels_from_meters(offset_m_y, mpp.y);

        let anchor_px = self.map.project(self.settings.anchor());
        let mode = decide(spacing_px_x, spacing_px_y, size);
        if mode != self.runtime.mode {
            debug!(
                from = self.runtime.mode.as_str(),
                to = mode.as_str(),
                "render mode changed"
            );
        }

        self.runtime = RuntimeState {
            mpp,
            spacing_px_x,
            spacing_px_y,
            offset_px_x,
            offset_px_y,
            phase_x: phase(anchor_px.x, offset_px_x, spacing_px_x),
            phase_y: phase(anchor_px.y, offset_px_y, spacing_px_y),
            parity_x: parity(anchor_px.x, offset_px_x, spacing_px_x),
            parity_y: parity(anchor_px.y, offset_px_y, spacing_px_y),
            scale_factor: self.runtime.scale_factor,
            surface_size: size,
            mode,
        };
    }

    /// Mark the state dirty and make sure exactly one frame is pending.
    fn request_paint(&mut self) {
        self.needs_paint = true;
        if self.pending_frame.is_none() {
            let token = self.scheduler.request();
            trace!(token = token.0, "frame scheduled");
            self.pending_frame = Some(token);
        }
    }
}
