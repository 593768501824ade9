//! Retained-state core for an immediate-mode UI.
//!
//! Widgets are declared every frame with plain calls; the crate keeps the
//! state that must survive between calls (geometry, focus, docking, text
//! caret positions) in a [`registry`] keyed by label-derived identities.
//! One [`Context`] value drives the whole thing:
//!
//! ```
//! use glint_core::input::InputSample;
//! use glint_ui::Context;
//!
//! let mut ctx = Context::new();
//! ctx.begin_frame(&InputSample::default(), 16.0);
//! if ctx.begin_window("Inspector") {
//!     if ctx.button("Reload") {
//!         // ...
//!     }
//! }
//! ctx.end_window();
//! ctx.end_frame();
//! ```
//!
//! The recorded draw commands are available from
//! [`Context::draw_list`] after `end_frame` and can be replayed into any
//! [`draw::DrawSink`].

pub mod clip;
pub mod control;
pub mod docking;
pub mod draw;
pub mod id;
pub mod interact;
pub mod layout;
pub mod registry;
pub mod theme;
pub mod tooltip;
mod widgets;

pub use control::{ControlFlags, ControlKind, ControlRecord, CursorHint, EdgeMask, PayloadError};
pub use docking::types::{DockPreview, DockSide};
pub use draw::{DrawCommand, DrawList, DrawSink, FixedMetrics, TextMetrics};
pub use id::ControlId;
pub use interact::{Interaction, Session};
pub use theme::Theme;
pub use widgets::{MENU_BAR_HEIGHT, TITLE_BAR_HEIGHT};

use glint_core::input::{InputSample, InputState};
use glint_core::math::Vec2;
use tracing::error;

use registry::ControlRegistry;

/// The core instance: registry, interaction session, input state, theme,
/// and the per-frame draw list. All state is explicit; two contexts in one
/// process do not share anything.
pub struct Context {
    pub(crate) registry: ControlRegistry,
    pub(crate) session: Session,
    pub(crate) input: InputState,
    pub(crate) theme: Theme,
    pub(crate) draw: DrawList,
    pub(crate) metrics: Box<dyn TextMetrics>,
    pub(crate) frame: u64,
    /// Window-title scopes for identity derivation, parallel to the
    /// session's begin/end stack.
    pub(crate) scope_stack: Vec<String>,
    /// Most recently submitted control, for trailing calls like
    /// [`Context::tooltip`].
    pub(crate) last_control: ControlId,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// A context with fixed-advance text metrics, suitable for headless
    /// use.
    pub fn new() -> Self {
        Self::with_metrics(Box::new(FixedMetrics::default()))
    }

    /// A context measuring text with the host's font metrics.
    pub fn with_metrics(metrics: Box<dyn TextMetrics>) -> Self {
        Self {
            registry: ControlRegistry::new(),
            session: Session::new(),
            input: InputState::new(),
            theme: Theme::default(),
            draw: DrawList::new(),
            metrics,
            frame: 0,
            scope_stack: Vec::new(),
            last_control: ControlId::NONE,
        }
    }

    /// Start a frame: fold the input sample, clear the one-frame state,
    /// and settle any gesture that ended since the last frame.
    pub fn begin_frame(&mut self, sample: &InputSample, dt_ms: f64) {
        self.frame += 1;
        self.input.begin_tick(sample);
        self.draw.clear();
        self.last_control = ControlId::NONE;

        self.session.clicked = ControlId::NONE;
        self.session.mouse_claimed = false;
        if self.session.resizing.is_none() {
            self.session.cursor_hint = CursorHint::None;
        }
        self.session.tooltip.begin_frame(dt_ms);

        if self.input.released_this_tick {
            self.finish_gestures();
        } else if !self.input.mouse_down {
            // The release happened outside our event stream; drop gesture
            // state without committing anything.
            self.session.pressed = ControlId::NONE;
            self.session.dragging = ControlId::NONE;
            self.session.resizing = ControlId::NONE;
            self.session.resize_edges = EdgeMask::empty();
            self.session.dock_candidate = None;
            self.session.pending_reorder = None;
        }
    }

    /// Button-up endings that must not depend on which widgets are
    /// submitted this frame: the deferred tab reorder, the dock commit,
    /// and the drag/resize slot releases.
    fn finish_gestures(&mut self) {
        if let Some(task) = self.session.pending_reorder.take() {
            docking::apply_reorder(&mut self.registry, task);
        }

        if self.session.dragging.is_some() {
            let dragged = self.session.dragging;
            let target = match self.registry.get(dragged) {
                Some(rec) if rec.flags.contains(ControlFlags::DRAG_PROXY) => rec.parent,
                _ => dragged,
            };
            if let Some(preview) = self.session.dock_candidate.take() {
                let dockable = self.registry.get(target).is_some_and(|rec| {
                    rec.flags.contains(ControlFlags::DOCKABLE) && !rec.is_docked()
                });
                if dockable {
                    docking::dock(
                        &mut self.registry,
                        &mut self.session,
                        target,
                        preview.host,
                        preview.side,
                        preview.rect,
                    );
                }
            }
            self.session.dragging = ControlId::NONE;
        }

        self.session.resizing = ControlId::NONE;
        self.session.resize_edges = EdgeMask::empty();
        self.session.cursor_hint = CursorHint::None;
        self.session.dock_candidate = None;
    }

    /// End the frame: overlay passes (dock preview, tooltip) and one-frame
    /// cleanup. Unbalanced begin/end calls are logged and recovered from.
    pub fn end_frame(&mut self) {
        if !self.session.stack.is_empty() {
            error!(
                depth = self.session.stack.len(),
                "unbalanced begin/end calls at end of frame"
            );
            debug_assert!(self.session.stack.is_empty(), "unbalanced begin/end calls");
            self.session.stack.clear();
            self.scope_stack.clear();
        }
        if self.input.released_this_tick {
            // A press whose control was not submitted this frame would
            // otherwise hold the slot forever.
            self.session.pressed = ControlId::NONE;
        }
        // Unconsumed one-shot overrides do not leak into the next frame.
        self.session.next_pos = None;
        self.session.next_size = None;
        self.session.no_auto_pos = false;
        self.session.same_line = false;

        if let Some(preview) = self.session.dock_candidate {
            self.draw.submit(DrawCommand::Rect {
                rect: preview.rect,
                color: self.theme.dock_preview,
            });
        }

        // Tooltip pass, unclipped and above everything.
        if let Some(latch) = self.session.tooltip.latched() {
            let size = Vec2::new(
                self.metrics.text_width(&latch.text) + 12.0,
                self.metrics.line_height() + 8.0,
            );
            let rect = glint_core::geometry::Rect::from_pos_size(
                latch.pos + Vec2::new(12.0, 18.0),
                size,
            );
            self.draw.submit(DrawCommand::Rect {
                rect,
                color: self.theme.tooltip_bg,
            });
            self.draw.submit(DrawCommand::Text {
                pos: rect.pos() + Vec2::new(6.0, 4.0),
                text: latch.text.clone(),
                color: self.theme.tooltip_text,
            });
        }
        self.session.tooltip.end_frame();
    }

    /// Drop records not looked up for `max_age` frames.
    ///
    /// Dock members, hosts with docked members, and holders of interaction
    /// slots are exempt, so a collapsed tab or a mid-gesture control never
    /// loses its state. Returns the number of records removed.
    pub fn sweep_stale(&mut self, max_age: u64) -> usize {
        let held = [
            self.session.hovered,
            self.session.pressed,
            self.session.focused,
            self.session.dragging,
            self.session.resizing,
        ];
        self.registry.sweep_stale(self.frame, max_age, move |rec| {
            rec.is_docked()
                || rec.anchors.as_deref().is_some_and(|a| a.any_members())
                || held.contains(&rec.id)
        })
    }

    // One-shot layout overrides, consumed by the next widget call.

    /// Place the next widget on the same line as the previous one.
    pub fn same_line(&mut self) {
        self.session.same_line = true;
    }

    /// Position the next widget explicitly, relative to its parent.
    pub fn set_next_pos(&mut self, pos: Vec2) {
        self.session.next_pos = Some(pos);
    }

    /// Size the next widget explicitly.
    pub fn set_next_size(&mut self, size: Vec2) {
        self.session.next_size = Some(size);
    }

    /// Keep the next widget's position untouched by auto-flow.
    pub fn no_auto_pos(&mut self) {
        self.session.no_auto_pos = true;
    }

    /// Dock a window onto a side of another window without a drag gesture
    /// (layout restore). Returns whether the dock took effect.
    pub fn dock_window(&mut self, window: &str, host: &str, side: DockSide) -> bool {
        let window_id = ControlId::new(window, ControlKind::Window, "");
        let host_id = ControlId::new(host, ControlKind::Window, "");
        let preferred = match self.registry.get(window_id) {
            Some(rec) => rec.size,
            None => return false,
        };
        let Some(rect) = docking::projected_slot(&self.registry, host_id, side, preferred) else {
            return false;
        };
        docking::dock(
            &mut self.registry,
            &mut self.session,
            window_id,
            host_id,
            side,
            rect,
        );
        self.registry
            .get(window_id)
            .is_some_and(|rec| rec.dock_host == host_id)
    }

    /// Undock a window from its host. A no-op for floating windows.
    pub fn undock_window(&mut self, window: &str) {
        let id = ControlId::new(window, ControlKind::Window, "");
        docking::undock(&mut self.registry, &mut self.session, id);
    }

    /// Attach a tooltip to the most recently submitted control. Feeds the
    /// hover timer while that control holds the hover slot.
    pub fn tooltip(&mut self, text: &str) {
        let id = self.last_control;
        let Some(rec) = self.registry.get_mut(id) else {
            return;
        };
        rec.tooltip = Some(text.to_owned());
        if self.session.hovered == id {
            let window = self.registry.owning_window(id);
            self.session
                .tooltip
                .observe(id, text, self.input.mouse_pos, window);
        }
    }

    pub fn registry(&self) -> &ControlRegistry {
        &self.registry
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn theme_mut(&mut self) -> &mut Theme {
        &mut self.theme
    }

    /// Commands recorded for the frame that just ended.
    pub fn draw_list(&self) -> &DrawList {
        &self.draw
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}
