//! The built-in widget set, implemented as methods on [`Context`].
//!
//! Every widget follows the same shape: derive the identity, look up (or
//! create) the record, run layout, run the interaction state machine, then
//! record draw commands from the resulting geometry.

mod button;
mod label;
mod list_view;
mod menu;
mod slider;
mod text_box;
mod toggle;
mod window;

pub use menu::MENU_BAR_HEIGHT;
pub use window::TITLE_BAR_HEIGHT;

use glint_core::color::Color;
use glint_core::geometry::Rect;
use glint_core::math::Vec2;

use crate::clip::ClipRect;
use crate::control::{ControlFlags, ControlKind, ControlRecord};
use crate::draw::{DrawCommand, DrawSink};
use crate::id::ControlId;
use crate::interact::{self, Interaction};
use crate::layout::{self, LayoutParams};
use crate::Context;

impl Context {
    /// Identity scope for widgets at the current nesting (the enclosing
    /// window's title).
    pub(crate) fn scope(&self) -> &str {
        self.scope_stack.last().map(String::as_str).unwrap_or("")
    }

    pub(crate) fn widget_id(&self, label: &str, kind: ControlKind) -> ControlId {
        ControlId::new(label, kind, self.scope())
    }

    /// Shared widget spine: record lookup, layout, interaction.
    pub(crate) fn node(
        &mut self,
        id: ControlId,
        kind: ControlKind,
        flags: ControlFlags,
        params: &LayoutParams,
    ) -> Interaction {
        self.node_with(id, kind, flags, params, |_| {})
    }

    /// [`Context::node`] with a record setup hook running before layout
    /// (payload initialization, resize masks).
    pub(crate) fn node_with(
        &mut self,
        id: ControlId,
        kind: ControlKind,
        flags: ControlFlags,
        params: &LayoutParams,
        setup: impl FnOnce(&mut ControlRecord),
    ) -> Interaction {
        let parent = self.session.top();
        let rec = self.registry.create_or_get(id, kind, parent, self.frame);
        rec.flags = flags;
        setup(rec);
        layout::prepare(&mut self.registry, &mut self.session, id, params);
        let reply = interact::process(&mut self.registry, &mut self.session, &self.input, id);
        self.last_control = id;
        reply
    }

    /// A node with caller-provided geometry, bypassing the layout engine
    /// (title bars, tabs, scroll thumbs).
    pub(crate) fn fixed_node(
        &mut self,
        id: ControlId,
        kind: ControlKind,
        parent: ControlId,
        rect: Rect<f32>,
        flags: ControlFlags,
    ) -> Interaction {
        {
            let rec = self.registry.create_or_get(id, kind, parent, self.frame);
            rec.flags = flags;
            rec.parent = parent;
            rec.pos = rect.pos();
            rec.size = rect.size();
        }
        if let Some(parent_rec) = self.registry.get_mut(parent) {
            parent_rec.children.push(id);
        }
        let reply = interact::process(&mut self.registry, &mut self.session, &self.input, id);
        self.last_control = id;
        reply
    }

    // Draw shorthands.

    pub(crate) fn draw_rect(&mut self, rect: Rect<f32>, color: Color) {
        self.draw.submit(DrawCommand::Rect { rect, color });
    }

    pub(crate) fn draw_outline(&mut self, rect: Rect<f32>, color: Color) {
        self.draw.submit(DrawCommand::RectOutline {
            rect,
            color,
            thickness: 1.0,
        });
    }

    pub(crate) fn draw_rounded(&mut self, rect: Rect<f32>, radius: f32, color: Color) {
        self.draw.submit(DrawCommand::RoundedRect {
            rect,
            radius,
            color,
        });
    }

    pub(crate) fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.draw.submit(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    pub(crate) fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, thickness: f32) {
        self.draw.submit(DrawCommand::Line {
            from,
            to,
            color,
            thickness,
        });
    }

    pub(crate) fn draw_triangle(&mut self, points: [Vec2; 3], color: Color) {
        self.draw.submit(DrawCommand::Triangle { points, color });
    }

    pub(crate) fn draw_text(&mut self, pos: Vec2, text: &str, color: Color) {
        self.draw.submit(DrawCommand::Text {
            pos,
            text: text.to_owned(),
            color,
        });
    }

    pub(crate) fn push_clip(&mut self, clip: ClipRect) {
        self.draw.submit(DrawCommand::PushClip(clip));
    }

    pub(crate) fn pop_clip(&mut self) {
        self.draw.submit(DrawCommand::PopClip);
    }

    /// Text position vertically centered in `rect` with a left inset.
    pub(crate) fn text_in(&self, rect: Rect<f32>, inset: f32) -> Vec2 {
        Vec2::new(
            rect.x + inset,
            rect.y + (rect.height - self.metrics.line_height()) / 2.0,
        )
    }
}
