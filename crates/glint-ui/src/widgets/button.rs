//! Push buttons.

use glint_core::math::Vec2;

use crate::control::{ControlFlags, ControlKind};
use crate::layout::LayoutParams;
use crate::Context;

const BUTTON_HEIGHT: f32 = 24.0;
const LABEL_INSET: f32 = 8.0;

impl Context {
    /// A push button. Returns `true` on the frame it is clicked.
    pub fn button(&mut self, label: &str) -> bool {
        let id = self.widget_id(label, ControlKind::Button);
        let width = self.metrics.text_width(label) + LABEL_INSET * 2.0;
        let params = LayoutParams {
            size: Vec2::new(width, BUTTON_HEIGHT),
            min_size: Vec2::new(BUTTON_HEIGHT, BUTTON_HEIGHT),
            ..Default::default()
        };
        let reply = self.node(id, ControlKind::Button, ControlFlags::empty(), &params);

        let Some(rec) = self.registry.get(id) else {
            return false;
        };
        let bounds = rec.bounds();
        let clip = rec.clip;

        let fill = if self.session.pressed == id {
            self.theme.widget_press
        } else if reply.hovered {
            self.theme.widget_hover
        } else {
            self.theme.widget_bg
        };
        self.push_clip(clip);
        self.draw_rounded(bounds, 3.0, fill);
        self.draw_outline(bounds, self.theme.window_border);
        let text_x = bounds.x + (bounds.width - self.metrics.text_width(label)) / 2.0;
        let pos = Vec2::new(
            text_x,
            bounds.y + (bounds.height - self.metrics.line_height()) / 2.0,
        );
        self.draw_text(pos, label, self.theme.text);
        self.pop_clip();

        reply.clicked
    }
}
