//! Check-box style toggles with registry-retained state.

use glint_core::geometry::Rect;
use glint_core::math::Vec2;
use tracing::warn;

use crate::control::{ControlData, ControlFlags, ControlKind};
use crate::layout::LayoutParams;
use crate::Context;

const BOX_SIZE: f32 = 16.0;
const ROW_HEIGHT: f32 = 20.0;
const GAP: f32 = 6.0;

impl Context {
    /// A toggle that flips on click. The on/off state lives in the
    /// registry; the current state is returned.
    pub fn toggle(&mut self, label: &str) -> bool {
        let id = self.widget_id(label, ControlKind::Toggle);
        let width = BOX_SIZE + GAP + self.metrics.text_width(label);
        let params = LayoutParams {
            size: Vec2::new(width, ROW_HEIGHT),
            ..Default::default()
        };
        let reply = self.node_with(
            id,
            ControlKind::Toggle,
            ControlFlags::empty(),
            &params,
            |rec| {
                if !matches!(rec.data, ControlData::Toggle { .. }) {
                    rec.data = ControlData::Toggle { on: false };
                }
            },
        );

        let mut on = false;
        if let Some(rec) = self.registry.get_mut(id) {
            match rec.toggle_mut() {
                Ok(state) => {
                    if reply.clicked {
                        *state = !*state;
                    }
                    on = *state;
                }
                Err(err) => warn!(%err, "toggle payload mismatch"),
            }
        }

        let Some(rec) = self.registry.get(id) else {
            return on;
        };
        let bounds = rec.bounds();
        let clip = rec.clip;
        let box_rect = Rect::new(
            bounds.x,
            bounds.y + (bounds.height - BOX_SIZE) / 2.0,
            BOX_SIZE,
            BOX_SIZE,
        );
        self.push_clip(clip);
        let fill = if reply.hovered {
            self.theme.widget_hover
        } else {
            self.theme.widget_bg
        };
        self.draw_rect(box_rect, fill);
        self.draw_outline(box_rect, self.theme.window_border);
        if on {
            // Check mark: two strokes meeting near the bottom third.
            let low = Vec2::new(box_rect.x + 6.5, box_rect.y + BOX_SIZE - 4.5);
            self.draw_line(
                Vec2::new(box_rect.x + 3.5, box_rect.y + BOX_SIZE - 7.5),
                low,
                self.theme.accent,
                2.0,
            );
            self.draw_line(
                low,
                Vec2::new(box_rect.x + BOX_SIZE - 3.5, box_rect.y + 4.0),
                self.theme.accent,
                2.0,
            );
        }
        let pos = Vec2::new(
            bounds.x + BOX_SIZE + GAP,
            bounds.y + (bounds.height - self.metrics.line_height()) / 2.0,
        );
        self.draw_text(pos, label, self.theme.text);
        self.pop_clip();

        on
    }
}
