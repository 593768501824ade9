//! Static text labels. Labels never claim the pointer.

use glint_core::math::Vec2;

use crate::control::ControlKind;
use crate::layout::{self, LayoutParams};
use crate::Context;

impl Context {
    pub fn label(&mut self, text: &str) {
        let id = self.widget_id(text, ControlKind::Label);
        let parent = self.session.top();
        self.registry
            .create_or_get(id, ControlKind::Label, parent, self.frame);
        let params = LayoutParams {
            size: Vec2::new(self.metrics.text_width(text), self.metrics.line_height()),
            ..Default::default()
        };
        layout::prepare(&mut self.registry, &mut self.session, id, &params);
        self.last_control = id;

        let Some(rec) = self.registry.get(id) else {
            return;
        };
        let pos = rec.pos;
        let clip = rec.clip;
        self.push_clip(clip);
        self.draw_text(pos, text, self.theme.text);
        self.pop_clip();
    }
}
