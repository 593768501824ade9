//! Scrollable single-selection lists.
//!
//! Rows are hit-tested directly against the pointer rather than registered
//! as individual controls, so long lists do not inflate the registry.

use glint_core::geometry::Rect;
use glint_core::math::Vec2;
use tracing::warn;

use crate::control::{ControlData, ControlFlags, ControlKind};
use crate::layout::LayoutParams;
use crate::Context;

const ROW_HEIGHT: f32 = 20.0;
const DEFAULT_WIDTH: f32 = 200.0;

impl Context {
    /// A list of selectable rows. Returns the selected index, if any.
    pub fn list_view(&mut self, label: &str, items: &[&str], height: f32) -> Option<usize> {
        let id = self.widget_id(label, ControlKind::ListView);
        let params = LayoutParams {
            size: Vec2::new(DEFAULT_WIDTH, height),
            min_size: Vec2::new(ROW_HEIGHT, ROW_HEIGHT),
            ..Default::default()
        };
        let reply = self.node_with(
            id,
            ControlKind::ListView,
            ControlFlags::empty(),
            &params,
            |rec| {
                if !matches!(rec.data, ControlData::List { .. }) {
                    rec.data = ControlData::List {
                        selected: None,
                        scroll: 0.0,
                    };
                }
            },
        );

        let Some(rec) = self.registry.get(id) else {
            return None;
        };
        let bounds = rec.bounds();
        let clip = rec.clip;
        let pointer = self.input.mouse_pos;

        let content_h = items.len() as f32 * ROW_HEIGHT;
        let overflow = (content_h - bounds.height).max(0.0);

        let (mut selected, mut scroll) = match rec.data {
            ControlData::List { selected, scroll } => (selected, scroll),
            _ => (None, 0.0),
        };
        if reply.hovered && self.input.wheel != 0.0 {
            scroll = (scroll - self.input.wheel * ROW_HEIGHT).clamp(0.0, overflow);
        }
        if reply.clicked {
            let row = ((pointer.y - bounds.y + scroll) / ROW_HEIGHT).floor();
            if row >= 0.0 && (row as usize) < items.len() {
                selected = Some(row as usize);
            }
        }
        if selected.is_some_and(|index| index >= items.len()) {
            selected = None;
        }

        if let Some(rec) = self.registry.get_mut(id) {
            match rec.list_mut() {
                Ok((stored_selected, stored_scroll)) => {
                    *stored_selected = selected;
                    *stored_scroll = scroll;
                }
                Err(err) => warn!(%err, "list payload mismatch"),
            }
        }

        self.push_clip(clip);
        self.draw_rect(bounds, self.theme.widget_press);
        self.draw_outline(bounds, self.theme.window_border);
        let first = (scroll / ROW_HEIGHT).floor() as usize;
        let visible = (bounds.height / ROW_HEIGHT).ceil() as usize + 1;
        for (index, item) in items
            .iter()
            .enumerate()
            .skip(first)
            .take(visible)
        {
            let row = Rect::new(
                bounds.x,
                bounds.y + index as f32 * ROW_HEIGHT - scroll,
                bounds.width,
                ROW_HEIGHT,
            );
            if selected == Some(index) {
                self.draw_rect(row, self.theme.accent);
            } else if reply.hovered && row.contains(pointer) {
                self.draw_rect(row, self.theme.widget_hover);
            }
            let pos = self.text_in(row, 6.0);
            self.draw_text(pos, item, self.theme.text);
        }
        self.pop_clip();

        selected
    }
}
