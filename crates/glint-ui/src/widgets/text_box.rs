//! Single-line text boxes with focus-gated editing.
//!
//! The string itself belongs to the caller; the registry retains the caret,
//! the selection anchor, and any pre-commit candidate character. Input past
//! `max_len` is refused with a warning and a status message on the owning
//! window.

use glint_core::input::KeyCode;
use glint_core::math::Vec2;
use tracing::warn;

use crate::control::{ControlData, ControlFlags, ControlKind, TextBoxData};
use crate::id::ControlId;
use crate::layout::LayoutParams;
use crate::Context;

const BOX_SIZE: Vec2 = Vec2::new(180.0, 22.0);
const TEXT_INSET: f32 = 5.0;

fn byte_index(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(index, _)| index)
        .unwrap_or(text.len())
}

fn remove_range(text: &mut String, from: usize, to: usize) {
    let (from, to) = (from.min(to), from.max(to));
    let start = byte_index(text, from);
    let end = byte_index(text, to);
    text.replace_range(start..end, "");
}

impl Context {
    /// A single-line text box editing `text`, refusing input past
    /// `max_len` characters. Returns `true` when the text changed.
    pub fn text_box(&mut self, label: &str, text: &mut String, max_len: usize) -> bool {
        let id = self.widget_id(label, ControlKind::TextBox);
        let params = LayoutParams {
            size: BOX_SIZE,
            min_size: Vec2::new(40.0, BOX_SIZE.y),
            ..Default::default()
        };
        let reply = self.node_with(
            id,
            ControlKind::TextBox,
            ControlFlags::FOCUSABLE,
            &params,
            |rec| {
                if !matches!(rec.data, ControlData::TextBox(_)) {
                    rec.data = ControlData::TextBox(TextBoxData::default());
                }
            },
        );

        let Some(rec) = self.registry.get(id) else {
            return false;
        };
        let bounds = rec.bounds();
        let clip = rec.clip;
        let mut state = match &rec.data {
            ControlData::TextBox(data) => data.clone(),
            _ => TextBoxData::default(),
        };
        let focused = self.session.focused == id;
        let pointer = self.input.mouse_pos;
        let text_origin = bounds.x + TEXT_INSET;

        let count = text.chars().count();
        state.caret = state.caret.min(count);
        if state.selection.is_some_and(|anchor| anchor > count) {
            state.selection = None;
        }

        // Pointer placement: press sets caret and anchors a selection,
        // sweeping while held extends it.
        if reply.pressed {
            state.caret = self.metrics.index_at_offset(text, pointer.x - text_origin);
            state.selection = Some(state.caret);
        } else if focused && self.session.pressed == id && self.input.mouse_down {
            state.caret = self.metrics.index_at_offset(text, pointer.x - text_origin);
        }
        if reply.double_clicked {
            state.selection = Some(0);
            state.caret = count;
        }

        let mut changed = false;
        if focused {
            let selection = state
                .selection
                .filter(|anchor| *anchor != state.caret);

            if let Some(c) = self.input.committed_char.filter(|c| !c.is_control()) {
                if let Some(anchor) = selection {
                    remove_range(text, anchor, state.caret);
                    state.caret = anchor.min(state.caret);
                    state.selection = None;
                    changed = true;
                }
                if text.chars().count() < max_len {
                    let at = byte_index(text, state.caret);
                    text.insert(at, c);
                    state.caret += 1;
                    state.candidate = None;
                    state.selection = None;
                    changed = true;
                } else {
                    warn!(control = %id, max_len, "text box input refused, length limit reached");
                    self.report_status(id, &format!("Input limit of {max_len} characters reached"));
                }
            } else if let Some(c) = self.input.candidate_char {
                state.candidate = Some(c);
            }

            match self.input.key {
                Some(KeyCode::Backspace) => {
                    if let Some(anchor) = selection {
                        remove_range(text, anchor, state.caret);
                        state.caret = anchor.min(state.caret);
                        state.selection = None;
                        changed = true;
                    } else if state.caret > 0 {
                        remove_range(text, state.caret - 1, state.caret);
                        state.caret -= 1;
                        changed = true;
                    }
                }
                Some(KeyCode::Delete) => {
                    if let Some(anchor) = selection {
                        remove_range(text, anchor, state.caret);
                        state.caret = anchor.min(state.caret);
                        state.selection = None;
                        changed = true;
                    } else if state.caret < text.chars().count() {
                        remove_range(text, state.caret, state.caret + 1);
                        changed = true;
                    }
                }
                Some(KeyCode::Left) => {
                    state.caret = state.caret.saturating_sub(1);
                    state.selection = None;
                }
                Some(KeyCode::Right) => {
                    state.caret = (state.caret + 1).min(text.chars().count());
                    state.selection = None;
                }
                Some(KeyCode::Home) => {
                    state.caret = 0;
                    state.selection = None;
                }
                Some(KeyCode::End) => {
                    state.caret = text.chars().count();
                    state.selection = None;
                }
                _ => {}
            }
        } else {
            state.candidate = None;
            state.selection = None;
        }

        if let Some(rec) = self.registry.get_mut(id) {
            rec.data = ControlData::TextBox(state.clone());
        }

        // Drawing.
        self.push_clip(clip);
        self.draw_rect(bounds, self.theme.widget_press);
        let border = if focused {
            self.theme.accent
        } else {
            self.theme.window_border
        };
        self.draw_outline(bounds, border);

        if let Some(anchor) = state.selection.filter(|anchor| *anchor != state.caret) {
            let (from, to) = (anchor.min(state.caret), anchor.max(state.caret));
            let x0 = text_origin + self.metrics.prefix_width(text, from);
            let x1 = text_origin + self.metrics.prefix_width(text, to);
            let sel = glint_core::geometry::Rect::new(x0, bounds.y + 3.0, x1 - x0, bounds.height - 6.0);
            self.draw_rect(sel, self.theme.widget_hover);
        }

        let text_pos = self.text_in(bounds, TEXT_INSET);
        self.draw_text(text_pos, text, self.theme.text);
        if let Some(c) = state.candidate.filter(|_| focused) {
            let x = text_origin + self.metrics.prefix_width(text, state.caret);
            self.draw_text(Vec2::new(x, text_pos.y), &c.to_string(), self.theme.text_dim);
        }
        if focused {
            let x = text_origin + self.metrics.prefix_width(text, state.caret);
            self.draw_line(
                Vec2::new(x, bounds.y + 3.0),
                Vec2::new(x, bounds.bottom() - 3.0),
                self.theme.text,
                1.0,
            );
        }
        self.pop_clip();

        changed
    }

    /// Surface a recoverable condition on the control's owning window.
    fn report_status(&mut self, control: ControlId, message: &str) {
        let window = self.registry.owning_window(control);
        if let Some(rec) = self.registry.get_mut(window) {
            if let Ok(data) = rec.window_mut() {
                data.status_message = Some(message.to_owned());
            }
        }
    }
}
