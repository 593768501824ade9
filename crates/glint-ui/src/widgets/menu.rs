//! Menu bars, items, and dropdown menus.
//!
//! A menu bar spans the window below the title bar; items flow
//! horizontally inside it. `begin_menu`/`end_menu` open a dropdown whose
//! entries render outside the window's clip.

use glint_core::geometry::Rect;
use glint_core::math::Vec2;
use tracing::error;

use crate::clip::ClipRect;
use crate::control::{ControlData, ControlFlags, ControlKind};
use crate::id::ControlId;
use crate::layout::LayoutParams;
use crate::widgets::window::TITLE_BAR_HEIGHT;
use crate::Context;

/// Height of the menu bar band.
pub const MENU_BAR_HEIGHT: f32 = 20.0;

const ITEM_PADDING: f32 = 8.0;
const DROPDOWN_WIDTH: f32 = 160.0;
const ENTRY_HEIGHT: f32 = 20.0;

impl Context {
    /// Open the menu bar of the current window. Returns `false` (and opens
    /// nothing) when no window is open.
    pub fn begin_menu_bar(&mut self) -> bool {
        let window = self.session.top();
        let Some(rec) = self.registry.get(window) else {
            error!("begin_menu_bar outside a window");
            return false;
        };
        if rec.kind != ControlKind::Window {
            error!(control = %window, "begin_menu_bar outside a window");
            return false;
        }
        let bounds = rec.bounds();
        let window_clip = rec.clip;

        let bar = Rect::new(
            bounds.x,
            bounds.y + TITLE_BAR_HEIGHT,
            bounds.width,
            MENU_BAR_HEIGHT,
        );
        let id = ControlId::new("menu_bar", ControlKind::MenuBar, self.scope());
        self.fixed_node(
            id,
            ControlKind::MenuBar,
            window,
            bar,
            ControlFlags::NO_CONTENT_ACCUM,
        );
        if let Some(bar_rec) = self.registry.get_mut(id) {
            bar_rec.flow_cursor = bar.pos() + Vec2::new(4.0, 2.0);
            bar_rec.child_offset = Vec2::new(4.0, 2.0);
            bar_rec.clip = ClipRect::from_pos_size(bar.pos(), bar.size()).intersect(&window_clip);
            bar_rec.clip_children = bar_rec.clip;
        }
        // Window content starts below the bar.
        if let Some(window_rec) = self.registry.get_mut(window) {
            window_rec.flow_cursor.y = window_rec.flow_cursor.y.max(bar.bottom() + 4.0);
        }

        self.draw_rect(bar, self.theme.title_bg);
        self.session.stack.push(id);
        true
    }

    pub fn end_menu_bar(&mut self) {
        match self.session.stack.last() {
            Some(&top) if self.registry.get(top).map(|r| r.kind) == Some(ControlKind::MenuBar) => {
                self.session.stack.pop();
            }
            _ => {
                error!("end_menu_bar without a matching begin_menu_bar");
                debug_assert!(false, "end_menu_bar without a matching begin_menu_bar");
            }
        }
    }

    /// A directly clickable item in the menu bar.
    pub fn menu_item(&mut self, label: &str) -> bool {
        self.flow_along_bar();
        let id = self.widget_id(label, ControlKind::MenuItem);
        let params = LayoutParams {
            size: Vec2::new(
                self.metrics.text_width(label) + ITEM_PADDING * 2.0,
                MENU_BAR_HEIGHT - 4.0,
            ),
            ..Default::default()
        };
        let reply = self.node(id, ControlKind::MenuItem, ControlFlags::empty(), &params);
        self.draw_bar_item(id, label, reply.hovered, false);
        reply.clicked
    }

    /// A menu header that opens a dropdown on click. Entries go between
    /// this and [`Context::end_menu`], which must be called only when this
    /// returned `true`.
    pub fn begin_menu(&mut self, label: &str) -> bool {
        self.flow_along_bar();
        let id = self.widget_id(label, ControlKind::MenuItem);
        let params = LayoutParams {
            size: Vec2::new(
                self.metrics.text_width(label) + ITEM_PADDING * 2.0,
                MENU_BAR_HEIGHT - 4.0,
            ),
            ..Default::default()
        };
        let reply = self.node_with(id, ControlKind::MenuItem, ControlFlags::empty(), &params, |rec| {
            if !matches!(rec.data, ControlData::Menu { .. }) {
                rec.data = ControlData::Menu { open: false };
            }
        });

        let Some(rec) = self.registry.get(id) else {
            return false;
        };
        let header = rec.bounds();
        let mut open = matches!(rec.data, ControlData::Menu { open: true });
        let entry_count = rec.prev_children.len().max(1);
        let popup = Rect::new(
            header.x,
            header.bottom() + 2.0,
            DROPDOWN_WIDTH,
            entry_count as f32 * ENTRY_HEIGHT + 8.0,
        );

        if reply.clicked {
            open = !open;
        } else if open
            && self.input.pressed_this_tick
            && !header.contains(self.input.down_pos)
            && !popup.contains(self.input.down_pos)
        {
            // A click elsewhere closes the dropdown.
            open = false;
        }
        if let Some(rec) = self.registry.get_mut(id) {
            rec.data = ControlData::Menu { open };
        }

        self.draw_bar_item(id, label, reply.hovered, open);
        {
            // Dropdown indicator in the header's right padding.
            let cx = header.right() - 6.0;
            let cy = header.y + header.height / 2.0;
            self.draw_triangle(
                [
                    Vec2::new(cx - 3.0, cy - 2.0),
                    Vec2::new(cx + 3.0, cy - 2.0),
                    Vec2::new(cx, cy + 2.5),
                ],
                self.theme.text_dim,
            );
        }
        if open {
            self.draw_rect(popup, self.theme.window_bg);
            self.draw_outline(popup, self.theme.window_border);
            if let Some(rec) = self.registry.get_mut(id) {
                rec.flow_cursor = popup.pos() + Vec2::new(4.0, 4.0);
                rec.clip_children = ClipRect::from_pos_size(popup.pos(), popup.size());
            }
            self.session.stack.push(id);
        }
        open
    }

    pub fn end_menu(&mut self) {
        match self.session.stack.last() {
            Some(&top) if self.registry.get(top).map(|r| r.kind) == Some(ControlKind::MenuItem) => {
                self.session.stack.pop();
            }
            _ => {
                error!("end_menu without a matching begin_menu");
                debug_assert!(false, "end_menu without a matching begin_menu");
            }
        }
    }

    /// A clickable entry inside an open dropdown. Closes the menu on
    /// click.
    pub fn menu_entry(&mut self, label: &str) -> bool {
        let menu = self.session.top();
        let id = self.widget_id(label, ControlKind::MenuItem);
        let params = LayoutParams {
            size: Vec2::new(DROPDOWN_WIDTH - 8.0, ENTRY_HEIGHT),
            ..Default::default()
        };
        let reply = self.node(
            id,
            ControlKind::MenuItem,
            ControlFlags::OUTSIDE_PARENT,
            &params,
        );

        let Some(rec) = self.registry.get(id) else {
            return false;
        };
        let bounds = rec.bounds();
        if reply.hovered {
            self.draw_rect(bounds, self.theme.widget_hover);
        }
        let pos = self.text_in(bounds, 6.0);
        self.draw_text(pos, label, self.theme.text);

        if reply.clicked {
            if let Some(menu_rec) = self.registry.get_mut(menu) {
                if matches!(menu_rec.data, ControlData::Menu { .. }) {
                    menu_rec.data = ControlData::Menu { open: false };
                }
            }
        }
        reply.clicked
    }

    /// Items after the first flow horizontally along the bar.
    fn flow_along_bar(&mut self) {
        let bar = self.session.top();
        if self
            .registry
            .get(bar)
            .is_some_and(|rec| rec.kind == ControlKind::MenuBar && !rec.children.is_empty())
        {
            self.session.same_line = true;
        }
    }

    fn draw_bar_item(&mut self, id: ControlId, label: &str, hovered: bool, active: bool) {
        let Some(rec) = self.registry.get(id) else {
            return;
        };
        let bounds = rec.bounds();
        if active {
            self.draw_rect(bounds, self.theme.tab_active);
        } else if hovered {
            self.draw_rect(bounds, self.theme.widget_hover);
        }
        let pos = self.text_in(bounds, ITEM_PADDING);
        self.draw_text(pos, label, self.theme.text);
    }
}
