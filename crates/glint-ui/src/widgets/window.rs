//! Windows: floating, resizable, dockable top-level panels.
//!
//! `begin_window`/`end_window` bracket a window's content. A window is
//! draggable by its title bar (a drag-proxy child), resizable from its
//! border band, and both a dock host and a dock member. A docked window is
//! pinned to its slot and represented in the slot's tab band by a
//! title-bar proxy control.

use glint_core::geometry::Rect;
use glint_core::math::Vec2;
use tracing::{error, warn};

use crate::control::{ControlData, ControlFlags, ControlKind, EdgeMask, WindowData};
use crate::docking::{self, tabs};
use crate::id::ControlId;
use crate::layout::LayoutParams;
use crate::Context;

/// Height of the window title bar and of dock tab bands.
pub const TITLE_BAR_HEIGHT: f32 = tabs::TAB_BAR_HEIGHT;

const WINDOW_PADDING: Vec2 = Vec2::new(8.0, 8.0);
const DEFAULT_SIZE: Vec2 = Vec2::new(260.0, 220.0);
const MIN_SIZE: Vec2 = Vec2::new(120.0, 80.0);
const SCROLL_BAR_WIDTH: f32 = 10.0;
const WHEEL_LINE: f32 = 20.0;

impl Context {
    /// Open a window. Returns whether its content is visible this frame
    /// (a docked window behind another tab is not). [`Context::end_window`]
    /// must be called either way.
    pub fn begin_window(&mut self, title: &str) -> bool {
        let id = ControlId::new(title, ControlKind::Window, "");
        let parent = self.session.top();
        let window_count = self
            .registry
            .iter()
            .filter(|rec| rec.kind == ControlKind::Window)
            .count();
        {
            let rec = self
                .registry
                .create_or_get(id, ControlKind::Window, parent, self.frame);
            rec.flags = ControlFlags::FOCUSABLE
                | ControlFlags::DOCK_CAPABLE
                | ControlFlags::DOCKABLE
                | ControlFlags::OUTSIDE_PARENT;
            if rec.is_uninitialized() {
                rec.resize_mask = EdgeMask::all();
            }
            rec.min_size = MIN_SIZE;
            if !matches!(rec.data, ControlData::Window(_)) {
                rec.data = ControlData::Window(WindowData::default());
            }
        }

        // A docked window pins to its slot; a broken relation undocks.
        let docked = self.registry.get(id).is_some_and(|rec| rec.is_docked());
        let mut shown_tab = true;
        if docked {
            match docking::pin_docked(&mut self.registry, id) {
                Some(shown) => shown_tab = shown,
                None => {
                    warn!(window = %id, "dock host vanished, undocking");
                    docking::undock(&mut self.registry, &mut self.session, id);
                }
            }
        }

        let cascade = 40.0 + 32.0 * window_count as f32;
        let params = LayoutParams {
            size: DEFAULT_SIZE,
            min_size: MIN_SIZE,
            padding: WINDOW_PADDING,
            content_offset: Vec2::new(0.0, TITLE_BAR_HEIGHT),
            explicit_offset: Some(Vec2::new(cascade, cascade)),
            unconstrained: true,
            ..Default::default()
        };
        crate::layout::prepare(&mut self.registry, &mut self.session, id, &params);

        // Scroll shifts where auto-flowed children start.
        let scroll = self
            .registry
            .get(id)
            .and_then(|rec| rec.window().ok().map(|data| data.scroll))
            .unwrap_or(Vec2::ZERO);
        if let Some(rec) = self.registry.get_mut(id) {
            rec.flow_cursor -= scroll;
        }

        let visible = !docked || shown_tab;
        if visible {
            crate::interact::process(&mut self.registry, &mut self.session, &self.input, id);
        } else {
            // Hidden tabs share the shown tab's rectangle; only their tab
            // proxy may compete for the pointer.
            if self.session.hovered == id {
                self.session.hovered = ControlId::NONE;
            }
            if self.session.pressed == id {
                self.session.pressed = ControlId::NONE;
            }
        }
        self.session.stack.push(id);
        self.scope_stack.push(title.to_owned());
        self.last_control = id;
        let Some(rec) = self.registry.get(id) else {
            return visible;
        };
        let bounds = rec.bounds();
        let clip = rec.clip;
        let focused_subtree = self.registry.in_subtree(id, self.session.focused);

        if visible {
            self.push_clip(clip);
            self.draw_rect(bounds, self.theme.window_bg);
            let border = if focused_subtree {
                self.theme.accent
            } else {
                self.theme.window_border
            };
            self.draw_outline(bounds, border);
        }

        if docked {
            self.docked_tab(id, title, shown_tab);
        } else if visible {
            self.title_bar(id, title, bounds, focused_subtree);
            self.host_tab_bands(id);
            let mask = self
                .registry
                .get(id)
                .map(|rec| rec.resize_mask)
                .unwrap_or_default();
            if mask.contains(EdgeMask::RIGHT | EdgeMask::BOTTOM) {
                self.resize_grip(bounds);
            }
        }

        visible
    }

    /// Close the current window: scrollbar, status line, clip pop.
    pub fn end_window(&mut self) {
        let Some(&id) = self.session.stack.last() else {
            error!("end_window without a matching begin_window");
            debug_assert!(false, "end_window without a matching begin_window");
            return;
        };
        if self.registry.get(id).map(|rec| rec.kind) != Some(ControlKind::Window) {
            error!(control = %id, "end_window while a non-window control is open");
            debug_assert!(false, "end_window while a non-window control is open");
            return;
        }

        let visible = self.window_visible(id);
        if visible {
            self.window_scrollbar(id);
            self.status_line(id);
            self.pop_clip();
        }
        self.session.stack.pop();
        self.scope_stack.pop();
    }

    fn window_visible(&self, id: ControlId) -> bool {
        let Some(rec) = self.registry.get(id) else {
            return false;
        };
        if !rec.is_docked() {
            return true;
        }
        let Some(side) = rec.dock_side else {
            return true;
        };
        self.registry
            .get(rec.dock_host)
            .and_then(|host| host.anchors.as_deref())
            .and_then(|anchors| anchors.get(side))
            .and_then(|datum| datum.index_of(id).map(|index| datum.shown == index))
            .unwrap_or(true)
    }

    fn title_bar(&mut self, window: ControlId, title: &str, bounds: Rect<f32>, focused: bool) {
        let bar_id = ControlId::new(title, ControlKind::TitleBar, "");
        let bar = Rect::new(bounds.x, bounds.y, bounds.width, TITLE_BAR_HEIGHT);
        self.fixed_node(
            bar_id,
            ControlKind::TitleBar,
            window,
            bar,
            ControlFlags::DRAG_PROXY | ControlFlags::NO_CONTENT_ACCUM,
        );
        let fill = if focused {
            self.theme.title_bg_focused
        } else {
            self.theme.title_bg
        };
        self.draw_rect(bar, fill);
        let pos = self.text_in(bar, 8.0);
        self.draw_text(pos, title, self.theme.title_text);
    }

    /// The tab standing in for this docked window in its host's tab band.
    fn docked_tab(&mut self, window: ControlId, title: &str, shown: bool) {
        let Some((host, side)) = self
            .registry
            .get(window)
            .and_then(|rec| rec.dock_side.map(|side| (rec.dock_host, side)))
        else {
            return;
        };
        let Some((_, tab_rect)) = docking::tab_rects(&self.registry, host, side)
            .into_iter()
            .find(|(member, _)| *member == window)
        else {
            return;
        };

        let proxy_id = ControlId::new(title, ControlKind::TitleBarProxy, "");
        let reply = self.fixed_node(
            proxy_id,
            ControlKind::TitleBarProxy,
            window,
            tab_rect,
            ControlFlags::DRAG_PROXY
                | ControlFlags::NO_CONTENT_ACCUM
                | ControlFlags::OUTSIDE_PARENT,
        );
        if reply.clicked {
            if let Some(datum) = self
                .registry
                .get_mut(host)
                .and_then(|rec| rec.anchors.as_deref_mut())
                .and_then(|anchors| anchors.get_mut(side))
            {
                if let Some(index) = datum.index_of(window) {
                    datum.shown = index;
                }
            }
        }

        let fill = if shown {
            self.theme.tab_active
        } else {
            self.theme.tab_bg
        };
        self.draw_rect(tab_rect, fill);
        let pos = self.text_in(tab_rect, 6.0);
        self.draw_text(pos, title, self.theme.title_text);
    }

    /// Backgrounds for the tab bands of every occupied dock slot this
    /// window hosts. Member tabs draw themselves.
    fn host_tab_bands(&mut self, host: ControlId) {
        let mut bands = Vec::new();
        if let Some(anchors) = self.registry.get(host).and_then(|rec| rec.anchors.as_deref()) {
            for (side, datum) in anchors.iter() {
                if datum.is_empty() {
                    continue;
                }
                if let Some(slot) = docking::slot_rect_for(&self.registry, host, side) {
                    bands.push(Rect::new(slot.x, slot.y, slot.width, tabs::TAB_BAR_HEIGHT));
                }
            }
        }
        for band in bands {
            self.draw_rect(band, self.theme.tab_bg);
        }
    }

    /// Diagonal grip marking the bottom-right resize corner.
    fn resize_grip(&mut self, bounds: Rect<f32>) {
        let corner = Vec2::new(bounds.right() - 2.0, bounds.bottom() - 2.0);
        self.draw_triangle(
            [
                Vec2::new(corner.x - 9.0, corner.y),
                Vec2::new(corner.x, corner.y - 9.0),
                corner,
            ],
            self.theme.widget_bg,
        );
    }

    /// Vertical scrollbar for overflowing content, plus wheel handling.
    fn window_scrollbar(&mut self, id: ControlId) {
        let Some(rec) = self.registry.get(id) else {
            return;
        };
        let bounds = rec.bounds();
        let child_offset = rec.child_offset;
        let content_h = rec.content_size.y;
        let view_h = (bounds.height - child_offset.y - WINDOW_PADDING.y).max(0.0);
        let overflow = content_h - view_h;
        if overflow <= 0.0 {
            if let Some(rec) = self.registry.get_mut(id) {
                if let Ok(data) = rec.window_mut() {
                    data.scroll = Vec2::ZERO;
                }
            }
            return;
        }

        let mut scroll = rec.window().ok().map(|data| data.scroll).unwrap_or_default();
        let hovered_here = self.registry.in_subtree(id, self.session.hovered);
        if hovered_here && self.input.wheel != 0.0 {
            scroll.y = (scroll.y - self.input.wheel * WHEEL_LINE).clamp(0.0, overflow);
        }

        let track = Rect::new(
            bounds.right() - SCROLL_BAR_WIDTH - 2.0,
            bounds.y + child_offset.y,
            SCROLL_BAR_WIDTH,
            view_h,
        );
        let track_id = ControlId::new("scroll_track", ControlKind::ScrollTrack, self.scope());
        self.fixed_node(
            track_id,
            ControlKind::ScrollTrack,
            id,
            track,
            ControlFlags::NO_CONTENT_ACCUM,
        );

        let thumb_h = (view_h * view_h / content_h).clamp(24.0, view_h);
        let travel = (track.height - thumb_h).max(0.0);
        let ratio = (scroll.y / overflow).clamp(0.0, 1.0);
        let thumb = Rect::new(track.x, track.y + ratio * travel, SCROLL_BAR_WIDTH, thumb_h);
        let thumb_id = ControlId::new("scroll_thumb", ControlKind::ScrollThumb, self.scope());
        {
            let rec =
                self.registry
                    .create_or_get(thumb_id, ControlKind::ScrollThumb, id, self.frame);
            rec.flags = ControlFlags::DRAGGABLE | ControlFlags::NO_CONTENT_ACCUM;
            rec.parent = id;
            rec.pos = thumb.pos();
            rec.size = thumb.size();
            rec.drag_bounds = Some(Rect::new(track.x, track.y, 0.0, travel));
            if !matches!(rec.data, ControlData::ScrollThumb { .. }) {
                rec.data = ControlData::ScrollThumb { ratio };
            }
        }
        let reply =
            crate::interact::process(&mut self.registry, &mut self.session, &self.input, thumb_id);
        if reply.dragging {
            if let Some(thumb_rec) = self.registry.get(thumb_id) {
                if travel > 0.0 {
                    let dragged_ratio = ((thumb_rec.pos.y - track.y) / travel).clamp(0.0, 1.0);
                    scroll.y = dragged_ratio * overflow;
                }
            }
        }

        if let Some(thumb_rec) = self.registry.get_mut(thumb_id) {
            if let Ok(stored) = thumb_rec.scroll_thumb_mut() {
                *stored = (scroll.y / overflow).clamp(0.0, 1.0);
            }
        }
        if let Some(rec) = self.registry.get_mut(id) {
            if let Ok(data) = rec.window_mut() {
                data.scroll = scroll;
            }
        }

        self.draw_rect(track, self.theme.widget_press);
        let hovered = self.session.hovered == thumb_id || reply.dragging;
        let fill = if hovered {
            self.theme.widget_hover
        } else {
            self.theme.widget_bg
        };
        let ratio = (scroll.y / overflow).clamp(0.0, 1.0);
        let thumb = Rect::new(track.x, track.y + ratio * travel, SCROLL_BAR_WIDTH, thumb_h);
        self.draw_rect(thumb, fill);
    }

    /// One-line status band at the bottom of the window (input overflow
    /// and similar recoverable conditions).
    fn status_line(&mut self, id: ControlId) {
        let Some(rec) = self.registry.get(id) else {
            return;
        };
        let Some(message) = rec.window().ok().and_then(|data| data.status_message.clone()) else {
            return;
        };
        let bounds = rec.bounds();
        let band = Rect::new(
            bounds.x + 1.0,
            bounds.bottom() - self.metrics.line_height() - 4.0,
            bounds.width - 2.0,
            self.metrics.line_height() + 3.0,
        );
        self.draw_rect(band, self.theme.title_bg);
        let pos = self.text_in(band, 6.0);
        self.draw_text(pos, &message, self.theme.text_dim);
    }
}
