//! The pointer interaction state machine.
//!
//! Raw pointer/keyboard samples plus per-control geometry become the five
//! cross-frame singleton slots (hovered, pressed, focused, dragging,
//! resizing) and the one-frame clicked pulse. At most one control occupies
//! each slot; all transitions are defensive no-ops on missing or sentinel
//! identities.

use glint_core::geometry::Rect;
use glint_core::input::InputState;
use glint_core::math::Vec2;

use crate::control::{ControlFlags, ControlKind, ControlRecord, CursorHint, EdgeMask};
use crate::docking::{self, types::DockPreview, types::PendingReorder};
use crate::id::ControlId;
use crate::registry::ControlRegistry;
use crate::tooltip::TooltipState;

/// Thickness of the resize border band around a resizable control.
pub const BORDER_BAND: f32 = 6.0;

/// Per-control interaction result for one widget call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interaction {
    pub hovered: bool,
    pub pressed: bool,
    /// One-frame pulse on button-up inside the control.
    pub clicked: bool,
    pub double_clicked: bool,
    pub dragging: bool,
    pub resizing: bool,
}

/// The per-frame/cross-frame interaction session.
///
/// One explicit value owned by the core instance; there are no ambient
/// globals. Hovered/pressed/focused/dragging/resizing are the singleton
/// slots, `clicked` is a one-frame pulse, and `mouse_claimed` is the
/// first-claimed-wins flag ensuring only the topmost eligible control
/// consumes the pointer sample.
#[derive(Debug, Default)]
pub struct Session {
    /// Nesting of currently-open begin/end calls.
    pub(crate) stack: Vec<ControlId>,

    pub(crate) hovered: ControlId,
    pub(crate) pressed: ControlId,
    pub(crate) focused: ControlId,
    pub(crate) dragging: ControlId,
    pub(crate) resizing: ControlId,
    pub(crate) clicked: ControlId,
    pub(crate) mouse_claimed: bool,

    pub(crate) resize_edges: EdgeMask,
    pub(crate) cursor_hint: CursorHint,
    pub(crate) drag_start_mouse: Vec2,
    pub(crate) drag_start_pos: Vec2,
    pub(crate) drag_start_size: Vec2,

    /// Candidate dock side latched for the current drag gesture.
    pub(crate) dock_candidate: Option<DockPreview>,
    /// Deferred tab reorder, consumed at the next button-up.
    pub(crate) pending_reorder: Option<PendingReorder>,

    // One-shot layout overrides, consumed by the next prepare.
    pub(crate) next_pos: Option<Vec2>,
    pub(crate) next_size: Option<Vec2>,
    pub(crate) no_auto_pos: bool,
    pub(crate) same_line: bool,

    pub(crate) tooltip: TooltipState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Control currently on top of the begin/end stack.
    pub fn top(&self) -> ControlId {
        self.stack.last().copied().unwrap_or(ControlId::NONE)
    }

    pub fn hovered(&self) -> ControlId {
        self.hovered
    }

    pub fn pressed(&self) -> ControlId {
        self.pressed
    }

    pub fn focused(&self) -> ControlId {
        self.focused
    }

    pub fn dragging(&self) -> ControlId {
        self.dragging
    }

    pub fn resizing(&self) -> ControlId {
        self.resizing
    }

    /// One-frame clicked pulse.
    pub fn clicked(&self) -> ControlId {
        self.clicked
    }

    /// Cursor hint for the active (or hinted) resize border.
    pub fn cursor_hint(&self) -> CursorHint {
        self.cursor_hint
    }

    /// Drop preview latched for the current drag gesture, if any.
    pub fn dock_preview(&self) -> Option<&DockPreview> {
        self.dock_candidate.as_ref()
    }

    /// Set keyboard/interaction focus directly.
    pub fn set_focus(&mut self, id: ControlId) {
        self.focused = id;
    }
}

/// Promote the nearest focusable ancestor (inclusive) of `id` to Focused.
///
/// The single choke point through which focus changes on pointer input.
pub(crate) fn promote_focus(registry: &ControlRegistry, session: &mut Session, id: ControlId) {
    let target = registry.closest_focusable_ancestor(id);
    if target.is_some() {
        session.focused = target;
    }
}

/// The interaction area of a control: bounds inset by the control's
/// interaction delta and shrunk by any hosted dock slots.
pub(crate) fn interaction_rect(rec: &ControlRecord) -> Rect<f32> {
    let (lead, trail) = docking::host_insets(rec);
    let pos = rec.pos + rec.interact_inset + lead;
    let size = (rec.size - rec.interact_inset * 2.0 - lead - trail).max(Vec2::ZERO);
    Rect::from_pos_size(pos, size)
}

/// Which border-band edges of `bounds` the point lies on.
///
/// The band extends `BORDER_BAND` to either side of each edge; corner
/// combinations yield diagonal cursor hints.
pub(crate) fn border_band(bounds: Rect<f32>, point: Vec2) -> EdgeMask {
    let near = |value: f32, edge: f32| (value - edge).abs() <= BORDER_BAND;
    let within_x = point.x >= bounds.x - BORDER_BAND && point.x <= bounds.right() + BORDER_BAND;
    let within_y = point.y >= bounds.y - BORDER_BAND && point.y <= bounds.bottom() + BORDER_BAND;
    if !within_x || !within_y {
        return EdgeMask::empty();
    }
    let mut mask = EdgeMask::empty();
    if near(point.x, bounds.x) {
        mask |= EdgeMask::LEFT;
    }
    if near(point.x, bounds.right()) {
        mask |= EdgeMask::RIGHT;
    }
    if near(point.y, bounds.y) {
        mask |= EdgeMask::TOP;
    }
    if near(point.y, bounds.bottom()) {
        mask |= EdgeMask::BOTTOM;
    }
    mask
}

/// Whether a sibling child window rendered on top of `rec` claims the
/// pointer. Checked against the parent's previous-frame child list, since
/// later siblings of this frame are not built yet.
fn occluded_by_sibling_window(
    registry: &ControlRegistry,
    rec: &ControlRecord,
    pointer: Vec2,
) -> bool {
    let Some(parent) = registry.get(rec.parent) else {
        return false;
    };
    let Some(own_index) = parent.prev_children.iter().position(|c| *c == rec.id) else {
        return false;
    };
    parent.prev_children[own_index + 1..].iter().any(|sibling| {
        registry.get(*sibling).is_some_and(|s| {
            s.kind == ControlKind::Window && !s.is_docked() && s.bounds().contains(pointer)
        })
    })
}

/// Subtree test that follows a docked control up to its host, so docked
/// members and their controls behave as part of the host window.
fn in_widget_tree(registry: &ControlRegistry, root: ControlId, id: ControlId) -> bool {
    if root.is_none() || id.is_none() {
        return false;
    }
    let mut current = id;
    let mut remaining = registry.len();
    while current.is_some() && remaining > 0 {
        if current == root {
            return true;
        }
        let Some(rec) = registry.get(current) else {
            return false;
        };
        current = if rec.parent.is_some() {
            rec.parent
        } else {
            rec.dock_host
        };
        remaining -= 1;
    }
    false
}

/// Focused-subtree eligibility: a control outside the focused subtree may
/// interact only while the pointer is clear of the focused control's own
/// interaction and border areas.
fn eligible_for_interaction(
    registry: &ControlRegistry,
    session: &Session,
    id: ControlId,
    pointer: Vec2,
) -> bool {
    let focused = session.focused;
    if focused.is_none() || focused == id || in_widget_tree(registry, focused, id) {
        return true;
    }
    match registry.get(focused) {
        Some(f) => {
            let in_area = interaction_rect(f).contains(pointer);
            let in_border = !border_band(f.bounds(), pointer).is_empty();
            !in_area && !in_border
        }
        None => true,
    }
}

/// Drive the state machine for one control on one widget call.
pub(crate) fn process(
    registry: &mut ControlRegistry,
    session: &mut Session,
    input: &InputState,
    id: ControlId,
) -> Interaction {
    let mut reply = Interaction::default();
    if id.is_none() {
        return reply;
    }
    let Some(rec) = registry.get(id) else {
        return reply;
    };
    let flags = rec.flags;
    let bounds = rec.bounds();
    let resize_mask = rec.resize_mask;
    let pointer = input.mouse_pos;

    // Continue an in-flight resize gesture.
    if session.resizing == id && input.mouse_down {
        session.mouse_claimed = true;
        apply_resize(registry, session, id, pointer);
        reply.resizing = true;
        return reply;
    }

    // Continue an in-flight drag gesture.
    if session.dragging == id && input.mouse_down {
        session.mouse_claimed = true;
        let target = if flags.contains(ControlFlags::DRAG_PROXY) {
            rec.parent
        } else {
            id
        };
        let docked = registry.get(target).is_some_and(ControlRecord::is_docked);
        if docked {
            // Visually pinned to its slot; drag feeds tab reorder/undock.
            docking::drag_docked(registry, session, target, pointer);
        } else {
            apply_drag(registry, session, target, pointer);
            docking::observe_drag(registry, session, target, pointer);
        }
        reply.dragging = true;
        return reply;
    }

    // Area test: interaction area, parent containment, sibling occlusion.
    let area = interaction_rect(rec);
    let mut inside = area.contains(pointer);
    if inside && !flags.contains(ControlFlags::OUTSIDE_PARENT) {
        if let Some(parent) = registry.get(rec.parent) {
            inside &= interaction_rect(parent).contains(pointer);
        }
    }
    let band_inside = inside || !border_band(bounds, pointer).is_empty();
    if inside {
        inside &= !occluded_by_sibling_window(registry, rec, pointer);
    }

    let eligible = eligible_for_interaction(registry, session, id, pointer);

    // Hover, first-claimed-wins. A control may take the claim from an
    // ancestor, since parents are submitted before their children.
    let claimable = !session.mouse_claimed
        || session.hovered == id
        || in_widget_tree(registry, session.hovered, id);
    if eligible && inside && claimable {
        let suppressed = flags.contains(ControlFlags::FOCUS_CLICK) && session.focused != id;
        if !suppressed {
            session.hovered = id;
            session.mouse_claimed = true;
            reply.hovered = true;
        }
    } else if session.hovered == id {
        session.hovered = ControlId::NONE;
    }

    // Press, with the focus choke point and resize-before-drag precedence.
    if input.pressed_this_tick && eligible && band_inside {
        let gate_ok = !flags.contains(ControlFlags::DOUBLE_CLICK_FOCUS) || input.double_clicked;
        if gate_ok {
            session.pressed = id;
            session.mouse_claimed = true;
            reply.pressed = true;
            reply.double_clicked = input.double_clicked;
            promote_focus(registry, session, id);

            let down_band = border_band(bounds, input.down_pos);
            let now_band = border_band(bounds, pointer);
            let edges = down_band & now_band & resize_mask;
            if !edges.is_empty() && session.resizing.is_none() {
                session.resizing = id;
                session.resize_edges = edges;
                session.cursor_hint = edges.cursor_hint();
                session.drag_start_mouse = input.down_pos;
                session.drag_start_pos = bounds.pos();
                session.drag_start_size = bounds.size();
                reply.resizing = true;
            } else if flags.intersects(ControlFlags::DRAGGABLE | ControlFlags::DRAG_PROXY)
                && session.resizing.is_none()
                && inside
            {
                let target = if flags.contains(ControlFlags::DRAG_PROXY) {
                    rec.parent
                } else {
                    id
                };
                if let Some(target_rec) = registry.get(target) {
                    session.dragging = id;
                    session.drag_start_mouse = input.down_pos;
                    session.drag_start_pos = target_rec.pos;
                    session.drag_start_size = target_rec.size;
                    reply.dragging = true;
                }
            }
        }
    }

    // Release inside while pressed: one-frame clicked pulse.
    if input.released_this_tick && session.pressed == id {
        if eligible && inside {
            session.clicked = id;
            reply.clicked = true;
            promote_focus(registry, session, id);
        }
        session.pressed = ControlId::NONE;
    } else if session.pressed == id && (!inside || !eligible) && !input.released_this_tick {
        // Area/eligibility failure drops the press immediately.
        session.pressed = ControlId::NONE;
    }

    // Passive border hover hint for resizable controls.
    if session.resizing.is_none() && !resize_mask.is_empty() && session.hovered == id {
        let hint_edges = border_band(bounds, pointer) & resize_mask;
        session.cursor_hint = hint_edges.cursor_hint();
    }

    reply
}

/// Apply an in-flight resize from the cumulative pointer delta since the
/// gesture started, with axis lock for single-axis cursor hints. Sizes
/// clamp to the control minimum; position follows for left/top edges so
/// the opposite edge stays put.
fn apply_resize(
    registry: &mut ControlRegistry,
    session: &mut Session,
    id: ControlId,
    pointer: Vec2,
) {
    let mut delta = pointer - session.drag_start_mouse;
    match session.cursor_hint {
        CursorHint::Horizontal => delta.y = 0.0,
        CursorHint::Vertical => delta.x = 0.0,
        _ => {}
    }
    let edges = session.resize_edges;
    let start_pos = session.drag_start_pos;
    let start_size = session.drag_start_size;

    let (hosts_docks, min_size) = match registry.get(id) {
        Some(rec) => (
            rec.anchors.as_ref().is_some_and(|a| a.any_members()),
            rec.min_size,
        ),
        None => return,
    };

    let mut pos = start_pos;
    let mut size = start_size;
    if edges.contains(EdgeMask::RIGHT) {
        size.x = start_size.x + delta.x;
    }
    if edges.contains(EdgeMask::LEFT) {
        size.x = start_size.x - delta.x;
    }
    if edges.contains(EdgeMask::BOTTOM) {
        size.y = start_size.y + delta.y;
    }
    if edges.contains(EdgeMask::TOP) {
        size.y = start_size.y - delta.y;
    }
    size = size.max(min_size);
    if edges.contains(EdgeMask::LEFT) {
        pos.x = start_pos.x + (start_size.x - size.x);
    }
    if edges.contains(EdgeMask::TOP) {
        pos.y = start_pos.y + (start_size.y - size.y);
    }

    let docked = {
        let Some(rec) = registry.get_mut(id) else {
            return;
        };
        rec.pos = pos;
        rec.size = size;
        rec.is_docked()
    };

    if docked {
        docking::propagate_member_resize(registry, id);
    }
    if hosts_docks {
        docking::propagate_host_resize(registry, id);
    }
}

/// Apply an in-flight drag to `target` (the control itself, or the parent
/// for drag proxies), clamped into the drag-constraint rectangle.
fn apply_drag(
    registry: &mut ControlRegistry,
    session: &mut Session,
    target: ControlId,
    pointer: Vec2,
) {
    let Some(rec) = registry.get_mut(target) else {
        return;
    };
    let mut pos = session.drag_start_pos + (pointer - session.drag_start_mouse);
    if let Some(bounds) = rec.drag_bounds {
        pos = bounds.clamp_point(pos);
    }
    rec.pos = pos;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_band_edges() {
        let bounds = Rect::new(100.0, 100.0, 200.0, 100.0);
        assert_eq!(
            border_band(bounds, Vec2::new(100.0, 150.0)),
            EdgeMask::LEFT
        );
        assert_eq!(
            border_band(bounds, Vec2::new(300.0, 200.0)),
            EdgeMask::RIGHT | EdgeMask::BOTTOM
        );
        assert_eq!(border_band(bounds, Vec2::new(200.0, 150.0)), EdgeMask::empty());
        assert_eq!(
            border_band(bounds, Vec2::new(50.0, 150.0)),
            EdgeMask::empty()
        );
    }
}
