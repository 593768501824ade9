//! The docking subsystem: drop-zone detection while dragging, slot
//! geometry, tabbed membership, and the dock/undock transitions.
//!
//! Dock state lives in two places that must stay consistent: a member
//! records its host and side, and the host's per-side [`DockDatum`] lists
//! its members in tab order. [`dock`] and [`undock`] are the only writers
//! of that relation.

pub mod tabs;
pub mod types;
pub mod zones;

use glint_core::geometry::Rect;
use glint_core::math::Vec2;
use tracing::{debug, error, warn};

use crate::control::{ControlFlags, ControlRecord};
use crate::id::ControlId;
use crate::interact::Session;
use crate::registry::ControlRegistry;

use types::{DockPreview, DockSide, PendingReorder};

/// Content insets a host loses to its occupied dock slots, as (left/top,
/// right/bottom) vectors.
pub(crate) fn host_insets(rec: &ControlRecord) -> (Vec2, Vec2) {
    let mut lead = Vec2::ZERO;
    let mut trail = Vec2::ZERO;
    if let Some(anchors) = rec.anchors.as_deref() {
        for (side, datum) in anchors.iter() {
            if datum.is_empty() {
                continue;
            }
            match side {
                DockSide::Top => lead.y += datum.size.y,
                DockSide::Bottom => trail.y += datum.size.y,
                DockSide::Left => lead.x += datum.size.x,
                DockSide::Right => trail.x += datum.size.x,
            }
        }
    }
    (lead, trail)
}

/// Title-band height of a host, recovered from its content offset.
fn title_band(rec: &ControlRecord) -> f32 {
    let (lead, _) = host_insets(rec);
    (rec.child_offset.y - rec.padding.y - lead.y).max(0.0)
}

/// Slot geometry a side of `host` would occupy for a given preferred size.
/// Works whether or not the side currently holds members.
pub(crate) fn projected_slot(
    registry: &ControlRegistry,
    host: ControlId,
    side: DockSide,
    preferred: Vec2,
) -> Option<Rect<f32>> {
    let rec = registry.get(host)?;
    let anchors = rec.anchors.as_deref();
    let inset_of = |s: DockSide| {
        anchors
            .and_then(|a| a.get(s))
            .filter(|d| !d.is_empty())
            .map(|d| d.size.y)
            .unwrap_or(0.0)
    };
    let (top_inset, bottom_inset) = match side {
        DockSide::Left | DockSide::Right => (inset_of(DockSide::Top), inset_of(DockSide::Bottom)),
        _ => (0.0, 0.0),
    };
    Some(zones::side_rect(
        rec.bounds(),
        side,
        preferred,
        title_band(rec),
        top_inset,
        bottom_inset,
    ))
}

/// Current slot geometry for an occupied side of a host.
pub fn slot_rect_for(
    registry: &ControlRegistry,
    host: ControlId,
    side: DockSide,
) -> Option<Rect<f32>> {
    let datum_size = registry
        .get(host)?
        .anchors
        .as_deref()
        .and_then(|a| a.get(side))
        .filter(|d| !d.is_empty())
        .map(|d| d.size)?;
    projected_slot(registry, host, side, datum_size)
}

/// Probe drop zones for a dragged dockable control and latch the first
/// candidate hit for the rest of the gesture. The preview size comes from
/// the side's first-seen preferred size when one is on record, otherwise
/// from the dragged control itself.
pub(crate) fn observe_drag(
    registry: &ControlRegistry,
    session: &mut Session,
    target: ControlId,
    pointer: Vec2,
) {
    if session.dock_candidate.is_some() {
        return;
    }
    let Some(dragged) = registry.get(target) else {
        return;
    };
    if !dragged.flags.contains(ControlFlags::DOCKABLE) {
        return;
    }
    let dragged_size = dragged.size;

    let mut hit = None;
    for rec in registry.iter() {
        if rec.id == target
            || !rec.flags.contains(ControlFlags::DOCK_CAPABLE)
            || registry.in_subtree(target, rec.id)
        {
            continue;
        }
        if let Some(side) = zones::detect(rec.bounds(), pointer) {
            hit = Some((rec.id, side));
            break;
        }
    }
    let Some((host, side)) = hit else {
        return;
    };

    let preferred = registry
        .get(host)
        .and_then(|h| h.anchors.as_deref())
        .and_then(|a| a.get(side))
        .and_then(|d| d.raw_size)
        .unwrap_or(dragged_size);
    if let Some(rect) = projected_slot(registry, host, side, preferred) {
        debug!(%target, %host, ?side, "dock candidate latched");
        session.dock_candidate = Some(DockPreview { host, side, rect });
    }
}

/// Drive a drag gesture on a control that is currently docked.
///
/// The control stays pinned to its slot; the gesture either hovers the tab
/// band (recording a deferred reorder) or leaves the slot entirely, which
/// undocks the control and reseats the drag under the pointer.
pub(crate) fn drag_docked(
    registry: &mut ControlRegistry,
    session: &mut Session,
    target: ControlId,
    pointer: Vec2,
) {
    let Some(rec) = registry.get(target) else {
        return;
    };
    let host = rec.dock_host;
    let Some(side) = rec.dock_side else {
        return;
    };
    let Some(slot) = slot_rect_for(registry, host, side) else {
        // The host slot vanished out from under the gesture.
        undock(registry, session, target);
        return;
    };

    let band = Rect::new(slot.x, slot.y, slot.width, tabs::TAB_BAR_HEIGHT);
    if band.contains(pointer) {
        let Some(datum) = registry
            .get(host)
            .and_then(|h| h.anchors.as_deref())
            .and_then(|a| a.get(side))
        else {
            return;
        };
        let Some(from) = datum.index_of(target) else {
            return;
        };
        let Some(to) = tabs::index_at(datum, pointer.x - slot.x) else {
            return;
        };
        // Latest hover wins; back over the own tab cancels the intent.
        session.pending_reorder =
            (from != to).then_some(PendingReorder { host, side, from, to });
    } else if !slot.contains(pointer) {
        undock(registry, session, target);
        session.pending_reorder = None;
        if let Some(rec) = registry.get_mut(target) {
            let pos = pointer - Vec2::new(rec.size.x / 2.0, tabs::TAB_BAR_HEIGHT / 2.0);
            rec.pos = pos;
            session.drag_start_pos = pos;
            session.drag_start_mouse = pointer;
        }
    }
}

/// Dock `control` onto `side` of `host` at the committed slot geometry.
///
/// The newly docked member becomes the shown tab; its resize mask is saved
/// and narrowed to the slot's free edge. Focus moves to the host only when
/// the docked control (or something in its subtree) held it.
pub fn dock(
    registry: &mut ControlRegistry,
    session: &mut Session,
    control: ControlId,
    host: ControlId,
    side: DockSide,
    rect: Rect<f32>,
) {
    session.dock_candidate = None;
    if control == host || registry.in_subtree(control, host) {
        warn!(%control, %host, "refusing to dock a control into its own subtree");
        return;
    }
    if !registry.contains(host) {
        warn!(%control, %host, "dock host does not exist");
        return;
    }
    let held_focus = registry.in_subtree(control, session.focused);
    let floating_size;
    {
        let Some(rec) = registry.get_mut(control) else {
            warn!(%control, "dock target does not exist");
            return;
        };
        if rec.is_docked() {
            warn!(%control, host = %rec.dock_host, "control is already docked");
            return;
        }
        floating_size = rec.size;
        rec.saved_resize_mask = rec.resize_mask;
        rec.resize_mask = side.resize_mask();
        rec.dock_host = host;
        rec.dock_side = Some(side);
        rec.pos = rect.pos();
        rec.size = rect.size();
    }
    if let Some(host_rec) = registry.get_mut(host) {
        let anchors = host_rec.anchors.get_or_insert_with(Box::default);
        let datum = anchors.ensure(side);
        if datum.raw_size.is_none() {
            datum.raw_size = Some(floating_size);
        }
        datum.members.push(control);
        datum.shown = datum.members.len() - 1;
        datum.size = rect.size();
        tabs::recompute(datum, rect.width);
    }
    if held_focus {
        session.focused = host;
    }
    debug!(%control, %host, ?side, "docked");
}

/// Remove `control` from its host slot and restore its floating behavior.
///
/// Tolerates a half-broken relation: a member missing from its host's list
/// is logged and the control-side state is cleared anyway. Focus moves to
/// the undocked control.
pub fn undock(registry: &mut ControlRegistry, session: &mut Session, control: ControlId) {
    let Some(rec) = registry.get(control) else {
        return;
    };
    let host = rec.dock_host;
    let Some(side) = rec.dock_side else {
        return;
    };
    let saved_mask = rec.saved_resize_mask;

    let mut restored_size = None;
    if let Some(datum) = registry
        .get_mut(host)
        .and_then(|h| h.anchors.as_deref_mut())
        .and_then(|a| a.get_mut(side))
    {
        match datum.index_of(control) {
            Some(index) => {
                datum.members.remove(index);
                datum.clamp_shown();
            }
            None => error!(%control, %host, "undock: control missing from its host's member list"),
        }
        restored_size = datum.raw_size;
        let width = datum.size.x;
        tabs::recompute(datum, width);
    }

    if let Some(rec) = registry.get_mut(control) {
        rec.dock_host = ControlId::NONE;
        rec.dock_side = None;
        rec.resize_mask = saved_mask;
        if let Some(size) = restored_size {
            rec.size = size;
        }
    }
    session.focused = control;
    debug!(%control, %host, ?side, "undocked");
}

/// Commit a deferred tab reorder. A no-op when the host has vanished or
/// the membership changed since the reorder was latched.
pub(crate) fn apply_reorder(registry: &mut ControlRegistry, task: PendingReorder) {
    let Some(datum) = registry
        .get_mut(task.host)
        .and_then(|h| h.anchors.as_deref_mut())
        .and_then(|a| a.get_mut(task.side))
    else {
        return;
    };
    tabs::swap(datum, task.from, task.to);
}

/// A docked member was resized on its free edge: the slot follows, and
/// siblings pick up the new geometry on their next pin.
pub(crate) fn propagate_member_resize(registry: &mut ControlRegistry, id: ControlId) {
    let Some((host, side, size)) = registry
        .get(id)
        .and_then(|r| Some((r.dock_host, r.dock_side?, r.size)))
    else {
        return;
    };
    if let Some(datum) = registry
        .get_mut(host)
        .and_then(|h| h.anchors.as_deref_mut())
        .and_then(|a| a.get_mut(side))
    {
        datum.size = size;
        tabs::recompute(datum, size.x);
    }
}

/// A dock host was resized: every occupied slot re-derives its geometry
/// from the new host bounds and its members are snapped to it.
pub(crate) fn propagate_host_resize(registry: &mut ControlRegistry, host: ControlId) {
    for side in DockSide::PROBE_ORDER {
        let Some(slot) = slot_rect_for(registry, host, side) else {
            continue;
        };
        let members = registry
            .get(host)
            .and_then(|h| h.anchors.as_deref())
            .and_then(|a| a.get(side))
            .map(|d| d.members.clone())
            .unwrap_or_default();
        if let Some(datum) = registry
            .get_mut(host)
            .and_then(|h| h.anchors.as_deref_mut())
            .and_then(|a| a.get_mut(side))
        {
            datum.size = slot.size();
            tabs::recompute(datum, slot.width);
        }
        for member in members {
            if let Some(rec) = registry.get_mut(member) {
                rec.pos = slot.pos();
                rec.size = slot.size();
            }
        }
    }
}

/// Pin a docked control to its slot geometry for this frame.
///
/// Returns whether the control is the shown tab, or `None` when the dock
/// relation is broken (host or membership gone) and the caller should
/// undock.
pub(crate) fn pin_docked(registry: &mut ControlRegistry, id: ControlId) -> Option<bool> {
    let rec = registry.get(id)?;
    let host = rec.dock_host;
    let side = rec.dock_side?;
    let slot = slot_rect_for(registry, host, side)?;
    let shown = {
        let datum = registry
            .get(host)
            .and_then(|h| h.anchors.as_deref())
            .and_then(|a| a.get(side))?;
        let index = datum.index_of(id)?;
        datum.shown == index
    };
    let rec = registry.get_mut(id)?;
    rec.pos = slot.pos();
    rec.size = slot.size();
    Some(shown)
}

/// Per-member tab rectangles for an occupied slot, in member order.
pub fn tab_rects(
    registry: &ControlRegistry,
    host: ControlId,
    side: DockSide,
) -> Vec<(ControlId, Rect<f32>)> {
    let Some(slot) = slot_rect_for(registry, host, side) else {
        return Vec::new();
    };
    let Some(datum) = registry
        .get(host)
        .and_then(|h| h.anchors.as_deref())
        .and_then(|a| a.get(side))
    else {
        return Vec::new();
    };
    datum
        .members
        .iter()
        .zip(&datum.tabs)
        .map(|(member, tab)| {
            (
                *member,
                Rect::new(slot.x + tab.offset, slot.y, tab.width, tabs::TAB_BAR_HEIGHT),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::ControlKind;

    fn host_and_floater(registry: &mut ControlRegistry) -> (ControlId, ControlId) {
        let host = ControlId::new("host", ControlKind::Window, "");
        let floater = ControlId::new("tool", ControlKind::Window, "");
        {
            let rec = registry.create_or_get(host, ControlKind::Window, ControlId::NONE, 1);
            rec.flags |= ControlFlags::DOCK_CAPABLE | ControlFlags::FOCUSABLE;
            rec.pos = Vec2::new(0.0, 0.0);
            rec.size = Vec2::new(400.0, 300.0);
            rec.child_offset = Vec2::new(0.0, 22.0);
        }
        {
            let rec = registry.create_or_get(floater, ControlKind::Window, ControlId::NONE, 1);
            rec.flags |=
                ControlFlags::DOCKABLE | ControlFlags::DRAGGABLE | ControlFlags::FOCUSABLE;
            rec.pos = Vec2::new(500.0, 50.0);
            rec.size = Vec2::new(200.0, 120.0);
            rec.resize_mask = crate::control::EdgeMask::all();
        }
        (host, floater)
    }

    #[test]
    fn dock_and_undock_round_trip() {
        let mut registry = ControlRegistry::new();
        let mut session = Session::new();
        let (host, floater) = host_and_floater(&mut registry);
        session.focused = floater;

        let rect = projected_slot(&registry, host, DockSide::Top, Vec2::new(200.0, 120.0))
            .unwrap();
        dock(&mut registry, &mut session, floater, host, DockSide::Top, rect);

        let rec = registry.get(floater).unwrap();
        assert_eq!(rec.dock_host, host);
        assert_eq!(rec.dock_side, Some(DockSide::Top));
        assert_eq!(rec.resize_mask, DockSide::Top.resize_mask());
        // Top slots span the host width.
        assert_eq!(rec.size, Vec2::new(400.0, 120.0));
        assert_eq!(session.focused(), host);

        undock(&mut registry, &mut session, floater);
        let rec = registry.get(floater).unwrap();
        assert!(!rec.is_docked());
        assert_eq!(rec.resize_mask, crate::control::EdgeMask::all());
        assert_eq!(session.focused(), floater);
        let datum = registry
            .get(host)
            .and_then(|h| h.anchors.as_deref())
            .and_then(|a| a.get(DockSide::Top))
            .unwrap();
        assert!(datum.is_empty());
    }

    #[test]
    fn dock_leaves_focus_alone_when_the_member_did_not_hold_it() {
        let mut registry = ControlRegistry::new();
        let mut session = Session::new();
        let (host, floater) = host_and_floater(&mut registry);
        let other = ControlId::new("editor", ControlKind::Window, "");
        registry
            .create_or_get(other, ControlKind::Window, ControlId::NONE, 1)
            .flags |= ControlFlags::FOCUSABLE;
        session.focused = other;

        let rect = projected_slot(&registry, host, DockSide::Top, Vec2::new(200.0, 120.0))
            .unwrap();
        dock(&mut registry, &mut session, floater, host, DockSide::Top, rect);

        assert!(registry.get(floater).unwrap().is_docked());
        assert_eq!(session.focused(), other);
    }

    #[test]
    fn host_insets_reflect_occupied_sides() {
        let mut registry = ControlRegistry::new();
        let mut session = Session::new();
        let (host, floater) = host_and_floater(&mut registry);
        let rect = projected_slot(&registry, host, DockSide::Left, Vec2::new(90.0, 100.0))
            .unwrap();
        dock(&mut registry, &mut session, floater, host, DockSide::Left, rect);

        let (lead, trail) = host_insets(registry.get(host).unwrap());
        assert_eq!(lead, Vec2::new(90.0, 0.0));
        assert_eq!(trail, Vec2::ZERO);
    }

    #[test]
    fn reorder_noops_when_host_vanished() {
        let mut registry = ControlRegistry::new();
        let ghost = ControlId::new("gone", ControlKind::Window, "");
        apply_reorder(
            &mut registry,
            PendingReorder {
                host: ghost,
                side: DockSide::Top,
                from: 0,
                to: 1,
            },
        );
        assert!(!registry.contains(ghost));
    }

    #[test]
    fn candidate_latches_once_per_gesture() {
        let mut registry = ControlRegistry::new();
        let mut session = Session::new();
        let (host, floater) = host_and_floater(&mut registry);

        // Pointer inside the host's top drop box.
        let probe = Vec2::new(200.0, zones::DROP_BOX_MARGIN + 1.0);
        observe_drag(&registry, &mut session, floater, probe);
        let first = session.dock_preview().copied().unwrap();
        assert_eq!(first.host, host);
        assert_eq!(first.side, DockSide::Top);

        // Moving into another box does not re-latch within the gesture.
        observe_drag(&registry, &mut session, floater, Vec2::new(200.0, 280.0));
        assert_eq!(session.dock_preview().copied().unwrap(), first);
    }
}
