//! The layout engine: computes each control's screen position, size, and
//! clip rectangles for the current frame.
//!
//! Two mutually exclusive position modes: auto-flow (stacked/same-line,
//! recomputed every frame) and explicit (applied only when the control is
//! new or a reset is forced, so dragging and resizing are not overwritten
//! every frame). Docked controls are pinned to their slot geometry here.

use glint_core::math::Vec2;

use crate::clip::ClipRect;
use crate::control::ControlFlags;
use crate::docking;
use crate::id::ControlId;
use crate::interact::Session;
use crate::registry::ControlRegistry;

/// Vertical gap between auto-flowed siblings.
pub const ITEM_SPACING: f32 = 4.0;

/// Horizontal gap inserted by same-line placement.
pub const SAME_LINE_INTERVAL: f32 = 4.0;

/// Per-call layout parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Desired initial size.
    pub size: Vec2,
    /// Minimum size, enforced on creation and against resizing.
    pub min_size: Vec2,
    /// Inner padding applied to the content area.
    pub padding: Vec2,
    /// Extra content-origin offset below the padding (title bars).
    pub content_offset: Vec2,
    /// Explicit placement offset from the parent origin. Selects explicit
    /// position mode.
    pub explicit_offset: Option<Vec2>,
    /// Parent override consulted instead of the stack top on creation.
    pub parent_override: Option<ControlId>,
    /// Re-run creation-time parent/size/position binding this frame.
    pub force_reset: bool,
    /// Opt out of the parent's accumulated content size.
    pub exclude_from_content: bool,
    /// Skip clamping the natural width to the parent's available width.
    pub unconstrained: bool,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            size: Vec2::ZERO,
            min_size: Vec2::ZERO,
            padding: Vec2::ZERO,
            content_offset: Vec2::ZERO,
            explicit_offset: None,
            parent_override: None,
            force_reset: false,
            exclude_from_content: false,
            unconstrained: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ParentSnapshot {
    id: ControlId,
    pos: Vec2,
    size: Vec2,
    padding: Vec2,
    child_offset: Vec2,
    flow_cursor: Vec2,
    last_child_pos: Vec2,
    last_child_size: Vec2,
    clip_children: ClipRect,
}

fn snapshot(registry: &ControlRegistry, id: ControlId) -> Option<ParentSnapshot> {
    registry.get(id).map(|rec| ParentSnapshot {
        id,
        pos: rec.pos,
        size: rec.size,
        padding: rec.padding,
        child_offset: rec.child_offset,
        flow_cursor: rec.flow_cursor,
        last_child_pos: rec.last_child_pos,
        last_child_size: rec.last_child_size,
        clip_children: rec.clip_children,
    })
}

/// Prepare one control's geometry for the current frame.
///
/// Consumes the session's one-shot overrides (next position, next size,
/// no-auto-position, same-line). A no-op on the sentinel identity.
pub(crate) fn prepare(
    registry: &mut ControlRegistry,
    session: &mut Session,
    id: ControlId,
    params: &LayoutParams,
) {
    if id.is_none() {
        return;
    }

    // One-shot overrides are consumed whether or not they apply.
    let next_pos = session.next_pos.take();
    let next_size = session.next_size.take();
    let no_auto = std::mem::take(&mut session.no_auto_pos);
    let same_line = std::mem::take(&mut session.same_line);
    let stack_top = session.top();

    let Some(rec) = registry.get(id) else {
        return;
    };
    let is_new = rec.is_uninitialized() || params.force_reset;
    let flags = rec.flags;
    let drag_bounds = rec.drag_bounds;
    let dock_host = rec.dock_host;
    let dock_side = rec.dock_side;
    let docked = rec.is_docked();
    let prior_pos = rec.pos;
    let prior_size = rec.size;
    let host_lead_trail = docking::host_insets(rec);

    // 1. Parent resolution.
    let parent_id = if is_new {
        params.parent_override.unwrap_or(stack_top)
    } else {
        rec.parent
    };
    let parent = snapshot(registry, parent_id);

    // 2. Size resolution.
    let mut size = prior_size;
    if is_new {
        size = match next_size {
            Some(requested) => requested,
            None => {
                let mut natural = params.size;
                if !params.unconstrained {
                    if let Some(p) = &parent {
                        let available = p.size.x - p.padding.x * 2.0;
                        if available > 0.0 {
                            natural.x = natural.x.min(available);
                        }
                    }
                }
                natural
            }
        };
    }
    size = size.max(params.min_size);

    // 3. Position resolution.
    let explicit_mode = no_auto || next_pos.is_some() || params.explicit_offset.is_some();
    let parent_pos = parent.map(|p| p.pos).unwrap_or(Vec2::ZERO);
    let mut pos = prior_pos;
    if explicit_mode {
        if is_new {
            let offset = next_pos
                .or(params.explicit_offset)
                .unwrap_or(Vec2::ZERO);
            pos = parent_pos + offset;
        }
    } else if let Some(p) = &parent {
        pos = if same_line {
            Vec2::new(
                p.last_child_pos.x + p.last_child_size.x + SAME_LINE_INTERVAL,
                p.last_child_pos.y,
            )
        } else {
            p.flow_cursor
        };
    } else if is_new {
        pos = Vec2::ZERO;
    }

    // Docked controls are pinned to their slot geometry.
    if docked {
        if let Some(side) = dock_side {
            if let Some(slot) = docking::slot_rect_for(registry, dock_host, side) {
                pos = slot.pos();
                size = slot.size();
            }
        }
    }

    // 4. Drag-constraint clamp, unconditional so the constraint holds even
    // while another interaction is in progress.
    if flags.contains(ControlFlags::DRAGGABLE) {
        if let Some(bounds) = drag_bounds {
            pos = bounds.clamp_point(pos);
        }
    }

    // 5. Clip derivation. Docked children clip against the host's docked
    // variant, everything else against the parent's children variant.
    let inherited = if docked {
        registry
            .get(dock_host)
            .map(|host| host.clip_docked)
            .unwrap_or_else(ClipRect::infinite)
    } else {
        parent
            .map(|p| p.clip_children)
            .unwrap_or_else(ClipRect::infinite)
    };
    let clip = ClipRect::from_pos_size(pos, size).intersect(&inherited);
    let clip_docked = clip;
    let (lead, trail) = host_lead_trail;
    let content_origin = pos + params.padding + params.content_offset + lead;
    let content_size =
        (size - params.padding * 2.0 - params.content_offset - lead - trail).max(Vec2::ZERO);
    let clip_children = ClipRect::from_pos_size(content_origin, content_size).intersect(&clip);

    // 6. Write back and reset the child-flow cursor.
    {
        let Some(rec) = registry.get_mut(id) else {
            return;
        };
        rec.parent = parent_id;
        rec.pos = pos;
        rec.size = size;
        rec.min_size = params.min_size;
        rec.padding = params.padding;
        rec.child_offset = params.padding + params.content_offset + lead;
        rec.flow_cursor = content_origin;
        rec.clip = clip;
        rec.clip_docked = clip_docked;
        rec.clip_children = clip_children;
    }

    // Register with the parent and grow its accumulators.
    if let Some(p) = parent {
        if let Some(parent_rec) = registry.get_mut(p.id) {
            parent_rec.children.push(id);
            if !explicit_mode && !params.exclude_from_content {
                let origin = p.pos + p.child_offset;
                let extent = (pos + size) - origin;
                parent_rec.content_size = parent_rec.content_size.max(extent);
                parent_rec.flow_cursor = Vec2::new(
                    origin.x,
                    parent_rec.flow_cursor.y.max(pos.y + size.y + ITEM_SPACING),
                );
                parent_rec.last_child_pos = pos;
                parent_rec.last_child_size = size;
            }
        }
    }
}
