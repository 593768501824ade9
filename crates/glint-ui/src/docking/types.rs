//! Shared types for the docking system.

use glint_core::geometry::Rect;
use glint_core::math::Vec2;

use crate::control::EdgeMask;
use crate::id::ControlId;

/// One of the four docking sides a dock-capable host exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum DockSide {
    Top = 0,
    Bottom = 1,
    Left = 2,
    Right = 3,
}

impl DockSide {
    /// Drop-zone probe order. Tie-breaks between overlapping boxes are
    /// resolved by this order.
    pub const PROBE_ORDER: [DockSide; 4] = [
        DockSide::Top,
        DockSide::Bottom,
        DockSide::Left,
        DockSide::Right,
    ];

    /// Whether this side spans the host horizontally (top/bottom slots).
    pub fn is_horizontal(self) -> bool {
        matches!(self, DockSide::Top | DockSide::Bottom)
    }

    /// Resize permission for controls docked on this side: left/right
    /// docks resize horizontally only, top/bottom vertically only.
    pub fn resize_mask(self) -> EdgeMask {
        match self {
            DockSide::Top => EdgeMask::BOTTOM,
            DockSide::Bottom => EdgeMask::TOP,
            DockSide::Left => EdgeMask::RIGHT,
            DockSide::Right => EdgeMask::LEFT,
        }
    }
}

/// Computed tab geometry for one docked member, relative to the slot
/// origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TabSlot {
    /// Horizontal offset of the tab from the slot origin.
    pub offset: f32,
    /// Tab width.
    pub width: f32,
}

/// Per-side dock data owned by a dock-host control.
///
/// Invariant: every identity in `members` has this datum's owner as its
/// `dock_host`; `dock()`/`undock()` maintain the relation transactionally.
#[derive(Debug, Clone, Default)]
pub struct DockDatum {
    /// Docked members in tab order.
    pub members: Vec<ControlId>,
    /// Computed tab geometry, parallel to `members`.
    pub tabs: Vec<TabSlot>,
    /// Index of the currently shown tab.
    pub shown: usize,
    /// Current slot size (the side's extent).
    pub size: Vec2,
    /// First-seen preferred size for this side, recorded from the first
    /// committed drop and reused for later previews.
    pub raw_size: Option<Vec2>,
}

impl DockDatum {
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Index of a member, if present.
    pub fn index_of(&self, id: ControlId) -> Option<usize> {
        self.members.iter().position(|m| *m == id)
    }

    /// Clamp the shown index after membership changes.
    pub fn clamp_shown(&mut self) {
        if self.members.is_empty() {
            self.shown = 0;
        } else if self.shown >= self.members.len() {
            self.shown = self.members.len() - 1;
        }
    }
}

/// The four per-side dock datums of one host.
#[derive(Debug, Clone, Default)]
pub struct DockAnchors {
    sides: [Option<DockDatum>; 4],
}

impl DockAnchors {
    pub fn get(&self, side: DockSide) -> Option<&DockDatum> {
        self.sides[side as usize].as_ref()
    }

    pub fn get_mut(&mut self, side: DockSide) -> Option<&mut DockDatum> {
        self.sides[side as usize].as_mut()
    }

    /// Datum for a side, created on first use.
    pub fn ensure(&mut self, side: DockSide) -> &mut DockDatum {
        self.sides[side as usize].get_or_insert_with(DockDatum::default)
    }

    /// Occupied sides with their datums.
    pub fn iter(&self) -> impl Iterator<Item = (DockSide, &DockDatum)> {
        DockSide::PROBE_ORDER
            .iter()
            .filter_map(|side| self.get(*side).map(|datum| (*side, datum)))
    }

    /// Whether any side currently holds members.
    pub fn any_members(&self) -> bool {
        self.iter().any(|(_, datum)| !datum.is_empty())
    }
}

/// Drop preview latched for the current drag gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DockPreview {
    pub host: ControlId,
    pub side: DockSide,
    /// Screen rect the preview is rendered at (also the committed slot
    /// geometry).
    pub rect: Rect<f32>,
}

/// Deferred tab-reorder commit, consumed once at the next button-up.
///
/// Must no-op if the host no longer exists by the time it is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingReorder {
    pub host: ControlId,
    pub side: DockSide,
    pub from: usize,
    pub to: usize,
}
