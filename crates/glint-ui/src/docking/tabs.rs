//! Tab geometry for dock slots: cumulative offsets, hit testing, and the
//! deferred reorder swap.

use super::types::{DockDatum, TabSlot};

/// Height of the tab band at the top of a dock slot.
pub const TAB_BAR_HEIGHT: f32 = 22.0;

/// Default width of one tab when the slot has room.
pub const TAB_WIDTH: f32 = 96.0;

/// Recompute tab offsets/widths for a slot from cumulative widths.
///
/// Tabs share the slot width evenly once the default width no longer
/// fits.
pub fn recompute(datum: &mut DockDatum, slot_width: f32) {
    let count = datum.members.len();
    datum.tabs.clear();
    if count == 0 {
        return;
    }
    let width = TAB_WIDTH.min(slot_width / count as f32).max(0.0);
    let mut offset = 0.0;
    for _ in 0..count {
        datum.tabs.push(TabSlot { offset, width });
        offset += width;
    }
}

/// Tab index under a horizontal offset from the slot origin, if any.
pub fn index_at(datum: &DockDatum, local_x: f32) -> Option<usize> {
    datum
        .tabs
        .iter()
        .position(|tab| local_x >= tab.offset && local_x < tab.offset + tab.width)
}

/// Swap two tabs and follow the dragged tab with the shown index.
///
/// Out-of-range indices are ignored (the membership may have changed
/// between latch and commit).
pub fn swap(datum: &mut DockDatum, from: usize, to: usize) {
    if from == to || from >= datum.members.len() || to >= datum.members.len() {
        return;
    }
    datum.members.swap(from, to);
    if datum.shown == from {
        datum.shown = to;
    } else if datum.shown == to {
        datum.shown = from;
    }
}
