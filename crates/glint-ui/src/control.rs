//! Per-control records: the flat state the registry keeps for every
//! identity, including geometry, layout bookkeeping, the kind-tagged
//! payload, and docking state.

use std::fmt;

use bitflags::bitflags;
use glint_core::geometry::Rect;
use glint_core::math::Vec2;

use crate::clip::ClipRect;
use crate::docking::types::{DockAnchors, DockSide};
use crate::id::ControlId;

/// What kind of control a record describes.
///
/// The discriminant participates in identity hashing, so reordering
/// variants changes every identity in a run. Append only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ControlKind {
    Window = 1,
    TitleBar,
    Button,
    Label,
    Toggle,
    Slider,
    SliderThumb,
    ScrollTrack,
    ScrollThumb,
    TextBox,
    MenuBar,
    MenuItem,
    ListView,
    /// Proxy control standing in for a docked window's title bar tab.
    TitleBarProxy,
    Tooltip,
}

impl ControlKind {
    /// Short name used in payload mismatch errors.
    pub fn name(self) -> &'static str {
        match self {
            Self::Window => "Window",
            Self::TitleBar => "TitleBar",
            Self::Button => "Button",
            Self::Label => "Label",
            Self::Toggle => "Toggle",
            Self::Slider => "Slider",
            Self::SliderThumb => "SliderThumb",
            Self::ScrollTrack => "ScrollTrack",
            Self::ScrollThumb => "ScrollThumb",
            Self::TextBox => "TextBox",
            Self::MenuBar => "MenuBar",
            Self::MenuItem => "MenuItem",
            Self::ListView => "ListView",
            Self::TitleBarProxy => "TitleBarProxy",
            Self::Tooltip => "Tooltip",
        }
    }
}

bitflags! {
    /// Behavior flags for a control.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ControlFlags: u16 {
        /// Pointer drags reposition the control.
        const DRAGGABLE = 1 << 0;
        /// Can hold keyboard/interaction focus.
        const FOCUSABLE = 1 << 1;
        /// Area test skips the parent containment requirement.
        const OUTSIDE_PARENT = 1 << 2;
        /// Focus (and therefore press) requires a double click.
        const DOUBLE_CLICK_FOCUS = 1 << 3;
        /// Hover is suppressed until the control is the settled focus.
        const FOCUS_CLICK = 1 << 4;
        /// Can host docked controls on its four sides.
        const DOCK_CAPABLE = 1 << 5;
        /// Can itself be docked into a dock-capable host.
        const DOCKABLE = 1 << 6;
        /// Drag input applies to the parent control instead (title bars).
        const DRAG_PROXY = 1 << 7;
        /// Opt out of the parent's accumulated content size.
        const NO_CONTENT_ACCUM = 1 << 8;
    }
}

bitflags! {
    /// A set of rectangle edges.
    ///
    /// Doubles as a resize permission mask and as the active border band
    /// under the pointer during resize detection.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct EdgeMask: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const TOP = 1 << 2;
        const BOTTOM = 1 << 3;
    }
}

impl EdgeMask {
    pub const HORIZONTAL: Self = Self::LEFT.union(Self::RIGHT);
    pub const VERTICAL: Self = Self::TOP.union(Self::BOTTOM);

    /// Cursor hint for this edge combination.
    pub fn cursor_hint(self) -> CursorHint {
        let h = self.intersects(Self::HORIZONTAL);
        let v = self.intersects(Self::VERTICAL);
        match (h, v) {
            (true, true) => {
                // Corners: NW/SE pair vs NE/SW pair.
                if self.contains(Self::LEFT | Self::TOP) || self.contains(Self::RIGHT | Self::BOTTOM)
                {
                    CursorHint::DiagonalNwSe
                } else {
                    CursorHint::DiagonalNeSw
                }
            }
            (true, false) => CursorHint::Horizontal,
            (false, true) => CursorHint::Vertical,
            (false, false) => CursorHint::None,
        }
    }
}

/// Pointer cursor hint derived from the active border band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    None,
    Horizontal,
    Vertical,
    DiagonalNwSe,
    DiagonalNeSw,
}

impl CursorHint {
    /// Whether the hint locks resizing to a single axis.
    pub fn single_axis(self) -> bool {
        matches!(self, Self::Horizontal | Self::Vertical)
    }
}

/// Error returned by kind-safe payload accessors on a kind mismatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadError {
    /// The offending control.
    pub id: ControlId,
    /// Payload the accessor expected.
    pub expected: &'static str,
    /// Payload the record actually holds.
    pub actual: &'static str,
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} holds a {} payload, accessor expected {}",
            self.id, self.actual, self.expected
        )
    }
}

impl std::error::Error for PayloadError {}

/// Per-window payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowData {
    /// Scroll offset of the content area.
    pub scroll: Vec2,
    /// One-line status message surfaced to the end user (input overflow
    /// and similar recoverable conditions).
    pub status_message: Option<String>,
}

/// Per-text-box payload. The text itself is owned by the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextBoxData {
    /// Caret position in characters.
    pub caret: usize,
    /// Selection anchor in characters, if a selection is active.
    pub selection: Option<usize>,
    /// Candidate (pre-commit) character awaiting IME commit.
    pub candidate: Option<char>,
}

/// Kind-tagged per-control payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ControlData {
    #[default]
    None,
    Window(WindowData),
    Toggle {
        on: bool,
    },
    Slider {
        /// Normalized thumb position in `0.0..=1.0`.
        ratio: f32,
    },
    ScrollThumb {
        /// Normalized thumb position in `0.0..=1.0`.
        ratio: f32,
    },
    TextBox(TextBoxData),
    Menu {
        open: bool,
    },
    List {
        selected: Option<usize>,
        scroll: f32,
    },
}

impl ControlData {
    fn name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Window(_) => "Window",
            Self::Toggle { .. } => "Toggle",
            Self::Slider { .. } => "Slider",
            Self::ScrollThumb { .. } => "ScrollThumb",
            Self::TextBox(_) => "TextBox",
            Self::Menu { .. } => "Menu",
            Self::List { .. } => "List",
        }
    }
}

/// Sentinel coordinate marking geometry that has never been laid out.
pub(crate) const UNINITIALIZED: f32 = f32::MAX;

/// Update-counter cap: past this a control counts as settled.
const SETTLED_UPDATES: u8 = 3;

/// One persistent control record, owned by the registry.
///
/// Created on first lookup and kept for the process lifetime (unless the
/// host opts into [`sweep_stale`](crate::Context::sweep_stale)). Per-frame
/// fields are reset lazily on the first touch of each frame; cross-frame
/// fields (position, size, docking, payload) persist.
#[derive(Debug, Clone)]
pub struct ControlRecord {
    pub id: ControlId,
    /// Parent identity; [`ControlId::NONE`] = root.
    pub parent: ControlId,
    pub kind: ControlKind,
    pub flags: ControlFlags,

    // Geometry.
    pub pos: Vec2,
    pub size: Vec2,
    pub min_size: Vec2,
    /// Which edges the control may be resized from.
    pub resize_mask: EdgeMask,
    /// Optional constraint rectangle the position is clamped into while
    /// draggable.
    pub drag_bounds: Option<Rect<f32>>,
    /// Inset applied to the interaction area relative to the bounds.
    pub interact_inset: Vec2,

    // Layout bookkeeping, valid for the current frame only.
    pub padding: Vec2,
    pub content_size: Vec2,
    /// Absolute position the next auto-flowed child starts at.
    pub flow_cursor: Vec2,
    /// Per-frame child offset from the control origin to the content
    /// origin (padding plus left/top dock insets).
    pub child_offset: Vec2,
    /// Position and size of the most recently placed auto-flow child,
    /// used for same-line placement.
    pub last_child_pos: Vec2,
    pub last_child_size: Vec2,

    // Clip rectangles.
    pub clip: ClipRect,
    pub clip_docked: ClipRect,
    pub clip_children: ClipRect,

    // Docking.
    /// Host this control is docked into; NONE = not docked.
    pub dock_host: ControlId,
    /// Side of the host this control is docked on.
    pub dock_side: Option<DockSide>,
    /// Per-side dock data when this control hosts docks.
    pub anchors: Option<Box<DockAnchors>>,
    /// Resize mask saved at dock time, restored on undock.
    pub saved_resize_mask: EdgeMask,

    // Bookkeeping.
    /// Saturating update counter (cap 3); distinguishes "just created"
    /// from "seen repeatedly" for one-shot behaviors.
    pub updates: u8,
    /// Frame number of the last lookup, for the stale sweep.
    pub last_frame: u64,
    /// Children registered so far this frame, in call order.
    pub children: Vec<ControlId>,
    /// Children from the previous frame (double-buffered, swapped at
    /// frame reset).
    pub prev_children: Vec<ControlId>,

    /// Tooltip text requested for this control, if any.
    pub tooltip: Option<String>,

    pub data: ControlData,
}

impl ControlRecord {
    pub(crate) fn new(id: ControlId, kind: ControlKind, parent: ControlId) -> Self {
        Self {
            id,
            parent,
            kind,
            flags: ControlFlags::empty(),
            pos: Vec2::splat(UNINITIALIZED),
            size: Vec2::ZERO,
            min_size: Vec2::ZERO,
            resize_mask: EdgeMask::empty(),
            drag_bounds: None,
            interact_inset: Vec2::ZERO,
            padding: Vec2::ZERO,
            content_size: Vec2::ZERO,
            flow_cursor: Vec2::ZERO,
            child_offset: Vec2::ZERO,
            last_child_pos: Vec2::ZERO,
            last_child_size: Vec2::ZERO,
            clip: ClipRect::infinite(),
            clip_docked: ClipRect::infinite(),
            clip_children: ClipRect::infinite(),
            dock_host: ControlId::NONE,
            dock_side: None,
            anchors: None,
            saved_resize_mask: EdgeMask::empty(),
            updates: 0,
            last_frame: 0,
            children: Vec::new(),
            prev_children: Vec::new(),
            tooltip: None,
            data: ControlData::None,
        }
    }

    /// Whether the record has never been laid out.
    pub fn is_uninitialized(&self) -> bool {
        self.pos.x == UNINITIALIZED
    }

    /// Whether the control has been looked up enough times to count as
    /// settled. One-time behaviors (initial docking) fire before this.
    pub fn is_settled(&self) -> bool {
        self.updates >= SETTLED_UPDATES
    }

    /// Whether the control is docked into a host.
    pub fn is_docked(&self) -> bool {
        self.dock_host.is_some()
    }

    /// Bump the saturating update counter and stamp the frame. Resets
    /// per-frame fields on the first touch of a new frame.
    pub(crate) fn touch(&mut self, frame: u64) {
        if self.last_frame != frame {
            self.frame_reset(frame);
        }
        self.updates = self.updates.saturating_add(1).min(SETTLED_UPDATES);
    }

    fn frame_reset(&mut self, frame: u64) {
        self.last_frame = frame;
        std::mem::swap(&mut self.children, &mut self.prev_children);
        self.children.clear();
        self.content_size = Vec2::ZERO;
        self.last_child_pos = Vec2::ZERO;
        self.last_child_size = Vec2::ZERO;
        self.tooltip = None;
    }

    /// Bounds as a rect. Meaningless before first layout.
    pub fn bounds(&self) -> Rect<f32> {
        Rect::from_pos_size(self.pos, self.size)
    }

    fn mismatch(&self, expected: &'static str) -> PayloadError {
        PayloadError {
            id: self.id,
            expected,
            actual: self.data.name(),
        }
    }

    /// Kind-safe window payload access.
    pub fn window(&self) -> Result<&WindowData, PayloadError> {
        match &self.data {
            ControlData::Window(data) => Ok(data),
            _ => Err(self.mismatch("Window")),
        }
    }

    pub fn window_mut(&mut self) -> Result<&mut WindowData, PayloadError> {
        let err = self.mismatch("Window");
        match &mut self.data {
            ControlData::Window(data) => Ok(data),
            _ => Err(err),
        }
    }

    pub fn toggle_mut(&mut self) -> Result<&mut bool, PayloadError> {
        let err = self.mismatch("Toggle");
        match &mut self.data {
            ControlData::Toggle { on } => Ok(on),
            _ => Err(err),
        }
    }

    pub fn slider_mut(&mut self) -> Result<&mut f32, PayloadError> {
        let err = self.mismatch("Slider");
        match &mut self.data {
            ControlData::Slider { ratio } => Ok(ratio),
            _ => Err(err),
        }
    }

    pub fn scroll_thumb_mut(&mut self) -> Result<&mut f32, PayloadError> {
        let err = self.mismatch("ScrollThumb");
        match &mut self.data {
            ControlData::ScrollThumb { ratio } => Ok(ratio),
            _ => Err(err),
        }
    }

    pub fn text_box_mut(&mut self) -> Result<&mut TextBoxData, PayloadError> {
        let err = self.mismatch("TextBox");
        match &mut self.data {
            ControlData::TextBox(data) => Ok(data),
            _ => Err(err),
        }
    }

    pub fn menu_mut(&mut self) -> Result<&mut bool, PayloadError> {
        let err = self.mismatch("Menu");
        match &mut self.data {
            ControlData::Menu { open } => Ok(open),
            _ => Err(err),
        }
    }

    pub fn list_mut(&mut self) -> Result<(&mut Option<usize>, &mut f32), PayloadError> {
        let err = self.mismatch("List");
        match &mut self.data {
            ControlData::List { selected, scroll } => Ok((selected, scroll)),
            _ => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_counter_saturates() {
        let mut rec = ControlRecord::new(
            ControlId::new("w", ControlKind::Window, ""),
            ControlKind::Window,
            ControlId::NONE,
        );
        for frame in 1..=10 {
            rec.touch(frame);
        }
        assert!(rec.is_settled());
        assert_eq!(rec.updates, 3);
    }

    #[test]
    fn frame_reset_swaps_child_buffers() {
        let id = ControlId::new("w", ControlKind::Window, "");
        let child = ControlId::new("b", ControlKind::Button, "w");
        let mut rec = ControlRecord::new(id, ControlKind::Window, ControlId::NONE);
        rec.touch(1);
        rec.children.push(child);
        rec.touch(2);
        assert_eq!(rec.prev_children, vec![child]);
        assert!(rec.children.is_empty());
    }

    #[test]
    fn payload_accessor_reports_mismatch() {
        let id = ControlId::new("b", ControlKind::Button, "");
        let mut rec = ControlRecord::new(id, ControlKind::Button, ControlId::NONE);
        rec.data = ControlData::Toggle { on: false };
        let err = rec.window_mut().unwrap_err();
        assert_eq!(err.expected, "Window");
        assert_eq!(err.actual, "Toggle");
    }

    #[test]
    fn corner_band_yields_diagonal_hint() {
        let nw = EdgeMask::LEFT | EdgeMask::TOP;
        assert_eq!(nw.cursor_hint(), CursorHint::DiagonalNwSe);
        let ne = EdgeMask::RIGHT | EdgeMask::TOP;
        assert_eq!(ne.cursor_hint(), CursorHint::DiagonalNeSw);
        assert!(EdgeMask::LEFT.cursor_hint().single_axis());
    }
}
