//! Tooltip arming: a control that stays continuously hovered for the delay
//! gets its tooltip latched for the dedicated always-on-top pass.

use glint_core::math::Vec2;

use crate::id::ControlId;

/// Continuous-hover time before a tooltip is shown, in milliseconds.
pub const TOOLTIP_DELAY_MS: f64 = 1000.0;

/// A tooltip latched for rendering by the end-of-frame pass.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipLatch {
    pub text: String,
    /// Pointer position the tooltip anchors to.
    pub pos: Vec2,
    /// Window the hovered control belongs to.
    pub window: ControlId,
}

/// Cross-frame tooltip arming state.
#[derive(Debug, Default)]
pub struct TooltipState {
    /// Control the hover timer is counting for.
    target: ControlId,
    hover_ms: f64,
    /// Frame delta fed by `begin_frame`.
    frame_dt_ms: f64,
    /// Whether the target was re-observed this frame.
    seen: bool,
    latched: Option<TooltipLatch>,
}

impl TooltipState {
    pub(crate) fn begin_frame(&mut self, dt_ms: f64) {
        self.frame_dt_ms = dt_ms;
        self.seen = false;
    }

    /// Called by the interaction pass for the hovered control when it
    /// requests a tooltip. Restarts the timer when the hover target
    /// changes.
    pub(crate) fn observe(&mut self, id: ControlId, text: &str, pos: Vec2, window: ControlId) {
        if self.target != id {
            self.target = id;
            self.hover_ms = 0.0;
            self.latched = None;
        }
        self.hover_ms += self.frame_dt_ms;
        self.seen = true;
        if self.hover_ms >= TOOLTIP_DELAY_MS {
            self.latched = Some(TooltipLatch {
                text: text.to_owned(),
                pos,
                window,
            });
        }
    }

    /// Hover lost resets the timer and drops any latch.
    pub(crate) fn end_frame(&mut self) {
        if !self.seen {
            self.target = ControlId::NONE;
            self.hover_ms = 0.0;
            self.latched = None;
        }
    }

    /// The tooltip to render this cycle, if one is armed.
    pub fn latched(&self) -> Option<&TooltipLatch> {
        self.latched.as_ref()
    }
}
