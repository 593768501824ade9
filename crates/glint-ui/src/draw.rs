//! Draw recording: widgets emit backend-neutral commands into a
//! [`DrawList`]; the host replays them against its renderer after the
//! frame ends.

use glint_core::color::Color;
use glint_core::geometry::Rect;
use glint_core::math::Vec2;

use crate::clip::ClipRect;

/// One backend-neutral draw command. All geometry is absolute; the core
/// never asks the backend for measurements beyond [`TextMetrics`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    PushClip(ClipRect),
    PopClip,
    Rect {
        rect: Rect<f32>,
        color: Color,
    },
    RectOutline {
        rect: Rect<f32>,
        color: Color,
        thickness: f32,
    },
    RoundedRect {
        rect: Rect<f32>,
        radius: f32,
        color: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        thickness: f32,
    },
    Triangle {
        points: [Vec2; 3],
        color: Color,
    },
    Text {
        pos: Vec2,
        text: String,
        color: Color,
    },
}

/// Receiver for recorded draw commands.
pub trait DrawSink {
    fn submit(&mut self, command: DrawCommand);
}

/// Text measurement the layout and caret logic depend on.
///
/// The host supplies real font metrics; [`FixedMetrics`] serves headless
/// runs and tests.
pub trait TextMetrics {
    /// Advance width of a whole string.
    fn text_width(&self, text: &str) -> f32;

    /// Advance width of the first `chars` characters.
    fn prefix_width(&self, text: &str, chars: usize) -> f32;

    /// Character index the caret lands on for a horizontal offset from the
    /// text origin (nearest boundary).
    fn index_at_offset(&self, text: &str, x: f32) -> usize;

    /// Line height of the current font.
    fn line_height(&self) -> f32;
}

/// Fixed-advance metrics for headless use.
#[derive(Debug, Clone, Copy)]
pub struct FixedMetrics {
    pub advance: f32,
    pub line: f32,
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self {
            advance: 8.0,
            line: 16.0,
        }
    }
}

impl TextMetrics for FixedMetrics {
    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.advance
    }

    fn prefix_width(&self, text: &str, chars: usize) -> f32 {
        text.chars().take(chars).count() as f32 * self.advance
    }

    fn index_at_offset(&self, text: &str, x: f32) -> usize {
        let count = text.chars().count();
        if self.advance <= 0.0 {
            return 0;
        }
        (((x / self.advance) + 0.5).floor().max(0.0) as usize).min(count)
    }

    fn line_height(&self) -> f32 {
        self.line
    }
}

/// An in-memory command recorder, rebuilt every frame.
#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn clear(&mut self) {
        self.commands.clear();
    }

    /// Commands recorded so far this frame, in submission order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Replay the recorded commands into another sink.
    pub fn replay<S: DrawSink>(&self, sink: &mut S) {
        for command in &self.commands {
            sink.submit(command.clone());
        }
    }
}

impl DrawSink for DrawList {
    fn submit(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_metrics_caret_snaps_to_nearest_boundary() {
        let metrics = FixedMetrics::default();
        assert_eq!(metrics.index_at_offset("hello", 0.0), 0);
        assert_eq!(metrics.index_at_offset("hello", 3.0), 0);
        assert_eq!(metrics.index_at_offset("hello", 5.0), 1);
        assert_eq!(metrics.index_at_offset("hello", 100.0), 5);
    }

    #[test]
    fn replay_preserves_order() {
        let mut list = DrawList::new();
        list.submit(DrawCommand::PopClip);
        list.submit(DrawCommand::Rect {
            rect: Rect::ZERO,
            color: Color::WHITE,
        });
        let mut copy = DrawList::new();
        list.replay(&mut copy);
        assert_eq!(copy.commands(), list.commands());
    }
}
