//! Horizontal sliders: a track with a draggable thumb constrained to it.

use std::ops::RangeInclusive;

use glint_core::geometry::Rect;
use glint_core::math::Vec2;
use tracing::warn;

use crate::control::{ControlData, ControlFlags, ControlKind};
use crate::layout::LayoutParams;
use crate::Context;

const TRACK_SIZE: Vec2 = Vec2::new(180.0, 20.0);
const GROOVE_HEIGHT: f32 = 4.0;
const THUMB_WIDTH: f32 = 10.0;

impl Context {
    /// A slider editing `value` within `range`. Returns `true` while the
    /// value is being changed.
    pub fn slider(&mut self, label: &str, value: &mut f32, range: RangeInclusive<f32>) -> bool {
        let (min, max) = (*range.start(), *range.end());
        let span = max - min;

        let id = self.widget_id(label, ControlKind::Slider);
        let params = LayoutParams {
            size: TRACK_SIZE,
            min_size: Vec2::new(THUMB_WIDTH * 2.0, TRACK_SIZE.y),
            ..Default::default()
        };
        self.node_with(id, ControlKind::Slider, ControlFlags::empty(), &params, |rec| {
            if !matches!(rec.data, ControlData::Slider { .. }) {
                rec.data = ControlData::Slider { ratio: 0.0 };
            }
        });

        let Some(rec) = self.registry.get(id) else {
            return false;
        };
        let track = rec.bounds();
        let clip = rec.clip;
        let travel = (track.width - THUMB_WIDTH).max(0.0);

        let mut ratio = if span > 0.0 {
            ((*value - min) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };

        // The thumb, drag-constrained to the track.
        let thumb_id = self.widget_id(label, ControlKind::SliderThumb);
        let thumb_rect = Rect::new(
            track.x + ratio * travel,
            track.y,
            THUMB_WIDTH,
            track.height,
        );
        {
            let rec = self
                .registry
                .create_or_get(thumb_id, ControlKind::SliderThumb, id, self.frame);
            rec.flags = ControlFlags::DRAGGABLE | ControlFlags::NO_CONTENT_ACCUM;
            rec.parent = id;
            rec.pos = thumb_rect.pos();
            rec.size = thumb_rect.size();
            rec.drag_bounds = Some(Rect::new(track.x, track.y, travel, 0.0));
        }
        let reply =
            crate::interact::process(&mut self.registry, &mut self.session, &self.input, thumb_id);
        self.last_control = id;

        let mut changed = false;
        if reply.dragging && travel > 0.0 {
            if let Some(thumb_rec) = self.registry.get(thumb_id) {
                let dragged = ((thumb_rec.pos.x - track.x) / travel).clamp(0.0, 1.0);
                if dragged != ratio {
                    ratio = dragged;
                    *value = min + ratio * span;
                    changed = true;
                }
            }
        }
        if let Some(rec) = self.registry.get_mut(id) {
            match rec.slider_mut() {
                Ok(stored) => *stored = ratio,
                Err(err) => warn!(%err, "slider payload mismatch"),
            }
        }

        self.push_clip(clip);
        let center_y = track.y + track.height / 2.0;
        let thumb_center = Vec2::new(track.x + ratio * travel + THUMB_WIDTH / 2.0, center_y);
        self.draw_line(
            Vec2::new(track.x, center_y),
            Vec2::new(track.right(), center_y),
            self.theme.widget_press,
            GROOVE_HEIGHT,
        );
        self.draw_line(
            Vec2::new(track.x, center_y),
            thumb_center,
            self.theme.accent,
            GROOVE_HEIGHT,
        );
        let fill = if self.session.dragging == thumb_id || self.session.hovered == thumb_id {
            self.theme.widget_hover
        } else {
            self.theme.widget_bg
        };
        self.draw_circle(thumb_center, track.height / 2.0 - 2.0, fill);
        self.pop_clip();

        changed
    }
}
