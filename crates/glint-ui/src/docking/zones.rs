//! Drop-zone detection: four fixed-size interaction boxes, one per side of
//! a dock-capable host, probed in Top, Bottom, Left, Right order.

use glint_core::geometry::Rect;
use glint_core::math::Vec2;

use super::types::DockSide;

/// Edge length of the square drop boxes rendered at the host's side
/// midpoints.
pub const DROP_BOX_SIZE: f32 = 32.0;

/// Inset of each drop box from its host edge.
pub const DROP_BOX_MARGIN: f32 = 8.0;

/// The fixed drop box for one side of a host rect.
pub fn drop_box(host: Rect<f32>, side: DockSide) -> Rect<f32> {
    let half = DROP_BOX_SIZE / 2.0;
    let center_x = host.x + host.width / 2.0;
    let center_y = host.y + host.height / 2.0;
    match side {
        DockSide::Top => Rect::new(
            center_x - half,
            host.y + DROP_BOX_MARGIN,
            DROP_BOX_SIZE,
            DROP_BOX_SIZE,
        ),
        DockSide::Bottom => Rect::new(
            center_x - half,
            host.bottom() - DROP_BOX_MARGIN - DROP_BOX_SIZE,
            DROP_BOX_SIZE,
            DROP_BOX_SIZE,
        ),
        DockSide::Left => Rect::new(
            host.x + DROP_BOX_MARGIN,
            center_y - half,
            DROP_BOX_SIZE,
            DROP_BOX_SIZE,
        ),
        DockSide::Right => Rect::new(
            host.right() - DROP_BOX_MARGIN - DROP_BOX_SIZE,
            center_y - half,
            DROP_BOX_SIZE,
            DROP_BOX_SIZE,
        ),
    }
}

/// Find the side whose drop box contains the pointer, if any.
///
/// Probes in [`DockSide::PROBE_ORDER`]; the first hit wins when boxes
/// overlap on small hosts.
pub fn detect(host: Rect<f32>, pointer: Vec2) -> Option<DockSide> {
    DockSide::PROBE_ORDER
        .into_iter()
        .find(|side| drop_box(host, *side).contains(pointer))
}

/// Slot geometry for a side of a host, given the slot's preferred size.
///
/// Top/bottom slots span the host width below the title band; left/right
/// slots span the content height between any top/bottom slots.
pub fn side_rect(
    host: Rect<f32>,
    side: DockSide,
    preferred: Vec2,
    title_height: f32,
    top_inset: f32,
    bottom_inset: f32,
) -> Rect<f32> {
    let content_y = host.y + title_height;
    let content_h = (host.height - title_height).max(0.0);
    match side {
        DockSide::Top => Rect::new(host.x, content_y, host.width, preferred.y.min(content_h)),
        DockSide::Bottom => {
            let h = preferred.y.min(content_h);
            Rect::new(host.x, host.bottom() - h, host.width, h)
        }
        DockSide::Left => {
            let h = (content_h - top_inset - bottom_inset).max(0.0);
            Rect::new(
                host.x,
                content_y + top_inset,
                preferred.x.min(host.width),
                h,
            )
        }
        DockSide::Right => {
            let h = (content_h - top_inset - bottom_inset).max(0.0);
            let w = preferred.x.min(host.width);
            Rect::new(host.right() - w, content_y + top_inset, w, h)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_order_prefers_top() {
        // A tiny host where all four boxes overlap at the center.
        let host = Rect::new(0.0, 0.0, 48.0, 48.0);
        let center = Vec2::new(24.0, 24.0);
        assert_eq!(detect(host, center), Some(DockSide::Top));
    }

    #[test]
    fn detects_each_side_on_a_large_host() {
        let host = Rect::new(0.0, 0.0, 400.0, 300.0);
        assert_eq!(detect(host, Vec2::new(200.0, 20.0)), Some(DockSide::Top));
        assert_eq!(
            detect(host, Vec2::new(200.0, 280.0)),
            Some(DockSide::Bottom)
        );
        assert_eq!(detect(host, Vec2::new(20.0, 150.0)), Some(DockSide::Left));
        assert_eq!(detect(host, Vec2::new(380.0, 150.0)), Some(DockSide::Right));
        assert_eq!(detect(host, Vec2::new(200.0, 150.0)), None);
    }

    #[test]
    fn top_slot_spans_host_width() {
        let host = Rect::new(0.0, 0.0, 400.0, 300.0);
        let slot = side_rect(host, DockSide::Top, Vec2::new(999.0, 120.0), 22.0, 0.0, 0.0);
        assert_eq!(slot.width, 400.0);
        assert_eq!(slot.height, 120.0);
        assert_eq!(slot.y, 22.0);
    }
}
