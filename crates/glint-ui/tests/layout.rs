//! Layout engine behavior: auto-flow, same-line placement, explicit
//! positioning, width constraints, clip nesting, and content scrolling.

mod common;

use common::step;
use glint_core::input::InputSample;
use glint_core::math::Vec2;
use glint_ui::{Context, ControlId, ControlKind};

fn window_id(title: &str) -> ControlId {
    ControlId::new(title, ControlKind::Window, "")
}

fn button_id(label: &str, scope: &str) -> ControlId {
    ControlId::new(label, ControlKind::Button, scope)
}

#[test]
fn auto_flow_stacks_children_with_spacing() {
    let mut ctx = Context::new();
    step(&mut ctx, InputSample::default(), |ctx| {
        ctx.set_next_pos(Vec2::ZERO);
        ctx.set_next_size(Vec2::new(400.0, 300.0));
        ctx.begin_window("Panel");
        ctx.button("Go");
        ctx.button("Stop");
        ctx.end_window();
    });

    let go = ctx.registry().get(button_id("Go", "Panel")).unwrap();
    let stop = ctx.registry().get(button_id("Stop", "Panel")).unwrap();
    // Content origin is padding (8) plus the 22px title bar.
    assert_eq!(go.pos, Vec2::new(8.0, 30.0));
    assert_eq!(stop.pos, Vec2::new(8.0, go.pos.y + go.size.y + 4.0));
}

#[test]
fn unplaced_windows_cascade_instead_of_stacking() {
    let mut ctx = Context::new();
    step(&mut ctx, InputSample::default(), |ctx| {
        ctx.begin_window("First");
        ctx.end_window();
        ctx.begin_window("Second");
        ctx.end_window();
    });

    assert_eq!(
        ctx.registry().get(window_id("First")).unwrap().pos,
        Vec2::new(40.0, 40.0)
    );
    assert_eq!(
        ctx.registry().get(window_id("Second")).unwrap().pos,
        Vec2::new(72.0, 72.0)
    );
}

#[test]
fn same_line_places_to_the_right_of_the_previous_child() {
    let mut ctx = Context::new();
    step(&mut ctx, InputSample::default(), |ctx| {
        ctx.set_next_pos(Vec2::ZERO);
        ctx.set_next_size(Vec2::new(400.0, 300.0));
        ctx.begin_window("Panel");
        ctx.button("Go");
        ctx.same_line();
        ctx.button("Stop");
        ctx.button("Third");
        ctx.end_window();
    });

    let go = ctx.registry().get(button_id("Go", "Panel")).unwrap();
    let stop = ctx.registry().get(button_id("Stop", "Panel")).unwrap();
    let third = ctx.registry().get(button_id("Third", "Panel")).unwrap();
    assert_eq!(stop.pos, Vec2::new(go.pos.x + go.size.x + 4.0, go.pos.y));
    // Flow resumes below the same-line row.
    assert_eq!(third.pos.x, 8.0);
    assert!(third.pos.y >= stop.pos.y + stop.size.y);
}

#[test]
fn explicit_position_holds_only_while_requested() {
    let mut ctx = Context::new();
    let build = |ctx: &mut Context, explicit: Option<Vec2>, hold: bool| {
        step(ctx, InputSample::default(), |ctx| {
            ctx.set_next_pos(Vec2::ZERO);
            ctx.set_next_size(Vec2::new(400.0, 300.0));
            ctx.begin_window("Panel");
            if let Some(pos) = explicit {
                ctx.set_next_pos(pos);
            }
            if hold {
                ctx.no_auto_pos();
            }
            ctx.button("Go");
            ctx.end_window();
        });
    };

    let go = button_id("Go", "Panel");
    build(&mut ctx, Some(Vec2::new(50.0, 90.0)), false);
    assert_eq!(ctx.registry().get(go).unwrap().pos, Vec2::new(50.0, 90.0));

    build(&mut ctx, None, true);
    assert_eq!(ctx.registry().get(go).unwrap().pos, Vec2::new(50.0, 90.0));

    // Without the hold, auto-flow reclaims the control.
    build(&mut ctx, None, false);
    assert_eq!(ctx.registry().get(go).unwrap().pos, Vec2::new(8.0, 30.0));
}

#[test]
fn natural_width_clamps_to_the_parent_content_width() {
    let mut ctx = Context::new();
    let long = "a label far wider than the window it is placed into, by a lot";
    step(&mut ctx, InputSample::default(), |ctx| {
        ctx.set_next_pos(Vec2::ZERO);
        ctx.set_next_size(Vec2::new(200.0, 300.0));
        ctx.begin_window("Narrow");
        ctx.button(long);
        ctx.end_window();
    });

    let rec = ctx.registry().get(button_id(long, "Narrow")).unwrap();
    assert_eq!(rec.size.x, 200.0 - 16.0);
}

#[test]
fn child_clips_nest_inside_the_window_clip() {
    let mut ctx = Context::new();
    step(&mut ctx, InputSample::default(), |ctx| {
        ctx.set_next_pos(Vec2::ZERO);
        ctx.set_next_size(Vec2::new(400.0, 300.0));
        ctx.begin_window("Panel");
        ctx.button("Go");
        ctx.end_window();
    });

    let window = ctx.registry().get(window_id("Panel")).unwrap();
    let go = ctx.registry().get(button_id("Go", "Panel")).unwrap();
    assert!(window.clip.contains_rect(&window.clip_children));
    assert!(window.clip_children.contains_rect(&go.clip));
}

#[test]
fn overflowing_child_clip_is_cut_at_the_window_edge() {
    let mut ctx = Context::new();
    step(&mut ctx, InputSample::default(), |ctx| {
        ctx.set_next_pos(Vec2::ZERO);
        ctx.set_next_size(Vec2::new(400.0, 300.0));
        ctx.begin_window("Panel");
        // Explicitly park the button straddling the right edge.
        ctx.set_next_pos(Vec2::new(380.0, 40.0));
        ctx.button("Edge");
        ctx.end_window();
    });

    let go = ctx.registry().get(button_id("Edge", "Panel")).unwrap();
    assert!(go.pos.x + go.size.x > 400.0);
    assert!(go.clip.max.x <= 392.0 + f32::EPSILON);
    assert!(!go.clip.is_degenerate());
}

#[test]
fn wheel_scrolls_overflowing_window_content() {
    let mut ctx = Context::new();
    let build = |ctx: &mut Context, sample: InputSample| {
        step(ctx, sample, |ctx| {
            ctx.set_next_pos(Vec2::ZERO);
            ctx.set_next_size(Vec2::new(300.0, 120.0));
            ctx.begin_window("Long");
            for index in 0..10 {
                ctx.button(&format!("Row {index}"));
            }
            ctx.end_window();
        });
    };

    build(&mut ctx, InputSample::default());
    build(&mut ctx, InputSample::motion(Vec2::new(100.0, 60.0)));
    let first_row = ControlId::new("Row 0", ControlKind::Button, "Long");
    let before = ctx.registry().get(first_row).unwrap().pos.y;

    build(&mut ctx, InputSample::wheel(-2.0));
    // One more frame so the new scroll offset reaches layout.
    build(&mut ctx, InputSample::default());

    let window = ctx.registry().get(window_id("Long")).unwrap();
    assert_eq!(window.window().unwrap().scroll.y, 40.0);
    let after = ctx.registry().get(first_row).unwrap().pos.y;
    assert_eq!(after, before - 40.0);
}
