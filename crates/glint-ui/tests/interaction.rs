//! Pointer state machine behavior through the public widget API.
//!
//! Geometry used throughout: a window pinned at the origin sized 400x300
//! has its content origin at (8, 30) — 8px padding plus the 22px title
//! bar. The first button "Go" therefore occupies (8, 30, 32, 24) with the
//! default fixed metrics.

mod common;

use common::step;
use glint_core::input::InputSample;
use glint_core::math::Vec2;
use glint_ui::{Context, ControlId, ControlKind};

fn panel_frame(ctx: &mut Context, sample: InputSample) -> bool {
    let mut clicked = false;
    step(ctx, sample, |ctx| {
        ctx.set_next_pos(Vec2::ZERO);
        ctx.set_next_size(Vec2::new(400.0, 300.0));
        ctx.begin_window("Panel");
        if ctx.button("Go") {
            clicked = true;
        }
        ctx.button("Stop");
        ctx.end_window();
    });
    clicked
}

fn window_id(title: &str) -> ControlId {
    ControlId::new(title, ControlKind::Window, "")
}

#[test]
fn click_pulses_once_on_release() {
    let mut ctx = Context::new();
    let inside = Vec2::new(20.0, 40.0);

    assert!(!panel_frame(&mut ctx, InputSample::default()));
    assert!(!panel_frame(&mut ctx, InputSample::motion(inside)));
    assert!(!panel_frame(&mut ctx, InputSample::press(inside)));
    assert!(panel_frame(&mut ctx, InputSample::release(inside)));
    assert!(!panel_frame(&mut ctx, InputSample::default()));
}

#[test]
fn hover_is_a_singleton_claimed_by_the_innermost_control() {
    let mut ctx = Context::new();
    panel_frame(&mut ctx, InputSample::default());
    panel_frame(&mut ctx, InputSample::motion(Vec2::new(20.0, 40.0)));

    let go = ControlId::new("Go", ControlKind::Button, "Panel");
    assert_eq!(ctx.session().hovered(), go);

    // Between the buttons only the window itself is hovered.
    panel_frame(&mut ctx, InputSample::motion(Vec2::new(20.0, 56.0)));
    assert_eq!(ctx.session().hovered(), window_id("Panel"));
}

#[test]
fn leaving_the_control_drops_the_press_without_a_click() {
    let mut ctx = Context::new();
    panel_frame(&mut ctx, InputSample::default());
    assert!(!panel_frame(&mut ctx, InputSample::press(Vec2::new(20.0, 40.0))));
    panel_frame(&mut ctx, InputSample::motion(Vec2::new(200.0, 200.0)));
    assert!(ctx.session().pressed().is_none());
    assert!(!panel_frame(&mut ctx, InputSample::release(Vec2::new(200.0, 200.0))));
}

#[test]
fn clicking_a_button_focuses_its_window() {
    let mut ctx = Context::new();
    let inside = Vec2::new(20.0, 40.0);
    panel_frame(&mut ctx, InputSample::default());
    panel_frame(&mut ctx, InputSample::press(inside));
    panel_frame(&mut ctx, InputSample::release(inside));
    // Buttons are not focusable; focus promotes to the enclosing window.
    assert_eq!(ctx.session().focused(), window_id("Panel"));
}

#[test]
fn border_drag_resizes_from_the_right_edge() {
    let mut ctx = Context::new();
    panel_frame(&mut ctx, InputSample::default());
    panel_frame(&mut ctx, InputSample::press(Vec2::new(400.0, 150.0)));
    assert_eq!(ctx.session().resizing(), window_id("Panel"));
    panel_frame(&mut ctx, InputSample::motion(Vec2::new(440.0, 150.0)));
    panel_frame(&mut ctx, InputSample::release(Vec2::new(440.0, 150.0)));

    let rec = ctx.registry().get(window_id("Panel")).unwrap();
    assert_eq!(rec.size, Vec2::new(440.0, 300.0));
    assert!(ctx.session().resizing().is_none());
}

#[test]
fn resize_takes_precedence_over_title_bar_drag() {
    let mut ctx = Context::new();
    panel_frame(&mut ctx, InputSample::default());
    // The window's top border band overlaps the title bar.
    panel_frame(&mut ctx, InputSample::press(Vec2::new(200.0, 2.0)));
    assert_eq!(ctx.session().resizing(), window_id("Panel"));
    assert!(ctx.session().dragging().is_none());
    panel_frame(&mut ctx, InputSample::release(Vec2::new(200.0, 2.0)));
}

#[test]
fn title_bar_drag_moves_the_window() {
    let mut ctx = Context::new();
    panel_frame(&mut ctx, InputSample::default());
    // Inside the title bar, clear of the border band.
    panel_frame(&mut ctx, InputSample::press(Vec2::new(200.0, 12.0)));
    panel_frame(&mut ctx, InputSample::motion(Vec2::new(250.0, 62.0)));
    panel_frame(&mut ctx, InputSample::release(Vec2::new(250.0, 62.0)));

    let rec = ctx.registry().get(window_id("Panel")).unwrap();
    assert_eq!(rec.pos, Vec2::new(50.0, 50.0));
}

#[test]
fn slider_thumb_is_clamped_to_its_track() {
    let mut ctx = Context::new();
    let mut value = 0.5_f32;
    let mut run = |ctx: &mut Context, sample: InputSample, value: &mut f32| {
        step(ctx, sample, |ctx| {
            ctx.set_next_pos(Vec2::ZERO);
            ctx.set_next_size(Vec2::new(400.0, 300.0));
            ctx.begin_window("Mixer");
            ctx.slider("Volume", value, 0.0..=1.0);
            ctx.end_window();
        });
    };
    run(&mut ctx, InputSample::default(), &mut value);
    // Track (8, 30, 180, 20), travel 170: value 0.5 puts the thumb at x 93.
    run(&mut ctx, InputSample::press(Vec2::new(95.0, 40.0)), &mut value);
    run(&mut ctx, InputSample::motion(Vec2::new(500.0, 40.0)), &mut value);
    assert_eq!(value, 1.0);
    run(&mut ctx, InputSample::release(Vec2::new(500.0, 40.0)), &mut value);
    assert_eq!(value, 1.0);
}

#[test]
fn focused_window_owns_the_overlap_with_unfocused_ones() {
    let mut ctx = Context::new();
    let both = Vec2::new(150.0, 100.0);
    let only_b = Vec2::new(250.0, 100.0);
    let run = |ctx: &mut Context, sample: InputSample| {
        step(ctx, sample, |ctx| {
            ctx.set_next_pos(Vec2::ZERO);
            ctx.set_next_size(Vec2::new(200.0, 200.0));
            ctx.begin_window("A");
            ctx.end_window();
            ctx.set_next_pos(Vec2::new(100.0, 0.0));
            ctx.set_next_size(Vec2::new(200.0, 200.0));
            ctx.begin_window("B");
            ctx.end_window();
        });
    };

    run(&mut ctx, InputSample::default());
    run(&mut ctx, InputSample::press(both));
    run(&mut ctx, InputSample::release(both));
    // A claimed the overlap first and took focus; B was ineligible.
    assert_eq!(ctx.session().focused(), window_id("A"));

    run(&mut ctx, InputSample::motion(both));
    assert_eq!(ctx.session().hovered(), window_id("A"));

    // A point clear of A is free to interact with B.
    run(&mut ctx, InputSample::press(only_b));
    run(&mut ctx, InputSample::release(only_b));
    assert_eq!(ctx.session().focused(), window_id("B"));

    // With B focused, the overlap now belongs to B.
    run(&mut ctx, InputSample::motion(both));
    assert_eq!(ctx.session().hovered(), window_id("B"));
}

#[test]
fn left_edge_grab_locks_to_the_horizontal_axis() {
    let mut ctx = Context::new();
    panel_frame(&mut ctx, InputSample::default());
    panel_frame(&mut ctx, InputSample::press(Vec2::new(0.0, 150.0)));
    assert_eq!(ctx.session().resizing(), window_id("Panel"));
    assert_eq!(ctx.session().cursor_hint(), glint_ui::CursorHint::Horizontal);

    // A diagonal sweep only changes the width.
    panel_frame(&mut ctx, InputSample::motion(Vec2::new(-40.0, 250.0)));
    panel_frame(&mut ctx, InputSample::release(Vec2::new(-40.0, 250.0)));
    let rec = ctx.registry().get(window_id("Panel")).unwrap();
    assert_eq!(rec.pos, Vec2::new(-40.0, 0.0));
    assert_eq!(rec.size, Vec2::new(440.0, 300.0));
}
