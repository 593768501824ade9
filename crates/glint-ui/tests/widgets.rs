//! Widget behavior above the raw state machine: text editing, retained
//! toggles, menus, list selection, and the tooltip overlay.

mod common;

use common::{step, step_dt};
use glint_core::input::{InputSample, KeyCode};
use glint_core::math::Vec2;
use glint_ui::{Context, ControlId, ControlKind, DrawCommand};

#[test]
#[should_panic(expected = "end_window without a matching begin_window")]
fn unbalanced_end_window_is_fatal_in_debug_builds() {
    let mut ctx = Context::new();
    ctx.begin_frame(&InputSample::default(), 16.0);
    ctx.end_window();
}

#[test]
#[should_panic(expected = "end_menu_bar without a matching begin_menu_bar")]
fn unbalanced_end_menu_bar_is_fatal_in_debug_builds() {
    let mut ctx = Context::new();
    ctx.begin_frame(&InputSample::default(), 16.0);
    ctx.set_next_pos(Vec2::ZERO);
    ctx.begin_window("Shell");
    ctx.end_menu_bar();
}

fn form_frame(ctx: &mut Context, sample: InputSample, text: &mut String) -> bool {
    let mut changed = false;
    step(ctx, sample, |ctx| {
        ctx.set_next_pos(Vec2::ZERO);
        ctx.set_next_size(Vec2::new(400.0, 300.0));
        ctx.begin_window("Form");
        changed = ctx.text_box("Name", text, 32);
        ctx.end_window();
    });
    changed
}

#[test]
fn text_box_edits_at_the_caret() {
    let mut ctx = Context::new();
    let mut text = String::new();
    let inside = Vec2::new(20.0, 40.0);

    form_frame(&mut ctx, InputSample::default(), &mut text);
    // Click to focus; the text box is the form's first child at (8, 30).
    form_frame(&mut ctx, InputSample::press(inside), &mut text);
    form_frame(&mut ctx, InputSample::release(inside), &mut text);
    let box_id = ControlId::new("Name", ControlKind::TextBox, "Form");
    assert_eq!(ctx.session().focused(), box_id);

    assert!(form_frame(&mut ctx, InputSample::character('a'), &mut text));
    assert!(form_frame(&mut ctx, InputSample::character('b'), &mut text));
    assert_eq!(text, "ab");

    // Step left and insert in the middle.
    assert!(!form_frame(&mut ctx, InputSample::key(KeyCode::Left), &mut text));
    assert!(form_frame(&mut ctx, InputSample::character('c'), &mut text));
    assert_eq!(text, "acb");

    assert!(form_frame(&mut ctx, InputSample::key(KeyCode::Backspace), &mut text));
    assert_eq!(text, "ab");
}

#[test]
fn text_box_refuses_input_past_the_limit() {
    let mut ctx = Context::new();
    let mut text = String::new();
    let inside = Vec2::new(20.0, 40.0);
    let mut run = |ctx: &mut Context, sample: InputSample, text: &mut String| {
        let mut changed = false;
        step(ctx, sample, |ctx| {
            ctx.set_next_pos(Vec2::ZERO);
            ctx.set_next_size(Vec2::new(400.0, 300.0));
            ctx.begin_window("Form");
            changed = ctx.text_box("Name", text, 3);
            ctx.end_window();
        });
        changed
    };

    run(&mut ctx, InputSample::default(), &mut text);
    run(&mut ctx, InputSample::press(inside), &mut text);
    run(&mut ctx, InputSample::release(inside), &mut text);
    for c in ['a', 'b', 'c'] {
        assert!(run(&mut ctx, InputSample::character(c), &mut text));
    }

    // The fourth character is refused and reported on the window.
    assert!(!run(&mut ctx, InputSample::character('d'), &mut text));
    assert_eq!(text, "abc");
    let window = ctx
        .registry()
        .get(ControlId::new("Form", ControlKind::Window, ""))
        .unwrap();
    assert_eq!(
        window.window().unwrap().status_message.as_deref(),
        Some("Input limit of 3 characters reached")
    );
}

#[test]
fn toggle_flips_on_click_and_retains_its_state() {
    let mut ctx = Context::new();
    let inside = Vec2::new(20.0, 40.0);
    let mut run = |ctx: &mut Context, sample: InputSample| {
        let mut on = false;
        step(ctx, sample, |ctx| {
            ctx.set_next_pos(Vec2::ZERO);
            ctx.set_next_size(Vec2::new(400.0, 300.0));
            ctx.begin_window("Form");
            on = ctx.toggle("Mute");
            ctx.end_window();
        });
        on
    };

    assert!(!run(&mut ctx, InputSample::default()));
    assert!(!run(&mut ctx, InputSample::press(inside)));
    assert!(run(&mut ctx, InputSample::release(inside)));
    // The state is retained, not recomputed from the click.
    assert!(run(&mut ctx, InputSample::default()));
}

#[test]
fn tooltip_shows_after_a_second_of_continuous_hover() {
    let mut ctx = Context::new();
    let inside = Vec2::new(20.0, 40.0);
    let mut run = |ctx: &mut Context, dt_ms: f64| {
        step_dt(ctx, InputSample::motion(inside), dt_ms, |ctx| {
            ctx.set_next_pos(Vec2::ZERO);
            ctx.set_next_size(Vec2::new(400.0, 300.0));
            ctx.begin_window("Form");
            ctx.button("Save");
            ctx.tooltip("Writes to disk");
            ctx.end_window();
        });
    };
    let tooltip_drawn = |ctx: &Context| {
        ctx.draw_list()
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::Text { text, .. } if text == "Writes to disk"))
    };

    run(&mut ctx, 400.0);
    run(&mut ctx, 400.0);
    assert!(!tooltip_drawn(&ctx));
    // Accumulated hover crosses the one-second delay.
    run(&mut ctx, 400.0);
    run(&mut ctx, 400.0);
    assert!(tooltip_drawn(&ctx));
}

#[test]
fn menu_opens_on_click_and_closes_when_an_entry_is_chosen() {
    let mut ctx = Context::new();
    let mut run = |ctx: &mut Context, sample: InputSample| {
        let mut open = false;
        let mut chosen = false;
        step(ctx, sample, |ctx| {
            ctx.set_next_pos(Vec2::ZERO);
            ctx.set_next_size(Vec2::new(400.0, 300.0));
            ctx.begin_window("Form");
            if ctx.begin_menu_bar() {
                if ctx.begin_menu("File") {
                    open = true;
                    if ctx.menu_entry("Open") {
                        chosen = true;
                    }
                    ctx.menu_entry("Quit");
                    ctx.end_menu();
                }
                ctx.end_menu_bar();
            }
            ctx.end_window();
        });
        (open, chosen)
    };

    // The "File" header sits at (4, 24) in the menu bar band.
    let header = Vec2::new(20.0, 30.0);
    run(&mut ctx, InputSample::default());
    run(&mut ctx, InputSample::press(header));
    let (open, _) = run(&mut ctx, InputSample::release(header));
    assert!(open);
    let (open, _) = run(&mut ctx, InputSample::default());
    assert!(open);

    // First entry of the dropdown, below the header.
    let entry = Vec2::new(20.0, 50.0);
    run(&mut ctx, InputSample::press(entry));
    let (_, chosen) = run(&mut ctx, InputSample::release(entry));
    assert!(chosen);
    let (open, _) = run(&mut ctx, InputSample::default());
    assert!(!open);
}

#[test]
fn list_view_selects_rows_and_scrolls_with_the_wheel() {
    let mut ctx = Context::new();
    let items = ["alpha", "beta", "gamma", "delta", "epsilon"];
    let mut run = |ctx: &mut Context, sample: InputSample| {
        let mut selected = None;
        step(ctx, sample, |ctx| {
            ctx.set_next_pos(Vec2::ZERO);
            ctx.set_next_size(Vec2::new(400.0, 300.0));
            ctx.begin_window("Data");
            selected = ctx.list_view("Files", &items, 60.0);
            ctx.end_window();
        });
        selected
    };

    // The list is the window's first child: (8, 30, 200, 60), 20px rows.
    run(&mut ctx, InputSample::default());
    run(&mut ctx, InputSample::press(Vec2::new(100.0, 55.0)));
    assert_eq!(run(&mut ctx, InputSample::release(Vec2::new(100.0, 55.0))), Some(1));

    // Scroll one row down; the same band now shows later rows.
    run(&mut ctx, InputSample::motion(Vec2::new(100.0, 55.0)));
    run(&mut ctx, InputSample::wheel(-1.0));
    run(&mut ctx, InputSample::press(Vec2::new(100.0, 65.0)));
    assert_eq!(run(&mut ctx, InputSample::release(Vec2::new(100.0, 65.0))), Some(2));
}
