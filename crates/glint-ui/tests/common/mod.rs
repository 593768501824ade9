//! Shared helpers for driving a headless context frame by frame.

use glint_core::input::InputSample;
use glint_ui::Context;

pub const DT_MS: f64 = 16.0;

/// Run one frame with the given input sample and widget body.
pub fn step(ctx: &mut Context, sample: InputSample, build: impl FnOnce(&mut Context)) {
    step_dt(ctx, sample, DT_MS, build);
}

pub fn step_dt(
    ctx: &mut Context,
    sample: InputSample,
    dt_ms: f64,
    build: impl FnOnce(&mut Context),
) {
    ctx.begin_frame(&sample, dt_ms);
    build(ctx);
    ctx.end_frame();
}
