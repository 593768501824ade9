//! Per-tick input samples from the platform window.
//!
//! The platform layer reports at most one event per processed tick as an
//! [`InputSample`]; fields left as `None` mean "unchanged since the last
//! tick". [`InputState`] accumulates samples into the current pointer and
//! keyboard state the UI core reads each frame.

use glam::Vec2;

/// Committed key codes the core reacts to.
///
/// Printable input arrives separately as committed/candidate characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Backspace,
    Delete,
    Return,
    Tab,
    Escape,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

/// A mouse button transition with the position it happened at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ButtonEvent {
    /// Primary button went down at the given position.
    Down { pos: Vec2, double_click: bool },
    /// Primary button went up at the given position.
    Up { pos: Vec2 },
}

/// One processed platform tick. Absent fields are unchanged since last tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSample {
    /// New mouse position, if the pointer moved.
    pub mouse_pos: Option<Vec2>,
    /// Primary button transition, if any.
    pub button: Option<ButtonEvent>,
    /// Wheel delta in lines (positive = away from the user).
    pub wheel: Option<f32>,
    /// One committed key code.
    pub key: Option<KeyCode>,
    /// One committed text character.
    pub ch: Option<char>,
    /// One candidate (pre-commit, e.g. IME) character.
    pub candidate: Option<char>,
}

impl InputSample {
    /// Sample carrying only pointer motion.
    pub fn motion(pos: Vec2) -> Self {
        Self {
            mouse_pos: Some(pos),
            ..Self::default()
        }
    }

    /// Sample carrying a button press at `pos` (pointer moves there too).
    pub fn press(pos: Vec2) -> Self {
        Self {
            mouse_pos: Some(pos),
            button: Some(ButtonEvent::Down {
                pos,
                double_click: false,
            }),
            ..Self::default()
        }
    }

    /// Sample carrying a double-click press at `pos`.
    pub fn double_click(pos: Vec2) -> Self {
        Self {
            mouse_pos: Some(pos),
            button: Some(ButtonEvent::Down {
                pos,
                double_click: true,
            }),
            ..Self::default()
        }
    }

    /// Sample carrying a button release at `pos` (pointer moves there too).
    pub fn release(pos: Vec2) -> Self {
        Self {
            mouse_pos: Some(pos),
            button: Some(ButtonEvent::Up { pos }),
            ..Self::default()
        }
    }

    /// Sample carrying a wheel delta.
    pub fn wheel(delta: f32) -> Self {
        Self {
            wheel: Some(delta),
            ..Self::default()
        }
    }

    /// Sample carrying one committed character.
    pub fn character(c: char) -> Self {
        Self {
            ch: Some(c),
            ..Self::default()
        }
    }

    /// Sample carrying one committed key code.
    pub fn key(code: KeyCode) -> Self {
        Self {
            key: Some(code),
            ..Self::default()
        }
    }
}

/// Accumulated pointer/keyboard state for the current tick.
#[derive(Debug, Clone)]
pub struct InputState {
    /// Current pointer position.
    pub mouse_pos: Vec2,
    /// Whether the primary button is currently held.
    pub mouse_down: bool,
    /// Button went down this tick.
    pub pressed_this_tick: bool,
    /// Button went up this tick.
    pub released_this_tick: bool,
    /// The press this tick was a double-click.
    pub double_clicked: bool,
    /// Position of the most recent button-down.
    pub down_pos: Vec2,
    /// Position of the most recent button-up.
    pub up_pos: Vec2,
    /// Wheel delta for this tick.
    pub wheel: f32,
    /// Committed key code for this tick.
    pub key: Option<KeyCode>,
    /// Committed character for this tick.
    pub committed_char: Option<char>,
    /// Candidate (pre-commit) character for this tick.
    pub candidate_char: Option<char>,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            mouse_pos: Vec2::ZERO,
            mouse_down: false,
            pressed_this_tick: false,
            released_this_tick: false,
            double_clicked: false,
            down_pos: Vec2::ZERO,
            up_pos: Vec2::ZERO,
            wheel: 0.0,
            key: None,
            committed_char: None,
            candidate_char: None,
        }
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one sample into the state. Per-tick fields are reset first, so a
    /// sample carrying nothing leaves only the persistent state (position,
    /// held button) behind.
    pub fn begin_tick(&mut self, sample: &InputSample) {
        self.pressed_this_tick = false;
        self.released_this_tick = false;
        self.double_clicked = false;
        self.wheel = 0.0;
        self.key = None;
        self.committed_char = None;
        self.candidate_char = None;

        if let Some(pos) = sample.mouse_pos {
            self.mouse_pos = pos;
        }
        match sample.button {
            Some(ButtonEvent::Down { pos, double_click }) => {
                self.mouse_down = true;
                self.pressed_this_tick = true;
                self.double_clicked = double_click;
                self.down_pos = pos;
            }
            Some(ButtonEvent::Up { pos }) => {
                self.mouse_down = false;
                self.released_this_tick = true;
                self.up_pos = pos;
            }
            None => {}
        }
        if let Some(delta) = sample.wheel {
            self.wheel = delta;
        }
        self.key = sample.key;
        self.committed_char = sample.ch;
        self.candidate_char = sample.candidate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_then_empty_tick_clears_edge_flags() {
        let mut state = InputState::new();
        state.begin_tick(&InputSample::press(Vec2::new(5.0, 5.0)));
        assert!(state.mouse_down);
        assert!(state.pressed_this_tick);

        state.begin_tick(&InputSample::default());
        assert!(state.mouse_down);
        assert!(!state.pressed_this_tick);
        assert_eq!(state.down_pos, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn absent_fields_leave_position_unchanged() {
        let mut state = InputState::new();
        state.begin_tick(&InputSample::motion(Vec2::new(3.0, 4.0)));
        state.begin_tick(&InputSample::wheel(1.0));
        assert_eq!(state.mouse_pos, Vec2::new(3.0, 4.0));
        assert_eq!(state.wheel, 1.0);
    }
}
