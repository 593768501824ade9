//! Colors shared by the built-in widgets.

use glint_core::color::Color;

/// The widget color palette. Hosts may replace any entry before the frame
/// begins.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub window_bg: Color,
    pub window_border: Color,
    pub title_bg: Color,
    pub title_bg_focused: Color,
    pub title_text: Color,

    pub text: Color,
    pub text_dim: Color,

    pub widget_bg: Color,
    pub widget_hover: Color,
    pub widget_press: Color,
    pub accent: Color,

    pub tab_bg: Color,
    pub tab_active: Color,
    pub dock_preview: Color,

    pub tooltip_bg: Color,
    pub tooltip_text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            window_bg: Color::from_rgb_u8(30, 32, 38),
            window_border: Color::from_rgb_u8(58, 62, 72),
            title_bg: Color::from_rgb_u8(42, 45, 53),
            title_bg_focused: Color::from_rgb_u8(56, 68, 94),
            title_text: Color::from_rgb_u8(220, 222, 228),

            text: Color::from_rgb_u8(210, 212, 218),
            text_dim: Color::from_rgb_u8(140, 144, 152),

            widget_bg: Color::from_rgb_u8(52, 56, 64),
            widget_hover: Color::from_rgb_u8(64, 70, 82),
            widget_press: Color::from_rgb_u8(44, 48, 56),
            accent: Color::from_rgb_u8(86, 140, 220),

            tab_bg: Color::from_rgb_u8(38, 41, 48),
            tab_active: Color::from_rgb_u8(56, 68, 94),
            dock_preview: Color::rgba(0.34, 0.55, 0.86, 0.35),

            tooltip_bg: Color::from_rgb_u8(24, 25, 30),
            tooltip_text: Color::from_rgb_u8(222, 224, 230),
        }
    }
}
