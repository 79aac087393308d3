//! Color themes for the scenery

use super::Color;

/// A scenery palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub sky: Color,
    pub ground: Color,
    pub obstacle: Color,
    pub mountain: Color,
}

pub static THEMES: [Theme; 3] = [
    Theme {
        name: "City",
        sky: Color::rgb(0x8e, 0xd0, 0xff),
        ground: Color::rgb(0x27, 0xae, 0x60),
        obstacle: Color::rgb(0xc0, 0x39, 0x2b),
        mountain: Color::rgb(0x5b, 0xa3, 0xd4),
    },
    Theme {
        name: "Forest",
        sky: Color::rgb(0xb8, 0xe2, 0xc8),
        ground: Color::rgb(0x2f, 0x85, 0x5a),
        obstacle: Color::rgb(0x2b, 0x6f, 0x3a),
        mountain: Color::rgb(0x7d, 0xcf, 0xa6),
    },
    Theme {
        name: "Desert",
        sky: Color::rgb(0xff, 0xe4, 0xa3),
        ground: Color::rgb(0xd4, 0xa3, 0x73),
        obstacle: Color::rgb(0x9c, 0x66, 0x44),
        mountain: Color::rgb(0xf1, 0xc2, 0x7d),
    },
];

/// Colors shared by every theme
pub mod colors {
    use super::Color;

    pub const PLAYER: Color = Color::rgb(0x34, 0x49, 0x5e);
    pub const PLAYER_HEAD: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const COIN: Color = Color::rgb(0xf1, 0xc4, 0x0f);
    pub const DEBUG_PANEL: Color = Color::rgba(0, 0, 0, 0xaa);
    pub const DEBUG_TEXT: Color = Color::rgb(0xff, 0xff, 0xff);
}

/// Theme for a stored index; anything out of range falls back to the first
pub fn theme(index: usize) -> &'static Theme {
    THEMES.get(index).unwrap_or(&THEMES[0])
}

/// Index of the theme after `index`, wrapping around
pub fn next_theme(index: usize) -> usize {
    (index + 1) % THEMES.len()
}
