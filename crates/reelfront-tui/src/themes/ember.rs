//! Ember, the studio's own palette: charcoal with warm orange highlights

use ratatui::style::Color;

use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        bg0: Color::Rgb(0x16, 0x13, 0x12),
        bg1: Color::Rgb(0x22, 0x1d, 0x1b),
        bg2: Color::Rgb(0x33, 0x2b, 0x27),
        fg0: Color::Rgb(0xf3, 0xe9, 0xdc),
        fg1: Color::Rgb(0xd9, 0xc8, 0xb4),
        muted: Color::Rgb(0x8a, 0x7b, 0x6e),
        accent: Color::Rgb(0xff, 0x7a, 0x3d),
        accent_alt: Color::Rgb(0xf2, 0xb1, 0x4c),
        highlight: Color::Rgb(0x4a, 0x3a, 0x31),
        error: Color::Rgb(0xe5, 0x5b, 0x4f),
        success: Color::Rgb(0x9c, 0xc4, 0x7a),
    }
}
