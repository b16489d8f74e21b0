//! Fill styles for game elements

use serde::{Deserialize, Serialize};

use crate::sim::BodyKind;

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    /// `#RRGGBB` form
    pub fn to_hex(self) -> String {
        format!("#{:06X}", self.0 & 0xFF_FFFF)
    }
}

/// How a shape is filled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub fill: Color,
    /// Character used by text-mode surfaces
    pub glyph: char,
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = Color(0xD6D1F5);
    pub const PADDLE: Color = Color(0xFFB643);
    pub const BALL: Color = Color(0xFFFFFF);
    pub const BRICK_ONE_HIT: Color = Color(0x4535AA);
    pub const BRICK_TWO_HITS: Color = Color(0xED639E);
    pub const BRICK_THREE_HITS: Color = Color(0x8FE1A2);
}

/// Brick style as a pure function of hits left
pub fn brick_style(remaining_hits: u8) -> Style {
    match remaining_hits {
        3 => Style {
            fill: colors::BRICK_THREE_HITS,
            glyph: '#',
        },
        2 => Style {
            fill: colors::BRICK_TWO_HITS,
            glyph: '+',
        },
        _ => Style {
            fill: colors::BRICK_ONE_HIT,
            glyph: '-',
        },
    }
}

/// Style for a freshly spawned body
pub fn style_for(kind: BodyKind, hits: Option<u8>) -> Style {
    match kind {
        BodyKind::Ball => Style {
            fill: colors::BALL,
            glyph: 'o',
        },
        BodyKind::Paddle => Style {
            fill: colors::PADDLE,
            glyph: '=',
        },
        BodyKind::Brick => brick_style(hits.unwrap_or(1)),
    }
}
