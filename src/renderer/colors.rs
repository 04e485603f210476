//! Fixed colour table (RGBA, 0.0 - 1.0)

pub type Color = [f32; 4];

/// Bomb fill colours, indexed by `Bomb::palette_index`
pub const BOMB_PALETTE: [Color; 6] = [
    [1.0, 0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0, 1.0],
    [0.0, 0.0, 1.0, 1.0],
    [1.0, 1.0, 0.0, 1.0],
    [1.0, 0.0, 1.0, 1.0],
    [0.0, 1.0, 1.0, 1.0],
];

/// Gravity field blackout
pub const GRAVITY: Color = [0.0, 0.0, 0.0, 1.0];
/// EMP flash, half transparent
pub const EMP_OVERLAY: Color = [1.0, 1.0, 0.0, 0.5];
pub const SCORE_TEXT: Color = [0.0, 0.0, 1.0, 1.0];
pub const WIN_TEXT: Color = [0.0, 1.0, 0.0, 1.0];

/// Palette entry for a bomb, wrapping out-of-range indices
pub fn bomb_color(index: u8) -> Color {
    BOMB_PALETTE[index as usize % BOMB_PALETTE.len()]
}
