//! Asset catalog: logical texture and animation identifiers.
//!
//! The terminal renderer maps these to glyphs and colors instead of image
//! files, but the catalog mirrors the original sprite set so entity sizes
//! and scene composition stay faithful.

/// Obstacle color theme, cycled by score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipePalette {
    Green,
    Red,
}

/// Logical texture identifiers for every renderable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureId {
    /// One of the 8 cycling background scenes (index 0..8).
    Background(u8),
    Bird,
    PipeTop(PipePalette),
    PipeBottom(PipePalette),
    /// Invisible marker used only for score-overlap detection.
    GapMarker,
    Ground,
    MessageInitial,
    GameOverBanner,
    RestartButton,
    /// Scoreboard digit glyph 0..=9.
    Digit(u8),
}

impl TextureId {
    /// Logical size in world units, used for AABB extents and rendering.
    pub fn size(&self) -> (f32, f32) {
        match self {
            TextureId::Background(_) => (288.0, 512.0),
            TextureId::Bird => (64.0, 64.0),
            TextureId::PipeTop(_) | TextureId::PipeBottom(_) => (52.0, 320.0),
            TextureId::GapMarker => (2.0, 98.0),
            TextureId::Ground => (336.0, 112.0),
            TextureId::MessageInitial => (184.0, 267.0),
            TextureId::GameOverBanner => (192.0, 42.0),
            TextureId::RestartButton => (140.0, 48.0),
            TextureId::Digit(_) => (25.0, 36.0),
        }
    }

    /// Digit glyph for a single decimal digit (0..=9).
    pub fn digit(d: u8) -> TextureId {
        debug_assert!(d < 10);
        TextureId::Digit(d)
    }
}

/// Named animations played on sprites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationId {
    BirdClapWings,
    BirdStop,
    GroundMoving,
    GroundStop,
}
