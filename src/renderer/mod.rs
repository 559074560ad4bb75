//! Rendering module
//!
//! The simulation never draws. Each frame [`draw_frame`] walks the state and
//! hands textured quads plus HUD text to a [`Renderer`]; the host decides how
//! to put them on screen.

pub mod sprites;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

use glam::Vec2;
use serde::Serialize;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use sprites::{DrawList, draw_frame};

/// Every texture the game uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SpriteKind {
    Background,
    Step,
    Star,
    Enemy,
    Ufo,
    Player,
}

impl SpriteKind {
    pub const ALL: [SpriteKind; 6] = [
        SpriteKind::Background,
        SpriteKind::Step,
        SpriteKind::Star,
        SpriteKind::Enemy,
        SpriteKind::Ufo,
        SpriteKind::Player,
    ];

    /// Image file relative to the asset directory
    pub fn file(self) -> &'static str {
        match self {
            SpriteKind::Background => "back.png",
            SpriteKind::Step => "step.png",
            SpriteKind::Star => "star.png",
            SpriteKind::Enemy => "monster06.png",
            SpriteKind::Ufo => "ufo.png",
            SpriteKind::Player => "uma.png",
        }
    }

    /// Source rectangle inside the image (pixels, origin top-left)
    pub fn region(self) -> TextureRegion {
        match self {
            SpriteKind::Background => TextureRegion::new(0, 0, 540, 810),
            SpriteKind::Step => TextureRegion::new(0, 0, 144, 36),
            SpriteKind::Star => TextureRegion::new(0, 0, 72, 72),
            SpriteKind::Enemy => TextureRegion::new(0, 0, 160, 160),
            SpriteKind::Ufo => TextureRegion::new(0, 0, 120, 74),
            SpriteKind::Player => TextureRegion::new(0, 0, 72, 72),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextureRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl TextureRegion {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// One textured quad in world units (bottom-left origin, y up)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpriteDraw {
    pub kind: SpriteKind,
    pub region: TextureRegion,
    pub pos: Vec2,
    pub size: Vec2,
    /// 0.0 = invisible
    pub alpha: f32,
}

impl SpriteDraw {
    pub fn new(kind: SpriteKind, pos: Vec2, size: Vec2) -> Self {
        Self {
            kind,
            region: kind.region(),
            pos,
            size,
            alpha: 1.0,
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn is_visible(&self) -> bool {
        self.alpha > 0.0
    }
}

/// HUD line in GUI coordinates (320 x 480, y up, baseline position)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextDraw {
    pub text: String,
    pub pos: Vec2,
}

/// Sink for one frame of draw calls
pub trait Renderer {
    /// Called once before any sprite with the camera centre in world units
    fn begin_frame(&mut self, _camera: Vec2) {}

    fn draw_sprite(&mut self, sprite: &SpriteDraw);

    fn draw_text(&mut self, _text: &TextDraw) {}
}
