//! Sprite list generation for one frame

use glam::Vec2;
use serde::Serialize;

use super::{Renderer, SpriteDraw, SpriteKind, TextDraw};
use crate::consts::*;
use crate::sim::GameState;

/// Emit the whole frame: background, steps, stars, enemies, ufo, player,
/// then the score HUD.
///
/// Inactive entities (vanished steps, collected stars, neutralized enemies)
/// are still emitted, at alpha 0, so the draw order stays stable.
pub fn draw_frame(state: &GameState, renderer: &mut impl Renderer) {
    let camera = Vec2::new(state.config.camera_width / 2.0, state.camera_y);
    renderer.begin_frame(camera);

    let view = Vec2::new(state.config.camera_width, state.config.camera_height);
    renderer.draw_sprite(&SpriteDraw::new(
        SpriteKind::Background,
        camera - view / 2.0,
        view,
    ));

    let world = &state.world;
    for step in &world.steps {
        let alpha = if step.is_vanished() { 0.0 } else { 1.0 };
        renderer.draw_sprite(
            &SpriteDraw::new(SpriteKind::Step, step.pos, Vec2::new(STEP_WIDTH, STEP_HEIGHT))
                .with_alpha(alpha),
        );
    }

    for star in &world.stars {
        let alpha = if star.is_present() { 1.0 } else { 0.0 };
        renderer.draw_sprite(
            &SpriteDraw::new(SpriteKind::Star, star.pos, Vec2::new(STAR_WIDTH, STAR_HEIGHT))
                .with_alpha(alpha),
        );
    }

    for enemy in &world.enemies {
        let alpha = if enemy.is_alive() { 1.0 } else { 0.0 };
        renderer.draw_sprite(
            &SpriteDraw::new(SpriteKind::Enemy, enemy.pos, Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT))
                .with_alpha(alpha),
        );
    }

    renderer.draw_sprite(&SpriteDraw::new(
        SpriteKind::Ufo,
        world.ufo.pos,
        Vec2::new(UFO_WIDTH, UFO_HEIGHT),
    ));
    renderer.draw_sprite(&SpriteDraw::new(
        SpriteKind::Player,
        world.player.pos,
        Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
    ));

    renderer.draw_text(&TextDraw {
        text: format!("HighScore: {}", state.best_score()),
        pos: Vec2::new(16.0, GUI_HEIGHT - 15.0),
    });
    renderer.draw_text(&TextDraw {
        text: format!("Score: {}", state.score()),
        pos: Vec2::new(16.0, GUI_HEIGHT - 35.0),
    });
}

/// Renderer that just records everything (tests, headless dumps)
#[derive(Debug, Clone, Default, Serialize)]
pub struct DrawList {
    pub camera: Vec2,
    pub sprites: Vec<SpriteDraw>,
    pub texts: Vec<TextDraw>,
}

impl DrawList {
    pub fn clear(&mut self) {
        self.sprites.clear();
        self.texts.clear();
    }

    pub fn visible(&self) -> impl Iterator<Item = &SpriteDraw> {
        self.sprites.iter().filter(|s| s.is_visible())
    }

    pub fn count(&self, kind: SpriteKind) -> usize {
        self.sprites.iter().filter(|s| s.kind == kind).count()
    }
}

impl Renderer for DrawList {
    fn begin_frame(&mut self, camera: Vec2) {
        self.clear();
        self.camera = camera;
    }

    fn draw_sprite(&mut self, sprite: &SpriteDraw) {
        self.sprites.push(*sprite);
    }

    fn draw_text(&mut self, text: &TextDraw) {
        self.texts.push(text.clone());
    }
}
