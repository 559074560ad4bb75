//! Canvas 2D renderer for the browser build

use std::collections::HashMap;

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{Renderer, SpriteDraw, SpriteKind, TextDraw};
use crate::consts::{CAMERA_HEIGHT, CAMERA_WIDTH};
use crate::platform::Viewport;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    images: HashMap<SpriteKind, HtmlImageElement>,
    /// Camera-sized world view
    view: Viewport,
    /// 320 x 480 HUD view
    gui: Viewport,
    camera: Vec2,
}

impl CanvasRenderer {
    /// Grab the 2D context and start loading every sprite image from
    /// `asset_dir`. Sprites whose image is not loaded yet are skipped.
    pub fn new(canvas: &HtmlCanvasElement, asset_dir: &str) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        ctx.set_image_smoothing_enabled(false);

        let mut images = HashMap::new();
        for kind in SpriteKind::ALL {
            let image = HtmlImageElement::new()?;
            image.set_src(&format!("{}/{}", asset_dir, kind.file()));
            images.insert(kind, image);
        }

        let (w, h) = (canvas.width() as f32, canvas.height() as f32);
        Ok(Self {
            ctx,
            images,
            view: Viewport::new(Vec2::new(CAMERA_WIDTH, CAMERA_HEIGHT), Vec2::new(w, h)),
            gui: Viewport::gui(w, h),
            camera: Vec2::ZERO,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.view.resize(width as f32, height as f32);
        self.gui.resize(width as f32, height as f32);
    }
}

impl Renderer for CanvasRenderer {
    fn begin_frame(&mut self, camera: Vec2) {
        self.camera = camera;
        self.ctx.set_global_alpha(1.0);
        self.ctx.set_fill_style_str("#000");
        self.ctx
            .fill_rect(0.0, 0.0, self.view.screen.x as f64, self.view.screen.y as f64);
    }

    fn draw_sprite(&mut self, sprite: &SpriteDraw) {
        if !sprite.is_visible() {
            return;
        }
        let Some(image) = self.images.get(&sprite.kind) else {
            return;
        };
        if !image.complete() || image.natural_width() == 0 {
            return;
        }

        // Camera-relative, then y-flipped to the sprite's top-left corner
        let origin = self.camera - self.view.world / 2.0;
        let top_left = self
            .view
            .project(sprite.pos - origin + Vec2::new(0.0, sprite.size.y));
        let size = sprite.size * self.view.scale();
        let r = sprite.region;

        self.ctx.set_global_alpha(sprite.alpha as f64);
        let drawn = self
            .ctx
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                image,
                r.x as f64,
                r.y as f64,
                r.width as f64,
                r.height as f64,
                top_left.x as f64,
                top_left.y as f64,
                size.x as f64,
                size.y as f64,
            );
        if let Err(e) = drawn {
            log::warn!("Failed to draw {:?}: {:?}", sprite.kind, e);
        }
    }

    fn draw_text(&mut self, text: &TextDraw) {
        let pos = self.gui.project(text.pos);
        let px = (14.0 * self.gui.scale()).round().max(1.0);
        self.ctx.set_global_alpha(1.0);
        self.ctx.set_font(&format!("{}px monospace", px));
        self.ctx.set_fill_style_str("#fff");
        let _ = self.ctx.fill_text(&text.text, pos.x as f64, pos.y as f64);
    }
}
