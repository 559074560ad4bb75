//! Screen to logical-space input translation

use glam::Vec2;

use crate::consts::{GUI_HEIGHT, GUI_WIDTH};
use crate::sim::TickInput;

/// Fit viewport: scales a fixed logical area uniformly into the screen and
/// centres it, leaving letterbox bars on the long axis.
///
/// Screen coordinates are pixels with y down; logical coordinates have y up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Logical size
    pub world: Vec2,
    /// Screen size in pixels
    pub screen: Vec2,
}

impl Viewport {
    pub fn new(world: Vec2, screen: Vec2) -> Self {
        Self { world, screen }
    }

    /// Viewport over the 320 x 480 GUI space used for touch zones
    pub fn gui(screen_width: f32, screen_height: f32) -> Self {
        Self::new(
            Vec2::new(GUI_WIDTH, GUI_HEIGHT),
            Vec2::new(screen_width, screen_height),
        )
    }

    pub fn resize(&mut self, screen_width: f32, screen_height: f32) {
        self.screen = Vec2::new(screen_width, screen_height);
    }

    /// Pixels per logical unit
    pub fn scale(&self) -> f32 {
        (self.screen.x / self.world.x).min(self.screen.y / self.world.y)
    }

    /// Letterbox offset of the logical area's bottom-left corner
    /// (pixels, y up from the bottom edge)
    pub fn offset(&self) -> Vec2 {
        (self.screen - self.world * self.scale()) / 2.0
    }

    /// Screen pixel -> logical coordinates
    pub fn unproject(&self, screen: Vec2) -> Vec2 {
        let scale = self.scale();
        if scale <= 0.0 {
            return Vec2::splat(-1.0);
        }
        let flipped = Vec2::new(screen.x, self.screen.y - screen.y);
        (flipped - self.offset()) / scale
    }

    /// Logical coordinates -> screen pixel
    pub fn project(&self, logical: Vec2) -> Vec2 {
        let p = logical * self.scale() + self.offset();
        Vec2::new(p.x, self.screen.y - p.y)
    }
}

/// Accumulates pointer events between frames.
///
/// A press arms the one-shot `action` flag until the next snapshot; the
/// pointer position is reported for as long as it is held.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    held: Option<Vec2>,
    pressed: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, x: f32, y: f32) {
        self.held = Some(Vec2::new(x, y));
        self.pressed = true;
    }

    /// Ignored unless the pointer is down
    pub fn moved(&mut self, x: f32, y: f32) {
        if self.held.is_some() {
            self.held = Some(Vec2::new(x, y));
        }
    }

    pub fn release(&mut self) {
        self.held = None;
    }

    pub fn is_held(&self) -> bool {
        self.held.is_some()
    }

    /// Input for the next frame; consumes the press edge
    pub fn snapshot(&mut self, viewport: &Viewport) -> TickInput {
        let input = TickInput {
            action: self.pressed,
            pointer: self.held.map(|p| viewport.unproject(p)),
        };
        self.pressed = false;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLAYER_MOVE_ACCEL;
    use crate::sim::horizontal_accel;

    fn accel_at(viewport: &Viewport, x: f32, y: f32) -> f32 {
        let mut tracker = PointerTracker::new();
        tracker.press(x, y);
        let input = tracker.snapshot(viewport);
        horizontal_accel(input.pointer, PLAYER_MOVE_ACCEL)
    }

    #[test]
    fn test_unproject_exact_fit() {
        let vp = Viewport::gui(640.0, 960.0);
        assert_eq!(vp.scale(), 2.0);
        assert_eq!(vp.offset(), Vec2::ZERO);
        assert_eq!(vp.unproject(Vec2::new(100.0, 10.0)), Vec2::new(50.0, 475.0));
        assert_eq!(vp.unproject(Vec2::new(640.0, 960.0)), Vec2::new(320.0, 0.0));
    }

    #[test]
    fn test_project_inverts_unproject() {
        let vp = Viewport::gui(1000.0, 700.0);
        let logical = Vec2::new(123.0, 321.0);
        let back = vp.unproject(vp.project(logical));
        assert!((back - logical).length() < 1e-3);
    }

    #[test]
    fn test_letterbox_bars_are_outside() {
        // Wider than 2:3, bars left and right
        let vp = Viewport::gui(1000.0, 960.0);
        assert_eq!(vp.offset(), Vec2::new(180.0, 0.0));
        assert_eq!(accel_at(&vp, 100.0, 480.0), 0.0);
        assert_eq!(accel_at(&vp, 950.0, 480.0), 0.0);
        assert_eq!(accel_at(&vp, 200.0, 480.0), 5.0);
        assert_eq!(accel_at(&vp, 800.0, 480.0), -5.0);
    }

    #[test]
    fn test_touch_halves() {
        let vp = Viewport::gui(320.0, 480.0);
        assert_eq!(accel_at(&vp, 10.0, 240.0), 5.0);
        assert_eq!(accel_at(&vp, 159.0, 240.0), 5.0);
        assert_eq!(accel_at(&vp, 160.0, 240.0), -5.0);
        assert_eq!(accel_at(&vp, 310.0, 240.0), -5.0);
    }

    #[test]
    fn test_press_is_one_shot() {
        let vp = Viewport::gui(320.0, 480.0);
        let mut tracker = PointerTracker::new();
        assert_eq!(tracker.snapshot(&vp), TickInput::default());

        tracker.press(10.0, 10.0);
        let first = tracker.snapshot(&vp);
        assert!(first.action);
        assert!(first.pointer.is_some());

        tracker.moved(300.0, 10.0);
        let second = tracker.snapshot(&vp);
        assert!(!second.action);
        assert_eq!(second.pointer, Some(Vec2::new(300.0, 470.0)));

        tracker.release();
        assert_eq!(tracker.snapshot(&vp), TickInput::default());

        // Moves without a press are hover only
        tracker.moved(50.0, 50.0);
        assert!(!tracker.is_held());
    }
}
