use nalgebra::Vector2;

// ---------------------------------------------------------------------------
// World (meters, y up) -> screen (pixels, y down)
// ---------------------------------------------------------------------------

/// Pixel mapping for a side-on view with the ground strip at the bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenMapping {
    pub width: f32,
    pub height: f32,
    pub ground_y: f32,           // px from the top where y = 0 m is drawn
    pub pixels_per_meter: f32,
}

impl ScreenMapping {
    /// Window height spans `visible_height_m` meters; ground strip is
    /// `ground_px` tall.
    pub fn new(width: f32, height: f32, ground_px: f32, visible_height_m: f32) -> Self {
        Self {
            width,
            height,
            ground_y: height - ground_px,
            pixels_per_meter: height / visible_height_m,
        }
    }

    /// Screen point for a world position. Launch point sits at the left edge.
    pub fn to_screen(&self, pos: &Vector2<f64>) -> [f32; 2] {
        [
            pos.x as f32 * self.pixels_per_meter,
            self.ground_y - pos.y as f32 * self.pixels_per_meter,
        ]
    }

    pub fn to_pixels(&self, meters: f64) -> f32 {
        meters as f32 * self.pixels_per_meter
    }
}

impl Default for ScreenMapping {
    /// 800x600 window, 100 px of ground, 10 m over the window height.
    fn default() -> Self {
        Self::new(800.0, 600.0, 100.0, 10.0)
    }
}
