use glam::Vec2;

/// Letterboxed mapping between the physical window and the logical canvas.
///
/// The canvas keeps its aspect ratio and is centered in the window with bars
/// on the long axis. Window coordinates are y-down with the origin at the
/// top-left; canvas coordinates are y-up with the origin at the bottom-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    canvas: Vec2,
    window: Vec2,
    scale: f32,
    offset: Vec2,
}

impl Letterbox {
    pub fn new(canvas_width: f32, canvas_height: f32) -> Self {
        let canvas = Vec2::new(canvas_width, canvas_height);
        let mut letterbox = Self {
            canvas,
            window: canvas,
            scale: 1.0,
            offset: Vec2::ZERO,
        };
        letterbox.resize(canvas_width, canvas_height);
        letterbox
    }

    /// Recompute the fit for a new window size.
    pub fn resize(&mut self, window_width: f32, window_height: f32) {
        self.window = Vec2::new(window_width.max(1.0), window_height.max(1.0));
        let horiz_ratio = self.window.x / self.canvas.x;
        let vert_ratio = self.window.y / self.canvas.y;
        self.scale = horiz_ratio.min(vert_ratio);
        self.offset = (self.window - self.canvas * self.scale) * 0.5;
    }

    /// Physical pixels per canvas unit.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Size of the bars: left/right in `x`, top/bottom in `y`.
    pub fn bars(&self) -> Vec2 {
        self.offset
    }

    /// Map a window position to canvas space.
    /// Returns `None` for points on the bars.
    pub fn to_canvas(&self, window_x: f32, window_y: f32) -> Option<Vec2> {
        let local = (Vec2::new(window_x, window_y) - self.offset) / self.scale;
        if local.x < 0.0 || local.y < 0.0 || local.x > self.canvas.x || local.y > self.canvas.y {
            return None;
        }
        Some(Vec2::new(local.x, self.canvas.y - local.y))
    }

    /// Map a canvas position back to window space.
    pub fn to_window(&self, canvas_pos: Vec2) -> Vec2 {
        let flipped = Vec2::new(canvas_pos.x, self.canvas.y - canvas_pos.y);
        flipped * self.scale + self.offset
    }
}
