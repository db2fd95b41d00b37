// Pixel-space geometry and movement helpers

/// Axis-aligned rectangle in screen space (top-left origin, y grows down)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Left edge in pixels
    pub x: i32,
    /// Top edge in pixels
    pub y: i32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle from a top-left corner and a size
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Move the rectangle by a pixel offset
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Center of the rectangle in fractional pixels
    pub fn center(&self) -> (f32, f32) {
        (
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }
}

/// Pixel displacement covered at `speed` px/s over `delta_ms` milliseconds,
/// rounded to the nearest whole pixel
pub fn movement_step(speed: u32, delta_ms: u64) -> i32 {
    ((speed as f64 * delta_ms as f64) / 1000.0).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_translate() {
        let mut rect = Rect::new(10, 20, 64, 64);
        rect.translate(-3, 7);
        assert_eq!(rect.x, 7);
        assert_eq!(rect.y, 27);
        assert_eq!(rect.width, 64);
        assert_eq!(rect.height, 64);
    }

    #[test]
    fn test_rect_center() {
        let rect = Rect::new(0, 0, 64, 32);
        assert_eq!(rect.center(), (32.0, 16.0));

        let rect = Rect::new(-10, 10, 20, 20);
        assert_eq!(rect.center(), (0.0, 20.0));
    }

    #[test]
    fn test_movement_step_rounds_to_nearest() {
        // 100 px/s for 76 ms is 7.6 px, rounds up
        assert_eq!(movement_step(100, 76), 8);
        // 100 px/s for 33 ms is 3.3 px, rounds down
        assert_eq!(movement_step(100, 33), 3);
    }

    #[test]
    fn test_movement_step_whole_second() {
        assert_eq!(movement_step(120, 1000), 120);
    }

    #[test]
    fn test_movement_step_zero_delta() {
        assert_eq!(movement_step(100, 0), 0);
    }
}
