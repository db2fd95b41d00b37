// Screen-space camera for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Orthographic camera mapping pixel coordinates to clip space.
///
/// The origin is the top-left corner of the window with y growing down, so
/// draw commands can use screen-space rectangles directly.
#[derive(Debug, Clone)]
pub struct ScreenCamera {
    /// Viewport width in pixels
    viewport_width: f32,
    /// Viewport height in pixels
    viewport_height: f32,
    /// View-projection matrix
    view_proj: Mat4,
}

impl ScreenCamera {
    /// Create a camera for a viewport of the given pixel size
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        let mut camera = Self {
            viewport_width,
            viewport_height,
            view_proj: Mat4::IDENTITY,
        };
        camera.update_view_proj();
        camera
    }

    /// Update the view-projection matrix
    fn update_view_proj(&mut self) {
        // Top-left origin, y down: top maps to +1, bottom to -1 in clip space
        self.view_proj = Mat4::orthographic_rh(
            0.0,
            self.viewport_width,
            self.viewport_height,
            0.0,
            -1.0,
            1.0,
        );
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
        self.update_view_proj();
    }

    /// Get the view-projection matrix
    pub fn view_proj_matrix(&self) -> Mat4 {
        self.view_proj
    }
}

/// Camera uniform for the GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    /// Create a new camera uniform from a camera
    pub fn new(camera: &ScreenCamera) -> Self {
        Self {
            view_proj: camera.view_proj_matrix().to_cols_array_2d(),
        }
    }
}
