// Screen-space camera for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Pixel-space orthographic camera
///
/// Origin at the top-left corner, y growing downward, one unit per pixel.
/// Destination rectangles from the simulation map straight onto the screen
/// with no further conversion.
#[derive(Debug, Clone)]
pub struct ScreenCamera {
    width: f32,
    height: f32,
    view_proj: Mat4,
}

impl ScreenCamera {
    /// Create a camera covering `width` x `height` pixels
    pub fn new(width: f32, height: f32) -> Self {
        let mut camera = Self {
            width,
            height,
            view_proj: Mat4::IDENTITY,
        };
        camera.update_view_proj();
        camera
    }

    fn update_view_proj(&mut self) {
        // Top-left origin, y-down: top maps to +1 in NDC, bottom to -1
        self.view_proj = Mat4::orthographic_rh(0.0, self.width, self.height, 0.0, -1.0, 1.0);
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
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
