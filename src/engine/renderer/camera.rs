// Screen-space camera for the fixed logical canvas

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

/// Orthographic projection mapping the logical canvas to clip space
///
/// Canvas coordinates run from (0, 0) at the top-left to (width, height)
/// at the bottom-right, so y grows downward like the simulation expects.
/// The window scales the whole canvas.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Logical canvas width
    width: f32,
    /// Logical canvas height
    height: f32,
    /// View-projection matrix
    view_proj: Mat4,
}

impl Camera {
    /// Create a camera covering a logical canvas of the given size
    pub fn new(width: f32, height: f32) -> Self {
        // Top and bottom are swapped so +y points down in canvas space
        let view_proj = Mat4::orthographic_rh(0.0, width, height, 0.0, -1.0, 1.0);
        Self {
            width,
            height,
            view_proj,
        }
    }

    /// Get the view-projection matrix
    pub fn view_proj_matrix(&self) -> Mat4 {
        self.view_proj
    }

    /// Logical canvas size
    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Camera data in the layout the shader expects
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    /// Build the uniform from a camera
    pub fn new(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj_matrix().to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec4;

    fn project(camera: &Camera, x: f32, y: f32) -> (f32, f32) {
        let clip = camera.view_proj_matrix() * Vec4::new(x, y, 0.0, 1.0);
        (clip.x / clip.w, clip.y / clip.w)
    }

    #[test]
    fn test_top_left_maps_to_upper_left_ndc() {
        let camera = Camera::new(1000.0, 500.0);
        let (x, y) = project(&camera, 0.0, 0.0);
        assert_relative_eq!(x, -1.0);
        assert_relative_eq!(y, 1.0);
    }

    #[test]
    fn test_bottom_right_maps_to_lower_right_ndc() {
        let camera = Camera::new(1000.0, 500.0);
        let (x, y) = project(&camera, 1000.0, 500.0);
        assert_relative_eq!(x, 1.0);
        assert_relative_eq!(y, -1.0);
    }

    #[test]
    fn test_y_grows_downward() {
        let camera = Camera::new(1000.0, 500.0);
        let (_, y_high) = project(&camera, 0.0, 100.0);
        let (_, y_low) = project(&camera, 0.0, 400.0);
        assert!(y_high > y_low);
    }

    #[test]
    fn test_center_maps_to_origin() {
        let camera = Camera::new(1000.0, 500.0);
        let (x, y) = project(&camera, 500.0, 250.0);
        assert_relative_eq!(x, 0.0);
        assert_relative_eq!(y, 0.0);
    }
}
