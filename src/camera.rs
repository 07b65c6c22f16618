use glam::{Mat4, Vec3};

/// Fixed look-at camera for the viewer.
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 2.5, 6.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy: 45.0_f32.to_radians(),
            znear: 0.1,
            zfar: 100.0,
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// wgpu clip space: glam's `perspective_rh` already maps depth to [0, 1]
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy, self.aspect.max(0.01), self.znear, self.zfar)
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }
}

/// Slow spin about +Y so every side of the tube passes the light.
pub fn spin_model(elapsed_s: f32, radians_per_s: f32) -> Mat4 {
    Mat4::from_rotation_y(elapsed_s * radians_per_s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_puts_target_ahead() {
        let cam = Camera::new(16.0 / 9.0);
        let target_vc = cam.view().transform_point3(cam.target);
        assert!(target_vc.z < 0.0);
        assert!(target_vc.x.abs() < 1e-5);
    }

    #[test]
    fn test_viewport_aspect() {
        let mut cam = Camera::new(1.0);
        cam.set_viewport(1280, 720);
        assert!((cam.aspect - 1280.0 / 720.0).abs() < 1e-6);

        cam.set_viewport(0, 0);
        assert_eq!(cam.aspect, 1.0);
    }

    #[test]
    fn test_spin_starts_at_identity() {
        assert_eq!(spin_model(0.0, 0.5), Mat4::IDENTITY);
    }
}
