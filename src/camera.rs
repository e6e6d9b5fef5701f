// Orbit camera state driven by mouse and keyboard input

use glam::Mat4;

use crate::math;

const FRICTION: f32 = 0.05;
const MIN_DIST: f32 = 3.0;
const MAX_DIST: f32 = 30.0;
const ZOOM_SENS: f32 = 0.025;
const PAN_SENS: f32 = 0.01;
const KEY_SPEED: f32 = 0.05;

/// The per-frame view of the camera handed to creature animate functions.
#[derive(Clone, Copy, Debug)]
pub struct OrbitView {
    pub theta: f32,
    pub phi: f32,
    pub distance: f32,
}

/// Left-drag spins the creatures (theta/phi with drag friction), right-drag
/// pans the camera, the wheel zooms within a clamped range.
pub struct OrbitCamera {
    pub theta: f32,
    pub phi: f32,
    pub distance: f32,
    pan_x: f32,
    pan_y: f32,
    d_theta: f32,
    d_phi: f32,
    left_drag: bool,
    right_drag: bool,
    last_cursor: Option<(f32, f32)>,
    surface_size: (f32, f32),
}

impl OrbitCamera {
    pub fn new(distance: f32) -> Self {
        Self {
            theta: 0.0,
            phi: 0.0,
            distance,
            pan_x: 0.0,
            pan_y: 0.0,
            d_theta: 0.0,
            d_phi: 0.0,
            left_drag: false,
            right_drag: false,
            last_cursor: None,
            surface_size: (1.0, 1.0),
        }
    }

    pub fn set_surface_size(&mut self, width: f32, height: f32) {
        self.surface_size = (width.max(1.0), height.max(1.0));
    }

    pub fn begin_drag(&mut self, right_button: bool) {
        if right_button {
            self.right_drag = true;
        } else {
            self.left_drag = true;
        }
    }

    pub fn end_drag(&mut self) {
        self.left_drag = false;
        self.right_drag = false;
        self.last_cursor = None;
    }

    pub fn cursor_moved(&mut self, x: f32, y: f32) {
        let (px, py) = match self.last_cursor.replace((x, y)) {
            Some(prev) => prev,
            None => return,
        };
        let (dx, dy) = (x - px, y - py);

        if self.left_drag {
            self.d_theta = dx * std::f32::consts::TAU / self.surface_size.0;
            self.d_phi = dy * std::f32::consts::TAU / self.surface_size.1;
            self.theta += self.d_theta;
            self.phi += self.d_phi;
        } else if self.right_drag {
            self.pan_x += dx * PAN_SENS;
            self.pan_y -= dy * PAN_SENS;
        }
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance - delta * ZOOM_SENS).clamp(MIN_DIST, MAX_DIST);
    }

    /// WASD nudges the spin the same way a short drag would.
    pub fn key_spin(&mut self, dx: f32, dy: f32) {
        self.d_theta += dx * KEY_SPEED;
        self.d_phi += dy * KEY_SPEED;
    }

    /// Per-frame update: while not dragging, the last drag velocity decays
    /// and keeps the spin coasting.
    pub fn update(&mut self) {
        if !self.left_drag {
            self.d_theta *= 1.0 - FRICTION;
            self.d_phi *= 1.0 - FRICTION;
            self.theta += self.d_theta;
            self.phi += self.d_phi;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        let m = math::translated(Mat4::IDENTITY, 0.0, 0.0, -self.distance);
        let m = math::rotated_x(m, -self.pan_y);
        math::rotated_y(m, self.pan_x)
    }

    pub fn view(&self) -> OrbitView {
        OrbitView {
            theta: self.theta,
            phi: self.phi,
            distance: self.distance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zoom_is_clamped() {
        let mut cam = OrbitCamera::new(20.0);
        for _ in 0..1000 {
            cam.zoom(10.0);
        }
        assert_relative_eq!(cam.distance, MIN_DIST);
        for _ in 0..1000 {
            cam.zoom(-10.0);
        }
        assert_relative_eq!(cam.distance, MAX_DIST);
    }

    #[test]
    fn drag_spin_coasts_with_friction() {
        let mut cam = OrbitCamera::new(20.0);
        cam.set_surface_size(800.0, 600.0);
        cam.begin_drag(false);
        cam.cursor_moved(100.0, 100.0);
        cam.cursor_moved(140.0, 100.0);
        cam.end_drag();

        let before = cam.theta;
        cam.update();
        let after_one = cam.theta;
        assert!(after_one > before);

        for _ in 0..500 {
            cam.update();
        }
        let settled = cam.theta;
        cam.update();
        assert_relative_eq!(cam.theta, settled, epsilon = 1e-4);
    }

    #[test]
    fn view_matrix_backs_away_from_origin() {
        let cam = OrbitCamera::new(12.0);
        let eye = cam.view_matrix().transform_point3(glam::Vec3::ZERO);
        assert_relative_eq!(eye.z, -12.0, epsilon = 1e-6);
    }
}
