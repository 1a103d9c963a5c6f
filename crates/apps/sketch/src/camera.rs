//! Orbit camera steered by horizontal mouse position
//!
//! The camera circles the scene center in the XY plane at a fixed height,
//! with +Z up. Moving the mouse away from the viewport center sets the orbit
//! speed; inside the deadzone the camera holds still.

use crate::config::CameraSettings;
use glam::Vec3;
use scene::RenderSurface;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    /// Current orbit angle in radians
    pub angle: f32,
    /// Radians added to `angle` per frame
    pub speed: f32,
    settings: CameraSettings,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(CameraSettings::default())
    }
}

impl OrbitCamera {
    pub fn new(settings: CameraSettings) -> Self {
        Self {
            angle: 0.0,
            speed: settings.rotation_speed,
            settings,
        }
    }

    /// Eye position for the current angle
    pub fn eye(&self) -> Vec3 {
        Vec3::new(
            self.angle.cos() * self.settings.radius,
            self.angle.sin() * self.settings.radius,
            self.settings.height,
        )
    }

    /// Step the orbit by one frame
    pub fn advance(&mut self) {
        self.angle += self.speed;
    }

    /// Map a mouse x coordinate to an orbit speed
    pub fn steer(&mut self, mouse_x: f32, viewport_width: f32) {
        let offset = mouse_x - viewport_width / 2.0;
        self.speed = if offset.abs() > self.settings.deadzone {
            -self.settings.steer_gain * offset
        } else {
            0.0
        };
    }

    /// Point the surface's camera at the scene center
    pub fn apply<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        surface.camera(self.eye(), Vec3::ZERO, Vec3::Z);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_eye() {
        let camera = OrbitCamera::default();
        assert_eq!(camera.eye(), Vec3::new(300.0, 0.0, 200.0));
        assert_eq!(camera.speed, 0.01);
    }

    #[test]
    fn test_advance_orbits() {
        let mut camera = OrbitCamera::default();
        camera.speed = std::f32::consts::FRAC_PI_2;
        camera.advance();

        let eye = camera.eye();
        assert!(eye.x.abs() < 1e-3);
        assert!((eye.y - 300.0).abs() < 1e-3);
        assert_eq!(eye.z, 200.0);
    }

    #[test]
    fn test_steer_deadzone() {
        let mut camera = OrbitCamera::default();

        camera.steer(600.0, 1200.0);
        assert_eq!(camera.speed, 0.0);

        camera.steer(625.0, 1200.0);
        assert_eq!(camera.speed, 0.0);

        camera.steer(574.0, 1200.0);
        assert!((camera.speed - 0.0026).abs() < 1e-6);
    }

    #[test]
    fn test_steer_direction() {
        let mut camera = OrbitCamera::default();

        camera.steer(1100.0, 1200.0);
        assert!((camera.speed + 0.05).abs() < 1e-6);

        camera.steer(100.0, 1200.0);
        assert!((camera.speed - 0.05).abs() < 1e-6);
    }
}
