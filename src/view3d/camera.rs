//! Orbit camera for the 3D preview
//!
//! Spherical coordinates around a fixed pivot. The world is Y-down (the
//! blueprint's vertical axis maps to Z, floor level sits at positive Y),
//! so "above the scene" means negative pitch.

use macroquad::math::{vec3, Vec3};

use crate::ui::Rect;

/// Multiplied into the distance per scroll notch toward the scene.
pub const ZOOM_IN_FACTOR: f32 = 0.95;
/// Multiplied into the distance per scroll notch away from the scene.
pub const ZOOM_OUT_FACTOR: f32 = 1.05;

const NEAR_PLANE: f32 = 1.0;

/// A projected point: screen position plus view-space depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    pub depth: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    /// Horizontal angle in degrees, unrestricted.
    pub yaw: f32,
    /// Vertical angle in degrees, kept inside the open interval (-90, 0).
    pub pitch: f32,
    /// Distance from the pivot, adjusted multiplicatively by zoom.
    pub distance: f32,
    pub pivot: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y: f32,
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: -30.0,
            distance: 1000.0,
            pivot: vec3(0.0, 150.0, 0.0),
            fov_y: 55.0,
        }
    }

    /// Apply a pointer drag. Yaw wraps freely; the pitch only moves while
    /// the result stays strictly between -90 and 0 degrees, so the camera
    /// can neither flip over the top nor dive under the floor.
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        let next = self.pitch - pitch_delta;
        if next > -90.0 && next < 0.0 {
            self.pitch = next;
        }
    }

    /// Scroll zoom: negative delta moves in, anything else moves out.
    pub fn zoom(&mut self, delta: f32) {
        let factor = if delta < 0.0 {
            ZOOM_IN_FACTOR
        } else {
            ZOOM_OUT_FACTOR
        };
        self.distance *= factor;
    }

    /// Camera position on the orbit sphere.
    pub fn eye(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        vec3(
            self.pivot.x + self.distance * pitch.cos() * yaw.sin(),
            self.pivot.y + self.distance * pitch.sin(),
            self.pivot.z - self.distance * pitch.cos() * yaw.cos(),
        )
    }

    /// View basis: (right, down, forward). Screen x grows along `right`,
    /// screen y along `down` (the world is Y-down, which keeps this trivial).
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = (self.pivot - self.eye()).normalize();
        let right = vec3(0.0, 1.0, 0.0).cross(forward).normalize();
        let down = forward.cross(right);
        (right, down, forward)
    }

    /// Project a world point into a viewport. None when behind the camera.
    pub fn project(&self, point: Vec3, viewport: Rect) -> Option<ScreenPoint> {
        let eye = self.eye();
        let (right, down, forward) = self.basis();

        let rel = point - eye;
        let depth = rel.dot(forward);
        if depth < NEAR_PLANE {
            return None;
        }

        let focal = (viewport.h * 0.5) / (self.fov_y.to_radians() * 0.5).tan();
        Some(ScreenPoint {
            x: viewport.x + viewport.w * 0.5 + rel.dot(right) * focal / depth,
            y: viewport.y + viewport.h * 0.5 + rel.dot(down) * focal / depth,
            depth,
        })
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_scroll_zooms_in() {
        let mut camera = OrbitCamera::new();
        camera.zoom(-10.0);
        assert!((camera.distance - 1000.0 * ZOOM_IN_FACTOR).abs() < 1e-3);
    }

    #[test]
    fn positive_scroll_zooms_out() {
        let mut camera = OrbitCamera::new();
        camera.zoom(10.0);
        assert!((camera.distance - 1000.0 * ZOOM_OUT_FACTOR).abs() < 1e-3);
    }

    #[test]
    fn zoom_compounds_multiplicatively() {
        let mut camera = OrbitCamera::new();
        camera.zoom(1.0);
        camera.zoom(1.0);
        assert!((camera.distance - 1000.0 * ZOOM_OUT_FACTOR * ZOOM_OUT_FACTOR).abs() < 1e-2);
    }

    #[test]
    fn pitch_never_leaves_the_open_interval() {
        let mut camera = OrbitCamera::new();
        for _ in 0..500 {
            camera.rotate(0.0, 1.0); // push toward -90
        }
        assert!(camera.pitch > -90.0);
        for _ in 0..500 {
            camera.rotate(0.0, -1.0); // push toward 0
        }
        assert!(camera.pitch < 0.0);
    }

    #[test]
    fn yaw_is_unrestricted() {
        let mut camera = OrbitCamera::new();
        for _ in 0..100 {
            camera.rotate(30.0, 0.0);
        }
        assert!((camera.yaw - 3000.0).abs() < 1e-3);
    }

    #[test]
    fn pivot_projects_to_viewport_center() {
        let camera = OrbitCamera::new();
        let viewport = Rect::new(100.0, 50.0, 800.0, 600.0);
        let p = camera.project(camera.pivot, viewport).unwrap();
        assert!((p.x - 500.0).abs() < 1e-2);
        assert!((p.y - 350.0).abs() < 1e-2);
        assert!((p.depth - camera.distance).abs() < 1e-2);
    }

    #[test]
    fn points_behind_the_camera_are_rejected() {
        let camera = OrbitCamera::new();
        let eye = camera.eye();
        let (_, _, forward) = camera.basis();
        let behind = eye - forward * 100.0;
        assert!(camera.project(behind, Rect::new(0.0, 0.0, 100.0, 100.0)).is_none());
    }
}
