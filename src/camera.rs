/*
 * Camera Module
 *
 * This module defines an orbiting camera that looks at the origin from a
 * fixed height and projects world points onto the window with a simple
 * pinhole model. The world's z axis is up. Dragging spins the camera
 * around that axis and the mouse wheel zooms.
 */

use nannou::prelude::*;

pub struct Camera {
    // Angle around the vertical axis, in degrees
    pub rotation: f32,
    pub distance: f32,
    pub height: f32,
    pub fov_degrees: f32,
    pub zoom: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub is_dragging: bool,
    pub last_cursor_pos: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    pub fn new() -> Self {
        Self {
            rotation: 30.0,
            distance: 145.0,
            height: 80.0,
            fov_degrees: 45.0,
            zoom: 1.0,
            min_zoom: 0.2,
            max_zoom: 5.0,
            is_dragging: false,
            last_cursor_pos: Vec2::ZERO,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let angle = self.rotation.to_radians();
        vec3(self.distance * angle.cos(), self.distance * angle.sin(), self.height)
    }

    // Project a world point to screen space. Returns the screen point and
    // its depth along the view direction, or None when behind the camera.
    pub fn project(&self, point: Vec3, window_rect: Rect) -> Option<(Vec2, f32)> {
        let eye = self.eye();
        let forward = (-eye).normalize();
        let right = forward.cross(Vec3::Z).normalize();
        let up = right.cross(forward);

        let relative = point - eye;
        let depth = relative.dot(forward);
        if depth <= 1.0 {
            return None;
        }

        let focal = (window_rect.h() * 0.5) / (self.fov_degrees.to_radians() * 0.5).tan();
        let scale = focal * self.zoom / depth;
        let screen = vec2(relative.dot(right) * scale, relative.dot(up) * scale);
        Some((screen + window_rect.xy(), depth))
    }

    // Handle mouse wheel events for zooming
    pub fn zoom(&mut self, scroll_delta: Vec2) {
        let zoom_factor = 1.0 + scroll_delta.y * 0.1;
        self.zoom = (self.zoom * zoom_factor).clamp(self.min_zoom, self.max_zoom);
    }

    pub fn start_drag(&mut self, position: Vec2) {
        self.last_cursor_pos = position;
        self.is_dragging = true;
    }

    // Horizontal drag spins the camera around the vertical axis
    pub fn drag(&mut self, position: Vec2) {
        if self.is_dragging {
            let delta = position - self.last_cursor_pos;
            if delta.x != 0.0 {
                self.rotation = (self.rotation - delta.x * 0.3).rem_euclid(360.0);
                self.last_cursor_pos = position;
            }
        }
    }

    pub fn end_drag(&mut self) {
        self.is_dragging = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> Rect {
        Rect::from_w_h(800.0, 600.0)
    }

    #[test]
    fn origin_projects_to_window_centre() {
        let camera = Camera::new();
        let (screen, depth) = camera.project(Vec3::ZERO, window()).unwrap();
        assert!(screen.length() < 1e-3);
        assert!((depth - camera.eye().length()).abs() < 1e-3);
    }

    #[test]
    fn points_behind_the_camera_are_culled() {
        let camera = Camera::new();
        let behind = camera.eye() * 2.0;
        assert!(camera.project(behind, window()).is_none());
    }

    #[test]
    fn up_in_the_world_is_up_on_screen() {
        let camera = Camera::new();
        let (screen, _) = camera.project(vec3(0.0, 0.0, 20.0), window()).unwrap();
        assert!(screen.y > 0.0);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut camera = Camera::new();
        for _ in 0..100 {
            camera.zoom(vec2(0.0, 5.0));
        }
        assert_eq!(camera.zoom, camera.max_zoom);
    }

    #[test]
    fn drag_rotates_around_vertical_axis() {
        let mut camera = Camera::new();
        camera.start_drag(vec2(0.0, 0.0));
        camera.drag(vec2(-100.0, 40.0));
        camera.end_drag();
        assert!((camera.rotation - 60.0).abs() < 1e-3);
        // released: further motion is ignored
        let rotation = camera.rotation;
        camera.drag(vec2(500.0, 0.0));
        assert_eq!(camera.rotation, rotation);
    }
}
