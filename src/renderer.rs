/*
 * Renderer Module
 *
 * This module draws the committed flock state: the containment box, the
 * anchor shape (faded in with `shapeness`), each boid's trail as a polyline
 * that reddens toward the newest point, and the boids themselves as dots
 * sorted back to front. Leaders get a white ring.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::camera::Camera;
use crate::flock::AgentView;
use crate::BOUNDARY;

const BOID_RADIUS: f32 = 400.0;

pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(rgb(0.01, 0.01, 0.01));

    let window_rect = app.window_rect();
    let camera = &model.camera;
    let flock = model.simulation.flock();

    draw_box(&draw, camera, window_rect);

    let shapeness = model.shared_params.snapshot().shapeness;
    if shapeness > 0.0 {
        for &point in flock.anchors().points() {
            if let Some((screen, _)) = camera.project(point, window_rect) {
                draw.ellipse()
                    .xy(screen)
                    .radius(1.0)
                    .color(rgba(0.6, 0.8, 1.0, shapeness));
            }
        }
    }

    for agent in flock.agents() {
        draw_trail(&draw, camera, window_rect, &agent);
    }

    // Painter's order: farthest boid first
    let mut visible: Vec<(f32, Vec2, AgentView)> = flock
        .agents()
        .filter_map(|agent| {
            camera
                .project(agent.position, window_rect)
                .map(|(screen, depth)| (depth, screen, agent))
        })
        .collect();
    visible.sort_by(|a, b| b.0.total_cmp(&a.0));

    // Leader rings breathe with the swim phase
    let pulse = 1.8 + 0.3 * model.simulation.swim_phase().sin();
    for (depth, screen, agent) in visible {
        let radius = (BOID_RADIUS * camera.zoom / depth).max(1.0);
        let [r, g, b] = agent.color;
        draw.ellipse().xy(screen).radius(radius).color(rgb(r, g, b));
        if agent.is_leader {
            draw.ellipse()
                .xy(screen)
                .radius(radius * pulse)
                .no_fill()
                .stroke(WHITE)
                .stroke_weight(1.0);
        }
    }

    if model.show_debug {
        let margin = 20.0;
        let line_height = 18.0;
        for (i, text) in model.debug_info.lines().iter().enumerate() {
            draw.text(text)
                .x_y(window_rect.right() - 110.0, window_rect.top() - margin - i as f32 * line_height)
                .color(WHITE)
                .font_size(13);
        }
    }

    draw.to_frame(app, &frame).unwrap();
    model.egui.draw_to_frame(&frame).unwrap();
}

// Twelve edges of the containment cube
fn draw_box(draw: &Draw, camera: &Camera, window_rect: Rect) {
    let b = BOUNDARY;
    let corner = |i: usize| {
        vec3(
            if i & 1 == 0 { -b } else { b },
            if i & 2 == 0 { -b } else { b },
            if i & 4 == 0 { -b } else { b },
        )
    };
    for i in 0..8 {
        for bit in [1, 2, 4] {
            let j = i | bit;
            if j == i {
                continue;
            }
            let start = camera.project(corner(i), window_rect);
            let end = camera.project(corner(j), window_rect);
            if let (Some((start, _)), Some((end, _))) = (start, end) {
                draw.line()
                    .start(start)
                    .end(end)
                    .weight(1.0)
                    .color(rgba(0.95, 0.95, 0.95, 0.6));
            }
        }
    }
}

// Oldest points are dark, newest bright red
fn draw_trail(draw: &Draw, camera: &Camera, window_rect: Rect, agent: &AgentView) {
    let len = agent.trail.len() as f32;
    let points: Vec<(Vec2, Rgba)> = agent
        .trail
        .iter()
        .enumerate()
        .filter_map(|(age, point)| {
            camera.project(point, window_rect).map(|(screen, _)| {
                let intensity = (len - age as f32) / len;
                (screen, rgba(intensity, 0.0, 0.0, 1.0))
            })
        })
        .collect();
    if points.len() > 1 {
        draw.polyline().weight(1.0).points_colored(points);
    }
}
