/*
 * Application Module
 *
 * This module defines the viewer's model and its update loop. The viewer
 * is one possible host of the simulation: every frame it takes a parameter
 * snapshot from the shared handle (written by the egui panel) and runs
 * either one tick, or as many ticks as the fixed-timestep clock says are
 * due. Rendering only ever sees the fully committed flock.
 */

use std::sync::Mutex;
use std::time::{Duration, Instant};

use nannou::prelude::*;
use nannou::winit::event::{MouseButton, MouseScrollDelta, TouchPhase};
use nannou_egui::Egui;

use crate::anchors::AnchorSet;
use crate::camera::Camera;
use crate::clock::TickClock;
use crate::debug::DebugInfo;
use crate::params::{SharedParams, SimulationParams};
use crate::physics::Simulation;
use crate::renderer;
use crate::rules::Rule;
use crate::spawn::SpawnConfig;
use crate::ui;

// Everything the viewer needs to start, prepared by main before the event loop
pub struct Launch {
    pub params: SimulationParams,
    pub spawn: SpawnConfig,
    pub anchors: AnchorSet,
    pub simulation: Simulation,
    pub tick_rate: Option<f32>,
}

// nannou builds the model through a plain fn pointer, so the launch state is
// parked here between `run` and `model`
static PENDING_LAUNCH: Mutex<Option<Launch>> = Mutex::new(None);

pub fn run(launch: Launch) {
    *PENDING_LAUNCH.lock().unwrap_or_else(|e| e.into_inner()) = Some(launch);
    nannou::app(model).update(update).run();
}

pub struct Model {
    pub simulation: Simulation,
    pub shared_params: SharedParams,
    pub spawn: SpawnConfig,
    pub anchors: AnchorSet,
    pub egui: Egui,
    pub camera: Camera,
    pub debug_info: DebugInfo,
    pub clock: Option<TickClock>,
    pub paused: bool,
    pub show_debug: bool,
    pub mouse_position: Vec2,
}

fn model(app: &App) -> Model {
    let launch = PENDING_LAUNCH
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .take()
        .expect("viewer started without launch state");

    let window_id = app
        .new_window()
        .title("Boids")
        .size(1024, 1024)
        .view(renderer::view)
        .mouse_moved(mouse_moved)
        .mouse_pressed(mouse_pressed)
        .mouse_released(mouse_released)
        .mouse_wheel(mouse_wheel)
        .key_pressed(key_pressed)
        .raw_event(raw_window_event)
        .build()
        .unwrap();

    let window = app.window(window_id).unwrap();
    let egui = Egui::from_window(&window);

    Model {
        simulation: launch.simulation,
        shared_params: SharedParams::new(launch.params),
        spawn: launch.spawn,
        anchors: launch.anchors,
        egui,
        camera: Camera::new(),
        debug_info: DebugInfo::default(),
        clock: launch.tick_rate.map(|rate| TickClock::from_rate(rate, 8)),
        paused: false,
        show_debug: true,
        mouse_position: Vec2::ZERO,
    }
}

fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let response = ui::update_ui(
        &mut model.egui,
        &model.shared_params,
        &mut model.camera,
        &mut model.paused,
        model.simulation.rules_mut(),
        &model.debug_info,
    );

    if response.reset {
        reset_simulation(model);
    }

    // One parameter snapshot for every tick run this frame
    let params = model.shared_params.snapshot();
    if response.params_changed {
        tracing::info!(?params, "parameters changed");
    }
    if response.rules_changed {
        let enabled: Vec<&str> = model.simulation.rules().rules().iter().map(Rule::name).collect();
        tracing::info!(?enabled, "rule set changed");
    }

    let due = match model.clock.as_mut() {
        Some(clock) => clock.advance(update.since_last),
        None => 1,
    };

    if model.paused {
        model.debug_info.ticks_per_frame = 0;
        return;
    }

    let started = Instant::now();
    for _ in 0..due {
        model.simulation.tick(&params);
    }
    model.debug_info.ticks_per_frame = due;
    model.debug_info.tick_time = if due > 0 { started.elapsed() } else { Duration::ZERO };
    model.debug_info.stats = Some(model.simulation.stats());
}

// Respawn with the launch settings and the next seed, keeping the enabled rules
fn reset_simulation(model: &mut Model) {
    model.spawn.seed = model.spawn.seed.wrapping_add(1);
    match Simulation::spawn(&model.spawn, model.anchors.clone()) {
        Ok(simulation) => model.simulation = simulation.with_rules(model.simulation.rules().clone()),
        Err(err) => tracing::warn!(%err, "could not respawn flock"),
    }
}

fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    model.mouse_position = pos;
    model.camera.drag(pos);
}

fn mouse_pressed(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left && !model.egui.ctx().is_pointer_over_area() {
        model.camera.start_drag(model.mouse_position);
    }
}

fn mouse_released(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        model.camera.end_drag();
    }
}

fn mouse_wheel(_app: &App, model: &mut Model, delta: MouseScrollDelta, _phase: TouchPhase) {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => model.camera.zoom(vec2(x, y)),
        MouseScrollDelta::PixelDelta(pos) => model.camera.zoom(vec2(pos.x as f32, pos.y as f32) * 0.01),
    }
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        Key::Space => model.paused = !model.paused,
        Key::D => model.show_debug = !model.show_debug,
        Key::R => reset_simulation(model),
        _ => {}
    }
}

fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
