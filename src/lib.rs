/*
 * 3D Boid Flocking Simulation - Module Definitions
 *
 * This file defines the module structure of the simulation. The flocking
 * core (geometry, neighbors, rules, flock, physics, spawn) knows nothing
 * about windows or drawing; the viewer modules (app, ui, renderer, camera,
 * debug) sit on top of it and only read committed flock state.
 */

// Re-export key components for easier access
pub use anchors::AnchorSet;
pub use clock::TickClock;
pub use config::RunConfig;
pub use error::FlockError;
pub use flock::{AgentInit, AgentView, Color, Flock, FlockSnapshot};
pub use params::{CohesionAxisMode, SharedParams, SimulationParams};
pub use physics::Simulation;
pub use rules::{Rule, RuleSet};
pub use spawn::{spawn_flock, LeaderSampling, SpawnConfig};
pub use stats::FlockStats;
pub use trail::Trail;

// Flocking core
pub mod anchors;
pub mod clock;
pub mod config;
pub mod error;
pub mod flock;
pub mod geometry;
pub mod neighbors;
pub mod params;
pub mod physics;
pub mod rules;
pub mod spawn;
pub mod stats;
pub mod trail;

// Viewer
pub mod app;
pub mod camera;
pub mod debug;
pub mod renderer;
pub mod ui;

// Constants
pub const MAX_BOIDS: usize = 2000;
pub const MAX_LEADERS: usize = 5;
pub const SPACE_SCALE: f32 = 75.0; // Edge of the cube boids spawn in
pub const SPEED_SCALE: f32 = 5.0; // Velocity divisor applied at integration
pub const HISTORY: usize = 100; // Trail length
pub const BOUNDARY: f32 = 50.0; // Half edge of the containment box
