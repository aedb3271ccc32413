/*
 * Spawn Module
 *
 * Seeds the initial flock. All randomness comes from a ChaCha8 generator
 * seeded from the configuration, so the same config always yields the same
 * flock, bit for bit.
 *
 * Draw order: positions and velocities per boid, then anchor assignments
 * (only when anchors are loaded), then colors, then the leader count and
 * the leaders themselves.
 */

use nannou::prelude::{vec3, Vec3};
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::anchors::AnchorSet;
use crate::error::FlockError;
use crate::flock::{AgentInit, Flock};
use crate::{HISTORY, MAX_BOIDS, MAX_LEADERS, SPACE_SCALE, SPEED_SCALE};

// How leader indices are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderSampling {
    // Without replacement: exactly `leader_count` distinct leaders
    #[default]
    Distinct,
    // Independent draws, so repeats can leave fewer effective leaders
    WithReplacement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub population: usize,
    pub seed: u64,
    // None picks a random count in 1..=MAX_LEADERS
    pub leader_count: Option<usize>,
    pub leader_sampling: LeaderSampling,
    pub trail_length: usize,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            population: 500,
            seed: 1522,
            leader_count: None,
            leader_sampling: LeaderSampling::Distinct,
            trail_length: HISTORY,
        }
    }
}

impl SpawnConfig {
    pub fn with_population(population: usize) -> Self {
        Self {
            population,
            ..Self::default()
        }
    }
}

// Uniform sample in [-scale/2, scale/2) on every axis
fn centered_cube(rng: &mut ChaCha8Rng, scale: f32) -> Vec3 {
    vec3(
        (-0.5 + rng.gen::<f32>()) * scale,
        (-0.5 + rng.gen::<f32>()) * scale,
        (-0.5 + rng.gen::<f32>()) * scale,
    )
}

// Build the initial flock for `config`, assigning anchors from `anchors`
pub fn spawn_flock(config: &SpawnConfig, anchors: AnchorSet) -> Result<Flock, FlockError> {
    let n = config.population;
    if n == 0 {
        return Err(FlockError::EmptyPopulation);
    }
    if n > MAX_BOIDS {
        return Err(FlockError::PopulationTooLarge {
            requested: n,
            max: MAX_BOIDS,
        });
    }
    if let Some(count) = config.leader_count {
        if count == 0 || count > MAX_LEADERS.min(n) {
            return Err(FlockError::LeaderCountOutOfRange {
                requested: count,
                population: n,
            });
        }
    }

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let mut agents: Vec<AgentInit> = (0..n)
        .map(|_| {
            let position = centered_cube(&mut rng, SPACE_SCALE);
            let velocity = centered_cube(&mut rng, SPEED_SCALE);
            AgentInit::new(position, velocity)
        })
        .collect();

    if !anchors.is_empty() {
        for agent in &mut agents {
            agent.anchor = Some(rng.gen_range(0..anchors.len()));
        }
    }

    for agent in &mut agents {
        agent.color = [rng.gen(), rng.gen(), rng.gen()];
    }

    let count = config
        .leader_count
        .unwrap_or_else(|| rng.gen_range(1..=MAX_LEADERS).min(n));
    let leaders: Vec<usize> = match config.leader_sampling {
        LeaderSampling::Distinct => sample(&mut rng, n, count).into_vec(),
        LeaderSampling::WithReplacement => (0..count).map(|_| rng.gen_range(0..n)).collect(),
    };

    let flock = Flock::new(agents, &leaders, anchors, config.trail_length)?;
    tracing::info!(
        population = n,
        seed = config.seed,
        leaders = ?flock.leaders(),
        anchors = flock.anchors().len(),
        trail_length = config.trail_length,
        "spawned flock"
    );
    Ok(flock)
}
