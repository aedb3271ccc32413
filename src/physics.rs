/*
 * Physics Module
 *
 * The per-tick update of the flock. A tick runs in two phases:
 *
 * 1. Evaluate the enabled rules for every boid against the start-of-tick
 *    state. This phase only reads, so it may run on the rayon pool.
 * 2. Commit every boid through the velocity pipeline:
 *    rules + inertia -> containment -> speed shaping -> integration,
 *    then record the new position in the boid's trail.
 *
 * Nothing is written until phase 1 has finished for the whole flock, so
 * the outcome is identical whether evaluation ran in parallel or not.
 */

use nannou::prelude::Vec3;
use rayon::prelude::*;

use crate::anchors::AnchorSet;
use crate::error::FlockError;
use crate::flock::{Flock, FlockSnapshot};
use crate::geometry::{containment_nudge, shape_speed};
use crate::params::SimulationParams;
use crate::rules::RuleSet;
use crate::spawn::{spawn_flock, SpawnConfig};
use crate::stats::FlockStats;
use crate::{BOUNDARY, SPEED_SCALE};

// Stage 1: rule contributions for every boid, from one consistent snapshot
pub fn evaluate_contributions(
    snapshot: &FlockSnapshot,
    rules: &RuleSet,
    params: &SimulationParams,
    out: &mut Vec<Vec3>,
) {
    let n = snapshot.len();
    if params.parallel {
        (0..n)
            .into_par_iter()
            .map(|i| rules.contribution(snapshot, params, i))
            .collect_into_vec(out);
    } else {
        out.clear();
        out.extend((0..n).map(|i| rules.contribution(snapshot, params, i)));
    }
}

// Stage 2: add the rule sum and the inertia term to the old velocity
pub fn apply_inertia(velocity: Vec3, contribution: Vec3, inertia_weight: f32) -> Vec3 {
    velocity + contribution + velocity * inertia_weight
}

// Stage 3: nudge back toward the box, judged on the pre-integration position
pub fn apply_containment(velocity: Vec3, position: Vec3) -> Vec3 {
    velocity + containment_nudge(position, BOUNDARY)
}

// Stage 5: advance the position by one scaled velocity step
pub fn integrate(position: Vec3, velocity: Vec3) -> Vec3 {
    position + velocity / SPEED_SCALE
}

// The full velocity pipeline for one boid. Returns (position, velocity).
pub fn next_state(position: Vec3, velocity: Vec3, contribution: Vec3, params: &SimulationParams) -> (Vec3, Vec3) {
    let velocity = apply_inertia(velocity, contribution, params.inertia_weight);
    let velocity = apply_containment(velocity, position);
    // Stage 4
    let velocity = shape_speed(velocity);
    (integrate(position, velocity), velocity)
}

pub struct Simulation {
    flock: Flock,
    rules: RuleSet,
    tick: u64,
    // Cosmetic oscillator for renderers (fin and tail animation)
    swim_phase: f32,
    swim_speed: f32,
    contributions: Vec<Vec3>,
}

impl Simulation {
    pub fn new(flock: Flock) -> Self {
        let n = flock.len();
        Self {
            flock,
            rules: RuleSet::default(),
            tick: 0,
            swim_phase: 0.0,
            swim_speed: 0.1,
            contributions: Vec::with_capacity(n),
        }
    }

    // Seed a fresh flock and wrap it in a simulation
    pub fn spawn(config: &SpawnConfig, anchors: AnchorSet) -> Result<Self, FlockError> {
        spawn_flock(config, anchors).map(Self::new)
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn flock(&self) -> &Flock {
        &self.flock
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut RuleSet {
        &mut self.rules
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn swim_phase(&self) -> f32 {
        self.swim_phase
    }

    pub fn set_swim_speed(&mut self, speed: f32) {
        self.swim_speed = speed;
    }

    // Advance every boid by one tick using `params` for the whole tick
    pub fn tick(&mut self, params: &SimulationParams) {
        evaluate_contributions(&self.flock.snapshot(), &self.rules, params, &mut self.contributions);

        for (i, &contribution) in self.contributions.iter().enumerate() {
            let position = self.flock.positions()[i];
            let velocity = self.flock.velocities()[i];
            let (position, velocity) = next_state(position, velocity, contribution, params);
            self.flock.commit(i, position, velocity);
        }

        self.tick += 1;
        self.swim_phase += self.swim_speed;

        if tracing::enabled!(tracing::Level::DEBUG) {
            let stats = self.stats();
            tracing::debug!(
                tick = stats.tick,
                centroid = ?stats.centroid,
                mean_speed = stats.mean_speed,
                max_speed = stats.max_speed,
                outside_box = stats.outside_box,
                "tick complete"
            );
        }
    }

    // Run `ticks` ticks with the same parameters
    pub fn run(&mut self, params: &SimulationParams, ticks: u64) {
        for _ in 0..ticks {
            self.tick(params);
        }
    }

    pub fn stats(&self) -> FlockStats {
        FlockStats::measure(&self.flock, self.tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flock::AgentInit;
    use crate::rules::Rule;
    use nannou::prelude::vec3;

    fn single(position: Vec3, velocity: Vec3) -> Simulation {
        let flock = Flock::new(vec![AgentInit::new(position, velocity)], &[0], AnchorSet::default(), 4).unwrap();
        Simulation::new(flock)
    }

    #[test]
    fn inertia_adds_scaled_old_velocity() {
        let v = apply_inertia(vec3(2.0, 0.0, -4.0), vec3(1.0, 1.0, 1.0), 0.5);
        assert_eq!(v, vec3(4.0, 1.0, -5.0));
    }

    #[test]
    fn containment_uses_the_given_position() {
        assert_eq!(apply_containment(Vec3::ZERO, vec3(51.0, -51.0, 0.0)), vec3(-1.0, 1.0, 0.0));
    }

    #[test]
    fn integration_divides_by_speed_scale() {
        assert_eq!(integrate(Vec3::ZERO, vec3(5.0, -10.0, 0.0)), vec3(1.0, -2.0, 0.0));
    }

    #[test]
    fn pipeline_order_is_inertia_then_containment_then_shaping() {
        let params = SimulationParams {
            inertia_weight: 0.0,
            ..SimulationParams::inert()
        };
        // velocity 3 plus contribution 1 is 4, containment makes it 3, shaping gives sqrt(3)
        let (position, velocity) = next_state(vec3(60.0, 0.0, 0.0), vec3(3.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0), &params);
        assert_eq!(velocity.x, 3.0_f32.sqrt());
        assert_eq!(position.x, 60.0 + 3.0_f32.sqrt() / SPEED_SCALE);
    }

    #[test]
    fn tick_counts_and_advances_the_swim_phase() {
        let mut sim = single(Vec3::ZERO, Vec3::ZERO);
        sim.set_swim_speed(0.5);
        sim.run(&SimulationParams::default(), 3);
        assert_eq!(sim.tick_count(), 3);
        assert_eq!(sim.swim_phase(), 1.5);
    }

    #[test]
    fn parallel_and_sequential_evaluation_agree() {
        let config = SpawnConfig::with_population(120);
        let parallel = SimulationParams {
            parallel: true,
            cohesion_radius: 30.0,
            separation_radius: 5.0,
            leader_weight: 0.2,
            leader_radius: 10.0,
            ..SimulationParams::default()
        };
        let sequential = SimulationParams {
            parallel: false,
            ..parallel
        };

        let mut a = Simulation::spawn(&config, AnchorSet::default()).unwrap();
        let mut b = Simulation::spawn(&config, AnchorSet::default()).unwrap();
        a.run(&parallel, 10);
        b.run(&sequential, 10);
        assert_eq!(a.flock().positions(), b.flock().positions());
        assert_eq!(a.flock().velocities(), b.flock().velocities());
    }

    #[test]
    fn disabled_rules_leave_the_trajectory_untouched() {
        let config = SpawnConfig::with_population(80);
        let weighted = SimulationParams {
            cohesion_radius: 30.0,
            separation_radius: 5.0,
            separation_weight: 0.5,
            alignment_weight: 0.4,
            ..SimulationParams::default()
        };
        let cohesion_only = SimulationParams {
            separation_weight: 0.0,
            alignment_weight: 0.0,
            ..weighted
        };

        let mut restricted = Simulation::spawn(&config, AnchorSet::default())
            .unwrap()
            .with_rules(RuleSet::only(&[Rule::Cohesion]));
        let mut reference = Simulation::spawn(&config, AnchorSet::default()).unwrap();
        restricted.run(&weighted, 15);
        reference.run(&cohesion_only, 15);
        assert_eq!(restricted.flock().positions(), reference.flock().positions());
        assert_eq!(restricted.flock().velocities(), reference.flock().velocities());

        // switching the rules back on mid-run changes the next tick
        restricted.rules_mut().enable(Rule::Separation);
        restricted.rules_mut().enable(Rule::VelocityMatching);
        restricted.tick(&weighted);
        reference.tick(&cohesion_only);
        assert_ne!(restricted.flock().velocities(), reference.flock().velocities());
    }

    #[test]
    fn rules_read_the_start_of_tick_state() {
        // Two boids pulling on each other: with snapshot reads the pulls are mirror images
        let flock = Flock::new(
            vec![
                AgentInit::new(vec3(-1.0, 0.0, 0.0), Vec3::ZERO),
                AgentInit::new(vec3(1.0, 0.0, 0.0), Vec3::ZERO),
            ],
            &[0],
            AnchorSet::default(),
            2,
        )
        .unwrap();
        let mut sim = Simulation::new(flock);
        let params = SimulationParams {
            cohesion_radius: 10.0,
            cohesion_weight: 1.0,
            parallel: false,
            ..SimulationParams::inert()
        };
        sim.tick(&params);
        let v = sim.flock().velocities();
        assert_eq!(v[0].x, -v[1].x);
        assert_eq!(v[0], vec3(1.0, 0.0, 0.0));
    }
}
