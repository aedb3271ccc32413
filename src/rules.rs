/*
 * Rules Module
 *
 * The behavioural rules of the flock. Each rule is a pure function of the
 * start-of-tick snapshot and the parameter snapshot, returning one
 * contribution vector for one boid:
 *
 * 1. Cohesion: pull toward the centroid of everything in range (self included)
 * 2. Separation: push away from everything in a small radius
 * 3. Velocity matching: drift toward the average velocity of the others in range
 * 4. Leader attraction: pull toward leaders in range
 * 5. Anchor hover: pull toward the boid's assigned anchor point
 *
 * A RuleSet holds the rules that are switched on, in evaluation order.
 */

use nannou::prelude::{vec3, Vec3};

use crate::flock::FlockSnapshot;
use crate::geometry::mean_or_zero;
use crate::neighbors::in_range;
use crate::params::{CohesionAxisMode, SimulationParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Cohesion,
    Separation,
    VelocityMatching,
    LeaderAttraction,
    AnchorHover,
}

impl Rule {
    pub const ALL: [Rule; 5] = [
        Rule::Cohesion,
        Rule::Separation,
        Rule::VelocityMatching,
        Rule::LeaderAttraction,
        Rule::AnchorHover,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Rule::Cohesion => "cohesion",
            Rule::Separation => "separation",
            Rule::VelocityMatching => "velocity matching",
            Rule::LeaderAttraction => "leader attraction",
            Rule::AnchorHover => "anchor hover",
        }
    }

    pub fn evaluate(&self, snapshot: &FlockSnapshot, params: &SimulationParams, index: usize) -> Vec3 {
        match self {
            Rule::Cohesion => cohesion(
                snapshot,
                index,
                params.cohesion_radius,
                params.cohesion_weight,
                params.cohesion_axis,
            ),
            Rule::Separation => separation(snapshot, index, params.separation_radius, params.separation_weight),
            Rule::VelocityMatching => {
                velocity_matching(snapshot, index, params.alignment_radius, params.alignment_weight)
            }
            Rule::LeaderAttraction => {
                leader_attraction(snapshot, index, params.leader_radius, params.leader_weight)
            }
            Rule::AnchorHover => anchor_hover(snapshot, index, params.hover_weight),
        }
    }
}

// Cohesion: weight * (centroid - position), centroid over every boid in range
pub fn cohesion(
    snapshot: &FlockSnapshot,
    index: usize,
    radius: f32,
    weight: f32,
    axis_mode: CohesionAxisMode,
) -> Vec3 {
    if weight == 0.0 {
        return Vec3::ZERO;
    }
    let positions = snapshot.positions;
    let (sum, count) = in_range(positions, index, radius)
        .fold((Vec3::ZERO, 0), |(sum, count), j| (sum + positions[j], count + 1));
    // No centroid without neighbours
    if count == 0 {
        return Vec3::ZERO;
    }
    let centre = sum / count as f32;
    let target = match axis_mode {
        CohesionAxisMode::PerAxis => centre,
        CohesionAxisMode::ReferenceXOnly => vec3(centre.x, centre.x, centre.x),
    };
    (target - positions[index]) * weight
}

// Separation: -weight * sum of offsets to every boid in range
pub fn separation(snapshot: &FlockSnapshot, index: usize, radius: f32, weight: f32) -> Vec3 {
    if weight == 0.0 {
        return Vec3::ZERO;
    }
    let positions = snapshot.positions;
    let own = positions[index];
    let offsets = in_range(positions, index, radius)
        .filter(|&j| j != index)
        .fold(Vec3::ZERO, |acc, j| acc + (positions[j] - own));
    -offsets * weight
}

// Velocity matching: weight * mean velocity of the other boids in range.
// Zero when the boid is alone.
pub fn velocity_matching(snapshot: &FlockSnapshot, index: usize, radius: f32, weight: f32) -> Vec3 {
    if weight == 0.0 {
        return Vec3::ZERO;
    }
    let velocities = snapshot.velocities;
    let (sum, others) = in_range(snapshot.positions, index, radius)
        .filter(|&j| j != index)
        .fold((Vec3::ZERO, 0), |(sum, count), j| (sum + velocities[j], count + 1));
    mean_or_zero(sum, others) * weight
}

// Leader attraction: weight * sum of offsets to every leader in range
pub fn leader_attraction(snapshot: &FlockSnapshot, index: usize, radius: f32, weight: f32) -> Vec3 {
    if weight == 0.0 {
        return Vec3::ZERO;
    }
    let positions = snapshot.positions;
    let own = positions[index];
    in_range(positions, index, radius)
        .filter(|&j| snapshot.leader_mask[j])
        .fold(Vec3::ZERO, |acc, j| acc + (positions[j] - own))
        * weight
}

// Anchor hover: weight * (anchor - position), or zero without an anchor
pub fn anchor_hover(snapshot: &FlockSnapshot, index: usize, weight: f32) -> Vec3 {
    let anchor = snapshot.anchor_of[index].and_then(|a| snapshot.anchors.get(a));
    match anchor {
        Some(point) if weight != 0.0 => (point - snapshot.positions[index]) * weight,
        _ => Vec3::ZERO,
    }
}

// The enabled rules, in evaluation order
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            rules: Rule::ALL.to_vec(),
        }
    }
}

impl RuleSet {
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn only(rules: &[Rule]) -> Self {
        let mut set = Self::empty();
        for &rule in rules {
            set.enable(rule);
        }
        set
    }

    // Switch a rule on, keeping the canonical evaluation order
    pub fn enable(&mut self, rule: Rule) {
        if !self.rules.contains(&rule) {
            self.rules.push(rule);
            self.rules
                .sort_by_key(|r| Rule::ALL.iter().position(|x| x == r));
        }
    }

    pub fn disable(&mut self, rule: Rule) {
        self.rules.retain(|&r| r != rule);
    }

    pub fn is_enabled(&self, rule: Rule) -> bool {
        self.rules.contains(&rule)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    // Sum of every enabled rule's contribution for one boid
    pub fn contribution(&self, snapshot: &FlockSnapshot, params: &SimulationParams, index: usize) -> Vec3 {
        self.rules
            .iter()
            .fold(Vec3::ZERO, |acc, rule| acc + rule.evaluate(snapshot, params, index))
    }
}
