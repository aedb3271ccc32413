/*
 * Flock Module
 *
 * The agent state store. Boid data is kept as parallel arrays sized to the
 * real population (positions, velocities, colors, trails, anchor
 * assignments) together with the leader set and the anchor shape.
 *
 * Rules never see a half-updated flock: they read through a FlockSnapshot,
 * which borrows the store immutably, and the orchestrator commits new
 * states only after every contribution for the tick has been computed.
 */

use nannou::prelude::Vec3;

use crate::anchors::AnchorSet;
use crate::error::FlockError;
use crate::trail::Trail;
use crate::{MAX_BOIDS, MAX_LEADERS};

pub type Color = [f32; 3];

// Everything needed to place one boid in a new flock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentInit {
    pub position: Vec3,
    pub velocity: Vec3,
    pub color: Color,
    pub anchor: Option<usize>,
}

impl AgentInit {
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self {
            position,
            velocity,
            color: [1.0, 1.0, 1.0],
            anchor: None,
        }
    }
}

// Read-only view of one boid, handed to renderers
#[derive(Debug, Clone, Copy)]
pub struct AgentView<'a> {
    pub index: usize,
    pub position: Vec3,
    pub velocity: Vec3,
    pub color: Color,
    pub trail: &'a Trail,
    pub anchor: Option<usize>,
    pub is_leader: bool,
}

// The state the rules are allowed to read during a tick
#[derive(Debug, Clone, Copy)]
pub struct FlockSnapshot<'a> {
    pub positions: &'a [Vec3],
    pub velocities: &'a [Vec3],
    pub leader_mask: &'a [bool],
    pub anchor_of: &'a [Option<usize>],
    pub anchors: &'a AnchorSet,
}

impl FlockSnapshot<'_> {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Flock {
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    colors: Vec<Color>,
    trails: Vec<Trail>,
    anchor_of: Vec<Option<usize>>,
    // Sorted, distinct leader indices plus a lookup mask
    leaders: Vec<usize>,
    leader_mask: Vec<bool>,
    anchors: AnchorSet,
}

impl Flock {
    // Build a flock from fully specified agents.
    //
    // `leaders` may contain repeats (they collapse into one member), but must
    // hold between 1 and MAX_LEADERS entries, all naming real agents.
    pub fn new(
        agents: Vec<AgentInit>,
        leaders: &[usize],
        anchors: AnchorSet,
        trail_length: usize,
    ) -> Result<Self, FlockError> {
        let population = agents.len();
        if population == 0 {
            return Err(FlockError::EmptyPopulation);
        }
        if population > MAX_BOIDS {
            return Err(FlockError::PopulationTooLarge {
                requested: population,
                max: MAX_BOIDS,
            });
        }
        if trail_length == 0 {
            return Err(FlockError::ZeroTrailLength);
        }
        if leaders.is_empty() || leaders.len() > MAX_LEADERS {
            return Err(FlockError::LeaderCountOutOfRange {
                requested: leaders.len(),
                population,
            });
        }
        if let Some(&leader) = leaders.iter().find(|&&l| l >= population) {
            return Err(FlockError::LeaderOutOfRange { leader, population });
        }
        for (agent, init) in agents.iter().enumerate() {
            if let Some(anchor) = init.anchor {
                if anchor >= anchors.len() {
                    return Err(FlockError::AnchorOutOfRange {
                        agent,
                        anchor,
                        anchors: anchors.len(),
                    });
                }
            }
        }

        let mut leader_set = leaders.to_vec();
        leader_set.sort_unstable();
        leader_set.dedup();
        let mut leader_mask = vec![false; population];
        for &leader in &leader_set {
            leader_mask[leader] = true;
        }

        Ok(Self {
            positions: agents.iter().map(|a| a.position).collect(),
            velocities: agents.iter().map(|a| a.velocity).collect(),
            colors: agents.iter().map(|a| a.color).collect(),
            trails: agents.iter().map(|a| Trail::new(a.position, trail_length)).collect(),
            anchor_of: agents.iter().map(|a| a.anchor).collect(),
            leaders: leader_set,
            leader_mask,
            anchors,
        })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn snapshot(&self) -> FlockSnapshot<'_> {
        FlockSnapshot {
            positions: &self.positions,
            velocities: &self.velocities,
            leader_mask: &self.leader_mask,
            anchor_of: &self.anchor_of,
            anchors: &self.anchors,
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn trails(&self) -> &[Trail] {
        &self.trails
    }

    pub fn trail(&self, index: usize) -> &Trail {
        &self.trails[index]
    }

    pub fn anchor_of(&self, index: usize) -> Option<usize> {
        self.anchor_of[index]
    }

    pub fn anchors(&self) -> &AnchorSet {
        &self.anchors
    }

    pub fn leaders(&self) -> &[usize] {
        &self.leaders
    }

    pub fn is_leader(&self, index: usize) -> bool {
        self.leader_mask[index]
    }

    pub fn agent(&self, index: usize) -> AgentView<'_> {
        AgentView {
            index,
            position: self.positions[index],
            velocity: self.velocities[index],
            color: self.colors[index],
            trail: &self.trails[index],
            anchor: self.anchor_of[index],
            is_leader: self.leader_mask[index],
        }
    }

    pub fn agents(&self) -> impl Iterator<Item = AgentView<'_>> + '_ {
        (0..self.len()).map(move |i| self.agent(i))
    }

    // Store the committed state of one boid and record it in its trail
    pub(crate) fn commit(&mut self, index: usize, position: Vec3, velocity: Vec3) {
        self.positions[index] = position;
        self.velocities[index] = velocity;
        self.trails[index].push(position);
    }
}
