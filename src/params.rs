/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains all the
 * tunable weights and radii of the flocking rules. The values can be
 * modified at any time through a control surface (the egui panel, a config
 * file) while the update core only ever reads a snapshot taken at the start
 * of a tick.
 *
 * Valid ranges are exposed as range getters for sliders. The core itself
 * never clamps; `clamped` is for control surfaces that accept free input.
 */

use std::ops::RangeInclusive;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

// How the cohesion rule forms its target point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CohesionAxisMode {
    // Each axis steers toward its own centroid component
    #[default]
    PerAxis,
    // Every axis steers toward the x component of the centroid, matching the
    // classic assignment code this simulation is modelled on
    ReferenceXOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    // Cohesion (rule 1)
    #[serde(alias = "r_rule1")]
    pub cohesion_radius: f32,
    #[serde(alias = "k_rule1")]
    pub cohesion_weight: f32,
    // Separation (rule 2)
    #[serde(alias = "r_rule2")]
    pub separation_radius: f32,
    #[serde(alias = "k_rule2")]
    pub separation_weight: f32,
    // Velocity matching (rule 3)
    #[serde(alias = "r_rule3")]
    pub alignment_radius: f32,
    #[serde(alias = "k_rule3")]
    pub alignment_weight: f32,
    // Inertia (rule 0)
    #[serde(alias = "k_rule0")]
    pub inertia_weight: f32,
    // Follow the leader
    #[serde(alias = "r_ruleLeader")]
    pub leader_radius: f32,
    #[serde(alias = "k_ruleLeader")]
    pub leader_weight: f32,
    // Hover over the assigned anchor point
    #[serde(alias = "k_ruleHover")]
    pub hover_weight: f32,
    // How strongly renderers should reveal the anchor shape
    pub shapeness: f32,
    pub cohesion_axis: CohesionAxisMode,
    // Evaluate rules on the rayon pool
    pub parallel: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            cohesion_radius: 15.0,
            cohesion_weight: 0.15,
            separation_radius: 1.0,
            separation_weight: 0.5,
            alignment_radius: 25.0,
            alignment_weight: 0.15,
            inertia_weight: 0.25,
            leader_radius: 1.0,
            leader_weight: 0.0,
            hover_weight: 0.0,
            shapeness: 0.0,
            cohesion_axis: CohesionAxisMode::PerAxis,
            parallel: true,
        }
    }
}

impl SimulationParams {
    // Every rule weight and the inertia weight set to zero
    pub fn inert() -> Self {
        Self {
            cohesion_weight: 0.0,
            separation_weight: 0.0,
            alignment_weight: 0.0,
            inertia_weight: 0.0,
            leader_weight: 0.0,
            hover_weight: 0.0,
            ..Self::default()
        }
    }

    // Get parameter ranges for UI sliders
    pub fn get_cohesion_radius_range() -> RangeInclusive<f32> {
        10.0..=100.0
    }

    pub fn get_separation_radius_range() -> RangeInclusive<f32> {
        1.0..=15.0
    }

    pub fn get_alignment_radius_range() -> RangeInclusive<f32> {
        10.0..=100.0
    }

    pub fn get_leader_radius_range() -> RangeInclusive<f32> {
        1.0..=10.0
    }

    pub fn get_weight_range() -> RangeInclusive<f32> {
        0.0..=1.0
    }

    // Copy with every value pulled into its documented range
    pub fn clamped(&self) -> Self {
        let clamp = |v: f32, range: RangeInclusive<f32>| v.clamp(*range.start(), *range.end());
        let weight = |v: f32| clamp(v, Self::get_weight_range());
        Self {
            cohesion_radius: clamp(self.cohesion_radius, Self::get_cohesion_radius_range()),
            separation_radius: clamp(self.separation_radius, Self::get_separation_radius_range()),
            alignment_radius: clamp(self.alignment_radius, Self::get_alignment_radius_range()),
            leader_radius: clamp(self.leader_radius, Self::get_leader_radius_range()),
            cohesion_weight: weight(self.cohesion_weight),
            separation_weight: weight(self.separation_weight),
            alignment_weight: weight(self.alignment_weight),
            inertia_weight: weight(self.inertia_weight),
            leader_weight: weight(self.leader_weight),
            hover_weight: weight(self.hover_weight),
            shapeness: weight(self.shapeness),
            ..*self
        }
    }
}

// Handle shared between a control surface and the simulation host.
// Writers replace values at any time; the host copies a snapshot once per
// tick so a write lands on the next tick at the latest.
#[derive(Debug, Clone, Default)]
pub struct SharedParams {
    inner: Arc<RwLock<SimulationParams>>,
}

impl SharedParams {
    pub fn new(params: SimulationParams) -> Self {
        Self {
            inner: Arc::new(RwLock::new(params)),
        }
    }

    pub fn snapshot(&self) -> SimulationParams {
        *self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set(&self, params: SimulationParams) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = params;
        tracing::debug!(?params, "simulation parameters replaced");
    }

    pub fn update(&self, edit: impl FnOnce(&mut SimulationParams)) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        edit(&mut *guard);
        tracing::debug!(params = ?*guard, "simulation parameters updated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_sit_inside_or_on_their_ranges() {
        let params = SimulationParams::default();
        assert!(SimulationParams::get_separation_radius_range().contains(&params.separation_radius));
        assert!(SimulationParams::get_leader_radius_range().contains(&params.leader_radius));
        assert!(SimulationParams::get_weight_range().contains(&params.inertia_weight));
    }

    #[test]
    fn clamped_pulls_values_into_range() {
        let wild = SimulationParams {
            cohesion_radius: 500.0,
            separation_weight: -2.0,
            leader_radius: 0.0,
            shapeness: 3.0,
            ..SimulationParams::default()
        };
        let tame = wild.clamped();
        assert_eq!(tame.cohesion_radius, 100.0);
        assert_eq!(tame.separation_weight, 0.0);
        assert_eq!(tame.leader_radius, 1.0);
        assert_eq!(tame.shapeness, 1.0);
        assert_eq!(tame.parallel, wild.parallel);
    }

    #[test]
    fn reference_names_are_accepted_in_json() {
        let params: SimulationParams =
            serde_json::from_str(r#"{ "r_rule1": 40.0, "k_rule0": 0.5, "cohesion_axis": "reference_x_only" }"#)
                .unwrap();
        assert_eq!(params.cohesion_radius, 40.0);
        assert_eq!(params.inertia_weight, 0.5);
        assert_eq!(params.cohesion_axis, CohesionAxisMode::ReferenceXOnly);
        assert_eq!(params.separation_weight, SimulationParams::default().separation_weight);
    }

    #[test]
    fn shared_params_snapshot_sees_writes() {
        let shared = SharedParams::new(SimulationParams::default());
        let before = shared.snapshot();
        shared.update(|p| p.cohesion_weight = 0.9);
        assert_eq!(before.cohesion_weight, 0.15);
        assert_eq!(shared.snapshot().cohesion_weight, 0.9);

        let handle = shared.clone();
        handle.set(SimulationParams::inert());
        assert_eq!(shared.snapshot(), SimulationParams::inert());
    }
}
