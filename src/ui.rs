/*
 * UI Module
 *
 * The egui control surface. Sliders edit a local copy of the parameters
 * which is written back to the shared handle only when something changed,
 * so the simulation picks the new values up on its next tick.
 */

use nannou_egui::{egui, Egui};

use crate::camera::Camera;
use crate::debug::DebugInfo;
use crate::params::{CohesionAxisMode, SharedParams, SimulationParams};
use crate::rules::{Rule, RuleSet};

// What the panel asked the host to do this frame
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UiResponse {
    pub reset: bool,
    pub params_changed: bool,
    pub rules_changed: bool,
}

pub fn update_ui(
    egui: &mut Egui,
    shared: &SharedParams,
    camera: &mut Camera,
    paused: &mut bool,
    rules: &mut RuleSet,
    debug_info: &DebugInfo,
) -> UiResponse {
    let mut response = UiResponse::default();
    let mut params = shared.snapshot();
    let before = params;

    let ctx = egui.begin_frame();

    egui::Window::new("Boid Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Cohesion / Separation / Matching", |ui| {
                ui.add(egui::Slider::new(&mut params.cohesion_radius, SimulationParams::get_cohesion_radius_range()).text("r_rule1"));
                ui.add(egui::Slider::new(&mut params.separation_radius, SimulationParams::get_separation_radius_range()).text("r_rule2"));
                ui.add(egui::Slider::new(&mut params.alignment_radius, SimulationParams::get_alignment_radius_range()).text("r_rule3"));
                ui.add(egui::Slider::new(&mut params.cohesion_weight, SimulationParams::get_weight_range()).text("k_rule1"));
                ui.add(egui::Slider::new(&mut params.separation_weight, SimulationParams::get_weight_range()).text("k_rule2"));
                ui.add(egui::Slider::new(&mut params.alignment_weight, SimulationParams::get_weight_range()).text("k_rule3"));
                ui.add(egui::Slider::new(&mut params.inertia_weight, SimulationParams::get_weight_range()).text("k_rule0"));
                let mut x_only = params.cohesion_axis == CohesionAxisMode::ReferenceXOnly;
                ui.checkbox(&mut x_only, "Cohesion uses x-centroid on every axis");
                params.cohesion_axis = if x_only {
                    CohesionAxisMode::ReferenceXOnly
                } else {
                    CohesionAxisMode::PerAxis
                };
            });

            ui.collapsing("Leaders / Shape", |ui| {
                ui.add(egui::Slider::new(&mut params.leader_radius, SimulationParams::get_leader_radius_range()).text("r_ruleLeader"));
                ui.add(egui::Slider::new(&mut params.leader_weight, SimulationParams::get_weight_range()).text("k_ruleLeader"));
                ui.add(egui::Slider::new(&mut params.hover_weight, SimulationParams::get_weight_range()).text("k_ruleHover"));
                ui.add(egui::Slider::new(&mut params.shapeness, SimulationParams::get_weight_range()).text("shapeness"));
            });

            ui.collapsing("Rules", |ui| {
                for rule in Rule::ALL {
                    let mut enabled = rules.is_enabled(rule);
                    if ui.checkbox(&mut enabled, rule.name()).changed() {
                        if enabled {
                            rules.enable(rule);
                        } else {
                            rules.disable(rule);
                        }
                        response.rules_changed = true;
                    }
                }
            });

            ui.collapsing("View", |ui| {
                ui.add(egui::Slider::new(&mut camera.rotation, 0.0..=360.0).text("global_rot"));
                ui.label(format!("Zoom: {:.2}x", camera.zoom));
            });

            ui.separator();
            ui.checkbox(&mut params.parallel, "Parallel rule evaluation");
            ui.checkbox(paused, "Pause Simulation");
            if ui.button("Reset Boids").clicked() {
                response.reset = true;
            }

            ui.separator();
            for line in debug_info.lines() {
                ui.label(line);
            }
        });

    if params != before {
        shared.set(params);
        response.params_changed = true;
    }
    response
}
