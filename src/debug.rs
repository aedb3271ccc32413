/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance
 * metrics and flock measurements displayed in the UI:
 * - FPS and frame time
 * - Ticks run in the last frame and time spent ticking
 * - The latest FlockStats
 */

use std::time::Duration;

use crate::stats::FlockStats;

#[derive(Debug, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub ticks_per_frame: u32,
    pub tick_time: Duration,
    pub stats: Option<FlockStats>,
}

impl DebugInfo {
    // Lines of text for the debug overlay and panel
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("FPS: {:.1}", self.fps),
            format!("Frame time: {:.2} ms", self.frame_time.as_secs_f64() * 1000.0),
            format!("Ticks this frame: {}", self.ticks_per_frame),
            format!("Tick time: {:.2} ms", self.tick_time.as_secs_f64() * 1000.0),
        ];
        if let Some(stats) = &self.stats {
            lines.push(format!("Tick: {}", stats.tick));
            lines.push(format!("Boids: {}", stats.population));
            lines.push(format!("Mean speed: {:.2}", stats.mean_speed));
            lines.push(format!("Outside box: {}", stats.outside_box));
        }
        lines
    }
}
