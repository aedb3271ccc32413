/*
 * Flock Statistics
 *
 * Cheap whole-flock measurements taken after a tick, used for logging and
 * the debug panel.
 */

use nannou::prelude::Vec3;

use crate::flock::Flock;
use crate::geometry::inside_cube;
use crate::BOUNDARY;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockStats {
    pub tick: u64,
    pub population: usize,
    pub centroid: Vec3,
    pub mean_speed: f32,
    pub max_speed: f32,
    pub outside_box: usize,
}

impl FlockStats {
    pub fn measure(flock: &Flock, tick: u64) -> Self {
        let population = flock.len();
        let centroid = flock.positions().iter().fold(Vec3::ZERO, |acc, &p| acc + p) / population.max(1) as f32;
        let (speed_sum, max_speed) = flock
            .velocities()
            .iter()
            .map(|v| v.length())
            .fold((0.0, 0.0_f32), |(sum, max), s| (sum + s, max.max(s)));
        let outside_box = flock
            .positions()
            .iter()
            .filter(|&&p| !inside_cube(p, BOUNDARY))
            .count();

        Self {
            tick,
            population,
            centroid,
            mean_speed: speed_sum / population.max(1) as f32,
            max_speed,
            outside_box,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchors::AnchorSet;
    use crate::flock::AgentInit;
    use nannou::prelude::vec3;

    #[test]
    fn measures_centroid_speed_and_escapees() {
        let flock = Flock::new(
            vec![
                AgentInit::new(vec3(0.0, 0.0, 0.0), vec3(3.0, 4.0, 0.0)),
                AgentInit::new(vec3(60.0, 0.0, 0.0), vec3(0.0, 0.0, 1.0)),
            ],
            &[0],
            AnchorSet::default(),
            1,
        )
        .unwrap();
        let stats = FlockStats::measure(&flock, 7);
        assert_eq!(stats.tick, 7);
        assert_eq!(stats.centroid, vec3(30.0, 0.0, 0.0));
        assert_eq!(stats.mean_speed, 3.0);
        assert_eq!(stats.max_speed, 5.0);
        assert_eq!(stats.outside_box, 1);
    }
}
