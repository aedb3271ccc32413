/*
 * Tick Clock Module
 *
 * Optional fixed-timestep driver. The simulation itself has no notion of
 * time: one tick is one application of the rules. Hosts that want flock
 * speed to be independent of frame rate feed elapsed wall time into a
 * TickClock and run however many whole ticks it hands back.
 */

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct TickClock {
    step: Duration,
    accumulator: Duration,
    // Upper bound on ticks per advance, so a long stall doesn't freeze the host
    max_catch_up: u32,
}

impl TickClock {
    pub fn new(step: Duration, max_catch_up: u32) -> Self {
        Self {
            step: step.max(Duration::from_micros(1)),
            accumulator: Duration::ZERO,
            max_catch_up: max_catch_up.max(1),
        }
    }

    // Clock ticking `rate` times per second
    pub fn from_rate(rate: f32, max_catch_up: u32) -> Self {
        let rate = if rate.is_finite() && rate > 0.0 { rate } else { 60.0 };
        Self::new(Duration::from_secs_f32(1.0 / rate), max_catch_up)
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    // Add elapsed time and return the number of ticks now due
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;
        let mut due = 0;
        while self.accumulator >= self.step && due < self.max_catch_up {
            self.accumulator -= self.step;
            due += 1;
        }
        if due == self.max_catch_up && self.accumulator >= self.step {
            tracing::warn!(
                dropped = ?self.accumulator,
                "tick clock fell behind, dropping accumulated time"
            );
            self.accumulator = Duration::ZERO;
        }
        due
    }

    // Fraction of the next step already accumulated, in [0, 1)
    pub fn alpha(&self) -> f32 {
        (self.accumulator.as_secs_f32() / self.step.as_secs_f32()).clamp(0.0, 1.0)
    }
}
