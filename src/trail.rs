/*
 * Trail Module
 *
 * Fixed-capacity history of an agent's most recent positions, stored as a
 * ring buffer so recording a new position is O(1). Iteration is always
 * newest first.
 */

use nannou::prelude::Vec3;

#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    points: Vec<Vec3>,
    // Slot holding the newest position
    head: usize,
}

impl Trail {
    // A trail of `length` slots, all holding `initial`. Panics on zero length.
    pub fn new(initial: Vec3, length: usize) -> Self {
        assert!(length > 0, "trail length must be at least 1");
        Self {
            points: vec![initial; length],
            head: 0,
        }
    }

    // Record a new position, overwriting the oldest one
    pub fn push(&mut self, position: Vec3) {
        self.head = (self.head + 1) % self.points.len();
        self.points[self.head] = position;
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn newest(&self) -> Vec3 {
        self.points[self.head]
    }

    pub fn oldest(&self) -> Vec3 {
        self.points[(self.head + 1) % self.points.len()]
    }

    // Position recorded `age` pushes ago (0 is the newest)
    pub fn get(&self, age: usize) -> Option<Vec3> {
        let len = self.points.len();
        if age >= len {
            return None;
        }
        Some(self.points[(self.head + len - age) % len])
    }

    // Iterate from newest to oldest
    pub fn iter(&self) -> impl Iterator<Item = Vec3> + '_ {
        (0..self.points.len()).filter_map(move |age| self.get(age))
    }

    pub fn to_vec(&self) -> Vec<Vec3> {
        self.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nannou::prelude::vec3;

    #[test]
    fn new_trail_is_padded_with_the_initial_position() {
        let start = vec3(1.0, 2.0, 3.0);
        let trail = Trail::new(start, 4);
        assert_eq!(trail.len(), 4);
        assert!(trail.iter().all(|p| p == start));
    }

    #[test]
    fn push_keeps_newest_first_and_drops_oldest() {
        let mut trail = Trail::new(Vec3::ZERO, 3);
        trail.push(vec3(1.0, 0.0, 0.0));
        trail.push(vec3(2.0, 0.0, 0.0));
        trail.push(vec3(3.0, 0.0, 0.0));
        trail.push(vec3(4.0, 0.0, 0.0));

        assert_eq!(trail.len(), 3);
        assert_eq!(trail.newest(), vec3(4.0, 0.0, 0.0));
        assert_eq!(trail.oldest(), vec3(2.0, 0.0, 0.0));
        assert_eq!(
            trail.to_vec(),
            vec![vec3(4.0, 0.0, 0.0), vec3(3.0, 0.0, 0.0), vec3(2.0, 0.0, 0.0)]
        );
    }

    #[test]
    fn get_past_the_end_is_none() {
        let trail = Trail::new(Vec3::ZERO, 2);
        assert!(trail.get(1).is_some());
        assert!(trail.get(2).is_none());
    }

    #[test]
    fn single_slot_trail_only_holds_the_newest() {
        let mut trail = Trail::new(Vec3::ZERO, 1);
        trail.push(vec3(5.0, 5.0, 5.0));
        assert_eq!(trail.to_vec(), vec![vec3(5.0, 5.0, 5.0)]);
        assert_eq!(trail.oldest(), trail.newest());
    }

    #[test]
    #[should_panic]
    fn zero_length_panics() {
        let _ = Trail::new(Vec3::ZERO, 0);
    }
}
