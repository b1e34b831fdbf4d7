//! Pointer input as per-tick touch snapshots
//!
//! Real pointers and the title-screen demo script produce the same `Touch` shape,
//! so the runner never knows which one is driving it.

use std::collections::VecDeque;

use glam::Vec2;
use serde::Serialize;

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// One pointer as seen during a single tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Touch {
    pub id: u64,
    pub pos: Vec2,
    /// Went down this tick
    pub just_touched: bool,
    /// Went up this tick (reported for exactly one tick)
    pub just_released: bool,
}

impl Touch {
    /// Still held down
    pub fn is_active(&self) -> bool {
        !self.just_released
    }
}

pub fn any_just_touched(touches: &[Touch]) -> bool {
    touches.iter().any(|t| t.just_touched)
}

pub fn any_active(touches: &[Touch]) -> bool {
    touches.iter().any(Touch::is_active)
}

/// At least one touch, and every one of them was lifted this tick
pub fn all_just_released(touches: &[Touch]) -> bool {
    !touches.is_empty() && touches.iter().all(|t| t.just_released)
}

/// Turns the set of currently pressed pointers into touch snapshots
#[derive(Debug, Clone, Default)]
pub struct TouchTracker {
    touches: Vec<Touch>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one tick given the pointers held right now
    pub fn update(&mut self, pressed: &[(u64, Vec2)]) -> &[Touch] {
        // Releases are only reported once
        self.touches.retain(|t| !t.just_released);

        for touch in &mut self.touches {
            touch.just_touched = false;
            match pressed.iter().find(|(id, _)| *id == touch.id) {
                Some((_, pos)) => touch.pos = *pos,
                None => touch.just_released = true,
            }
        }

        for &(id, pos) in pressed {
            if !self.touches.iter().any(|t| t.id == id) {
                self.touches.push(Touch {
                    id,
                    pos,
                    just_touched: true,
                    just_released: false,
                });
            }
        }

        &self.touches
    }

    pub fn touches(&self) -> &[Touch] {
        &self.touches
    }
}

/// A step of a scripted touch sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimStep {
    /// Hold the current state for this many ticks
    Wait(u32),
    Touch,
    Release,
}

/// Pointer id used by scripted touches
const SIMULATED_TOUCH_ID: u64 = u64::MAX;

/// Scripted touch playback for the attract-mode demo
#[derive(Debug, Clone)]
pub struct TouchSimulation {
    steps: VecDeque<SimStep>,
    wait: u32,
    pressed: bool,
    tracker: TouchTracker,
}

impl Default for TouchSimulation {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchSimulation {
    pub fn new() -> Self {
        Self {
            steps: VecDeque::new(),
            wait: 0,
            pressed: false,
            tracker: TouchTracker::new(),
        }
    }

    pub fn wait(mut self, ticks: u32) -> Self {
        self.steps.push_back(SimStep::Wait(ticks));
        self
    }

    pub fn touch(mut self) -> Self {
        self.steps.push_back(SimStep::Touch);
        self
    }

    pub fn release(mut self) -> Self {
        self.steps.push_back(SimStep::Release);
        self
    }

    /// Script has fully played out
    pub fn is_done(&self) -> bool {
        self.steps.is_empty() && self.wait == 0
    }

    /// Touches for the next tick. Once the script ends the pointer stays as last set.
    pub fn next(&mut self) -> Vec<Touch> {
        loop {
            if self.wait > 0 {
                self.wait -= 1;
                break;
            }
            match self.steps.pop_front() {
                Some(SimStep::Wait(ticks)) => self.wait = ticks,
                Some(SimStep::Touch) => self.pressed = true,
                Some(SimStep::Release) => self.pressed = false,
                None => break,
            }
        }

        let center = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0);
        let pressed = if self.pressed {
            vec![(SIMULATED_TOUCH_ID, center)]
        } else {
            Vec::new()
        };
        self.tracker.update(&pressed).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_lifecycle() {
        let mut tracker = TouchTracker::new();
        let p = Vec2::new(10.0, 20.0);

        let t = tracker.update(&[(1, p)]).to_vec();
        assert_eq!(t.len(), 1);
        assert!(t[0].just_touched && t[0].is_active());
        assert!(any_just_touched(&t));

        let t = tracker.update(&[(1, p + Vec2::X)]).to_vec();
        assert!(!t[0].just_touched && t[0].is_active());
        assert_eq!(t[0].pos, p + Vec2::X);
        assert!(!all_just_released(&t));

        let t = tracker.update(&[]).to_vec();
        assert_eq!(t.len(), 1);
        assert!(t[0].just_released);
        assert!(!any_active(&t));
        assert!(all_just_released(&t));

        assert!(tracker.update(&[]).is_empty());
    }

    #[test]
    fn test_multi_touch_release() {
        let mut tracker = TouchTracker::new();
        let p = Vec2::ZERO;
        tracker.update(&[(1, p), (2, p)]);

        // Lifting one finger is not a full release
        let t = tracker.update(&[(2, p)]).to_vec();
        assert!(!all_just_released(&t));
        assert!(any_active(&t));

        let t = tracker.update(&[]).to_vec();
        assert!(all_just_released(&t));
    }

    #[test]
    fn test_empty_is_not_released() {
        assert!(!all_just_released(&[]));
        assert!(!any_active(&[]));
    }

    #[test]
    fn test_simulation_timeline() {
        let mut sim = TouchSimulation::new().wait(2).touch().wait(3).release();

        assert!(sim.next().is_empty());
        assert!(sim.next().is_empty());

        let t = sim.next();
        assert!(any_just_touched(&t));
        let t = sim.next();
        assert!(any_active(&t) && !any_just_touched(&t));
        assert!(any_active(&sim.next()));

        let t = sim.next();
        assert!(all_just_released(&t));
        assert!(sim.is_done());
        assert!(sim.next().is_empty());
    }
}
