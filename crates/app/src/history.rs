//! Bounded per-frame trace of the simulation, for plotting collaborators.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use simcore::{wrap_angle, CartPoleState};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistorySample {
    pub t: f64,
    pub x: f64,
    pub x_dot: f64,
    /// Wrapped to (-pi, pi]
    pub theta: f64,
    pub theta_dot: f64,
    /// Total force applied during the last sub-step (N)
    pub force: f64,
}

/// Ring buffer keeping the most recent `capacity` samples.
#[derive(Debug, Clone)]
pub struct History {
    samples: VecDeque<HistorySample>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::new(),
            capacity,
        }
    }

    pub fn push(&mut self, t: f64, state: &CartPoleState, force: f64) {
        if self.capacity == 0 {
            return;
        }
        while self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(HistorySample {
            t,
            x: state.x,
            x_dot: state.x_dot,
            theta: wrap_angle(state.theta),
            theta_dot: state.theta_dot,
            force,
        });
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistorySample> {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<&HistorySample> {
        self.samples.back()
    }

    /// One field of every sample, oldest first.
    pub fn column(&self, field: fn(&HistorySample) -> f64) -> Vec<f64> {
        self.samples.iter().map(field).collect()
    }
}
