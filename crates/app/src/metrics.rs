//! Running performance metrics
//!
//! Tracks the worst angle and position errors, the absolute force impulse and
//! the settling time of a run.

use log::info;
use serde::{Deserialize, Serialize};
use simcore::{wrap_angle, CartPoleState, Model, Reference, SettleBand};

/// Snapshot of the tracked metrics.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Metrics {
    /// Largest |theta - ref_theta| seen, wrapped (rad)
    pub max_abs_theta: f64,
    /// Largest |x - ref_x| seen (m)
    pub max_abs_x_dev: f64,
    /// Sum of |force| * dt (N*s)
    pub energy_abs_impulse: f64,
    /// Start of the first in-band run that lasted the full hold time (s)
    pub settle_time: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct MetricsTracker {
    band: SettleBand,
    metrics: Metrics,
    in_band_since: Option<f64>,
}

impl MetricsTracker {
    pub fn new(band: SettleBand) -> Self {
        MetricsTracker {
            band,
            metrics: Metrics::default(),
            in_band_since: None,
        }
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    pub fn band(&self) -> &SettleBand {
        &self.band
    }

    /// Time the current uninterrupted in-band run began, if one is in progress.
    pub fn in_band_since(&self) -> Option<f64> {
        self.in_band_since
    }

    pub fn is_settled(&self) -> bool {
        self.metrics.settle_time.is_some()
    }

    /// Folds one integration sub-step into the metrics.
    ///
    /// `t` is the time at the end of the sub-step and `force` the total force
    /// applied during it.
    pub fn update(
        &mut self,
        state: &CartPoleState,
        t: f64,
        force: f64,
        reference: &Reference,
        dt: f64,
    ) {
        let theta_err = wrap_angle(state.theta - reference.theta);
        let x_err = state.x - reference.x;

        let m = &mut self.metrics;
        m.max_abs_theta = m.max_abs_theta.max(theta_err.abs());
        m.max_abs_x_dev = m.max_abs_x_dev.max(x_err.abs());
        m.energy_abs_impulse += force.abs() * dt;

        if m.settle_time.is_some() {
            return;
        }

        let in_band =
            x_err.abs() <= self.band.x_thresh && theta_err.abs() <= self.band.theta_thresh;
        if !in_band {
            // any excursion restarts the hold timer
            self.in_band_since = None;
            return;
        }

        match self.in_band_since {
            None => self.in_band_since = Some(t),
            Some(since) if t - since >= self.band.hold_time => {
                m.settle_time = Some(since);
                info!("settled at t={since:.3}s (held {:.3}s)", t - since);
            }
            Some(_) => {}
        }
    }
}

impl Default for MetricsTracker {
    fn default() -> Self {
        MetricsTracker::new(SettleBand::default())
    }
}

impl Model for MetricsTracker {
    fn reset(&mut self) {
        self.metrics = Metrics::default();
        self.in_band_since = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const IN_BAND: CartPoleState = CartPoleState {
        x: 0.01,
        x_dot: 0.0,
        theta: 0.01,
        theta_dot: 0.0,
    };
    const OUT_OF_BAND: CartPoleState = CartPoleState {
        x: 0.2,
        x_dot: 0.0,
        theta: 0.01,
        theta_dot: 0.0,
    };

    #[test]
    fn test_settle_requires_uninterrupted_hold() {
        let mut tracker = MetricsTracker::default();
        let reference = Reference::default();

        // in band 5.00..5.59 (short of the 1 s hold), out, then in band from 7.00 on
        for i in 400..=900 {
            let t = i as f64 / 100.0;
            let in_band = (500..560).contains(&i) || i >= 700;
            let state = if in_band { IN_BAND } else { OUT_OF_BAND };
            tracker.update(&state, t, 0.0, &reference, 0.01);

            if i == 559 {
                assert_eq!(tracker.in_band_since(), Some(5.0));
                assert!(!tracker.is_settled());
            }
            if i == 650 {
                assert_eq!(tracker.in_band_since(), None);
            }
        }

        assert_eq!(tracker.metrics().settle_time, Some(7.0));
    }

    #[test]
    fn test_settle_time_is_frozen_once_recorded() {
        let mut tracker = MetricsTracker::new(SettleBand {
            hold_time: 0.5,
            ..SettleBand::default()
        });
        let reference = Reference::default();
        for i in 0..=100 {
            tracker.update(&IN_BAND, i as f64 * 0.01, 0.0, &reference, 0.01);
        }
        let settled = tracker.metrics().settle_time;
        assert_eq!(settled, Some(0.0));

        // leaving the band afterwards changes nothing
        tracker.update(&OUT_OF_BAND, 2.0, 0.0, &reference, 0.01);
        tracker.update(&IN_BAND, 2.01, 0.0, &reference, 0.01);
        assert_eq!(tracker.metrics().settle_time, settled);
    }

    #[test]
    fn test_angle_error_is_wrapped() {
        let mut tracker = MetricsTracker::default();
        let state = CartPoleState::new(0.0, 0.0, 3.1, 0.0);
        let reference = Reference::new(0.0, -3.1);
        tracker.update(&state, 0.01, 0.0, &reference, 0.01);
        // 3.1 - (-3.1) = 6.2 rad, which is 2*pi - 6.2 away on the circle
        assert_relative_eq!(
            tracker.metrics().max_abs_theta,
            std::f64::consts::TAU - 6.2,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_extremes_and_impulse_accumulate() {
        let mut tracker = MetricsTracker::default();
        let reference = Reference::new(1.0, 0.0);
        let dt = 1.0 / 240.0;
        let samples = [
            (CartPoleState::new(0.5, 0.0, 0.2, 0.0), 10.0),
            (CartPoleState::new(1.1, 0.0, -0.4, 0.0), -25.0),
            (CartPoleState::new(1.0, 0.0, 0.1, 0.0), 0.0),
            (CartPoleState::new(-0.2, 0.0, 0.0, 0.0), 3.5),
        ];

        let mut expected_impulse = 0.0;
        let mut prev = tracker.metrics();
        for (i, (state, force)) in samples.iter().enumerate() {
            tracker.update(state, (i + 1) as f64 * dt, *force, &reference, dt);
            expected_impulse += force.abs() * dt;

            let now = tracker.metrics();
            assert!(now.max_abs_theta >= prev.max_abs_theta);
            assert!(now.max_abs_x_dev >= prev.max_abs_x_dev);
            assert!(now.energy_abs_impulse >= prev.energy_abs_impulse);
            prev = now;
        }

        let m = tracker.metrics();
        assert_relative_eq!(m.max_abs_theta, 0.4, epsilon = 1e-12);
        assert_relative_eq!(m.max_abs_x_dev, 1.2, epsilon = 1e-12);
        assert_relative_eq!(m.energy_abs_impulse, expected_impulse, max_relative = 1e-12);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut tracker = MetricsTracker::new(SettleBand {
            hold_time: 0.0,
            ..SettleBand::default()
        });
        tracker.update(&IN_BAND, 0.1, 5.0, &Reference::default(), 0.1);
        tracker.update(&IN_BAND, 0.2, 5.0, &Reference::default(), 0.1);
        assert!(tracker.is_settled());

        tracker.reset();
        assert_eq!(tracker.metrics(), Metrics::default());
        assert_eq!(tracker.in_band_since(), None);
    }
}
