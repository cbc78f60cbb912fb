//! Named access to controller gains
//!
//! A tuning surface (sliders, text fields, a config file) can list, read and
//! write gains by name through this table instead of knowing the struct layout.

use simcore::{SimError, SimResult};

use crate::pid::PidGains;

/// Getter/setter pair for one named gain.
#[derive(Clone, Copy)]
pub struct GainAccessor {
    pub name: &'static str,
    /// Suggested tuning range (min, max)
    pub range: (f64, f64),
    get: fn(&PidGains) -> f64,
    set: fn(&mut PidGains, f64),
}

impl GainAccessor {
    pub fn get(&self, gains: &PidGains) -> f64 {
        (self.get)(gains)
    }

    pub fn set(&self, gains: &mut PidGains, value: f64) {
        (self.set)(gains, value)
    }
}

impl std::fmt::Debug for GainAccessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GainAccessor")
            .field("name", &self.name)
            .field("range", &self.range)
            .finish()
    }
}

pub static GAIN_TABLE: [GainAccessor; 3] = [
    GainAccessor {
        name: "k_p",
        range: (0.0, 10.0),
        get: |g: &PidGains| g.k_p,
        set: |g: &mut PidGains, v: f64| g.k_p = v,
    },
    GainAccessor {
        name: "k_i",
        range: (0.0, 10.0),
        get: |g: &PidGains| g.k_i,
        set: |g: &mut PidGains, v: f64| g.k_i = v,
    },
    GainAccessor {
        name: "k_d",
        range: (0.0, 10.0),
        get: |g: &PidGains| g.k_d,
        set: |g: &mut PidGains, v: f64| g.k_d = v,
    },
];

/// Look up a gain accessor by name.
pub fn find_gain(name: &str) -> Option<&'static GainAccessor> {
    GAIN_TABLE.iter().find(|accessor| accessor.name == name)
}

impl PidGains {
    /// Read a gain by name.
    pub fn get(&self, name: &str) -> SimResult<f64> {
        find_gain(name)
            .map(|accessor| accessor.get(self))
            .ok_or_else(|| SimError::UnknownGain(name.to_string()))
    }

    /// Write a gain by name. Values are not range-checked.
    pub fn set(&mut self, name: &str, value: f64) -> SimResult<()> {
        let accessor = find_gain(name).ok_or_else(|| SimError::UnknownGain(name.to_string()))?;
        accessor.set(self, value);
        Ok(())
    }
}
