//! Danger level shown by the `status` and `threat-level` scripts.
//!
//! The level lives outside the session: the interpreter only reads it at
//! dispatch time through [`ThreatSource`].

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use rand::Rng;

const MAX_LEVEL: u8 = 100;
const MAX_DRIFT_STEP: i16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DangerLevel(u8);

impl DangerLevel {
    /// Values above 100 are clamped.
    pub fn new(value: u8) -> Self {
        Self(value.min(MAX_LEVEL))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn network_security(self) -> u8 {
        MAX_LEVEL - self.0
    }
}

impl fmt::Display for DangerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub trait ThreatSource {
    fn danger_level(&self) -> DangerLevel;
}

impl ThreatSource for DangerLevel {
    fn danger_level(&self) -> DangerLevel {
        *self
    }
}

/// Shared, lock-free danger level.
#[derive(Debug, Clone)]
pub struct ThreatGauge {
    level: Arc<AtomicU8>,
}

impl ThreatGauge {
    pub fn new(initial: DangerLevel) -> Self {
        Self {
            level: Arc::new(AtomicU8::new(initial.value())),
        }
    }

    pub fn set(&self, level: DangerLevel) {
        self.level.store(level.value(), Ordering::SeqCst);
    }

    /// Nudges the level by a random step of at most five points, staying in `0..=100`.
    pub fn drift<R: Rng + ?Sized>(&self, rng: &mut R) -> DangerLevel {
        let step = rng.gen_range(-MAX_DRIFT_STEP..=MAX_DRIFT_STEP);
        let current = i16::from(self.danger_level().value());
        let next = DangerLevel::new((current + step).clamp(0, i16::from(MAX_LEVEL)) as u8);
        self.set(next);
        next
    }
}

impl ThreatSource for ThreatGauge {
    fn danger_level(&self) -> DangerLevel {
        DangerLevel::new(self.level.load(Ordering::SeqCst))
    }
}
