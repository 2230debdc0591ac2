use std::time::{Duration, Instant};

use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp, progress};

/// A single eased transition between two values
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    start: Instant,
    from: f64,
    to: f64,
    duration: Duration,
    easing: EasingType,
}

impl Tween {
    pub fn new(start: Instant, from: f64, to: f64, duration: Duration, easing: EasingType) -> Self {
        Self {
            start,
            from,
            to,
            duration,
            easing,
        }
    }

    pub fn from(&self) -> f64 {
        self.from
    }

    pub fn to(&self) -> f64 {
        self.to
    }

    /// Interpolated value at `now`
    pub fn sample(&self, now: Instant) -> f64 {
        if self.is_done(now) {
            return self.to;
        }
        let t = progress(self.start, now, self.duration);
        lerp(self.from, self.to, self.easing.apply(t))
    }

    pub fn is_done(&self, now: Instant) -> bool {
        is_complete(self.start, now, self.duration)
    }
}
