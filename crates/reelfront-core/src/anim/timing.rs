//! Time calculation utilities for animations
//!
//! Every function takes the current instant explicitly so callers can drive
//! animations from a real clock or from a simulated one.

use std::time::{Duration, Instant};

/// Calculate animation progress (0.0 to 1.0) from start time and duration
#[inline]
pub fn progress(start: Instant, now: Instant, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Check if animation is complete
#[inline]
pub fn is_complete(start: Instant, now: Instant, duration: Duration) -> bool {
    now.saturating_duration_since(start) >= duration
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Number of reference frames that fit in `elapsed`
#[inline]
pub fn frames_elapsed(elapsed: Duration, reference_frame: Duration) -> f64 {
    if reference_frame.is_zero() {
        return 0.0;
    }
    elapsed.as_secs_f64() / reference_frame.as_secs_f64()
}
