//! Reduced-motion guard
//!
//! Every animated component consults a [`MotionPreference`] on each frame. The
//! answer is never cached, so flipping the preference takes effect on the next
//! tick without remounting anything.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use tracing::info;

use crate::config::MotionSetting;

/// Environment variable consulted when the setting is `auto`
pub const REDUCED_MOTION_ENV: &str = "REELFRONT_REDUCED_MOTION";

/// Live reduced-motion signal
pub trait MotionPreference {
    fn prefers_reduced_motion(&self) -> bool;
}

impl MotionPreference for bool {
    fn prefers_reduced_motion(&self) -> bool {
        *self
    }
}

impl<T: MotionPreference + ?Sized> MotionPreference for &T {
    fn prefers_reduced_motion(&self) -> bool {
        (**self).prefers_reduced_motion()
    }
}

const AUTO: u8 = 0;
const REDUCE: u8 = 1;
const NO_PREFERENCE: u8 = 2;

fn encode(setting: MotionSetting) -> u8 {
    match setting {
        MotionSetting::Auto => AUTO,
        MotionSetting::Reduce => REDUCE,
        MotionSetting::NoPreference => NO_PREFERENCE,
    }
}

fn decode(raw: u8) -> MotionSetting {
    match raw {
        REDUCE => MotionSetting::Reduce,
        NO_PREFERENCE => MotionSetting::NoPreference,
        _ => MotionSetting::Auto,
    }
}

/// Shared, runtime-adjustable motion preference
///
/// Clones share the same underlying setting.
#[derive(Debug, Clone)]
pub struct MotionGuard {
    setting: Arc<AtomicU8>,
}

impl Default for MotionGuard {
    fn default() -> Self {
        Self::new(MotionSetting::Auto)
    }
}

impl MotionGuard {
    pub fn new(setting: MotionSetting) -> Self {
        Self {
            setting: Arc::new(AtomicU8::new(encode(setting))),
        }
    }

    pub fn setting(&self) -> MotionSetting {
        decode(self.setting.load(Ordering::Relaxed))
    }

    pub fn set(&self, setting: MotionSetting) {
        self.setting.store(encode(setting), Ordering::Relaxed);
    }

    /// Flip between reduced and full motion, leaving `auto` behind
    pub fn toggle(&self) -> bool {
        let reduce = !self.prefers_reduced_motion();
        self.set(if reduce {
            MotionSetting::Reduce
        } else {
            MotionSetting::NoPreference
        });
        info!(reduce, "reduced motion toggled");
        reduce
    }
}

impl MotionPreference for MotionGuard {
    fn prefers_reduced_motion(&self) -> bool {
        match self.setting() {
            MotionSetting::Reduce => true,
            MotionSetting::NoPreference => false,
            MotionSetting::Auto => env_prefers_reduced_motion(),
        }
    }
}

fn env_prefers_reduced_motion() -> bool {
    std::env::var(REDUCED_MOTION_ENV)
        .map(|v| is_truthy(&v))
        .unwrap_or(false)
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on" | "reduce"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_settings() {
        assert!(MotionGuard::new(MotionSetting::Reduce).prefers_reduced_motion());
        assert!(!MotionGuard::new(MotionSetting::NoPreference).prefers_reduced_motion());
    }

    #[test]
    fn test_clones_share_state() {
        let guard = MotionGuard::new(MotionSetting::NoPreference);
        let observer = guard.clone();
        assert!(!observer.prefers_reduced_motion());
        assert!(guard.toggle());
        assert!(observer.prefers_reduced_motion());
        assert!(!guard.toggle());
        assert!(!observer.prefers_reduced_motion());
    }

    #[test]
    fn test_truthy_values() {
        for v in ["1", "true", "YES", " on ", "reduce"] {
            assert!(is_truthy(v), "{v}");
        }
        for v in ["0", "false", "", "no-preference"] {
            assert!(!is_truthy(v), "{v}");
        }
    }
}
