//! Animation atoms shared by rails, scenes and page scrolling
//!
//! - `easing` - pure easing curves
//! - `timing` - progress and interpolation helpers
//! - `tween` - a single eased transition sampled against an explicit clock

pub mod easing;
pub mod timing;
pub mod tween;

pub use easing::{EasingType, EasingTypeExt};
pub use tween::Tween;
