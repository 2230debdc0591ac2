pub mod anim;
pub mod config;
pub mod content;
pub mod error;
pub mod media;
pub mod motion;
pub mod rail;
pub mod scene;
pub mod typewriter;

pub use config::{AppConfig, EasingType, MotionSetting, RailConfig, ScrollConfig};
pub use content::{Route, SiteContent};
pub use error::{Error, Result};
pub use motion::{MotionGuard, MotionPreference};
pub use rail::{Direction, Rail, RailRunner};
