//! Smooth vertical page scrolling
//!
//! The easing and timing atoms live in `reelfront_core::anim`; this module
//! only holds the row-based controller the pages use.

pub mod animation;

pub use animation::PageScroller;
pub use reelfront_core::config::ScrollConfig;
