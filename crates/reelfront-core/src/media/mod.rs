//! Audio player and clip gallery state
//!
//! Actual output goes through a [`PlaybackBackend`]. A backend may refuse to
//! start (no device, autoplay policy, missing file); the player then quietly
//! falls back to not playing.

mod audio;
mod clips;

use thiserror::Error;

pub use audio::AudioPlayer;
pub use clips::ClipGallery;

#[derive(Debug, Clone, Error)]
#[error("playback rejected: {reason}")]
pub struct PlaybackRejected {
    pub reason: String,
}

impl PlaybackRejected {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

pub trait PlaybackBackend {
    /// Start playing `src` at `from_secs`
    fn play(&mut self, src: &str, from_secs: f64) -> Result<(), PlaybackRejected>;

    fn pause(&mut self);

    fn seek(&mut self, _to_secs: f64) {}
}

/// Backend that accepts everything and produces no output
///
/// Playback position is still tracked, which is all a terminal preview needs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentBackend;

impl PlaybackBackend for SilentBackend {
    fn play(&mut self, _src: &str, _from_secs: f64) -> Result<(), PlaybackRejected> {
        Ok(())
    }

    fn pause(&mut self) {}
}

impl<B: PlaybackBackend + ?Sized> PlaybackBackend for Box<B> {
    fn play(&mut self, src: &str, from_secs: f64) -> Result<(), PlaybackRejected> {
        (**self).play(src, from_secs)
    }

    fn pause(&mut self) {
        (**self).pause()
    }

    fn seek(&mut self, to_secs: f64) {
        (**self).seek(to_secs)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Records calls and rejects when told to
    #[derive(Debug, Default)]
    pub struct ScriptedBackend {
        pub reject: bool,
        pub played: Vec<(String, f64)>,
        pub pauses: usize,
        pub seeks: Vec<f64>,
    }

    impl PlaybackBackend for ScriptedBackend {
        fn play(&mut self, src: &str, from_secs: f64) -> Result<(), PlaybackRejected> {
            if self.reject {
                return Err(PlaybackRejected::new("autoplay blocked"));
            }
            self.played.push((src.to_string(), from_secs));
            Ok(())
        }

        fn pause(&mut self) {
            self.pauses += 1;
        }

        fn seek(&mut self, to_secs: f64) {
            self.seeks.push(to_secs);
        }
    }
}
