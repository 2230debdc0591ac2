use tracing::debug;

use crate::content::Clip;

use super::PlaybackBackend;

/// Video clips of one game with a single selected clip
#[derive(Debug)]
pub struct ClipGallery<B> {
    clips: Vec<Clip>,
    selected: usize,
    playing: bool,
    backend: B,
}

impl<B: PlaybackBackend> ClipGallery<B> {
    pub fn new(clips: Vec<Clip>, backend: B) -> Self {
        Self {
            clips,
            selected: 0,
            playing: false,
            backend,
        }
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn current(&self) -> Option<&Clip> {
        self.clips.get(self.selected)
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn toggle_play(&mut self) -> bool {
        if self.playing {
            self.stop();
        } else if let Some(clip) = self.clips.get(self.selected) {
            match self.backend.play(&clip.src, 0.0) {
                Ok(()) => self.playing = true,
                Err(e) => {
                    debug!(clip = %clip.title, error = %e, "clip did not start");
                    self.playing = false;
                }
            }
        }
        self.playing
    }

    pub fn stop(&mut self) {
        if self.playing {
            self.backend.pause();
        }
        self.playing = false;
    }

    /// Select another clip; playback stops
    pub fn select(&mut self, index: usize) {
        if index < self.clips.len() && index != self.selected {
            self.stop();
            self.selected = index;
        }
    }

    pub fn next(&mut self) {
        if !self.clips.is_empty() {
            self.select((self.selected + 1) % self.clips.len());
        }
    }

    pub fn prev(&mut self) {
        if !self.clips.is_empty() {
            self.select((self.selected + self.clips.len() - 1) % self.clips.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::testing::ScriptedBackend;

    fn clips() -> Vec<Clip> {
        ["trailer", "gameplay", "dev diary"]
            .iter()
            .map(|t| Clip {
                title: t.to_string(),
                src: format!("{t}.mp4"),
            })
            .collect()
    }

    #[test]
    fn test_play_stop() {
        let mut gallery = ClipGallery::new(clips(), ScriptedBackend::default());
        assert!(gallery.toggle_play());
        assert!(!gallery.toggle_play());
        assert_eq!(gallery.backend.pauses, 1);
    }

    #[test]
    fn test_rejection_reverts() {
        let backend = ScriptedBackend {
            reject: true,
            ..Default::default()
        };
        let mut gallery = ClipGallery::new(clips(), backend);
        assert!(!gallery.toggle_play());
        assert!(!gallery.is_playing());
    }

    #[test]
    fn test_selection_wraps_and_stops() {
        let mut gallery = ClipGallery::new(clips(), ScriptedBackend::default());
        gallery.toggle_play();
        gallery.prev();
        assert_eq!(gallery.selected(), 2);
        assert!(!gallery.is_playing());
        gallery.next();
        assert_eq!(gallery.current().unwrap().title, "trailer");
    }
}
