use std::time::Instant;

use tracing::debug;

use crate::content::Track;

use super::PlaybackBackend;

/// Custom audio player over a game's soundtrack
#[derive(Debug)]
pub struct AudioPlayer<B> {
    tracks: Vec<Track>,
    selected: usize,
    playing: bool,
    /// Seconds into the selected track
    position: f64,
    last_update: Option<Instant>,
    backend: B,
}

impl<B: PlaybackBackend> AudioPlayer<B> {
    pub fn new(tracks: Vec<Track>, backend: B) -> Self {
        Self {
            tracks,
            selected: 0,
            playing: false,
            position: 0.0,
            last_update: None,
            backend,
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn current(&self) -> Option<&Track> {
        self.tracks.get(self.selected)
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn duration(&self) -> f64 {
        self.current()
            .map(|t| t.duration_secs)
            .filter(|d| d.is_finite() && *d > 0.0)
            .unwrap_or(0.0)
    }

    /// Played fraction in `[0, 1]`
    pub fn progress(&self) -> f64 {
        let duration = self.duration();
        if duration <= 0.0 {
            0.0
        } else {
            (self.position / duration).clamp(0.0, 1.0)
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Play or pause; returns whether the player ends up playing
    pub fn toggle_play(&mut self, now: Instant) -> bool {
        if self.playing {
            self.pause();
        } else {
            self.start(now);
        }
        self.playing
    }

    fn start(&mut self, now: Instant) {
        let Some(track) = self.tracks.get(self.selected) else {
            return;
        };
        match self.backend.play(&track.src, self.position) {
            Ok(()) => {
                self.playing = true;
                self.last_update = Some(now);
            }
            Err(e) => {
                debug!(track = %track.title, error = %e, "playback did not start");
                self.playing = false;
                self.last_update = None;
            }
        }
    }

    pub fn pause(&mut self) {
        if self.playing {
            self.backend.pause();
        }
        self.playing = false;
        self.last_update = None;
    }

    /// Move the playhead to `fraction` of the track, clamped to `[0, 1]`
    pub fn seek_fraction(&mut self, fraction: f64) {
        let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
        self.seek_to(fraction * self.duration());
    }

    /// Move the playhead by `delta` seconds, clamped to the track
    pub fn seek_by(&mut self, delta: f64) {
        if delta.is_finite() {
            self.seek_to(self.position + delta);
        }
    }

    fn seek_to(&mut self, secs: f64) {
        self.position = secs.clamp(0.0, self.duration());
        self.backend.seek(self.position);
    }

    /// Advance the playhead while playing; stops and rewinds at the end
    pub fn update(&mut self, now: Instant) {
        if !self.playing {
            return;
        }
        if let Some(last) = self.last_update {
            self.position += now.saturating_duration_since(last).as_secs_f64();
        }
        self.last_update = Some(now);

        if self.position >= self.duration() {
            self.pause();
            self.position = 0.0;
        }
    }

    pub fn next_track(&mut self, now: Instant) {
        if !self.tracks.is_empty() {
            self.select((self.selected + 1) % self.tracks.len(), now);
        }
    }

    pub fn prev_track(&mut self, now: Instant) {
        if !self.tracks.is_empty() {
            self.select((self.selected + self.tracks.len() - 1) % self.tracks.len(), now);
        }
    }

    /// Switch tracks from the top, keeping play state when possible
    pub fn select(&mut self, index: usize, now: Instant) {
        if index >= self.tracks.len() {
            return;
        }
        let was_playing = self.playing;
        self.pause();
        self.selected = index;
        self.position = 0.0;
        if was_playing {
            self.start(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::media::testing::ScriptedBackend;

    fn tracks() -> Vec<Track> {
        vec![
            Track {
                title: "One".to_string(),
                src: "one.ogg".to_string(),
                duration_secs: 100.0,
            },
            Track {
                title: "Two".to_string(),
                src: "two.ogg".to_string(),
                duration_secs: 60.0,
            },
        ]
    }

    fn player() -> AudioPlayer<ScriptedBackend> {
        AudioPlayer::new(tracks(), ScriptedBackend::default())
    }

    #[test]
    fn test_toggle_play() {
        let mut player = player();
        let now = Instant::now();
        assert!(player.toggle_play(now));
        assert_eq!(player.backend().played, vec![("one.ogg".to_string(), 0.0)]);
        assert!(!player.toggle_play(now));
        assert_eq!(player.backend().pauses, 1);
    }

    #[test]
    fn test_rejection_reverts_silently() {
        let mut player = AudioPlayer::new(
            tracks(),
            ScriptedBackend {
                reject: true,
                ..Default::default()
            },
        );
        let now = Instant::now();
        assert!(!player.toggle_play(now));
        assert!(!player.is_playing());
        player.update(now + Duration::from_secs(5));
        assert_eq!(player.position(), 0.0);
    }

    #[test]
    fn test_seek_clamping() {
        let mut player = player();
        player.seek_fraction(0.25);
        assert_eq!(player.position(), 25.0);
        player.seek_fraction(1.7);
        assert_eq!(player.position(), 100.0);
        player.seek_fraction(-3.0);
        assert_eq!(player.position(), 0.0);

        player.seek_by(-10.0);
        assert_eq!(player.position(), 0.0);
        player.seek_by(42.0);
        assert_eq!(player.position(), 42.0);
        player.seek_by(1000.0);
        assert_eq!(player.position(), 100.0);
        player.seek_by(f64::NAN);
        assert_eq!(player.position(), 100.0);
    }

    #[test]
    fn test_position_advances_and_rewinds_at_end() {
        let mut player = player();
        let t0 = Instant::now();
        player.select(1, t0);
        player.toggle_play(t0);
        player.update(t0 + Duration::from_secs(30));
        assert!((player.position() - 30.0).abs() < 1e-9);
        assert!((player.progress() - 0.5).abs() < 1e-9);

        player.update(t0 + Duration::from_secs(61));
        assert!(!player.is_playing());
        assert_eq!(player.position(), 0.0);
    }

    #[test]
    fn test_track_change_resets_position() {
        let mut player = player();
        let t0 = Instant::now();
        player.toggle_play(t0);
        player.update(t0 + Duration::from_secs(10));

        player.next_track(t0 + Duration::from_secs(10));
        assert_eq!(player.selected(), 1);
        assert_eq!(player.position(), 0.0);
        assert!(player.is_playing());
        assert_eq!(player.backend().played.last().unwrap().0, "two.ogg");

        player.prev_track(t0);
        player.prev_track(t0);
        assert_eq!(player.selected(), 1);
    }

    #[test]
    fn test_empty_tracklist() {
        let mut player = AudioPlayer::new(Vec::new(), ScriptedBackend::default());
        let now = Instant::now();
        assert!(!player.toggle_play(now));
        player.next_track(now);
        player.seek_fraction(0.5);
        assert_eq!(player.position(), 0.0);
        assert_eq!(player.progress(), 0.0);
    }
}
