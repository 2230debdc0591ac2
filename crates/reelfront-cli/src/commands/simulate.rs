//! Headless rail runs
//!
//! `run` steps simulated frames and is fully deterministic; `run_realtime`
//! hands the rail to the async frame loop and sleeps through the timeline.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, ensure, Result};

use reelfront_core::content::Testimonial;
use reelfront_core::rail::{FrameOutcome, PauseMode, TickOutcome};
use reelfront_core::{AppConfig, Direction, MotionGuard, MotionPreference, Rail, RailRunner, SiteContent};

/// Longest run `simulate` accepts, one day
const MAX_SECONDS: f64 = 86_400.0;
const MAX_FPS: u32 = 1000;

pub struct Options {
    pub seconds: f64,
    pub fps: u32,
    pub nav_at: Vec<f64>,
    pub scroll_width: f64,
    pub visible_width: f64,
}

impl Options {
    fn validate(&self) -> Result<()> {
        ensure!(
            self.seconds.is_finite() && self.seconds > 0.0 && self.seconds <= MAX_SECONDS,
            "--seconds must be a positive number up to {MAX_SECONDS}"
        );
        ensure!(
            (1..=MAX_FPS).contains(&self.fps),
            "--fps must be between 1 and {MAX_FPS}"
        );
        ensure!(
            self.nav_at.iter().all(|t| t.is_finite() && *t >= 0.0),
            "--nav-at times must be non-negative seconds"
        );
        Ok(())
    }

    fn jumps(&self) -> Vec<f64> {
        let mut jumps = self.nav_at.clone();
        jumps.sort_by(f64::total_cmp);
        jumps
    }
}

fn rail_for(config: &AppConfig, content: &SiteContent, options: &Options) -> Result<Rail<Testimonial>> {
    if content.testimonials.is_empty() {
        bail!("the content has no testimonials to put on the rail");
    }
    let items: Arc<[Testimonial]> = content.testimonials.clone().into();
    let mut rail = Rail::new(items, &config.rail);
    rail.measure(options.scroll_width, options.visible_width);
    Ok(rail)
}

fn pause_label(mode: PauseMode, now: Instant) -> String {
    match mode {
        PauseMode::Running => "running".to_string(),
        PauseMode::PausedSticky => "paused".to_string(),
        PauseMode::PausedTimed { deadline } => format!(
            "paused ({:.2}s left)",
            deadline.saturating_duration_since(now).as_secs_f64()
        ),
    }
}

/// Step the rail frame by frame over simulated time
pub fn run(config: &AppConfig, content: &SiteContent, options: &Options, motion: &MotionGuard) -> Result<()> {
    options.validate()?;
    let mut rail = rail_for(config, content, options)?;

    let fps = f64::from(options.fps);
    let total_frames = (options.seconds * fps).ceil() as u64;
    // Two report lines per simulated second
    let report_every = u64::from((options.fps / 2).max(1));
    let mut jumps = options.jumps().into_iter().peekable();
    let start = Instant::now();

    println!(
        "rail: {} items, strip {} / view {}, reduced motion: {}",
        content.testimonials.len(),
        options.scroll_width,
        options.visible_width,
        motion.prefers_reduced_motion()
    );
    println!("{:>8}  {:>9}  state", "time", "position");

    for frame in 0..=total_frames {
        let secs = frame as f64 / fps;
        let now = start + Duration::from_secs_f64(secs);

        while jumps.next_if(|t| *t <= secs).is_some() {
            if rail.move_rail(Direction::Forward, now, motion) {
                println!("{secs:>7.2}s  jump forward");
            }
        }

        let outcome = rail.frame(now, motion);
        if let FrameOutcome::Scrolled(TickOutcome::Advanced { wrapped: true, .. }) = outcome {
            println!("{secs:>7.2}s  wrapped to the first copy");
        }
        if frame % report_every == 0 {
            let position = rail.position().unwrap_or(0.0);
            let state = if rail.is_navigating() {
                "navigating".to_string()
            } else {
                pause_label(rail.pause_mode(), now)
            };
            println!("{secs:>7.2}s  {position:>9.2}  {state}");
        }
    }

    rail.unmount();
    println!("unmounted, pending timers: {}", rail.pending_timers());
    Ok(())
}

/// Drive the rail with the async frame loop in real time
pub async fn run_realtime(
    config: &AppConfig,
    content: &SiteContent,
    options: &Options,
    motion: MotionGuard,
) -> Result<()> {
    options.validate()?;
    let rail = Arc::new(Mutex::new(rail_for(config, content, options)?));
    let frame_interval = Duration::from_secs_f64(1.0 / f64::from(options.fps));
    let runner = RailRunner::spawn(Arc::clone(&rail), frame_interval, motion.clone());
    let start = tokio::time::Instant::now();

    let position = |rail: &Mutex<Rail<Testimonial>>| -> Result<f64> {
        let rail = rail.lock().map_err(|_| anyhow!("rail lock poisoned"))?;
        Ok(rail.position().unwrap_or(0.0))
    };

    for at in options.jumps().into_iter().filter(|t| *t < options.seconds) {
        tokio::time::sleep_until(start + Duration::from_secs_f64(at)).await;
        let moved = rail
            .lock()
            .map_err(|_| anyhow!("rail lock poisoned"))?
            .move_rail(Direction::Forward, Instant::now(), &motion);
        if moved {
            println!("{at:>7.2}s  jump forward from {:.2}", position(&rail)?);
        }
    }

    tokio::time::sleep_until(start + Duration::from_secs_f64(options.seconds)).await;
    let last = position(&rail)?;
    let frames = runner.unmount().await;
    println!(
        "{:.2}s: {frames} frames, final position {last:.2}",
        options.seconds
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(seconds: f64, fps: u32) -> Options {
        Options {
            seconds,
            fps,
            nav_at: vec![3.0, 1.0],
            scroll_width: 1200.0,
            visible_width: 400.0,
        }
    }

    #[test]
    fn test_options_bounds() {
        assert!(options(10.0, 60).validate().is_ok());
        assert!(options(MAX_SECONDS, MAX_FPS).validate().is_ok());
        assert!(options(1e30, 60).validate().is_err());
        assert!(options(f64::INFINITY, 60).validate().is_err());
        assert!(options(0.0, 60).validate().is_err());
        assert!(options(10.0, 0).validate().is_err());
        assert!(options(10.0, MAX_FPS + 1).validate().is_err());
    }

    #[test]
    fn test_jumps_sorted() {
        assert_eq!(options(10.0, 60).jumps(), vec![1.0, 3.0]);
    }

    #[test]
    fn test_stepped_run_completes() {
        let config = AppConfig::default();
        let content = SiteContent::builtin().unwrap();
        let motion = MotionGuard::new(reelfront_core::MotionSetting::NoPreference);
        assert!(run(&config, &content, &options(2.0, 30), &motion).is_ok());
    }

    #[test]
    fn test_rail_needs_testimonials() {
        let config = AppConfig::default();
        let mut content = SiteContent::builtin().unwrap();
        content.testimonials.clear();
        assert!(rail_for(&config, &content, &options(1.0, 60)).is_err());
    }
}
