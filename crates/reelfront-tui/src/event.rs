use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEventKind};

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    animation_tick: Duration,
}

impl EventHandler {
    /// Idle polling at `tick_rate_ms`, `animation_fps` while something moves
    pub fn with_animation_fps(tick_rate_ms: u64, animation_fps: u32) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms.max(1)),
            animation_tick: Duration::from_millis(1000 / u64::from(animation_fps.max(1))),
        }
    }

    /// Poll for the next event at the idle tick rate
    pub fn next(&self) -> Result<Option<AppEvent>> {
        self.poll(self.tick_rate)
    }

    /// Poll for the next event at the animation frame rate
    pub fn next_animation(&self) -> Result<Option<AppEvent>> {
        self.poll(self.animation_tick)
    }

    fn poll(&self, timeout: Duration) -> Result<Option<AppEvent>> {
        if !event::poll(timeout)? {
            return Ok(Some(AppEvent::Tick));
        }
        let event = match event::read()? {
            // Only presses; some terminals also send releases
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                    Some(AppEvent::PointerMoved(mouse.column, mouse.row))
                }
                MouseEventKind::Down(_) => Some(AppEvent::Click(mouse.column, mouse.row)),
                MouseEventKind::ScrollDown => Some(AppEvent::Wheel(1)),
                MouseEventKind::ScrollUp => Some(AppEvent::Wheel(-1)),
                _ => None,
            },
            Event::FocusLost => Some(AppEvent::PointerLeft),
            Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
            _ => None,
        };
        Ok(event)
    }
}

/// Application events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    /// Pointer position in terminal cells
    PointerMoved(u16, u16),
    /// The terminal lost focus; no pointer is over anything
    PointerLeft,
    Click(u16, u16),
    /// Wheel steps, positive is down
    Wheel(i32),
    Resize(u16, u16),
    Tick,
}
