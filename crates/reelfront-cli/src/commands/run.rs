use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use reelfront_core::{AppConfig, MotionGuard, SiteContent};
use reelfront_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    widgets,
};

pub async fn run(config: Arc<AppConfig>, content: Arc<SiteContent>, motion: MotionGuard) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    let title = content.studio.name.clone();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange,
        SetTitle(title)
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.clone(), content, motion, Instant::now());
    let event_handler =
        EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.ui.animation_fps);
    info!(route = %app.route(), "site opened");

    let result = main_loop(&mut terminal, &mut app, &event_handler);

    // Unmount before handing the terminal back so no rail timer outlives the UI
    app.page.unmount();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_handler: &EventHandler,
) -> Result<()> {
    // Checked at the end of each iteration to pick the next poll timeout
    let mut needs_fast_update = true;

    loop {
        app.tick(Instant::now());
        terminal.draw(|frame| widgets::draw(frame, app))?;

        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        let now = Instant::now();
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app, &app.keymap);
                    app.apply(action, now);
                }
                AppEvent::PointerMoved(column, row) => app.pointer_moved(column, row, now),
                AppEvent::PointerLeft => app.pointer_left(now),
                AppEvent::Click(column, row) => app.click(column, row, now),
                AppEvent::Wheel(lines) => app.wheel(lines),
                // The next draw re-measures rails and re-anchors scenes
                AppEvent::Resize(_, _) => {}
                AppEvent::Tick => {}
            }
        }

        needs_fast_update = app.needs_animation();

        if app.should_quit {
            info!("quitting");
            return Ok(());
        }
    }
}
