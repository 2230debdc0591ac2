mod about;
mod contact;
mod games;
mod home;
mod player;
mod popup;
mod rail;
mod sections;
mod shell;
mod status_bar;
pub mod text;

pub use about::AboutPage;
pub use contact::ContactPage;
pub use games::GamesPage;
pub use home::HomePage;
pub use popup::HelpPopup;
pub use shell::{Footer, NavBar};
pub use status_bar::StatusBarWidget;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;
use reelfront_core::Route;

use crate::app::{App, Mode};

/// Draw one full frame: nav bar, current page, footer and status bar
pub fn draw(frame: &mut Frame, app: &mut App) {
    let size = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(app.theme.bg0)), size);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(size);

    NavBar::render(frame, rows[0], app);
    match app.route() {
        Route::Home => HomePage::render(frame, rows[1], app),
        Route::About => AboutPage::render(frame, rows[1], app),
        Route::Contact => ContactPage::render(frame, rows[1], app),
        Route::Games => GamesPage::render(frame, rows[1], app),
    }
    Footer::render(frame, rows[2], app);
    StatusBarWidget::render(frame, rows[3], app);

    if app.mode == Mode::Help {
        HelpPopup::render(frame, app);
    }
}
