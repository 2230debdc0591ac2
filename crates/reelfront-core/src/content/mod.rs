mod loader;
mod models;
mod route;

pub use models::{
    Caption, Clip, ContactChannel, Game, MediaImage, NavItem, QuoteLength, SiteContent, Stat,
    Studio, Testimonial, Track, DEFAULT_CAPTION_TEXT, DEFAULT_CAPTION_TITLE, LONG_QUOTE_CHARS,
};
pub use route::Route;
