use serde::{Deserialize, Serialize};

use crate::rail::RailItem;

use super::Route;

/// Quotes at or above this many characters take a double-height card
pub const LONG_QUOTE_CHARS: usize = 220;

pub const DEFAULT_CAPTION_TITLE: &str = "Studio still";
pub const DEFAULT_CAPTION_TEXT: &str = "A moment from our work in progress.";

/// A player or partner quote shown on the home page rail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub quote: String,
    pub attribution: String,
}

impl Testimonial {
    pub fn length(&self) -> QuoteLength {
        QuoteLength::classify(&self.quote)
    }
}

impl RailItem for Testimonial {
    fn source_id(&self) -> &str {
        &self.quote
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteLength {
    Short,
    Long,
}

impl QuoteLength {
    pub fn classify(quote: &str) -> Self {
        if quote.chars().count() >= LONG_QUOTE_CHARS {
            QuoteLength::Long
        } else {
            QuoteLength::Short
        }
    }

    /// Number of grid rows a card of this length occupies
    pub fn row_span(self) -> u16 {
        match self {
            QuoteLength::Short => 1,
            QuoteLength::Long => 2,
        }
    }
}

/// Still image in a gallery rail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaImage {
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

impl MediaImage {
    pub fn caption(&self) -> Caption {
        Caption::parse(&self.alt)
    }
}

impl RailItem for MediaImage {
    fn source_id(&self) -> &str {
        &self.src
    }
}

/// Title and body pulled out of an image's alt text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Caption {
    pub title: String,
    pub caption: String,
}

impl Caption {
    /// Split `"Title | Caption"` on the first `|`
    ///
    /// Without a separator the whole text becomes the caption under the
    /// default title. Blank halves fall back to the defaults.
    pub fn parse(alt: &str) -> Self {
        let alt = alt.trim();
        let (title, caption) = match alt.split_once('|') {
            Some((title, caption)) => (title.trim(), caption.trim()),
            None => ("", alt),
        };

        Self {
            title: non_empty_or(title, DEFAULT_CAPTION_TITLE),
            caption: non_empty_or(caption, DEFAULT_CAPTION_TEXT),
        }
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

/// Video clip in a game's gallery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clip {
    pub title: String,
    pub src: String,
}

/// Soundtrack entry for the audio player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub src: String,
    /// Length in seconds
    #[serde(default = "default_track_duration")]
    pub duration_secs: f64,
}

fn default_track_duration() -> f64 {
    180.0
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub label: String,
    pub route: Route,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactChannel {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub slug: String,
    pub title: String,
    pub tagline: String,
    pub summary: String,
    #[serde(default)]
    pub images: Vec<MediaImage>,
    #[serde(default)]
    pub clips: Vec<Clip>,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Studio {
    pub name: String,
    pub tagline: String,
    #[serde(default)]
    pub headline_phrases: Vec<String>,
    #[serde(default)]
    pub about: Vec<String>,
    pub footer: String,
}

/// Everything the site renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteContent {
    pub studio: Studio,
    #[serde(default)]
    pub nav: Vec<NavItem>,
    #[serde(default)]
    pub stats: Vec<Stat>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    /// Studio stills shown on the about page rail
    #[serde(default)]
    pub gallery: Vec<MediaImage>,
    #[serde(default)]
    pub contact: Vec<ContactChannel>,
    #[serde(default)]
    pub games: Vec<Game>,
}

impl SiteContent {
    pub fn game(&self, slug: &str) -> Option<&Game> {
        self.games.iter().find(|g| g.slug == slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_length_threshold() {
        assert_eq!(QuoteLength::classify(&"a".repeat(219)), QuoteLength::Short);
        assert_eq!(QuoteLength::classify(&"a".repeat(220)), QuoteLength::Long);
        assert_eq!(QuoteLength::classify("").row_span(), 1);
        assert_eq!(QuoteLength::Long.row_span(), 2);
    }

    #[test]
    fn test_quote_length_counts_chars_not_bytes() {
        // 200 two-byte characters are still a short quote
        assert_eq!(QuoteLength::classify(&"é".repeat(200)), QuoteLength::Short);
    }

    #[test]
    fn test_caption_split() {
        let caption = Caption::parse("Harbor at dusk | Early lighting pass");
        assert_eq!(caption.title, "Harbor at dusk");
        assert_eq!(caption.caption, "Early lighting pass");
    }

    #[test]
    fn test_caption_splits_on_first_separator_only() {
        let caption = Caption::parse("Boss | phase 2 | unused");
        assert_eq!(caption.title, "Boss");
        assert_eq!(caption.caption, "phase 2 | unused");
    }

    #[test]
    fn test_caption_fallbacks() {
        let caption = Caption::parse("Just a caption");
        assert_eq!(caption.title, DEFAULT_CAPTION_TITLE);
        assert_eq!(caption.caption, "Just a caption");

        let caption = Caption::parse("");
        assert_eq!(caption.title, DEFAULT_CAPTION_TITLE);
        assert_eq!(caption.caption, DEFAULT_CAPTION_TEXT);

        let caption = Caption::parse("Only title |  ");
        assert_eq!(caption.title, "Only title");
        assert_eq!(caption.caption, DEFAULT_CAPTION_TEXT);
    }

    #[test]
    fn test_rail_item_identity() {
        let image = MediaImage {
            src: "img/a.png".to_string(),
            alt: String::new(),
        };
        assert_eq!(image.source_id(), "img/a.png");
    }
}
