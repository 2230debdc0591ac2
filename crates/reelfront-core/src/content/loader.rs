use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, warn};
use url::Url;

use crate::rail::RailItem;
use crate::{Error, Result};

use super::SiteContent;

/// Content shipped with the binary, used when no content file is configured
const BUILTIN_CONTENT: &str = include_str!("site.toml");

impl SiteContent {
    pub fn builtin() -> Result<Self> {
        Self::from_toml(BUILTIN_CONTENT)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Content(format!("Failed to parse content: {}", e)))
    }

    /// Load from `path`, or the built-in content when `None`
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let content = match path {
            Some(path) => {
                debug!(path = %path.display(), "loading site content");
                let raw = std::fs::read_to_string(path)?;
                Self::from_toml(&raw)?
            }
            None => Self::builtin()?,
        };
        content.validate()?;
        Ok(content)
    }

    /// Check the content for problems
    ///
    /// Hard errors fail the load; soft problems come back as warnings so the
    /// site can still render.
    pub fn validate(&self) -> Result<Vec<String>> {
        if self.studio.name.trim().is_empty() {
            return Err(Error::Content("studio name is empty".to_string()));
        }
        if self.nav.is_empty() {
            return Err(Error::Content("navigation has no entries".to_string()));
        }

        let mut slugs = HashSet::new();
        for game in &self.games {
            if game.slug.trim().is_empty() {
                return Err(Error::Content(format!("game '{}' has an empty slug", game.title)));
            }
            if !slugs.insert(game.slug.as_str()) {
                return Err(Error::Content(format!("duplicate game slug '{}'", game.slug)));
            }
        }

        for channel in &self.contact {
            if let Some(link) = &channel.link {
                Url::parse(link).map_err(|e| {
                    Error::Content(format!("contact '{}' has invalid link '{}': {}", channel.label, link, e))
                })?;
            }
        }

        let mut warnings = Vec::new();

        if self.testimonials.is_empty() {
            warnings.push("no testimonials; the home rail will be empty".to_string());
        }
        if self.studio.headline_phrases.is_empty() {
            warnings.push("no headline phrases; the tagline is used instead".to_string());
        }

        let images = || {
            self.gallery
                .iter()
                .chain(self.games.iter().flat_map(|g| g.images.iter()))
        };
        for src in repeated_ids(images()) {
            warnings.push(format!("image '{}' is listed more than once", src));
        }
        for image in images().filter(|image| image.alt.trim().is_empty()) {
            warnings.push(format!("image '{}' has no alt text", image.src));
        }
        for quote in repeated_ids(&self.testimonials) {
            let start: String = quote.chars().take(40).collect();
            warnings.push(format!("testimonial \"{}...\" is listed more than once", start));
        }

        for game in &self.games {
            for track in &game.tracks {
                if !track.duration_secs.is_finite() || track.duration_secs <= 0.0 {
                    warnings.push(format!("track '{}' in '{}' has no usable duration", track.title, game.slug));
                }
            }
        }

        for warning in &warnings {
            warn!("{}", warning);
        }
        Ok(warnings)
    }
}

/// Ids that show up more than once, each reported once
fn repeated_ids<'a, T: RailItem + 'a>(items: impl IntoIterator<Item = &'a T>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    let mut repeated = Vec::new();
    for item in items {
        let id = item.source_id();
        if !seen.insert(id) && !repeated.contains(&id) {
            repeated.push(id);
        }
    }
    repeated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Route;

    const MINIMAL: &str = r#"
[studio]
name = "Test Studio"
tagline = "We test"
footer = "All rights reserved"

[[nav]]
label = "Home"
route = "/"
"#;

    #[test]
    fn test_builtin_content_is_valid() {
        let content = SiteContent::builtin().unwrap();
        let warnings = content.validate().unwrap();
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(content.nav.len(), Route::all().len());
        assert!(content.testimonials.len() >= 3);
        assert!(!content.games.is_empty());
    }

    #[test]
    fn test_minimal_content_warns() {
        let content = SiteContent::from_toml(MINIMAL).unwrap();
        let warnings = content.validate().unwrap();
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_empty_nav_rejected() {
        let raw = MINIMAL.replace("[[nav]]\nlabel = \"Home\"\nroute = \"/\"\n", "");
        let content = SiteContent::from_toml(&raw).unwrap();
        assert!(matches!(content.validate(), Err(Error::Content(_))));
    }

    #[test]
    fn test_bad_contact_link_rejected() {
        let raw = format!(
            "{MINIMAL}\n[[contact]]\nlabel = \"Mail\"\nvalue = \"hi\"\nlink = \"not a url\"\n"
        );
        let content = SiteContent::from_toml(&raw).unwrap();
        assert!(matches!(content.validate(), Err(Error::Content(_))));
    }

    #[test]
    fn test_duplicate_images_warn() {
        let raw = format!(
            "{MINIMAL}\n[[gallery]]\nsrc = \"a.png\"\nalt = \"A | a\"\n[[gallery]]\nsrc = \"a.png\"\nalt = \"A | a\"\n"
        );
        let content = SiteContent::from_toml(&raw).unwrap();
        let warnings = content.validate().unwrap();
        assert!(warnings.iter().any(|w| w.contains("more than once")));
    }

    #[test]
    fn test_duplicate_testimonials_warn_once() {
        let entry = "\n[[testimonials]]\nquote = \"Best rail ever\"\nattribution = \"A player\"\n";
        let raw = format!("{MINIMAL}{entry}{entry}{entry}");
        let content = SiteContent::from_toml(&raw).unwrap();
        let warnings = content.validate().unwrap();
        let repeated: Vec<_> = warnings
            .iter()
            .filter(|w| w.starts_with("testimonial"))
            .collect();
        assert_eq!(repeated.len(), 1);
        assert!(repeated[0].contains("Best rail ever"));
    }

    #[test]
    fn test_unknown_nav_route_fails_parse() {
        let raw = MINIMAL.replace("route = \"/\"", "route = \"/press\"");
        assert!(matches!(SiteContent::from_toml(&raw), Err(Error::Content(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = SiteContent::load(Some(Path::new("/nonexistent/reelfront/site.toml")));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
