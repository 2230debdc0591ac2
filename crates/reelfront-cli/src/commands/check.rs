use std::path::Path;

use anyhow::Result;

use reelfront_core::{AppConfig, SiteContent};

/// Validate config and content, printing every warning
pub fn run(config: &AppConfig, content_path: Option<&Path>) -> Result<()> {
    println!("Config:  {}", AppConfig::config_path().display());
    match content_path {
        Some(path) => println!("Content: {}", path.display()),
        None => println!("Content: built-in"),
    }

    let raw = match content_path {
        Some(path) => SiteContent::from_toml(&std::fs::read_to_string(path)?)?,
        None => SiteContent::builtin()?,
    };
    let warnings = raw.validate()?;

    println!(
        "\n{} games, {} testimonials, {} gallery images, {} contact channels",
        raw.games.len(),
        raw.testimonials.len(),
        raw.gallery.len(),
        raw.contact.len()
    );
    println!(
        "Rail: speed {} per {:.2}ms frame, resume after {}ms, jumps {:.0}% of the view",
        config.rail.speed,
        config.rail.reference_frame_ms,
        config.rail.resume_delay_ms,
        config.rail.nav_fraction * 100.0
    );

    if warnings.is_empty() {
        println!("\nOK");
    } else {
        println!("\n{} warning(s):", warnings.len());
        for warning in &warnings {
            println!("  - {warning}");
        }
    }
    Ok(())
}
