use anyhow::Result;
use serde_json::json;

use reelfront_core::content::QuoteLength;
use reelfront_core::{Route, SiteContent};

pub fn run(content: &SiteContent, route: Route, json: bool) -> Result<()> {
    if json {
        let value = match route {
            Route::Home => json!({
                "studio": content.studio,
                "stats": content.stats,
                "testimonials": content.testimonials,
            }),
            Route::About => json!({
                "about": content.studio.about,
                "gallery": content.gallery,
            }),
            Route::Contact => json!({ "contact": content.contact }),
            Route::Games => json!({ "games": content.games }),
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{} ({})\n", route.title(), route.path());
    match route {
        Route::Home => {
            println!("{}", content.studio.name);
            println!("{}\n", content.studio.tagline);
            for phrase in &content.studio.headline_phrases {
                println!("  > {phrase}");
            }
            println!();
            for stat in &content.stats {
                println!("  {:>10}  {}", stat.value, stat.label);
            }
            println!("\nTestimonials ({}):", content.testimonials.len());
            for t in &content.testimonials {
                let tag = match t.length() {
                    QuoteLength::Long => " [long]",
                    QuoteLength::Short => "",
                };
                println!("  \"{}\"{}", t.quote, tag);
                println!("      - {}", t.attribution);
            }
        }
        Route::About => {
            for paragraph in &content.studio.about {
                println!("{paragraph}\n");
            }
            println!("Gallery ({}):", content.gallery.len());
            for image in &content.gallery {
                let caption = image.caption();
                println!("  {} - {}  [{}]", caption.title, caption.caption, image.src);
            }
        }
        Route::Contact => {
            for channel in &content.contact {
                match &channel.link {
                    Some(link) => println!("  {:<12} {}  <{}>", channel.label, channel.value, link),
                    None => println!("  {:<12} {}", channel.label, channel.value),
                }
            }
        }
        Route::Games => {
            for game in &content.games {
                println!("{} - {}", game.title, game.tagline);
                println!("  {}", game.summary);
                println!(
                    "  {} screenshots, {} clips, {} tracks",
                    game.images.len(),
                    game.clips.len(),
                    game.tracks.len()
                );
                for clip in &game.clips {
                    println!("    clip  {} ({})", clip.title, clip.src);
                }
                for track in &game.tracks {
                    let secs = track.duration_secs.max(0.0) as u64;
                    println!("    track {} {:02}:{:02}", track.title, secs / 60, secs % 60);
                }
                println!();
            }
        }
    }
    println!("{}", content.studio.footer);
    Ok(())
}
