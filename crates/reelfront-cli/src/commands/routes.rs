use anyhow::Result;
use serde::Serialize;

use reelfront_core::{Route, SiteContent};

#[derive(Serialize)]
struct RouteEntry<'a> {
    path: &'static str,
    title: &'static str,
    /// Label in the site navigation, if the page is linked there
    nav_label: Option<&'a str>,
}

pub fn run(content: &SiteContent, json: bool) -> Result<()> {
    let entries: Vec<RouteEntry> = Route::all()
        .iter()
        .map(|route| RouteEntry {
            path: route.path(),
            title: route.title(),
            nav_label: content
                .nav
                .iter()
                .find(|item| item.route == *route)
                .map(|item| item.label.as_str()),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("Pages ({}):\n", entries.len());
    for (i, entry) in entries.iter().enumerate() {
        let nav = match entry.nav_label {
            Some(label) => format!("nav: {label}"),
            None => "not in nav".to_string(),
        };
        println!("  {} {:<10} {:<10} ({})", i + 1, entry.path, entry.title, nav);
    }
    Ok(())
}
