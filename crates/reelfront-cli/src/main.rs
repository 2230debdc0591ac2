use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use reelfront_core::{AppConfig, MotionGuard, MotionSetting, Route, SiteContent};

mod commands;

#[derive(Parser)]
#[command(name = "reelfront")]
#[command(author, version, about = "A game studio's site, in your terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Site content file (overrides general.content_path)
    #[arg(short = 'c', long = "content", global = true)]
    content: Option<PathBuf>,

    /// Reduce motion regardless of config and environment
    #[arg(long, global = true)]
    reduced_motion: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run,
    /// List the site's pages
    Routes {
        #[arg(long)]
        json: bool,
    },
    /// Print one page as plain text
    Show {
        /// Page path or name, e.g. "/games" or "about"
        route: Route,
        #[arg(long)]
        json: bool,
    },
    /// Validate the site content
    Check,
    /// Drive the testimonial rail headlessly and print its trace
    Simulate {
        /// Simulated duration in seconds
        #[arg(long, default_value_t = 10.0)]
        seconds: f64,
        #[arg(long, default_value_t = 60)]
        fps: u32,
        /// Times (seconds) at which to jump the rail forward
        #[arg(long = "nav-at", value_delimiter = ',')]
        nav_at: Vec<f64>,
        /// Width of the doubled strip
        #[arg(long, default_value_t = 1200.0)]
        scroll_width: f64,
        /// Width of the visible window
        #[arg(long, default_value_t = 400.0)]
        visible_width: f64,
        /// Run the async frame loop in real time instead of stepping
        #[arg(long)]
        realtime: bool,
    },
    /// Print the effective configuration
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

/// The TUI owns the terminal, so it logs to a file; everything else to stderr
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if to_file {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);
    let is_tui = matches!(cli.command, Some(Commands::Run) | None);
    init_logging(&config, is_tui)?;

    let motion = MotionGuard::new(if cli.reduced_motion {
        MotionSetting::Reduce
    } else {
        config.ui.reduced_motion
    });

    let content_path = cli.content.or_else(|| config.content_path());
    let load_content = || -> Result<Arc<SiteContent>> {
        let content = SiteContent::load(content_path.as_deref()).with_context(|| match &content_path {
            Some(path) => format!("failed to load content from {}", path.display()),
            None => "built-in content is invalid".to_string(),
        })?;
        Ok(Arc::new(content))
    };

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config, load_content()?, motion).await,
        Some(Commands::Routes { json }) => {
            let content = load_content()?;
            commands::routes::run(&content, json)
        }
        Some(Commands::Show { route, json }) => {
            let content = load_content()?;
            commands::show::run(&content, route, json)
        }
        Some(Commands::Check) => commands::check::run(&config, content_path.as_deref()),
        Some(Commands::Simulate {
            seconds,
            fps,
            nav_at,
            scroll_width,
            visible_width,
            realtime,
        }) => {
            let options = commands::simulate::Options {
                seconds,
                fps,
                nav_at,
                scroll_width,
                visible_width,
            };
            let content = load_content()?;
            if realtime {
                commands::simulate::run_realtime(&config, &content, &options, motion).await
            } else {
                commands::simulate::run(&config, &content, &options, &motion)
            }
        }
        Some(Commands::Config { init }) => commands::config::run(&config, init),
    }
}
