#![forbid(unsafe_code)]

use std::time::{Duration, Instant};

use chrono::Datelike;
use clap::{Parser, Subcommand};

use crate::app::App;
use crate::error::{AppError, Result};

#[derive(Debug, Parser)]
#[command(
    name = "atelier",
    about = "Seasonal theme engine and presentation layer for the Atelier boutique",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the active theme and preferences.
    Status,

    /// List every registered theme.
    Themes,

    /// Switch to a theme by id (e.g. `christmas`).
    #[command(name = "set-theme")]
    SetTheme {
        /// Theme identifier.
        id: String,
    },

    /// Re-run the calendar rule and apply its pick for this month.
    Auto,

    /// Run a short deterministic walkthrough of the presentation stack.
    Demo {
        /// Seconds of simulated time to run.
        #[arg(long, default_value_t = 12)]
        seconds: u64,

        /// Seed for decoration placement.
        #[arg(long, default_value_t = 7)]
        seed: u64,
    },
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let now = Instant::now();
    let month = chrono::Local::now().month();
    let mut app = match &cli.command {
        Commands::Demo { seed, .. } => App::open_seeded(now, *seed)?,
        _ => App::open(now)?,
    };

    match cli.command {
        Commands::Status => {
            app.startup(month, now);
            print_status(&app);
            Ok(())
        }
        Commands::Themes => {
            for (id, def) in app.engine.list_themes() {
                let marker = if id == app.engine.current_theme() {
                    "*"
                } else {
                    " "
                };
                println!("{marker} {:<16} {:<16} {}", id.to_string(), def.name, def.description);
            }
            Ok(())
        }
        Commands::SetTheme { id } => {
            app.startup(month, now);
            if !app.engine.set_theme(&id, now) {
                return Err(AppError::UnknownTheme { id });
            }
            print_status(&app);
            Ok(())
        }
        Commands::Auto => {
            app.startup(month, now);
            let picked = app.engine.set_auto_theme(month, now);
            println!("calendar pick for month {month}: {picked}");
            Ok(())
        }
        Commands::Demo { seconds, .. } => run_demo(app, month, now, seconds),
    }
}

fn print_status(app: &App) {
    let engine = &app.engine;
    let def = engine.theme_config(None);
    let prefs = engine.preferences();

    println!("theme:        {} ({})", engine.current_theme(), def.name);
    println!("marker:       {}", engine.stage().marker().unwrap_or("-"));
    println!(
        "decorations:  {} nodes, {} timers",
        engine.stage().decoration_count(),
        engine.decorations().timer_count()
    );
    println!(
        "preferences:  auto={} remember={} indicator={} decorations={}",
        prefs.auto_theme, prefs.remember_theme, prefs.show_indicator, prefs.enable_decorations
    );
}

/// A compressed tour of the stack: startup, a seasonal switch, a scroll to
/// the contact section, a form submission, decoration and carousel ticks.
/// Simulated time, real pipeline.
fn run_demo(mut app: App, month: u32, start: Instant, seconds: u64) -> Result<()> {
    app.startup(month, start);
    println!("== startup (month {month}) ==");
    print_status(&app);

    app.engine.set_theme("lunar-new-year", start);
    println!("\n== lunar-new-year applied ==");
    print_status(&app);

    app.navigation.scroll_to("contact");
    app.form.name = "Lin Wei".into();
    app.form.phone = atelier_ui::form::format_phone("0912345678");
    app.form.message = "Looking for a fitting appointment.".into();
    if let Err(issues) = app.form.submit(start) {
        for issue in issues {
            println!("form issue: {issue}");
        }
    }

    for step in 1..=seconds {
        let now = start + Duration::from_secs(step);
        app.tick(now);
    }
    let end = start + Duration::from_secs(seconds);

    println!("\n== after {seconds}s of ticks ==");
    print_status(&app);
    println!(
        "navigation:   section={} progress={:.0}%",
        app.navigation.active_section().unwrap_or("-"),
        app.navigation.progress()
    );
    let carousel = app.carousel.status();
    println!(
        "carousel:     slide {}/{} (playing: {})",
        carousel.current + 1,
        carousel.total,
        carousel.playing
    );
    for toast in app.notifier.borrow().visible() {
        println!("toast:        [{}] {}", toast.level.icon(), toast.message);
    }

    app.engine.set_theme("default", end);
    println!("\n== back to default ==");
    print_status(&app);
    Ok(())
}
