//! Solar View Tool
//!
//! Renders the solar system view for an instant as a standalone SVG document,
//! as the declarative scene in JSON, or as a table of orbital angles.
//!
//! Usage:
//!   cargo run --bin solar_view -- --date 2026-02-14T12:00 --zoom 2 --output view.svg
//!   cargo run --bin solar_view -- --positions --body earth

use std::fs;
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use solarview::card::CardConfig;
use solarview::planetlib::{Body, ALL_BODIES};
use solarview::projection::Hemisphere;
use solarview::scene::{self, svg, SystemLayout};
use solarview::time::Timestamp;
use solarview::viewport::{FitMode, ViewController, ZoomPolicy};
use solarview::{CelestialObject, Result};

/// Solar View Tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Renders a top-down view of the solar system for a given instant",
    long_about = None
)]
struct Args {
    /// Instant to show (RFC 3339, `YYYY-MM-DD HH:MM` or `YYYY-MM-DD`, local time); defaults to now
    #[arg(short = 't', long)]
    date: Option<String>,

    /// Hemisphere for the season labels
    #[arg(long, default_value = "north")]
    hemisphere: Hemisphere,

    /// Zoom level, 1 (whole system) to 4
    #[arg(short, long, default_value_t = 1)]
    zoom: i64,

    /// Frame the drawn content instead of using a zoom level
    #[arg(long, action = ArgAction::SetTrue)]
    auto_fit: bool,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit the scene as JSON instead of SVG
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "positions")]
    json: bool,

    /// Print orbital angles and screen positions instead of a drawing
    #[arg(short, long, action = ArgAction::SetTrue)]
    positions: bool,

    /// Restrict the positions table to one body
    #[arg(short, long, requires = "positions")]
    body: Option<String>,

    /// Display detailed debugging information
    #[arg(short, long, action = ArgAction::SetTrue)]
    debug: bool,
}

fn positions_table(when: &Timestamp, only: Option<Body>) -> String {
    let layout = SystemLayout::at(when);
    let mut out = String::new();
    out.push_str(&format!("Positions at {} ({})\n", when.readout(), when));
    out.push_str("-------------------------------------------------------\n");
    out.push_str(&format!("{:<10} {:>10} {:>10} {:>10}\n", "Body", "Angle", "x", "y"));

    for body in ALL_BODIES {
        if only.is_some_and(|b| b != body) {
            continue;
        }
        let angle = body.position_at(when);
        let position = match body {
            Body::Moon => Some(layout.moon.position),
            planet if planet.is_planet() => layout.planet(planet).map(|p| p.position),
            _ => Some(solarview::projection::canvas_center()),
        };
        if let Some(p) = position {
            out.push_str(&format!(
                "{:<10} {:>9.2}° {:>10.1} {:>10.1}\n",
                body.name(),
                angle.degrees(),
                p.x,
                p.y
            ));
        }
    }

    if only.is_none() {
        out.push_str(&format!(
            "\nObserver faces {:.2}°\n",
            layout.observer_angle.degrees()
        ));
    }
    out
}

fn run(args: Args) -> Result<()> {
    let when = match &args.date {
        Some(date) => Timestamp::parse(date)?,
        None => Timestamp::now(),
    };
    log::debug!("Rendering for {} ({:?})", when, args.hemisphere);

    let output = if args.positions {
        let only = args.body.as_deref().map(str::parse::<Body>).transpose()?;
        positions_table(&when, only)
    } else {
        let (scene, bounds) = scene::render(&when, args.hemisphere);
        if args.json {
            svg::to_json(&scene)?
        } else {
            let config = CardConfig::with_default_zoom(args.zoom);
            config.validate()?;
            let policy = if args.auto_fit {
                ZoomPolicy::Continuous {
                    fit: FitMode::AutoFit,
                }
            } else {
                ZoomPolicy::Levels
            };
            let mut controller =
                ViewController::new(when, config.effective_zoom_level(), policy);
            let view_box = controller.ensure_initialized(&bounds).view_box();
            svg::to_svg(&scene, &view_box)
        }
    };

    match &args.output {
        Some(path) => {
            fs::write(path, output)?;
            println!("Wrote {}", path.display());
        }
        None => print!("{}", output),
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    let level = if args.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
