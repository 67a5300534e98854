//! Reveal engine simulator.
//!
//! Loads a page layout, scrolls through it from top to bottom one frame at a
//! time, and keeps ticking until every fill and counter has settled. The
//! final state of each element is printed so layouts and timings can be
//! checked without a browser.
//!
//! # Running
//!
//! ```sh
//! cargo run -- --page demos/portfolio.json --frame-ms 16
//! ```

use clap::Parser;
use std::path::PathBuf;

use revealengine::components::element::{ClassList, Element, Style, TextContent};
use revealengine::components::pagelayout::PageLayoutData;
use revealengine::engine::RevealAnimationEngine;
use revealengine::resources::engineconfig::EngineConfig;

/// Give up waiting for animations after this many frames.
const MAX_SETTLE_FRAMES: u32 = 10_000;

/// Scroll-reveal and skill cascade simulator
#[derive(Parser)]
#[command(version, about = "Simulates scroll reveals and skill bar cascades over a page layout.")]
struct Cli {
    /// Page layout JSON file.
    #[arg(long, value_name = "PATH", default_value = "demos/portfolio.json")]
    page: PathBuf,

    /// INI configuration file. Defaults are used if it cannot be read.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Duration of one animation frame in milliseconds.
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f64,

    /// Pixels scrolled per frame.
    #[arg(long, default_value_t = 24.0)]
    scroll_speed: f32,

    /// Simulate a host without intersection notifications.
    #[arg(long)]
    no_intersection: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EngineConfig::with_path(path),
        None => EngineConfig::new(),
    };
    if cli.config.is_some() {
        if let Err(e) = config.load_from_file() {
            log::warn!("{}; using defaults", e);
        }
    }

    let layout = match PageLayoutData::load_from_file(&cli.page.to_string_lossy()) {
        Ok(layout) => layout,
        Err(e) => {
            eprintln!("Error loading page {}: {e}", cli.page.display());
            std::process::exit(1);
        }
    };

    let viewport_height = config.viewport_height as f32;
    let mut engine = RevealAnimationEngine::new(config);
    engine.set_intersection_supported(!cli.no_intersection);

    let handles = engine.load_page(&layout);
    engine.observe_page(&handles);

    // --------------- Scroll top to bottom ---------------
    let max_scroll = (layout.page_height() - viewport_height).max(0.0);
    let speed = cli.scroll_speed.max(1.0);
    let mut scroll = 0.0;
    loop {
        engine.set_scroll(scroll);
        engine.tick(cli.frame_ms);
        if scroll >= max_scroll {
            break;
        }
        scroll = (scroll + speed).min(max_scroll);
    }

    // --------------- Let animations finish ---------------
    let mut frames = 0;
    while !engine.is_settled() && frames < MAX_SETTLE_FRAMES {
        engine.tick(cli.frame_ms);
        frames += 1;
    }
    if !engine.is_settled() {
        log::warn!("Animations still running after {} frames", frames);
    }
    log::info!("Simulation finished at {:.0}ms", engine.elapsed());

    print_elements(&mut engine);
}

fn print_elements(engine: &mut RevealAnimationEngine) {
    let world = engine.world_mut();
    let mut query = world.query::<(&Element, &ClassList, &Style, &TextContent)>();
    for (element, classes, style, text) in query.iter(world) {
        let classes: Vec<&str> = classes.iter().collect();
        println!(
            "#{:<24} classes=[{}] width={} text={:?}",
            element.id,
            classes.join(" "),
            style.width.as_deref().unwrap_or("-"),
            text.0
        );
    }
}
