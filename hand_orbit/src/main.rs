//! hand_orbit: interactive entry point.

use hand_orbit::app::run;
use hand_orbit::config::USAGE;
use hand_orbit::{AppConfig, AppError, SourceConfig};

fn main() {
    env_logger::init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Hand Orbit — pinch to zoom, grab to rotate            ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let cfg = match AppConfig::from_args(std::env::args().skip(1)) {
        Ok(cfg) => cfg,
        Err(AppError::Usage(msg)) => {
            eprintln!("{}", msg);
            if msg != USAGE {
                eprintln!("\n{}", USAGE);
            }
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match &cfg.source {
        SourceConfig::Simulated { fps, .. } =>
            println!("  Source: simulated camera at {} fps", fps),
        SourceConfig::Replay { path, looped, .. } =>
            println!("  Source: {}{}", path.display(), if *looped { " (looped)" } else { "" }),
    }
    println!();

    if !cfg.quick {
        print_guide(&cfg);
    }

    println!("  Opening visualizer window…");
    println!();

    if let Err(e) = run(cfg) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn print_guide(cfg: &AppConfig) {
    println!("  Gestures:");
    println!("    open pinch (≥ {:.2} apart)  zoom; wider pinch = bigger planet", cfg.gestures.grab_threshold);
    println!("    closed pinch + move         rotate; stops the idle spin");
    println!();
    if let SourceConfig::Simulated { .. } = cfg.source {
        println!("  Simulation:");
        println!("    mouse            pinch midpoint");
        println!("    Space (hold)     grab");
        println!("    wheel / + / -    open pinch wider / narrower");
        println!("    H                hand in / out of frame");
    }
    println!("    Q / Escape       quit");
    println!();
}
