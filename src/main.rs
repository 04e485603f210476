//! Barrage headless entry point
//!
//! Usage: `barrage [settings.json]`
//!
//! Plays one round (the demo pilot by default) against the recording
//! renderer and prints the round summary as JSON.

use barrage::Settings;
use barrage::platform::{Clock, FixedClock, PacedClock, ScriptedInput};
use barrage::renderer::{Atlas, DrawList, PlaceholderAssets};
use barrage::session::Session;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    log::info!(
        "Starting round: seed={} demo={} realtime={}",
        settings.seed,
        settings.demo,
        settings.realtime
    );

    let clock: Box<dyn Clock> = if settings.realtime {
        Box::new(PacedClock::new(settings.tick_rate))
    } else {
        Box::new(FixedClock::from_rate(settings.tick_rate))
    };

    let mut session = Session::new(
        &settings,
        Atlas::load(&PlaceholderAssets),
        ScriptedInput::default(),
        clock,
        DrawList::default(),
    );
    let summary = session.run();

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to encode summary: {}", e),
    }
}
