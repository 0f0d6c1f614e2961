/*

    A magic trick demo: place a hat on a detected plane, throw balls
    at it, and balls that settle inside the hat vanish until a toggle
    brings them back. This binary replays a recorded session trace
    instead of talking to a live AR stack.

    @date: Dec, 2025
    @author: Bartu

*/

use std::{self, env, path::Path};
use tracing::{info, warn, error};
use tracing_subscriber;

mod aabb;
mod frame;
mod scene;
mod session;
mod replay;
mod numeric;
mod json_parser;
mod prelude;
use crate::session::BallState;

fn main() -> Result<(), Box<dyn std::error::Error>> {

    // Logging on console
    tracing_subscriber::fmt::init();

    // Parse args
    let args: Vec<String> = env::args().collect();
    let default_path = String::from("./inputs/basic_session.json");
    let trace_path: &String = if args.len() == 1 {
        warn!("No arguments were provided, setting default trace path...");
        &default_path
    } else if args.len() == 2 {
        &args[1]
    } else {
        error!("Usage: {} <trace>.json", args[0]);
        std::process::exit(1);
    };

    // Parse JSON
    info!("Loading session trace from {}...", trace_path);
    let trace = replay::load_trace(Path::new(trace_path)).map_err(|e| {
        error!("Failed to load trace: {}", e);
        e
    })?;
    info!("Replaying {} recorded events...", trace.events.len());

    let session = replay::replay(&trace);

    // Summarize where the balls ended up
    let visible_captured = session.balls().iter()
        .filter(|b| b.state == BallState::Captured && b.opacity > 0.0)
        .count();
    info!("Hat placed: {}", session.hat_is_placed());
    info!("Balls thrown: {}", session.balls_thrown());
    info!("Balls captured in the hat: {} ({} currently visible)", session.balls_captured(), visible_captured);
    info!("Finished execution.");
    Ok(())
}
