//! Let the cascade engine play a whole game against itself.
//!
//! Usage:
//!   cargo run --release --example self_play -p cascade_engine -- [config.toml] [max_plies]
//!
//! Set `RUST_LOG=cascade_engine=debug` to see every selector stage.

use std::env;
use std::process;

use cascade_engine::{CascadeEngine, EngineConfig};
use chess_core::Position;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();

    let config = match args.get(1) {
        Some(path) => match EngineConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{err}");
                process::exit(1);
            }
        },
        None => EngineConfig {
            depth: 3,
            ..EngineConfig::default()
        },
    };
    let max_plies: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(200);

    let mut engine = CascadeEngine::new(config);
    let mut pos = Position::startpos();
    let mut line = Vec::new();

    while !pos.is_game_over() && line.len() < max_plies {
        match engine.play(&mut pos) {
            Ok(played) => line.push(played),
            Err(err) => {
                eprintln!("engine failed: {err}");
                process::exit(1);
            }
        }
    }

    for (i, pair) in line.chunks(2).enumerate() {
        println!("{:>3}. {}", i + 1, pair.join(" "));
    }
    println!();
    println!("{pos}");
    println!("FEN: {}", pos.to_fen());
    match pos.outcome() {
        Some(outcome) => println!("Result: {} ({outcome:?})", pos.result()),
        None => println!("Stopped after {max_plies} plies"),
    }
}
