//! Terra Blast headless runner
//!
//! Plays a short scripted match at the fixed tick rate and logs the event
//! stream. Usage: `terra-blast [settings.json] [ticks]`.

use terra_blast::input::{self, KeyState};
use terra_blast::session::{SessionEvent, SessionRegistry};
use terra_blast::sim::{GameEvent, GameState, tick};
use terra_blast::{Settings, SimError};

/// Default match length (10 s at 60 Hz)
const DEFAULT_TICKS: u64 = 600;

/// Scripted key presses: (first tick, last tick, key)
const SCRIPT: &[(u64, u64, &str)] = &[
    (30, 70, "d"),
    (90, 150, "e"),
    (45, 45, "ArrowUp"),
    (200, 240, "ArrowLeft"),
    (250, 280, "Control"),
];

fn main() {
    env_logger::init();
    log::info!("Terra Blast (headless) starting...");

    if let Err(err) = run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), SimError> {
    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_from(path)?,
        None => Settings::default(),
    };
    let ticks = args
        .next()
        .and_then(|t| t.parse().ok())
        .unwrap_or(DEFAULT_TICKS);

    let mut sessions = SessionRegistry::new(settings.spawn_xs.len());
    for id in ["local-1", "local-2"] {
        sessions.handle(SessionEvent::Connected { id: id.into() })?;
    }

    let mut state = GameState::from_sessions(&settings, &sessions)?;
    let mut keys = KeyState::new();

    for t in 0..ticks {
        keys.clear();
        for &(start, end, key) in SCRIPT {
            if (start..=end).contains(&t) {
                keys.press(key);
            }
        }

        tick(&mut state, &input::tick_input(&settings.bindings, &keys));

        for event in state.drain_events() {
            match event {
                GameEvent::BlocksDestroyed { bomb, cells } => {
                    log::info!("tick {}: bomb {} destroyed {} blocks", t, bomb, cells.len())
                }
                other => log::info!("tick {}: {:?}", t, other),
            }
        }
    }

    let snapshot = state.snapshot();
    for player in &snapshot.players {
        let status = if player.is_alive() { "standing" } else { "down" };
        println!(
            "player {}: {} with health {} at ({:.1}, {:.1})",
            player.id, status, player.health, player.body.pos.x, player.body.pos.y
        );
    }
    println!(
        "{} ticks, {} blocks left, camera scale {:.2}",
        snapshot.tick,
        snapshot.cells.len(),
        snapshot.camera.scale
    );
    Ok(())
}
