//! Initialization errors
//!
//! Only world/match setup can fail. Once a `GameState` exists, ticking is
//! infallible: degenerate numbers are recovered locally and unknown input is
//! ignored.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("match needs at least one player")]
    NoPlayers,
    #[error("camera needs at least one tracked body")]
    NoCameraTargets,
    #[error("session registry is full ({capacity} slots)")]
    SessionsFull { capacity: usize },
    #[error("invalid settings: {0}")]
    InvalidSettings(&'static str),
    #[error("failed to read settings: {0}")]
    SettingsIo(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    SettingsParse(#[from] serde_json::Error),
}
