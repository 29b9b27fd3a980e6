//! Errors raised by the game world.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("unknown mob archetype: {0}")]
    UnknownMob(String),
}
