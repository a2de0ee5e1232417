//! Global state machine.
//!
//! `GameSession::phase` is the gameplay truth; this Bevy state mirrors it so
//! schedules can gate on `in_state(..)`.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Menu,
    Playing,
    Won,
    Lost,
}

impl GameState {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}
