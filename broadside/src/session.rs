// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Owner of the active [`Game`] and of the opponent's deferred move.
//!
//! After the player fires, the opponent's reply is scheduled for a later instant rather
//! than made immediately. There is at most one such [`PendingMove`], it is keyed to the
//! game instance that scheduled it, and restarting cancels it before the old game is
//! dropped. Time is passed in by the caller, so the session never blocks or spawns.
use std::time::Instant;

use log::{debug, warn};

use crate::{
    board::Coordinate,
    config::GameConfig,
    ships::{Orientation, Ship},
    game::{Game, GameError, GameId, Side, TurnReport},
};

/// A scheduled opponent move.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PendingMove {
    /// The game instance that scheduled this move.
    game: GameId,
    /// When the move should be made.
    due: Instant,
}

impl PendingMove {
    /// The game instance this move belongs to.
    pub fn game(&self) -> GameId {
        self.game
    }

    /// When the move becomes due.
    pub fn due(&self) -> Instant {
        self.due
    }
}

/// Holds the single active game and its pending opponent move.
#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    game: Game,
    pending: Option<PendingMove>,
}

impl Session {
    /// Start a session with a fresh game in the setup phase.
    pub fn new(config: GameConfig) -> Self {
        let game = Game::new(&config);
        Self {
            config,
            game,
            pending: None,
        }
    }

    /// The active game.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Place (or move) one of the player's ships. See [`Game::place_ship`].
    pub fn place_ship(
        &mut self,
        index: usize,
        anchor: Coordinate,
        orientation: Orientation,
    ) -> Result<&Ship, GameError> {
        self.game.place_ship(index, anchor, orientation)
    }

    /// Take one of the player's ships off the grid. See [`Game::remove_ship`].
    pub fn remove_ship(&mut self, index: usize) -> Result<Option<Ship>, GameError> {
        self.game.remove_ship(index)
    }

    /// Take all of the player's ships off the grid.
    pub fn clear_ships(&mut self) -> Result<(), GameError> {
        self.game.clear_ships()
    }

    /// Place every ship the player has not placed yet at random.
    pub fn randomize_remaining(&mut self) -> Result<(), GameError> {
        self.game.randomize_remaining()
    }

    /// Leave setup and start firing. See [`Game::start`].
    pub fn start(&mut self) -> Result<(), GameError> {
        self.game.start()
    }

    /// The configuration new games are built from.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The scheduled opponent move, if any.
    pub fn pending(&self) -> Option<PendingMove> {
        self.pending
    }

    /// When the scheduled opponent move becomes due, if one is scheduled.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|pending| pending.due)
    }

    /// Fire at the opponent at time `now`. If the turn passes to the opponent, its reply
    /// is scheduled for `now` plus the configured delay.
    pub fn player_attack(
        &mut self,
        coord: Coordinate,
        now: Instant,
    ) -> Result<TurnReport, GameError> {
        let report = self.game.player_attack(coord)?;
        if self.game.current() == Side::Opponent && !report.is_game_over() {
            debug_assert!(self.pending.is_none(), "opponent move already scheduled");
            let pending = PendingMove {
                game: self.game.id(),
                due: now + self.config.opponent_delay,
            };
            debug!("opponent move scheduled for game {}", pending.game);
            self.pending = Some(pending);
        }
        Ok(report)
    }

    /// Make the scheduled opponent move if it is due at `now`. Returns the report of the
    /// move, or `None` if nothing was due.
    pub fn poll(&mut self, now: Instant) -> Result<Option<TurnReport>, GameError> {
        match self.pending {
            Some(pending) if pending.due <= now => self.fire(pending),
            _ => Ok(None),
        }
    }

    /// Make the given scheduled move now, regardless of its due time. Does nothing if
    /// the move was cancelled, already made, or scheduled by a different game.
    pub fn fire(&mut self, pending: PendingMove) -> Result<Option<TurnReport>, GameError> {
        if self.pending != Some(pending) {
            warn!("ignoring stale opponent move for game {}", pending.game);
            return Ok(None);
        }
        self.pending = None;
        if pending.game != self.game.id() {
            warn!("ignoring opponent move scheduled by game {}", pending.game);
            return Ok(None);
        }
        self.game.opponent_attack().map(Some)
    }

    /// Cancel the scheduled opponent move, returning it if there was one.
    pub fn cancel(&mut self) -> Option<PendingMove> {
        let cancelled = self.pending.take();
        if let Some(pending) = cancelled {
            debug!("cancelled opponent move for game {}", pending.game);
        }
        cancelled
    }

    /// Cancel any scheduled opponent move and replace the game with a new one in the
    /// setup phase. Returns the id of the new game.
    pub fn restart(&mut self) -> GameId {
        self.cancel();
        self.game = Game::new(&self.config);
        self.game.id()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
