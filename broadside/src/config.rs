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

//! Tunables for a game.
use std::time::Duration;

use rand::{rngs::StdRng, SeedableRng};

use crate::{board::DEFAULT_SIZE, placement::PlacementLimits};

/// Default pause before the opponent fires.
pub const DEFAULT_OPPONENT_DELAY: Duration = Duration::from_millis(500);

/// Settings used to construct a [`Game`][crate::game::Game] or
/// [`Session`][crate::session::Session].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameConfig {
    /// Width and height of both grids.
    pub size: usize,

    /// Bounds on the random fleet placement search.
    pub limits: PlacementLimits,

    /// How long the opponent "thinks" before firing back.
    pub opponent_delay: Duration,

    /// Seed for the game's random number generator. Seeded from entropy if `None`.
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Set the grid size.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Set the random placement limits.
    pub fn with_limits(mut self, limits: PlacementLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the opponent's thinking delay.
    pub fn with_opponent_delay(mut self, delay: Duration) -> Self {
        self.opponent_delay = delay;
        self
    }

    /// Fix the random seed so games are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the random number generator described by this config.
    pub(crate) fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Default for GameConfig {
    /// The classic game: a 10x10 grid, half a second of opponent delay and no fixed seed.
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            limits: PlacementLimits::default(),
            opponent_delay: DEFAULT_OPPONENT_DELAY,
            seed: None,
        }
    }
}
