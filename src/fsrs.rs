// Copyright 2025 Fernando Borretti
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

//! FSRS-style scheduler: a pure state machine from a card's memory state and
//! a review rating to its next state, memory parameters and interval.

use std::ops::Index;

use rusqlite::ToSql;
use rusqlite::types::ToSqlOutput;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::fail;
use crate::types::state::State;

/// Days until recall probability decays to roughly 90%.
pub type Stability = f64;

/// Intrinsic item hardness, from 1 (easiest) to 10 (hardest).
pub type Difficulty = f64;

pub const MIN_STABILITY: Stability = 0.1;
pub const MAX_STABILITY: Stability = 365.0;
pub const MIN_DIFFICULTY: Difficulty = 1.0;
pub const MAX_DIFFICULTY: Difficulty = 10.0;
pub const MAX_INTERVAL: u32 = 365;

const DEFAULT_WEIGHTS: [f64; 17] = [
    0.4, 0.6, 2.4, 5.8, 4.93, 0.94, 0.86, 0.01, 1.49, 0.14, 0.94, 2.18, 0.05, 0.34, 1.26, 0.29,
    2.61,
];

/// The weight table `w0..w16`.
///
/// - `w0..w3`: initial stability for a new card rated Again, Hard, Good, Easy.
/// - `w4`: initial difficulty.
/// - `w6`: difficulty penalty on Again.
/// - `w7`: difficulty penalty on Hard.
/// - `w8`: difficulty reward on Good.
/// - `w9`: difficulty reward on Easy.
/// - `w10`: growth factor of review stability.
/// - `w11`: stability multiplier on Again.
/// - `w12..w14`: learning stability multipliers for Hard, Good, Easy.
/// - `w15`: review stability multiplier on Hard.
///
/// `w5` and `w16` are carried but unused by the current formulas.
#[derive(Clone, Copy, PartialEq, Debug, Deserialize, Serialize)]
pub struct Weights([f64; 17]);

impl Weights {
    pub fn new(weights: [f64; 17]) -> Self {
        Self(weights)
    }

    pub fn as_array(&self) -> &[f64; 17] {
        &self.0
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self(DEFAULT_WEIGHTS)
    }
}

impl Index<usize> for Weights {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

/// The learner's self-reported recall quality.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Rating {
    Again,
    Hard,
    Good,
    Easy,
}

impl Rating {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Again => "again",
            Rating::Hard => "hard",
            Rating::Good => "good",
            Rating::Easy => "easy",
        }
    }

    pub fn value(&self) -> u8 {
        match self {
            Rating::Again => 1,
            Rating::Hard => 2,
            Rating::Good => 3,
            Rating::Easy => 4,
        }
    }
}

impl TryFrom<u8> for Rating {
    type Error = ErrorReport;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Rating::Again),
            2 => Ok(Rating::Hard),
            3 => Ok(Rating::Good),
            4 => Ok(Rating::Easy),
            _ => fail(format!("invalid rating: {value}")),
        }
    }
}

impl From<Rating> for f64 {
    fn from(rating: Rating) -> f64 {
        rating.value() as f64
    }
}

impl ToSql for Rating {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.value() as i64))
    }
}

/// The scheduler's input: a card's memory state at review time.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Snapshot {
    pub state: State,
    pub stability: Stability,
    pub difficulty: Difficulty,
    pub elapsed_days: u32,
}

/// The scheduler's output. Applying it (due date, counters) is the caller's
/// job.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ScheduleUpdate {
    pub state: State,
    pub stability: Stability,
    pub difficulty: Difficulty,
    pub scheduled_days: u32,
}

/// Estimated recall probability after `elapsed_days`.
pub fn retrievability(elapsed_days: f64, stability: Stability) -> f64 {
    let stability = if stability > 0.0 {
        stability
    } else {
        MIN_STABILITY
    };
    1.0 / (1.0 + elapsed_days / (9.0 * stability))
}

pub fn schedule(w: &Weights, snapshot: &Snapshot, rating: Rating) -> ScheduleUpdate {
    let s = snapshot.stability;
    let d = snapshot.difficulty;
    // Intervals are floored before clamping.
    let (state, stability, difficulty, interval) = match (snapshot.state, rating) {
        (State::New, Rating::Again) => (State::Learning, w[0], w[4], 0.0),
        (State::New, Rating::Hard) => (State::Learning, w[1], w[4], 1.0),
        (State::New, Rating::Good) => (State::Learning, w[2], w[4], 1.0),
        (State::New, Rating::Easy) => (State::Review, w[3], w[4] - 1.0, 4.0),
        (_, Rating::Again) => (
            State::Relearning,
            f64::max(1.0, s * w[11]),
            f64::min(MAX_DIFFICULTY, d + w[6]),
            0.0,
        ),
        // Learning intervals derive from the incoming stability.
        (State::Learning | State::Relearning, Rating::Hard) => {
            (State::Learning, s * w[12], d + w[7], f64::max(1.0, s.floor()))
        }
        (State::Learning | State::Relearning, Rating::Good) => (
            State::Review,
            s * w[13],
            d - w[8],
            f64::max(1.0, (s * 2.0).floor()),
        ),
        (State::Learning | State::Relearning, Rating::Easy) => (
            State::Review,
            s * w[14],
            f64::max(1.0, d - w[9]),
            f64::max(2.0, (s * 3.0).floor()),
        ),
        (State::Review, Rating::Hard) => (
            State::Review,
            s * w[15],
            d + w[7],
            f64::max(1.0, (s * 0.75).floor()),
        ),
        // Review intervals on Good and Easy derive from the new stability.
        (State::Review, Rating::Good) => {
            let r = retrievability(snapshot.elapsed_days as f64, s);
            // The growth term vanishes: (3 - 3) = 0, so stability is unchanged.
            let stability = s * (1.0 + w[10] * (f64::from(rating) - 3.0) * r);
            (
                State::Review,
                stability,
                d - w[8],
                f64::max(1.0, stability.floor()),
            )
        }
        (State::Review, Rating::Easy) => {
            let r = retrievability(snapshot.elapsed_days as f64, s);
            let stability = s * (1.0 + w[10] * 1.5 * r);
            (
                State::Review,
                stability,
                f64::max(1.0, d - w[9]),
                f64::max(2.0, (stability * 1.3).floor()),
            )
        }
    };
    let min_interval = if rating == Rating::Again { 0.0 } else { 1.0 };
    ScheduleUpdate {
        state,
        stability: stability.clamp(MIN_STABILITY, MAX_STABILITY),
        difficulty: difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY),
        scheduled_days: interval.clamp(min_interval, MAX_INTERVAL as f64) as u32,
    }
}
