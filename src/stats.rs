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

use serde::Serialize;

use crate::types::card::SrsCard;
use crate::types::state::State;
use crate::types::timestamp::Timestamp;

/// Card counts per lifecycle state.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardStats {
    pub total: usize,
    pub new: usize,
    pub learning: usize,
    pub review: usize,
    pub relearning: usize,
    /// Cards due at or before `now`, in any state.
    pub due_today: usize,
}

pub fn card_stats(cards: &[SrsCard], now: Timestamp) -> CardStats {
    let mut stats = CardStats::default();
    for card in cards {
        stats.total += 1;
        match card.state {
            State::New => stats.new += 1,
            State::Learning => stats.learning += 1,
            State::Review => stats.review += 1,
            State::Relearning => stats.relearning += 1,
        }
        if card.is_due(now) {
            stats.due_today += 1;
        }
    }
    stats
}
