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

use crate::fsrs::Difficulty;
use crate::fsrs::Snapshot;
use crate::fsrs::Stability;
use crate::types::state::State;
use crate::types::timestamp::Timestamp;

pub type CardId = i64;

/// Initial stability of a card that has never been reviewed.
pub const INITIAL_STABILITY: Stability = 1.0;

/// Initial difficulty of a card that has never been reviewed.
pub const INITIAL_DIFFICULTY: Difficulty = 5.0;

/// One learner's memory state for one piece of content. The triple
/// `(owner_id, card_type, content_id)` is unique.
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SrsCard {
    pub card_id: CardId,
    pub owner_id: String,
    /// Content category, e.g. `lemma`, `grammar`, `morph`.
    pub card_type: String,
    pub content_id: String,
    pub state: State,
    pub stability: Stability,
    pub difficulty: Difficulty,
    /// Days between the previous two reviews.
    pub elapsed_days: u32,
    /// Interval chosen by the last scheduling decision.
    pub scheduled_days: u32,
    pub reps: u32,
    /// Number of Again ratings ever received.
    pub lapses: u32,
    pub due_at: Timestamp,
    pub last_review_at: Option<Timestamp>,
}

impl SrsCard {
    /// A card that has never been reviewed, due immediately. The `card_id`
    /// is assigned on insertion.
    pub fn new(
        owner_id: impl Into<String>,
        card_type: impl Into<String>,
        content_id: impl Into<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            card_id: 0,
            owner_id: owner_id.into(),
            card_type: card_type.into(),
            content_id: content_id.into(),
            state: State::New,
            stability: INITIAL_STABILITY,
            difficulty: INITIAL_DIFFICULTY,
            elapsed_days: 0,
            scheduled_days: 0,
            reps: 0,
            lapses: 0,
            due_at: now,
            last_review_at: None,
        }
    }

    pub fn is_due(&self, now: Timestamp) -> bool {
        self.due_at <= now
    }

    /// Days since the last review, as of `review_time`.
    pub fn elapsed_days_at(&self, review_time: Timestamp) -> u32 {
        match self.last_review_at {
            Some(last) => review_time.days_since(last),
            None => 0,
        }
    }

    /// The scheduler input for a review at `review_time`.
    pub fn snapshot_at(&self, review_time: Timestamp) -> Snapshot {
        Snapshot {
            state: self.state,
            stability: self.stability,
            difficulty: self.difficulty,
            elapsed_days: self.elapsed_days_at(review_time),
        }
    }
}
