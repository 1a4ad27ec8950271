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

//! lexicards: a spaced repetition scheduling engine for language learning
//! cards.
//!
//! The engine itself is pure:
//! - [`fsrs::schedule`] maps a card's memory state and a rating to its next
//!   state, memory parameters and interval;
//! - [`select::select_due`] orders the due queue;
//! - [`stats::card_stats`] counts cards per lifecycle state.
//!
//! [`db::Database`] persists cards in SQLite and applies scheduling
//! decisions.

pub mod cli;
pub mod cmd;
pub mod collection;
pub mod config;
pub mod db;
pub mod error;
pub mod fsrs;
pub mod select;
pub mod stats;
pub mod types;

#[cfg(test)]
mod helper;

pub use error::{ErrorReport, Fallible, fail};
pub use fsrs::{Rating, ScheduleUpdate, Snapshot, Weights, schedule};
pub use select::select_due;
pub use stats::{CardStats, card_stats};
pub use types::card::{CardId, SrsCard};
pub use types::state::State;
pub use types::timestamp::Timestamp;
