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

use chrono::TimeZone;
use chrono::Utc;
use lexicards::Fallible;
use lexicards::Rating;
use lexicards::State;
use lexicards::Timestamp;
use lexicards::Weights;
use lexicards::collection::Collection;

fn ts(day: u32, hour: u32) -> Timestamp {
    Timestamp::new(Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0).unwrap())
}

fn open() -> Fallible<(tempfile::TempDir, Collection)> {
    let dir = tempfile::tempdir()?;
    let collection = Collection::new(Some(dir.path().display().to_string()))?;
    Ok((dir, collection))
}

#[test]
fn test_card_lifecycle() -> Fallible<()> {
    let (_dir, collection) = open()?;
    let db = &collection.db;
    let weights = Weights::default();

    let card = db.create_if_absent("u1", "lemma", "haus", ts(1, 8))?;
    assert_eq!(db.list_due("u1", None, ts(1, 8), 10)?.len(), 1);

    // New, Good: learning, shown again tomorrow.
    let card = db.review(card.card_id, Rating::Good, &weights, ts(1, 9))?;
    assert_eq!(card.state, State::Learning);
    assert_eq!(card.scheduled_days, 1);
    assert!(db.list_due("u1", None, ts(1, 12), 10)?.is_empty());

    // Learning, Good: graduates, interval floor(2.4 * 2).
    let card = db.review(card.card_id, Rating::Good, &weights, ts(2, 9))?;
    assert_eq!(card.state, State::Review);
    assert_eq!(card.scheduled_days, 4);
    assert_eq!(card.due_at, ts(6, 9));

    // Review, Again: relearn today.
    let card = db.review(card.card_id, Rating::Again, &weights, ts(6, 9))?;
    assert_eq!(card.state, State::Relearning);
    assert_eq!(card.scheduled_days, 0);
    assert_eq!(card.due_at, ts(6, 9));
    assert_eq!(card.elapsed_days, 4);

    // Relearning, Easy: back to review.
    let card = db.review(card.card_id, Rating::Easy, &weights, ts(6, 10))?;
    assert_eq!(card.state, State::Review);
    assert!(card.scheduled_days >= 2);

    assert_eq!(card.reps, 4);
    assert_eq!(card.lapses, 1);
    assert_eq!(db.review_count(card.card_id)?, 4);
    assert_eq!(db.get_card(card.card_id)?, card);
    Ok(())
}

#[test]
fn test_review_good_keeps_stability() -> Fallible<()> {
    let (_dir, collection) = open()?;
    let db = &collection.db;
    let weights = Weights::default();
    let card = db.create_if_absent("u1", "grammar", "dative", ts(1, 8))?;
    let card = db.review(card.card_id, Rating::Easy, &weights, ts(1, 8))?;
    assert_eq!(card.state, State::Review);
    let stability = card.stability;
    let card = db.review(card.card_id, Rating::Good, &weights, ts(5, 8))?;
    assert_eq!(card.stability, stability);
    assert_eq!(card.scheduled_days, stability.floor() as u32);
    Ok(())
}

#[test]
fn test_stats_and_due_queue() -> Fallible<()> {
    let (_dir, collection) = open()?;
    let db = &collection.db;
    let weights = Weights::default();
    let review = db.create_if_absent("u1", "lemma", "a", ts(1, 1))?;
    db.review(review.card_id, Rating::Easy, &weights, ts(1, 1))?;
    let relearning = db.create_if_absent("u1", "lemma", "b", ts(1, 1))?;
    db.review(relearning.card_id, Rating::Good, &weights, ts(1, 1))?;
    db.review(relearning.card_id, Rating::Again, &weights, ts(2, 1))?;
    db.create_if_absent("u1", "lemma", "c", ts(1, 1))?;

    let due = db.list_due("u1", None, ts(9, 0), 10)?;
    let states: Vec<State> = due.iter().map(|c| c.state).collect();
    assert_eq!(states, vec![State::New, State::Relearning, State::Review]);

    let stats = db.card_stats("u1", ts(9, 0))?;
    assert_eq!(stats.total, 3);
    assert_eq!(
        stats.new + stats.learning + stats.review + stats.relearning,
        stats.total
    );
    assert_eq!(stats.due_today, 3);
    Ok(())
}
