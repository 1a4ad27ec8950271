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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Row;
use rusqlite::Transaction;
use rusqlite::config::DbConfig;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::fsrs::Difficulty;
use crate::fsrs::Rating;
use crate::fsrs::ScheduleUpdate;
use crate::fsrs::Stability;
use crate::fsrs::Weights;
use crate::fsrs::schedule;
use crate::select::select_due;
use crate::stats::CardStats;
use crate::stats::card_stats;
use crate::types::card::CardId;
use crate::types::card::SrsCard;
use crate::types::state::State;
use crate::types::timestamp::Timestamp;

const CARD_COLUMNS: &str = "card_id, owner_id, card_type, content_id, state, stability, difficulty, elapsed_days, scheduled_days, reps, lapses, due_at, last_review_at";

/// The card store. Every mutation runs in its own transaction while holding
/// the connection lock, so at most one mutation per card is in flight.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn new(database_path: &str) -> Fallible<Self> {
        let mut conn = Connection::open(database_path)?;
        conn.set_db_config(DbConfig::SQLITE_DBCONFIG_ENABLE_FKEY, true)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                log::debug!("Creating schema in {database_path}");
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        let conn = Arc::new(Mutex::new(conn));
        Ok(Self { conn })
    }

    /// Return the card for `(owner_id, card_type, content_id)`, creating a
    /// new one due at `now` if it does not exist. An existing card is
    /// returned unmodified.
    pub fn create_if_absent(
        &self,
        owner_id: &str,
        card_type: &str,
        content_id: &str,
        now: Timestamp,
    ) -> Fallible<SrsCard> {
        let mut conn = self.acquire()?;
        let tx = conn.transaction()?;
        let card = SrsCard::new(owner_id, card_type, content_id, now);
        if insert_card(&tx, &card)? {
            log::debug!("Adding new card: {owner_id}/{card_type}/{content_id}");
        }
        let card = match select_card_by_key(&tx, owner_id, card_type, content_id)? {
            Some(card) => card,
            None => return fail("card vanished after insertion"),
        };
        tx.commit()?;
        Ok(card)
    }

    /// Find a card by its identifier.
    pub fn find_card(&self, card_id: CardId) -> Fallible<Option<SrsCard>> {
        let conn = self.acquire()?;
        select_card(&conn, card_id)
    }

    /// Get a card by its identifier. If no such card exists, returns an
    /// error.
    pub fn get_card(&self, card_id: CardId) -> Fallible<SrsCard> {
        match self.find_card(card_id)? {
            Some(card) => Ok(card),
            None => fail(format!("card not found: {card_id}")),
        }
    }

    /// All cards belonging to an owner, optionally of a single type.
    pub fn owner_cards(&self, owner_id: &str, card_type: Option<&str>) -> Fallible<Vec<SrsCard>> {
        let conn = self.acquire()?;
        let sql = format!(
            "select {CARD_COLUMNS} from cards where owner_id = ?1 and (?2 is null or card_type = ?2) order by card_id;"
        );
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query((owner_id, card_type))?;
        let mut cards = Vec::new();
        while let Some(row) = rows.next()? {
            cards.push(card_from_row(row)?);
        }
        Ok(cards)
    }

    /// The owner's cards due at `now`, in review order.
    pub fn list_due(
        &self,
        owner_id: &str,
        card_type: Option<&str>,
        now: Timestamp,
        limit: usize,
    ) -> Fallible<Vec<SrsCard>> {
        let cards = self.owner_cards(owner_id, card_type)?;
        Ok(select_due(cards, now, card_type, limit))
    }

    /// Persist a scheduling decision for the card: memory parameters,
    /// interval and due date, review counters, and a review log entry.
    pub fn apply_update(
        &self,
        card_id: CardId,
        update: &ScheduleUpdate,
        rating: Rating,
        review_time: Timestamp,
    ) -> Fallible<SrsCard> {
        let mut conn = self.acquire()?;
        let tx = conn.transaction()?;
        let card = load_card(&tx, card_id)?;
        let card = apply_in_tx(&tx, card, update, rating, review_time)?;
        tx.commit()?;
        Ok(card)
    }

    /// Review a card: load its snapshot, schedule it, and persist the
    /// result, all in one transaction.
    pub fn review(
        &self,
        card_id: CardId,
        rating: Rating,
        weights: &Weights,
        review_time: Timestamp,
    ) -> Fallible<SrsCard> {
        let mut conn = self.acquire()?;
        let tx = conn.transaction()?;
        let card = load_card(&tx, card_id)?;
        let snapshot = card.snapshot_at(review_time);
        let update = schedule(weights, &snapshot, rating);
        let diff_percent = ((update.difficulty - 1.0) / 9.0) * 100.0;
        log::debug!(
            "card {card_id} {} {}->{} S={:.2}d D={:.2}% due in {}d",
            rating.as_str(),
            snapshot.state,
            update.state,
            update.stability,
            diff_percent,
            update.scheduled_days
        );
        let card = apply_in_tx(&tx, card, &update, rating, review_time)?;
        tx.commit()?;
        Ok(card)
    }

    /// The number of reviews logged for a card.
    pub fn review_count(&self, card_id: CardId) -> Fallible<usize> {
        let conn = self.acquire()?;
        let sql = "select count(*) from reviews where card_id = ?;";
        let count: i64 = conn.query_row(sql, [card_id], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Per-state counts of an owner's cards.
    pub fn card_stats(&self, owner_id: &str, now: Timestamp) -> Fallible<CardStats> {
        let cards = self.owner_cards(owner_id, None)?;
        Ok(card_stats(&cards, now))
    }

    fn acquire(&self) -> Fallible<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| ErrorReport::new("database lock poisoned"))
    }
}

fn card_from_row(row: &Row) -> rusqlite::Result<SrsCard> {
    Ok(SrsCard {
        card_id: row.get(0)?,
        owner_id: row.get(1)?,
        card_type: row.get(2)?,
        content_id: row.get(3)?,
        state: row.get(4)?,
        stability: row.get(5)?,
        difficulty: row.get(6)?,
        elapsed_days: row.get(7)?,
        scheduled_days: row.get(8)?,
        reps: row.get(9)?,
        lapses: row.get(10)?,
        due_at: row.get(11)?,
        last_review_at: row.get(12)?,
    })
}

fn select_card(conn: &Connection, card_id: CardId) -> Fallible<Option<SrsCard>> {
    let sql = format!("select {CARD_COLUMNS} from cards where card_id = ?;");
    let card = conn
        .query_row(&sql, [card_id], card_from_row)
        .optional()?;
    Ok(card)
}

fn load_card(tx: &Transaction, card_id: CardId) -> Fallible<SrsCard> {
    match select_card(tx, card_id)? {
        Some(card) => Ok(card),
        None => fail(format!("card not found: {card_id}")),
    }
}

fn select_card_by_key(
    tx: &Transaction,
    owner_id: &str,
    card_type: &str,
    content_id: &str,
) -> Fallible<Option<SrsCard>> {
    let sql = format!(
        "select {CARD_COLUMNS} from cards where owner_id = ? and card_type = ? and content_id = ?;"
    );
    let card = tx
        .query_row(&sql, (owner_id, card_type, content_id), card_from_row)
        .optional()?;
    Ok(card)
}

/// Insert a card unless its key is taken. Returns whether a row was inserted.
fn insert_card(tx: &Transaction, card: &SrsCard) -> Fallible<bool> {
    let sql = "insert into cards (owner_id, card_type, content_id, state, stability, difficulty, elapsed_days, scheduled_days, reps, lapses, due_at, last_review_at) values (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) on conflict (owner_id, card_type, content_id) do nothing;";
    let changed = tx.execute(
        sql,
        (
            &card.owner_id,
            &card.card_type,
            &card.content_id,
            card.state,
            card.stability,
            card.difficulty,
            card.elapsed_days,
            card.scheduled_days,
            card.reps,
            card.lapses,
            card.due_at,
            card.last_review_at,
        ),
    )?;
    Ok(changed > 0)
}

fn update_card(tx: &Transaction, card: &SrsCard) -> Fallible<()> {
    let sql = "update cards set state = ?, stability = ?, difficulty = ?, elapsed_days = ?, scheduled_days = ?, reps = ?, lapses = ?, due_at = ?, last_review_at = ? where card_id = ?;";
    tx.execute(
        sql,
        (
            card.state,
            card.stability,
            card.difficulty,
            card.elapsed_days,
            card.scheduled_days,
            card.reps,
            card.lapses,
            card.due_at,
            card.last_review_at,
            card.card_id,
        ),
    )?;
    Ok(())
}

fn apply_in_tx(
    tx: &Transaction,
    card: SrsCard,
    update: &ScheduleUpdate,
    rating: Rating,
    review_time: Timestamp,
) -> Fallible<SrsCard> {
    let state_before = card.state;
    let lapse = if rating == Rating::Again { 1 } else { 0 };
    let updated = SrsCard {
        state: update.state,
        stability: update.stability,
        difficulty: update.difficulty,
        elapsed_days: card.elapsed_days_at(review_time),
        scheduled_days: update.scheduled_days,
        reps: card.reps + 1,
        lapses: card.lapses + lapse,
        due_at: review_time.plus_days(update.scheduled_days),
        last_review_at: Some(review_time),
        ..card
    };
    update_card(tx, &updated)?;
    let row = ReviewRow {
        card_id: updated.card_id,
        reviewed_at: review_time,
        rating,
        state_before,
        state_after: updated.state,
        elapsed_days: updated.elapsed_days,
        scheduled_days: updated.scheduled_days,
        stability: updated.stability,
        difficulty: updated.difficulty,
    };
    insert_review(tx, &row)?;
    Ok(updated)
}

struct ReviewRow {
    card_id: CardId,
    reviewed_at: Timestamp,
    rating: Rating,
    state_before: State,
    state_after: State,
    elapsed_days: u32,
    scheduled_days: u32,
    stability: Stability,
    difficulty: Difficulty,
}

type ReviewId = i64;

fn insert_review(tx: &Transaction, review: &ReviewRow) -> Fallible<ReviewId> {
    let sql = "insert into reviews (card_id, reviewed_at, rating, state_before, state_after, elapsed_days, scheduled_days, stability, difficulty) values (?, ?, ?, ?, ?, ?, ?, ?, ?) returning review_id;";
    let review_id: ReviewId = tx.query_row(
        sql,
        (
            review.card_id,
            review.reviewed_at,
            review.rating,
            review.state_before,
            review.state_after,
            review.elapsed_days,
            review.scheduled_days,
            review.stability,
            review.difficulty,
        ),
        |row| row.get(0),
    )?;
    Ok(review_id)
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["cards"], |row| row.get(0))?;
    Ok(count > 0)
}
