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

use crate::types::card::SrsCard;
use crate::types::timestamp::Timestamp;

/// Select the cards due at `now`, optionally restricted to one card type.
///
/// Cards are ordered by state (new, learning, relearning, review), then by
/// ascending due time, and at most `limit` are returned.
pub fn select_due(
    cards: Vec<SrsCard>,
    now: Timestamp,
    card_type: Option<&str>,
    limit: usize,
) -> Vec<SrsCard> {
    let mut due: Vec<SrsCard> = cards
        .into_iter()
        .filter(|card| card.is_due(now))
        .filter(|card| card_type.is_none_or(|t| card.card_type == t))
        .collect();
    due.sort_by_key(|card| (card.state.priority(), card.due_at));
    due.truncate(limit);
    due
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;
    use crate::types::state::State;

    fn ts(hour: u32) -> Timestamp {
        Timestamp::new(Utc.with_ymd_and_hms(2025, 3, 1, hour, 0, 0).unwrap())
    }

    fn card(content_id: &str, card_type: &str, state: State, due_hour: u32) -> SrsCard {
        let mut card = SrsCard::new("u1", card_type, content_id, ts(due_hour));
        card.state = state;
        card
    }

    fn ids(cards: &[SrsCard]) -> Vec<&str> {
        cards.iter().map(|c| c.content_id.as_str()).collect()
    }

    #[test]
    fn test_orders_by_state_then_due_time() {
        let cards = vec![
            card("review", "lemma", State::Review, 1),
            card("new-late", "lemma", State::New, 5),
            card("relearning", "lemma", State::Relearning, 2),
            card("learning", "lemma", State::Learning, 3),
            card("new-early", "lemma", State::New, 4),
        ];
        let due = select_due(cards, ts(12), None, 10);
        assert_eq!(
            ids(&due),
            vec!["new-early", "new-late", "learning", "relearning", "review"]
        );
    }

    #[test]
    fn test_excludes_cards_not_yet_due() {
        let cards = vec![
            card("now", "lemma", State::Review, 12),
            card("later", "lemma", State::New, 13),
        ];
        let due = select_due(cards, ts(12), None, 10);
        assert_eq!(ids(&due), vec!["now"]);
    }

    #[test]
    fn test_filters_by_card_type() {
        let cards = vec![
            card("haus", "lemma", State::New, 1),
            card("dative", "grammar", State::New, 1),
            card("-en", "morph", State::Learning, 1),
        ];
        let due = select_due(cards, ts(12), Some("grammar"), 10);
        assert_eq!(ids(&due), vec!["dative"]);
    }

    #[test]
    fn test_limit() {
        let cards = vec![
            card("a", "lemma", State::Review, 1),
            card("b", "lemma", State::New, 2),
            card("c", "lemma", State::New, 1),
        ];
        let due = select_due(cards.clone(), ts(12), None, 2);
        assert_eq!(ids(&due), vec!["c", "b"]);
        assert!(select_due(cards, ts(12), None, 0).is_empty());
    }

    #[test]
    fn test_empty() {
        assert!(select_due(Vec::new(), ts(12), None, 10).is_empty());
    }
}
