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

use crate::collection::Collection;
use crate::error::Fallible;
use crate::fsrs::Rating;
use crate::types::card::CardId;
use crate::types::timestamp::Timestamp;

/// Review a card with a raw rating from the user. The rating is validated
/// before the scheduler sees it.
pub fn review_card(
    collection: &Collection,
    card_id: CardId,
    rating: u8,
    now: Timestamp,
) -> Fallible<String> {
    let rating = Rating::try_from(rating)?;
    let card = collection
        .db
        .review(card_id, rating, &collection.config.weights, now)?;
    Ok(serde_json::to_string_pretty(&card)?)
}
