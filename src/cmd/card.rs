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
use crate::types::card::CardId;
use crate::types::timestamp::Timestamp;

/// Create the card if it does not exist, and render it as JSON.
pub fn add_card(
    collection: &Collection,
    owner_id: &str,
    card_type: &str,
    content_id: &str,
    now: Timestamp,
) -> Fallible<String> {
    let card = collection
        .db
        .create_if_absent(owner_id, card_type, content_id, now)?;
    Ok(serde_json::to_string_pretty(&card)?)
}

pub fn show_card(collection: &Collection, card_id: CardId) -> Fallible<String> {
    let card = collection.db.get_card(card_id)?;
    Ok(serde_json::to_string_pretty(&card)?)
}
