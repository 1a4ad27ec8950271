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
use crate::types::timestamp::Timestamp;

/// Render the owner's due queue as JSON. Without an explicit limit, the
/// collection's configured limit applies.
pub fn list_due_cards(
    collection: &Collection,
    owner_id: &str,
    card_type: Option<&str>,
    limit: Option<usize>,
    now: Timestamp,
) -> Fallible<String> {
    let limit = limit.unwrap_or(collection.config.due_limit);
    let cards = collection.db.list_due(owner_id, card_type, now, limit)?;
    log::debug!("{} cards due for {owner_id}", cards.len());
    Ok(serde_json::to_string_pretty(&cards)?)
}
