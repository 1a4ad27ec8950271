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

use clap::Parser;

use crate::cmd::card::add_card;
use crate::cmd::card::show_card;
use crate::cmd::due::list_due_cards;
use crate::cmd::review::review_card;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::render_owner_stats;
use crate::collection::Collection;
use crate::error::Fallible;
use crate::types::card::CardId;
use crate::types::timestamp::Timestamp;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Add a card, unless it already exists.
    Add {
        /// The learner who owns the card.
        owner_id: String,
        /// The content category, e.g. `lemma`, `grammar`, `morph`.
        card_type: String,
        /// The identifier of the content item.
        content_id: String,
        /// Path to the collection directory.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Show a card.
    Show {
        card_id: CardId,
        /// Path to the collection directory.
        #[arg(long)]
        directory: Option<String>,
    },
    /// List the cards due now.
    Due {
        owner_id: String,
        /// Only list cards of this type.
        #[arg(long)]
        card_type: Option<String>,
        /// Maximum number of cards to list.
        #[arg(long)]
        limit: Option<usize>,
        /// Path to the collection directory.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Review a card.
    Review {
        card_id: CardId,
        /// 1 = Again, 2 = Hard, 3 = Good, 4 = Easy.
        rating: u8,
        /// Path to the collection directory.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Print card counts per state.
    Stats {
        owner_id: String,
        /// Output format.
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
        /// Path to the collection directory.
        #[arg(long)]
        directory: Option<String>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    let now = Timestamp::now();
    let output = match cli {
        Command::Add {
            owner_id,
            card_type,
            content_id,
            directory,
        } => {
            let collection = Collection::new(directory)?;
            add_card(&collection, &owner_id, &card_type, &content_id, now)?
        }
        Command::Show { card_id, directory } => {
            let collection = Collection::new(directory)?;
            show_card(&collection, card_id)?
        }
        Command::Due {
            owner_id,
            card_type,
            limit,
            directory,
        } => {
            let collection = Collection::new(directory)?;
            list_due_cards(&collection, &owner_id, card_type.as_deref(), limit, now)?
        }
        Command::Review {
            card_id,
            rating,
            directory,
        } => {
            let collection = Collection::new(directory)?;
            review_card(&collection, card_id, rating, now)?
        }
        Command::Stats {
            owner_id,
            format,
            directory,
        } => {
            let collection = Collection::new(directory)?;
            render_owner_stats(&collection, &owner_id, format, now)?
        }
    };
    println!("{output}");
    Ok(())
}
