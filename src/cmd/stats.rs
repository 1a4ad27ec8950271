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

use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;

use crate::collection::Collection;
use crate::error::Fallible;
use crate::stats::CardStats;
use crate::types::timestamp::Timestamp;

#[derive(ValueEnum, Clone, Copy)]
pub enum StatsFormat {
    /// Plain text output.
    Text,
    /// JSON output.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

pub fn render_owner_stats(
    collection: &Collection,
    owner_id: &str,
    format: StatsFormat,
    now: Timestamp,
) -> Fallible<String> {
    let stats = collection.db.card_stats(owner_id, now)?;
    match format {
        StatsFormat::Text => Ok(render_text(&stats)),
        StatsFormat::Json => Ok(serde_json::to_string_pretty(&stats)?),
    }
}

fn render_text(stats: &CardStats) -> String {
    format!(
        "total: {}\nnew: {}\nlearning: {}\nrelearning: {}\nreview: {}\ndue today: {}",
        stats.total, stats.new, stats.learning, stats.relearning, stats.review, stats.due_today
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_text() {
        let stats = CardStats {
            total: 4,
            new: 1,
            learning: 1,
            review: 1,
            relearning: 1,
            due_today: 2,
        };
        assert_eq!(
            render_text(&stats),
            "total: 4\nnew: 1\nlearning: 1\nrelearning: 1\nreview: 1\ndue today: 2"
        );
    }

    #[test]
    fn test_render_json() -> Fallible<()> {
        let dir = tempfile::tempdir()?;
        let collection = Collection::new(Some(dir.path().display().to_string()))?;
        let now = Timestamp::now();
        collection.db.create_if_absent("u1", "lemma", "haus", now)?;
        let output = render_owner_stats(&collection, "u1", StatsFormat::Json, now)?;
        let json: serde_json::Value = serde_json::from_str(&output)?;
        assert_eq!(json["total"], 1);
        assert_eq!(json["new"], 1);
        assert_eq!(json["dueToday"], 1);
        Ok(())
    }
}
