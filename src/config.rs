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

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::error::Fallible;
use crate::fsrs::Weights;

/// The number of cards `due` lists when no limit is given.
pub const DEFAULT_DUE_LIMIT: usize = 20;

/// Collection settings, read from `lexicards.toml`.
#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The scheduler's weight table.
    pub weights: Weights,
    pub due_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weights: Weights::default(),
            due_limit: DEFAULT_DUE_LIMIT,
        }
    }
}

impl Config {
    pub fn parse(content: &str) -> Fallible<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Load the config file at `path`, or the defaults if there is none.
    pub fn load(path: &Path) -> Fallible<Self> {
        if path.exists() {
            log::debug!("Loading config from {}", path.display());
            Self::parse(&read_to_string(path)?)
        } else {
            Ok(Self::default())
        }
    }
}
