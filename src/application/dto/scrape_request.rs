// Copyright 2025 Kirky.X
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

use crate::domain::models::listing::ScrapeTarget;
use serde::Deserialize;

/// Body of `POST /scrape`
#[derive(Debug, Deserialize)]
pub struct ScrapeRequestDto {
    /// `attractions`, `restaurants`, `events`, `properties`,
    /// `transportation` or `all`
    #[serde(rename = "type", default = "default_type")]
    pub scrape_type: String,
}

fn default_type() -> String {
    "all".to_string()
}

impl ScrapeRequestDto {
    pub fn target(&self) -> Result<ScrapeTarget, String> {
        self.scrape_type.parse()
    }
}

/// `?q=` on the cross entity search
#[derive(Debug, Default, Deserialize)]
pub struct SearchQueryDto {
    #[serde(default)]
    pub q: String,
}
