// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::constants::{API_HOST, RAW_HOST, WEB_HOST};
use authfetch_core::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static RAW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://raw\.githubusercontent\.com/([^/]+)/([^/]+)/(.+)$")
        .expect("raw pattern must be valid")
});
static RELEASE_TAGGED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://github\.com/([^/]+)/([^/]+)/releases/download/([^/]+)/(.+)$")
        .expect("tagged release pattern must be valid")
});
static RELEASE_ASSET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://api\.github\.com/repos/([^/]+)/([^/]+)/releases/assets/([0-9]+)$")
        .expect("release asset pattern must be valid")
});
static RELEASE_LATEST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://github\.com/([^/]+)/([^/]+)/releases/latest/download/(.+)$")
        .expect("latest release pattern must be valid")
});

fn host_of(url: &str) -> Option<&str> {
    url.strip_prefix("https://")?.split(['/', '?', '#']).next()
}

/// RawTarget is a file in a private repository served by `raw.githubusercontent.com`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTarget {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// `<ref>/<path>` inside the repository.
    pub path: String,
}

impl RawTarget {
    /// Check whether `url` belongs to the raw family.
    pub fn claims(url: &str) -> bool {
        host_of(url) == Some(RAW_HOST)
    }

    /// Parse `https://raw.githubusercontent.com/<owner>/<repo>/<path>`.
    pub fn parse(url: &str) -> Result<Self> {
        let c = RAW.captures(url).ok_or_else(|| {
            Error::invalid_locator(format!("invalid GitHub raw URL: {url}")).with_context(
                "hint: use https://raw.githubusercontent.com/<owner>/<repo>/<ref>/<path>",
            )
        })?;
        Ok(Self {
            owner: c[1].to_string(),
            repo: c[2].to_string(),
            path: c[3].to_string(),
        })
    }

    /// The URL to request.
    pub fn url(&self) -> String {
        format!(
            "https://{RAW_HOST}/{}/{}/{}",
            self.owner, self.repo, self.path
        )
    }
}

/// Which release asset a [`ReleaseTarget`] points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseAsset {
    /// `releases/download/<tag>/<file>`
    Tagged {
        /// Release tag.
        tag: String,
        /// Asset file name.
        file: String,
    },
    /// `releases/latest/download/<file>`, resolved through the API before download.
    Latest {
        /// Asset file name.
        file: String,
    },
    /// `api.github.com/repos/<owner>/<repo>/releases/assets/<id>`
    AssetId(u64),
}

/// ReleaseTarget is a GitHub release asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTarget {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Asset selector.
    pub asset: ReleaseAsset,
}

impl ReleaseTarget {
    /// Check whether `url` belongs to the release family.
    pub fn claims(url: &str) -> bool {
        match host_of(url) {
            Some(WEB_HOST) => url.contains("/releases/"),
            Some(API_HOST) => url.contains("/releases/assets/"),
            _ => false,
        }
    }

    /// Parse a tagged, latest or asset-id release URL.
    pub fn parse(url: &str) -> Result<Self> {
        if let Some(c) = RELEASE_TAGGED.captures(url) {
            return Ok(Self {
                owner: c[1].to_string(),
                repo: c[2].to_string(),
                asset: ReleaseAsset::Tagged {
                    tag: c[3].to_string(),
                    file: c[4].to_string(),
                },
            });
        }
        if let Some(c) = RELEASE_ASSET.captures(url) {
            let id = c[3].parse().map_err(|e| {
                Error::invalid_locator(format!("invalid GitHub release asset id: {}", &c[3]))
                    .with_source(e)
            })?;
            return Ok(Self {
                owner: c[1].to_string(),
                repo: c[2].to_string(),
                asset: ReleaseAsset::AssetId(id),
            });
        }
        if let Some(c) = RELEASE_LATEST.captures(url) {
            return Ok(Self {
                owner: c[1].to_string(),
                repo: c[2].to_string(),
                asset: ReleaseAsset::Latest {
                    file: c[3].to_string(),
                },
            });
        }

        Err(
            Error::invalid_locator(format!("invalid GitHub release URL: {url}")).with_context(
                "hint: use https://github.com/<owner>/<repo>/releases/download/<tag>/<file>, .../releases/latest/download/<file> or https://api.github.com/repos/<owner>/<repo>/releases/assets/<id>",
            ),
        )
    }

    /// API endpoint describing the latest release.
    pub fn latest_release_url(&self) -> String {
        format!(
            "https://{API_HOST}/repos/{}/{}/releases/latest",
            self.owner, self.repo
        )
    }

    /// Download URL of `file` in release `tag`.
    pub fn download_url(&self, tag: &str, file: &str) -> String {
        format!(
            "https://{WEB_HOST}/{}/{}/releases/download/{tag}/{file}",
            self.owner, self.repo
        )
    }

    /// API URL of asset `id`.
    pub fn asset_url(&self, id: u64) -> String {
        format!(
            "https://{API_HOST}/repos/{}/{}/releases/assets/{id}",
            self.owner, self.repo
        )
    }
}
