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

use authfetch_core::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static HTTPS_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://([^/?#@]+)(?:[/?#].*)?$").expect("https url pattern must be valid")
});

/// Target is any https URL fetched with a generic credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Host, with port when present.
    pub host: String,
    /// The URL, requested as is.
    pub url: String,
}

impl Target {
    /// Check whether `url` is an https URL.
    pub fn claims(url: &str) -> bool {
        url.starts_with("https://")
    }

    /// Parse an https URL with a non-empty host.
    pub fn parse(url: &str) -> Result<Self> {
        let c = HTTPS_URL.captures(url).ok_or_else(|| {
            Error::invalid_locator(format!("invalid URL for authenticated download: {url}"))
                .with_context("hint: use an https:// URL with a host")
        })?;
        Ok(Self {
            host: c[1].to_string(),
            url: url.to_string(),
        })
    }
}
