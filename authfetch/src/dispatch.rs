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

use crate::{aws, generic, github, gitlab, Strategy};
use authfetch_core::{Error, Locator, Result, StrategyKind};
use log::debug;

/// Route is one family in the dispatch table.
struct Route {
    kind: StrategyKind,
    claims: fn(&str) -> bool,
    parse: fn(&str) -> Result<Strategy>,
}

/// Families in the order they are tried. The generic route claims every https URL and
/// stays last. `s3-public` shares its URL shapes with `s3` and is only reachable by hint.
static ROUTES: [Route; 6] = [
    Route {
        kind: StrategyKind::GitHubRaw,
        claims: github::RawTarget::claims,
        parse: |url| github::RawTarget::parse(url).map(Strategy::GitHubRaw),
    },
    Route {
        kind: StrategyKind::GitHubRelease,
        claims: github::ReleaseTarget::claims,
        parse: |url| github::ReleaseTarget::parse(url).map(Strategy::GitHubRelease),
    },
    Route {
        kind: StrategyKind::GitLabRaw,
        claims: gitlab::RawTarget::claims,
        parse: |url| gitlab::RawTarget::parse(url).map(Strategy::GitLabRaw),
    },
    Route {
        kind: StrategyKind::GitLabRelease,
        claims: gitlab::ReleaseTarget::claims,
        parse: |url| gitlab::ReleaseTarget::parse(url).map(Strategy::GitLabRelease),
    },
    Route {
        kind: StrategyKind::S3,
        claims: aws::S3Target::claims,
        parse: |url| aws::S3Target::parse(url).map(Strategy::S3),
    },
    Route {
        kind: StrategyKind::Generic,
        claims: generic::Target::claims,
        parse: |url| generic::Target::parse(url).map(Strategy::Generic),
    },
];

/// Select the strategy for `locator`.
///
/// An explicit strategy on the locator bypasses family selection. Otherwise the first
/// family claiming the URL parses it; a claimed URL that does not parse is
/// `InvalidLocator`, a URL nobody claims is `UnrecognizedLocator`.
pub fn dispatch(locator: &Locator) -> Result<Strategy> {
    let url = locator.url();

    if let Some(kind) = locator.strategy() {
        debug!("{locator}: using requested strategy {kind}");
        return parse_as(kind, url);
    }

    let route = ROUTES.iter().find(|r| (r.claims)(url)).ok_or_else(|| {
        Error::unrecognized_locator(format!("no download strategy matches URL: {url}"))
            .with_context("hint: supported URLs are https:// and s3://")
    })?;
    debug!("{locator}: dispatched to {}", route.kind);

    (route.parse)(url).map_err(|e| e.with_strategy(route.kind.name()))
}

/// Parse `url` with the patterns of `kind` only.
///
/// This is how S3-compatible custom endpoints and public buckets are reached.
pub fn parse_as(kind: StrategyKind, url: &str) -> Result<Strategy> {
    let strategy = match kind {
        StrategyKind::S3 => aws::S3Target::parse_custom_endpoint(url).map(Strategy::S3),
        StrategyKind::S3Public => {
            aws::S3Target::parse_custom_endpoint(url).map(Strategy::S3Public)
        }
        _ => match ROUTES.iter().find(|r| r.kind == kind) {
            Some(route) => (route.parse)(url),
            None => Err(Error::unexpected(format!("no route for strategy {kind}"))),
        },
    };
    strategy.map_err(|e| e.with_strategy(kind.name()))
}
