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

use crate::{aws, dispatch, generic, github, gitlab, resolve_credential, CredentialBundle, Strategy};
use authfetch_core::time::{now, DateTime};
use authfetch_core::{AuthenticatedRequest, Context, Error, FetchRequest, Locator, Result};
use log::debug;
use std::fmt::{self, Debug, Formatter};
use std::path::Path;
use std::sync::Arc;

/// Fetcher turns a [`Locator`] into bytes on disk.
///
/// Each fetch runs dispatch, credential resolution and request construction, then hands
/// the resulting [`FetchRequest`] to the context's [`Download`](authfetch_core::Download).
/// Nothing is kept between fetches.
#[derive(Clone)]
pub struct Fetcher {
    ctx: Context,
    clock: Arc<dyn Fn() -> DateTime + Send + Sync>,
}

impl Debug for Fetcher {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fetcher").field("ctx", &self.ctx).finish()
    }
}

impl Fetcher {
    /// Create a fetcher over `ctx` using the system clock.
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            clock: Arc::new(now),
        }
    }

    /// Replace the clock used for SigV4 timestamps.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// The context this fetcher uses.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Build the request for `locator` without transferring anything.
    ///
    /// API calls needed to find the final URL (latest release tag, release asset link,
    /// instance metadata) are made here.
    pub async fn prepare(&self, locator: &Locator, dest: impl AsRef<Path>) -> Result<FetchRequest> {
        let (_, req) = self.prepare_inner(locator, dest.as_ref()).await?;
        Ok(req)
    }

    /// Fetch `locator` into `dest`, returning the number of bytes written.
    pub async fn fetch(&self, locator: &Locator, dest: impl AsRef<Path>) -> Result<u64> {
        let (name, req) = self.prepare_inner(locator, dest.as_ref()).await?;

        let written = self
            .ctx
            .download(&req)
            .await
            .map_err(|e| e.with_strategy(name))?;
        debug!(
            "{locator}: downloaded {written} bytes to {}",
            req.destination().display()
        );
        Ok(written)
    }

    async fn prepare_inner(
        &self,
        locator: &Locator,
        dest: &Path,
    ) -> Result<(&'static str, FetchRequest)> {
        let strategy = dispatch(locator)?;
        let name = strategy.kind().name();

        let req = self
            .authenticate(locator, &strategy)
            .await
            .map_err(|e| e.with_strategy(name))?;
        // Presigned URLs carry their signature in the query.
        let url = req.url.split('?').next().unwrap_or_default();
        debug!("{locator}: prepared {name} request for {url}");

        Ok((name, FetchRequest::new(req, dest, locator.options().timeout)))
    }

    async fn authenticate(
        &self,
        locator: &Locator,
        strategy: &Strategy,
    ) -> Result<AuthenticatedRequest> {
        let ctx = &self.ctx;
        let options = locator.options();

        let kind = strategy.auth_kind(ctx, options)?;
        let cred = resolve_credential(ctx, kind, options).await?;
        debug!("{locator}: resolved {kind} credential");

        match (strategy, &cred) {
            (Strategy::GitHubRaw(target), CredentialBundle::GitHub(cred)) => {
                github::build_raw_request(target, cred)
            }
            (Strategy::GitHubRelease(target), CredentialBundle::GitHub(cred)) => {
                github::build_release_request(ctx, target, cred).await
            }
            (Strategy::GitLabRaw(target), CredentialBundle::GitLab(cred)) => {
                gitlab::build_raw_request(target, cred)
            }
            (Strategy::GitLabRelease(target), CredentialBundle::GitLab(cred)) => {
                gitlab::build_release_request(ctx, target, cred).await
            }
            (Strategy::S3(_), CredentialBundle::Presigned(url)) => {
                Ok(aws::build_presigned_request(url))
            }
            (Strategy::S3(target), CredentialBundle::Aws(cred)) => {
                let region = target.resolve_region(ctx, options);
                aws::build_signed_request(target, &region, cred, (self.clock)())
            }
            (Strategy::S3Public(target), CredentialBundle::None) => {
                let region = target.resolve_region(ctx, options);
                Ok(aws::build_public_request(target, &region))
            }
            (Strategy::Generic(target), CredentialBundle::Generic(cred)) => {
                generic::build_request(target, cred, &options.headers)
            }
            (strategy, cred) => Err(Error::unexpected(format!(
                "credential {cred:?} does not fit strategy {}",
                strategy.kind()
            ))),
        }
    }
}
