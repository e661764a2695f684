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

use crate::{aws, generic, github, gitlab};
use authfetch_core::{AuthKind, Context, Error, FetchOptions, Result, StrategyKind};

/// Strategy is a parsed locator bound to the provider that knows how to fetch it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// A raw file in a private GitHub repository.
    GitHubRaw(github::RawTarget),
    /// A GitHub release asset.
    GitHubRelease(github::ReleaseTarget),
    /// A file fetched through the GitLab files API.
    GitLabRaw(gitlab::RawTarget),
    /// A GitLab release asset.
    GitLabRelease(gitlab::ReleaseTarget),
    /// A private S3 object.
    S3(aws::S3Target),
    /// A public S3 object, fetched without credentials.
    S3Public(aws::S3Target),
    /// Any https URL with a generic auth scheme.
    Generic(generic::Target),
}

impl Strategy {
    /// The kind of this strategy.
    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::GitHubRaw(_) => StrategyKind::GitHubRaw,
            Strategy::GitHubRelease(_) => StrategyKind::GitHubRelease,
            Strategy::GitLabRaw(_) => StrategyKind::GitLabRaw,
            Strategy::GitLabRelease(_) => StrategyKind::GitLabRelease,
            Strategy::S3(_) => StrategyKind::S3,
            Strategy::S3Public(_) => StrategyKind::S3Public,
            Strategy::Generic(_) => StrategyKind::Generic,
        }
    }

    /// The auth kind to resolve credentials for.
    ///
    /// S3 switches to [`AuthKind::PresignedUrl`] when a presigned URL is configured.
    /// Generic uses the declared `auth_type` or detects one; only the generic
    /// kinds are accepted there.
    pub fn auth_kind(&self, ctx: &Context, options: &FetchOptions) -> Result<AuthKind> {
        let kind = match self {
            Strategy::GitHubRaw(_) | Strategy::GitHubRelease(_) => AuthKind::GitHubToken,
            Strategy::GitLabRaw(_) | Strategy::GitLabRelease(_) => AuthKind::GitLabToken,
            Strategy::S3(_) if aws::presigned_url(ctx, options).is_some() => {
                AuthKind::PresignedUrl
            }
            Strategy::S3(_) => AuthKind::AwsSigV4,
            Strategy::S3Public(_) => AuthKind::None,
            Strategy::Generic(_) => match options.auth_kind()? {
                Some(
                    kind @ (AuthKind::Bearer
                    | AuthKind::Basic
                    | AuthKind::CustomHeader
                    | AuthKind::ApiKey),
                ) => kind,
                Some(kind) => {
                    return Err(Error::unknown_auth_kind(format!(
                        "Unknown authentication type: {kind}"
                    ))
                    .with_context("hint: use bearer, basic, header or api_key"))
                }
                None => generic::detect_auth_kind(ctx, options)?,
            },
        };
        Ok(kind)
    }
}
