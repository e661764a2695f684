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
use authfetch_core::utils::Redact;
use authfetch_core::{AuthKind, Context, Error, FetchOptions, Result};
use log::debug;
use std::fmt::{self, Debug, Formatter};

/// CredentialBundle is the resolved credential for one fetch.
#[derive(Clone, PartialEq)]
pub enum CredentialBundle {
    /// GitHub token.
    GitHub(github::Credential),
    /// GitLab token.
    GitLab(gitlab::Credential),
    /// AWS keys for SigV4.
    Aws(aws::Credential),
    /// A presigned S3 URL; its query string is the credential.
    Presigned(String),
    /// Bearer, basic, header or API key.
    Generic(generic::Credential),
    /// Nothing to resolve.
    None,
}

impl Debug for CredentialBundle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CredentialBundle::GitHub(c) => f.debug_tuple("GitHub").field(c).finish(),
            CredentialBundle::GitLab(c) => f.debug_tuple("GitLab").field(c).finish(),
            CredentialBundle::Aws(c) => f.debug_tuple("Aws").field(c).finish(),
            CredentialBundle::Presigned(url) => f
                .debug_tuple("Presigned")
                .field(&Redact::from(url))
                .finish(),
            CredentialBundle::Generic(c) => f.debug_tuple("Generic").field(c).finish(),
            CredentialBundle::None => f.write_str("None"),
        }
    }
}

/// Resolve the credential for `kind`.
///
/// Each kind walks its own chain: explicit options, then environment, then delegated CLIs
/// or instance metadata where the provider has them. An exhausted chain is
/// `MissingCredentials` naming what to set.
pub async fn resolve_credential(
    ctx: &Context,
    kind: AuthKind,
    options: &FetchOptions,
) -> Result<CredentialBundle> {
    debug!("resolving credential for {kind}");

    let bundle = match kind {
        AuthKind::GitHubToken => CredentialBundle::GitHub(
            github::DefaultCredentialProvider::from_options(options)
                .load(ctx)
                .await?,
        ),
        AuthKind::GitLabToken => CredentialBundle::GitLab(
            gitlab::DefaultCredentialProvider::from_options(options)
                .load(ctx)
                .await?,
        ),
        AuthKind::AwsSigV4 => CredentialBundle::Aws(
            aws::DefaultCredentialProvider::from_options(options)
                .load(ctx)
                .await?,
        ),
        AuthKind::PresignedUrl => {
            let url = aws::presigned_url(ctx, options).ok_or_else(|| {
                Error::missing_credentials(format!(
                    "Presigned URL required. Set {} environment variable.",
                    aws::HOMEBREW_S3_PRESIGNED_URL
                ))
                .with_context("hint: or pass the presigned_url option")
            })?;
            CredentialBundle::Presigned(url)
        }
        AuthKind::Bearer | AuthKind::Basic | AuthKind::CustomHeader | AuthKind::ApiKey => {
            CredentialBundle::Generic(
                generic::DefaultCredentialProvider::new(kind, options)?
                    .load(ctx)
                    .await?,
            )
        }
        AuthKind::None => CredentialBundle::None,
    };
    Ok(bundle)
}
