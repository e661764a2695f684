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

use crate::constants::*;
use crate::provide_credential::{
    detect_auth_kind, EnvCredentialProvider, StaticCredentialProvider,
};
use crate::Credential;
use async_trait::async_trait;
use authfetch_core::{
    AuthKind, Context, Error, FetchOptions, ProvideCredential, ProvideCredentialChain, Result,
};

/// DefaultCredentialProvider resolves a generic credential of one auth kind.
///
/// Resolution order: fetch options, then `HOMEBREW_*` environment variables.
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    kind: AuthKind,
    chain: ProvideCredentialChain<Credential>,
}

impl DefaultCredentialProvider {
    /// Create a provider for `kind` that consults `options` first.
    ///
    /// Only Bearer, Basic, CustomHeader and ApiKey are generic kinds.
    pub fn new(kind: AuthKind, options: &FetchOptions) -> Result<Self> {
        if !matches!(
            kind,
            AuthKind::Bearer | AuthKind::Basic | AuthKind::CustomHeader | AuthKind::ApiKey
        ) {
            return Err(Error::unknown_auth_kind(format!(
                "Unknown authentication type: {kind}"
            ))
            .with_context("hint: use bearer, basic, header or api_key"));
        }

        let chain = ProvideCredentialChain::new()
            .push(StaticCredentialProvider::from_options(kind, options))
            .push(
                EnvCredentialProvider::new(kind).with_api_key_header(options.api_key_header.clone()),
            );
        Ok(Self { kind, chain })
    }

    /// Create a provider for the declared `auth_type`, or the detected kind when none is declared.
    pub fn from_options(ctx: &Context, options: &FetchOptions) -> Result<Self> {
        let kind = match options.auth_kind()? {
            Some(kind) => kind,
            None => detect_auth_kind(ctx, options)?,
        };
        Self::new(kind, options)
    }

    /// Create with a custom credential chain.
    pub fn with_chain(kind: AuthKind, chain: ProvideCredentialChain<Credential>) -> Self {
        Self { kind, chain }
    }

    /// The auth kind this provider resolves.
    pub fn kind(&self) -> AuthKind {
        self.kind
    }

    /// Resolve a credential or fail with `MissingCredentials`.
    pub async fn load(&self, ctx: &Context) -> Result<Credential> {
        if let Some(cred) = self.provide_credential(ctx).await? {
            return Ok(cred);
        }

        let err = match self.kind {
            AuthKind::Bearer => Error::missing_credentials(format!(
                "Bearer token required. Set {HOMEBREW_BEARER_TOKEN} environment variable."
            ))
            .with_context("hint: or pass the token option"),
            AuthKind::Basic => Error::missing_credentials(format!(
                "Username and password required. Set {HOMEBREW_AUTH_USER} and {HOMEBREW_AUTH_PASSWORD} environment variables."
            ))
            .with_context("hint: or pass the username and password options"),
            AuthKind::CustomHeader => Error::missing_credentials(format!(
                "Custom header and value required. Set {HOMEBREW_AUTH_HEADER} and {HOMEBREW_AUTH_VALUE} environment variables."
            ))
            .with_context("hint: or pass the header and header_value options"),
            _ => Error::missing_credentials(format!(
                "API key required. Set {HOMEBREW_API_KEY} environment variable."
            ))
            .with_context("hint: or pass the api_key option"),
        };
        Err(err)
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
    }
}
