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

use crate::constants::{GITLAB_PRIVATE_TOKEN, GITLAB_TOKEN, HOMEBREW_GITLAB_API_TOKEN};
use crate::provide_credential::{
    CliCredentialProvider, EnvCredentialProvider, StaticCredentialProvider,
};
use crate::Credential;
use async_trait::async_trait;
use authfetch_core::{
    Context, Error, FetchOptions, ProvideCredential, ProvideCredentialChain, Result,
};

/// DefaultCredentialProvider is a loader that will try to load credential via default chains.
///
/// Resolution order:
///
/// 1. `token` fetch option
/// 2. `HOMEBREW_GITLAB_API_TOKEN`
/// 3. `GITLAB_PRIVATE_TOKEN`
/// 4. `glab config get token`
/// 5. `GITLAB_TOKEN`
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<Credential>,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultCredentialProvider {
    /// Create a new `DefaultCredentialProvider` without an explicit token.
    pub fn new() -> Self {
        Self::from_options(&FetchOptions::default())
    }

    /// Create a `DefaultCredentialProvider` that consults `options` first.
    pub fn from_options(options: &FetchOptions) -> Self {
        let chain = ProvideCredentialChain::new()
            .push(StaticCredentialProvider::from_options(options))
            .push(EnvCredentialProvider::new(HOMEBREW_GITLAB_API_TOKEN))
            .push(EnvCredentialProvider::new(GITLAB_PRIVATE_TOKEN))
            .push(CliCredentialProvider::new())
            .push(EnvCredentialProvider::new(GITLAB_TOKEN));

        Self { chain }
    }

    /// Create with a custom credential chain.
    pub fn with_chain(chain: ProvideCredentialChain<Credential>) -> Self {
        Self { chain }
    }

    /// Resolve a credential or fail with `MissingCredentials`.
    pub async fn load(&self, ctx: &Context) -> Result<Credential> {
        self.provide_credential(ctx).await?.ok_or_else(|| {
            Error::missing_credentials(format!(
                "GitLab authentication required. Set {HOMEBREW_GITLAB_API_TOKEN}/{GITLAB_PRIVATE_TOKEN} or authenticate with 'glab auth login'."
            ))
            .with_context(format!("hint: {GITLAB_TOKEN} is also read when glab has no token"))
            .with_context("hint: or pass the token option")
        })
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
    }
}
