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

use super::api_key_header;
use crate::constants::*;
use crate::Credential;
use async_trait::async_trait;
use authfetch_core::{AuthKind, Context, ProvideCredential, Result};

/// EnvCredentialProvider loads a generic credential from `HOMEBREW_*` environment variables.
///
/// - Bearer: `HOMEBREW_BEARER_TOKEN`
/// - Basic: `HOMEBREW_AUTH_USER` and `HOMEBREW_AUTH_PASSWORD`
/// - CustomHeader: `HOMEBREW_AUTH_HEADER` and `HOMEBREW_AUTH_VALUE`
/// - ApiKey: `HOMEBREW_API_KEY`
#[derive(Debug, Clone)]
pub struct EnvCredentialProvider {
    kind: AuthKind,
    api_key_header: Option<String>,
}

impl EnvCredentialProvider {
    /// Create a provider for `kind`.
    pub fn new(kind: AuthKind) -> Self {
        Self {
            kind,
            api_key_header: None,
        }
    }

    /// Header name for API keys, taking precedence over `HOMEBREW_API_KEY_HEADER`.
    pub fn with_api_key_header(mut self, header: Option<String>) -> Self {
        self.api_key_header = header;
        self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let pair = |a: &str, b: &str| ctx.env_var_non_empty(a).zip(ctx.env_var_non_empty(b));

        let cred = match self.kind {
            AuthKind::Bearer => ctx
                .env_var_non_empty(HOMEBREW_BEARER_TOKEN)
                .map(|token| Credential::Bearer { token }),
            AuthKind::Basic => pair(HOMEBREW_AUTH_USER, HOMEBREW_AUTH_PASSWORD)
                .map(|(username, password)| Credential::Basic { username, password }),
            AuthKind::CustomHeader => pair(HOMEBREW_AUTH_HEADER, HOMEBREW_AUTH_VALUE)
                .map(|(name, value)| Credential::Header { name, value }),
            AuthKind::ApiKey => ctx
                .env_var_non_empty(HOMEBREW_API_KEY)
                .map(|key| Credential::ApiKey {
                    header: api_key_header(ctx, self.api_key_header.as_deref()),
                    key,
                }),
            _ => None,
        };
        Ok(cred)
    }
}
