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
use crate::Credential;
use async_trait::async_trait;
use authfetch_core::{AuthKind, Context, FetchOptions, ProvideCredential, Result};

/// StaticCredentialProvider provides the credential a caller passed in fetch options.
///
/// Pairs come from the options together or not at all: a username without a password
/// is no credential.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    kind: AuthKind,
    options: FetchOptions,
}

impl StaticCredentialProvider {
    /// Read the fields `kind` needs from `options`.
    pub fn from_options(kind: AuthKind, options: &FetchOptions) -> Self {
        Self {
            kind,
            options: options.clone(),
        }
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let non_empty = |v: &Option<String>| v.clone().filter(|v| !v.is_empty());
        let o = &self.options;

        let cred = match self.kind {
            AuthKind::Bearer => non_empty(&o.token).map(|token| Credential::Bearer { token }),
            AuthKind::Basic => match (non_empty(&o.username), non_empty(&o.password)) {
                (Some(username), Some(password)) => Some(Credential::Basic { username, password }),
                _ => None,
            },
            AuthKind::CustomHeader => match (non_empty(&o.header), non_empty(&o.header_value)) {
                (Some(name), Some(value)) => Some(Credential::Header { name, value }),
                _ => None,
            },
            AuthKind::ApiKey => non_empty(&o.api_key).map(|key| Credential::ApiKey {
                header: api_key_header(ctx, o.api_key_header.as_deref()),
                key,
            }),
            _ => None,
        };
        Ok(cred)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authfetch_core::StaticEnv;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_static_credentials() -> anyhow::Result<()> {
        let ctx = Context::new();
        let options = FetchOptions {
            token: Some("tok".to_string()),
            username: Some("alice".to_string()),
            header: Some("X-Auth".to_string()),
            header_value: Some("v".to_string()),
            api_key: Some("key".to_string()),
            ..Default::default()
        };

        let load = |kind| StaticCredentialProvider::from_options(kind, &options);
        assert_eq!(
            load(AuthKind::Bearer).provide_credential(&ctx).await?,
            Some(Credential::Bearer {
                token: "tok".to_string()
            })
        );
        // Password missing.
        assert_eq!(load(AuthKind::Basic).provide_credential(&ctx).await?, None);
        assert_eq!(
            load(AuthKind::CustomHeader).provide_credential(&ctx).await?,
            Some(Credential::Header {
                name: "X-Auth".to_string(),
                value: "v".to_string()
            })
        );
        assert_eq!(
            load(AuthKind::ApiKey).provide_credential(&ctx).await?,
            Some(Credential::ApiKey {
                header: "X-API-Key".to_string(),
                key: "key".to_string()
            })
        );
        assert_eq!(load(AuthKind::GitHubToken).provide_credential(&ctx).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_api_key_header_order() -> anyhow::Result<()> {
        let env = || StaticEnv::from_pairs([("HOMEBREW_API_KEY_HEADER", "X-Env-Key")]);
        let mut options = FetchOptions {
            api_key: Some("key".to_string()),
            ..Default::default()
        };

        let ctx = Context::new().with_env(env());
        let cred = StaticCredentialProvider::from_options(AuthKind::ApiKey, &options)
            .provide_credential(&ctx)
            .await?;
        assert!(matches!(cred, Some(Credential::ApiKey { ref header, .. }) if header == "X-Env-Key"));

        options.api_key_header = Some("X-Option-Key".to_string());
        let cred = StaticCredentialProvider::from_options(AuthKind::ApiKey, &options)
            .provide_credential(&ctx)
            .await?;
        assert!(matches!(cred, Some(Credential::ApiKey { ref header, .. }) if header == "X-Option-Key"));
        Ok(())
    }
}
