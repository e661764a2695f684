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

use crate::constants::{AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY};
use crate::provide_credential::{
    EnvCredentialProvider, IMDSv2CredentialProvider, StaticCredentialProvider,
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
/// 1. `access_key`/`secret_key`/`session_token` fetch options
/// 2. Environment variables
/// 3. EC2 IMDSv2
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
    /// Create a new `DefaultCredentialProvider` without explicit keys.
    pub fn new() -> Self {
        Self::from_options(&FetchOptions::default())
    }

    /// Create a `DefaultCredentialProvider` that consults `options` first.
    pub fn from_options(options: &FetchOptions) -> Self {
        let chain = ProvideCredentialChain::new()
            .push(StaticCredentialProvider::from_options(options))
            .push(EnvCredentialProvider::new())
            .push(IMDSv2CredentialProvider::new());

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
                "AWS credentials required. Set {AWS_ACCESS_KEY_ID} and {AWS_SECRET_ACCESS_KEY} environment variables."
            ))
            .with_context("hint: or pass access_key and secret_key options")
            .with_context("hint: or provide a presigned_url / HOMEBREW_S3_PRESIGNED_URL")
            .with_context("hint: or run on an EC2 instance with an IAM role attached")
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

#[cfg(test)]
mod tests {
    use super::*;
    use authfetch_core::{ErrorKind, StaticEnv};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_credential_env_loader_without_env() {
        let _ = env_logger::builder().is_test(true).try_init();

        // No http client configured: the metadata probe fails and is skipped.
        let ctx = Context::new().with_env(StaticEnv::default());

        let l = DefaultCredentialProvider::new();
        let x = l.provide_credential(&ctx).await.expect("load must succeed");
        assert!(x.is_none());

        let err = l.load(&ctx).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingCredentials);
        assert!(err.message().contains("AWS_ACCESS_KEY_ID"));
        assert!(err.message().contains("AWS_SECRET_ACCESS_KEY"));
    }

    #[tokio::test]
    async fn test_credential_env_loader_with_env() {
        let _ = env_logger::builder().is_test(true).try_init();

        let ctx = Context::new().with_env(StaticEnv::from_pairs([
            (AWS_ACCESS_KEY_ID, "access_key_id"),
            (AWS_SECRET_ACCESS_KEY, "secret_access_key"),
        ]));

        let l = DefaultCredentialProvider::new();
        let x = l.load(&ctx).await.expect("load must succeed");
        assert_eq!("access_key_id", x.access_key_id);
        assert_eq!("secret_access_key", x.secret_access_key);
    }

    #[tokio::test]
    async fn test_options_beat_env() {
        let ctx = Context::new().with_env(StaticEnv::from_pairs([
            (AWS_ACCESS_KEY_ID, "env_access_key"),
            (AWS_SECRET_ACCESS_KEY, "env_secret_key"),
        ]));
        let options = FetchOptions {
            access_key: Some("opt_access_key".to_string()),
            secret_key: Some("opt_secret_key".to_string()),
            ..Default::default()
        };

        let x = DefaultCredentialProvider::from_options(&options)
            .load(&ctx)
            .await
            .expect("load must succeed");
        assert_eq!("opt_access_key", x.access_key_id);
        assert_eq!("opt_secret_key", x.secret_access_key);
    }
}
