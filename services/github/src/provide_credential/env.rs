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

use crate::constants::HOMEBREW_GITHUB_API_TOKEN;
use crate::Credential;
use async_trait::async_trait;
use authfetch_core::{Context, ProvideCredential, Result};

/// EnvCredentialProvider loads the token from `HOMEBREW_GITHUB_API_TOKEN`.
#[derive(Debug, Default, Clone)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        Ok(ctx
            .env_var_non_empty(HOMEBREW_GITHUB_API_TOKEN)
            .map(Credential::new))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authfetch_core::StaticEnv;

    #[tokio::test]
    async fn test_env_credential_provider() -> anyhow::Result<()> {
        let ctx = Context::new().with_env(StaticEnv::from_pairs([(
            HOMEBREW_GITHUB_API_TOKEN,
            "ghp_env",
        )]));
        let cred = EnvCredentialProvider::new().provide_credential(&ctx).await?;
        assert_eq!(cred, Some(Credential::new("ghp_env")));

        let ctx = Context::new().with_env(StaticEnv::from_pairs([(HOMEBREW_GITHUB_API_TOKEN, "")]));
        assert!(EnvCredentialProvider::new()
            .provide_credential(&ctx)
            .await?
            .is_none());
        Ok(())
    }
}
