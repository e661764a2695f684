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

use crate::Credential;
use async_trait::async_trait;
use authfetch_core::{Context, ProvideCredential, Result};

/// EnvCredentialProvider loads the token from one environment variable.
///
/// The default chain uses one instance per variable so their order stays explicit.
#[derive(Debug, Clone)]
pub struct EnvCredentialProvider {
    key: &'static str,
}

impl EnvCredentialProvider {
    /// Read the token from `key`.
    pub fn new(key: &'static str) -> Self {
        Self { key }
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        Ok(ctx.env_var_non_empty(self.key).map(Credential::new))
    }
}
