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

use crate::constants::{GH_PROGRAM, GH_TOKEN_ARGS};
use crate::Credential;
use async_trait::async_trait;
use authfetch_core::{Context, ProvideCredential, Result};
use log::debug;

/// CliCredentialProvider asks the GitHub CLI for the token of the logged-in user.
///
/// Runs `gh auth token`. A missing binary, a non-zero exit or empty output all mean
/// "not available".
#[derive(Debug, Default, Clone)]
pub struct CliCredentialProvider;

impl CliCredentialProvider {
    /// Create a new CliCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for CliCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let output = match ctx.command_execute(GH_PROGRAM, &GH_TOKEN_ARGS).await {
            Ok(output) => output,
            Err(err) => {
                debug!("github cli not available: {err}");
                return Ok(None);
            }
        };
        if !output.success() {
            debug!("github cli exited with status {}", output.status);
            return Ok(None);
        }

        let token = output.stdout_trimmed();
        if token.is_empty() {
            return Ok(None);
        }
        Ok(Some(Credential::new(token)))
    }
}
