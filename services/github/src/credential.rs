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

use authfetch_core::utils::Redact;
use authfetch_core::SigningCredential;
use std::fmt::{Debug, Formatter};

/// Credential holds a GitHub token, sent as `Authorization: token <token>`.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Credential {
    /// Personal access token, fine-grained token or `gh` OAuth token.
    pub token: String,
}

impl Credential {
    /// Create a credential from a token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// The `Authorization` header value.
    pub fn authorization(&self) -> String {
        format!("token {}", self.token)
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("token", &Redact::from(&self.token))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.token.trim().is_empty()
    }
}
