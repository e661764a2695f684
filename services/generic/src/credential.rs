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
use authfetch_core::{AuthKind, SigningCredential};
use std::fmt::{Debug, Formatter};

/// Credential is one of the four generic authentication shapes.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// Sent as `Authorization: Bearer <token>`.
    Bearer {
        /// Bearer token.
        token: String,
    },
    /// Sent through the basic auth parameter of the transfer.
    Basic {
        /// Username.
        username: String,
        /// Password.
        password: String,
    },
    /// Sent as `<name>: <value>`.
    Header {
        /// Header name.
        name: String,
        /// Header value.
        value: String,
    },
    /// Sent as `<header>: <key>`.
    ApiKey {
        /// Header name, `X-API-Key` unless configured.
        header: String,
        /// API key.
        key: String,
    },
}

impl Credential {
    /// The auth kind this credential satisfies.
    pub fn kind(&self) -> AuthKind {
        match self {
            Credential::Bearer { .. } => AuthKind::Bearer,
            Credential::Basic { .. } => AuthKind::Basic,
            Credential::Header { .. } => AuthKind::CustomHeader,
            Credential::ApiKey { .. } => AuthKind::ApiKey,
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::Bearer { token } => f
                .debug_struct("Bearer")
                .field("token", &Redact::from(token))
                .finish(),
            Credential::Basic { username, password } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &Redact::from(password))
                .finish(),
            Credential::Header { name, value } => f
                .debug_struct("Header")
                .field("name", name)
                .field("value", &Redact::from(value))
                .finish(),
            Credential::ApiKey { header, key } => f
                .debug_struct("ApiKey")
                .field("header", header)
                .field("key", &Redact::from(key))
                .finish(),
        }
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        match self {
            Credential::Bearer { token } => !token.is_empty(),
            Credential::Basic { username, password } => !username.is_empty() && !password.is_empty(),
            Credential::Header { name, value } => !name.is_empty() && !value.is_empty(),
            Credential::ApiKey { header, key } => !header.is_empty() && !key.is_empty(),
        }
    }
}
