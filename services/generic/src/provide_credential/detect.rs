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
use authfetch_core::{AuthKind, Context, Error, FetchOptions, Result};
use log::debug;

/// Infer the auth kind from the signals present in options and environment.
///
/// Priority: Bearer, ApiKey, Basic (both parts), CustomHeader.
pub fn detect_auth_kind(ctx: &Context, options: &FetchOptions) -> Result<AuthKind> {
    let set = |option: &Option<String>, key: &str| {
        option.as_deref().is_some_and(|v| !v.is_empty()) || ctx.env_var_non_empty(key).is_some()
    };

    let kind = if set(&options.token, HOMEBREW_BEARER_TOKEN) {
        AuthKind::Bearer
    } else if set(&options.api_key, HOMEBREW_API_KEY) {
        AuthKind::ApiKey
    } else if set(&options.username, HOMEBREW_AUTH_USER)
        && set(&options.password, HOMEBREW_AUTH_PASSWORD)
    {
        AuthKind::Basic
    } else if set(&options.header, HOMEBREW_AUTH_HEADER) {
        AuthKind::CustomHeader
    } else {
        return Err(Error::unknown_auth_kind(
            "Could not detect authentication type. Please set auth_type.",
        )
        .with_context(format!(
            "hint: set one of {HOMEBREW_BEARER_TOKEN}, {HOMEBREW_API_KEY}, {HOMEBREW_AUTH_USER}/{HOMEBREW_AUTH_PASSWORD} or {HOMEBREW_AUTH_HEADER}"
        )));
    };

    debug!("detected auth kind {kind}");
    Ok(kind)
}
