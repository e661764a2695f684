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

mod default;
pub use default::DefaultCredentialProvider;

mod detect;
pub use detect::detect_auth_kind;

mod env;
pub use env::EnvCredentialProvider;

mod r#static;
pub use r#static::StaticCredentialProvider;

use crate::constants::{DEFAULT_API_KEY_HEADER, HOMEBREW_API_KEY_HEADER};
use authfetch_core::Context;

/// Header carrying the API key: explicit name, then `HOMEBREW_API_KEY_HEADER`, then `X-API-Key`.
fn api_key_header(ctx: &Context, explicit: Option<&str>) -> String {
    explicit
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| ctx.env_var_non_empty(HOMEBREW_API_KEY_HEADER))
        .unwrap_or_else(|| DEFAULT_API_KEY_HEADER.to_string())
}
