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

//! Generic authenticated downloads for authfetch.
//!
//! Any https URL can be fetched with one of four credential shapes: bearer token, basic
//! auth, API key header or a custom header. The kind is declared through the `auth_type`
//! option or detected from the signals present, in the order Bearer, ApiKey, Basic,
//! CustomHeader.
//!
//! ```no_run
//! use authfetch_core::{Context, FetchOptions, Result};
//! use authfetch_generic::{build_request, DefaultCredentialProvider, Target};
//!
//! # async fn example(ctx: Context, options: FetchOptions) -> Result<()> {
//! let target = Target::parse("https://artifacts.example.com/tool.tar.gz")?;
//! let cred = DefaultCredentialProvider::from_options(&ctx, &options)?
//!     .load(&ctx)
//!     .await?;
//! let req = build_request(&target, &cred, &options.headers)?;
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::{
    DEFAULT_API_KEY_HEADER, HOMEBREW_API_KEY, HOMEBREW_API_KEY_HEADER, HOMEBREW_AUTH_HEADER,
    HOMEBREW_AUTH_PASSWORD, HOMEBREW_AUTH_USER, HOMEBREW_AUTH_VALUE, HOMEBREW_BEARER_TOKEN,
};

mod credential;
pub use credential::Credential;

mod target;
pub use target::Target;

mod build_request;
pub use build_request::build_request;

mod provide_credential;
pub use provide_credential::*;
