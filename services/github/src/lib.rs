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

//! GitHub support for authfetch.
//!
//! Two locator families are handled here:
//!
//! - raw files: `https://raw.githubusercontent.com/<owner>/<repo>/<ref>/<path>`
//! - release assets: tagged, `latest` and asset-id URLs
//!
//! Both send `Authorization: token <token>` with a token resolved by
//! [`DefaultCredentialProvider`]: the `token` option, then `HOMEBREW_GITHUB_API_TOKEN`,
//! then `gh auth token`.
//!
//! ```no_run
//! use authfetch_core::{Context, FetchOptions, Result};
//! use authfetch_github::{build_release_request, DefaultCredentialProvider, ReleaseTarget};
//!
//! # async fn example(ctx: Context) -> Result<()> {
//! let target = ReleaseTarget::parse(
//!     "https://github.com/acme/tools/releases/latest/download/tool.tar.gz",
//! )?;
//! let cred = DefaultCredentialProvider::from_options(&FetchOptions::default())
//!     .load(&ctx)
//!     .await?;
//! let req = build_release_request(&ctx, &target, &cred).await?;
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::HOMEBREW_GITHUB_API_TOKEN;

mod credential;
pub use credential::Credential;

mod target;
pub use target::{RawTarget, ReleaseAsset, ReleaseTarget};

mod build_request;
pub use build_request::{build_raw_request, build_release_request, resolve_latest_tag};

mod provide_credential;
pub use provide_credential::*;
