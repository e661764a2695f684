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

//! AWS S3 support for authfetch.
//!
//! This crate parses S3 locators, resolves AWS credentials and signs GET requests with
//! [Signature Version 4](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html).
//!
//! ## Example
//!
//! ```no_run
//! use authfetch_aws_v4::{build_signed_request, DefaultCredentialProvider, S3Target};
//! use authfetch_core::{time::now, Context, FetchOptions, OsEnv, Result};
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new().with_env(OsEnv);
//! let options = FetchOptions::default();
//!
//! let target = S3Target::parse("s3://my-bucket/releases/tool.tar.gz")?;
//! let region = target.resolve_region(&ctx, &options);
//! let cred = DefaultCredentialProvider::from_options(&options).load(&ctx).await?;
//!
//! let req = build_signed_request(&target, &region, &cred, now())?;
//! println!("GET {}", req.url);
//! # Ok(())
//! # }
//! ```
//!
//! ## Credential sources
//!
//! [`DefaultCredentialProvider`] tries, in order:
//!
//! 1. The `access_key`/`secret_key`/`session_token` options
//! 2. `AWS_ACCESS_KEY_ID`/`AWS_SECRET_ACCESS_KEY`/`AWS_SESSION_TOKEN`
//! 3. EC2 instance metadata (IMDSv2)

mod constants;
pub use constants::{
    AWS_ACCESS_KEY_ID, AWS_DEFAULT_REGION, AWS_REGION, AWS_SECRET_ACCESS_KEY, AWS_SESSION_TOKEN,
    DEFAULT_REGION, HOMEBREW_S3_PRESIGNED_URL, UNSIGNED_PAYLOAD,
};

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::{generate_signing_key, sign, CanonicalRequest, SignedHeaders};

mod target;
pub use target::{AddressingStyle, S3Target};

mod build_request;
pub use build_request::{
    build_presigned_request, build_public_request, build_signed_request, presigned_url,
};

mod provide_credential;
pub use provide_credential::*;
