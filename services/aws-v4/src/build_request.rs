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

use crate::constants::HOMEBREW_S3_PRESIGNED_URL;
use crate::{sign, CanonicalRequest, Credential, S3Target};
use authfetch_core::time::DateTime;
use authfetch_core::{AuthenticatedRequest, Context, FetchOptions, Result};
use log::debug;

/// Presigned URL from the `presigned_url` option or `HOMEBREW_S3_PRESIGNED_URL`.
pub fn presigned_url(ctx: &Context, options: &FetchOptions) -> Option<String> {
    options
        .presigned_url
        .clone()
        .filter(|v| !v.is_empty())
        .or_else(|| ctx.env_var_non_empty(HOMEBREW_S3_PRESIGNED_URL))
}

/// A plain GET of a presigned URL. It carries its own authentication.
pub fn build_presigned_request(url: &str) -> AuthenticatedRequest {
    AuthenticatedRequest::get(url)
}

/// A GET of `target` in `region` signed with `cred` at `time`.
pub fn build_signed_request(
    target: &S3Target,
    region: &str,
    cred: &Credential,
    time: DateTime,
) -> Result<AuthenticatedRequest> {
    let url = target.url(region);
    let creq = CanonicalRequest::get(&url, region, time)?;
    debug!(
        "signing s3 request for bucket {} in {region} with scope {}",
        target.bucket(),
        creq.scope()
    );

    sign(&creq, cred).apply(AuthenticatedRequest::get(url))
}

/// An unsigned GET of `target` for public buckets.
pub fn build_public_request(target: &S3Target, region: &str) -> AuthenticatedRequest {
    AuthenticatedRequest::get(target.url(region))
}
