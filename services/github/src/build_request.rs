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

use crate::constants::{ACCEPT_GITHUB_V3_JSON, ACCEPT_OCTET_STREAM};
use crate::{Credential, RawTarget, ReleaseAsset, ReleaseTarget};
use authfetch_core::{AuthenticatedRequest, Context, Error, Result};
use bytes::Bytes;
use http::header::{ACCEPT, AUTHORIZATION};
use http::{Method, StatusCode};
use log::debug;
use serde::Deserialize;

/// Build the request for a raw file.
pub fn build_raw_request(target: &RawTarget, cred: &Credential) -> Result<AuthenticatedRequest> {
    AuthenticatedRequest::get(target.url())
        .sensitive_header(AUTHORIZATION.as_str(), &cred.authorization())
}

/// Build the request for a release asset.
///
/// `latest` URLs are resolved to a concrete tag first, which costs one API call.
pub async fn build_release_request(
    ctx: &Context,
    target: &ReleaseTarget,
    cred: &Credential,
) -> Result<AuthenticatedRequest> {
    match &target.asset {
        ReleaseAsset::Tagged { tag, file } => AuthenticatedRequest::get(target.download_url(tag, file))
            .sensitive_header(AUTHORIZATION.as_str(), &cred.authorization()),
        ReleaseAsset::Latest { file } => {
            let tag = resolve_latest_tag(ctx, target, cred).await?;
            AuthenticatedRequest::get(target.download_url(&tag, file))
                .sensitive_header(AUTHORIZATION.as_str(), &cred.authorization())
        }
        ReleaseAsset::AssetId(id) => AuthenticatedRequest::get(target.asset_url(*id))
            .sensitive_header(AUTHORIZATION.as_str(), &cred.authorization())?
            .header(ACCEPT.as_str(), ACCEPT_OCTET_STREAM),
    }
}

#[derive(Debug, Deserialize)]
struct LatestRelease {
    tag_name: Option<String>,
}

/// Ask the API for the tag of the latest release.
///
/// The tag is substituted verbatim into the download URL.
pub async fn resolve_latest_tag(
    ctx: &Context,
    target: &ReleaseTarget,
    cred: &Credential,
) -> Result<String> {
    let url = target.latest_release_url();
    let mut req = http::Request::builder()
        .method(Method::GET)
        .uri(&url)
        .header(ACCEPT, ACCEPT_GITHUB_V3_JSON)
        .body(Bytes::new())?;
    let mut auth: http::HeaderValue = cred.authorization().parse()?;
    auth.set_sensitive(true);
    req.headers_mut().insert(AUTHORIZATION, auth);

    let resp = ctx.http_send_as_string(req).await?;
    let status = resp.status();
    let body = resp.into_body();
    if status != StatusCode::OK {
        return Err(Error::upstream_api(format!(
            "GitHub API returned {status} for the latest release of {}/{}",
            target.owner, target.repo
        ))
        .with_context(format!("url: {url}"))
        .with_context(format!("body: {body}")));
    }

    let release: LatestRelease = serde_json::from_str(&body).map_err(|e| {
        Error::upstream_api("failed to parse GitHub latest release response")
            .with_source(e)
            .with_context(format!("url: {url}"))
            .with_context(format!("body: {body}"))
    })?;
    let tag = release.tag_name.filter(|v| !v.is_empty()).ok_or_else(|| {
        Error::upstream_api("GitHub latest release response has no tag_name")
            .with_context(format!("url: {url}"))
            .with_context(format!("body: {body}"))
    })?;

    debug!("resolved latest release of {}/{} to {tag}", target.owner, target.repo);
    Ok(tag)
}
