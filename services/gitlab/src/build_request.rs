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

use crate::constants::PRIVATE_TOKEN;
use crate::{Credential, RawTarget, ReleaseTarget};
use authfetch_core::{AuthenticatedRequest, Context, Error, Result};
use bytes::Bytes;
use http::{HeaderName, HeaderValue, Method, StatusCode};
use log::debug;
use serde::Deserialize;

/// Build the files API request for a raw file.
pub fn build_raw_request(target: &RawTarget, cred: &Credential) -> Result<AuthenticatedRequest> {
    AuthenticatedRequest::get(target.url()).sensitive_header(PRIVATE_TOKEN, &cred.token)
}

/// Build the request for a release asset.
///
/// The asset link is looked up through the releases API first.
pub async fn build_release_request(
    ctx: &Context,
    target: &ReleaseTarget,
    cred: &Credential,
) -> Result<AuthenticatedRequest> {
    let url = find_release_asset(ctx, target, cred).await?;
    AuthenticatedRequest::get(url).sensitive_header(PRIVATE_TOKEN, &cred.token)
}

#[derive(Debug, Deserialize)]
struct Release {
    #[serde(default)]
    assets: ReleaseAssets,
}

#[derive(Debug, Default, Deserialize)]
struct ReleaseAssets {
    #[serde(default)]
    links: Vec<ReleaseLink>,
}

#[derive(Debug, Deserialize)]
struct ReleaseLink {
    #[serde(default)]
    name: String,
    #[serde(default)]
    url: String,
}

/// Return the URL of the first asset link named `target.file`, or whose URL ends with it.
///
/// Links are checked in the order the API lists them.
pub async fn find_release_asset(
    ctx: &Context,
    target: &ReleaseTarget,
    cred: &Credential,
) -> Result<String> {
    let url = target.release_api_url();
    let mut req = http::Request::builder()
        .method(Method::GET)
        .uri(&url)
        .body(Bytes::new())?;
    let mut token: HeaderValue = cred.token.parse()?;
    token.set_sensitive(true);
    req.headers_mut()
        .insert(HeaderName::from_bytes(PRIVATE_TOKEN.as_bytes())?, token);

    let resp = ctx.http_send_as_string(req).await?;
    let status = resp.status();
    let body = resp.into_body();
    if status != StatusCode::OK {
        return Err(Error::upstream_api(format!(
            "GitLab API returned {status} for release {} of {}",
            target.tag, target.project
        ))
        .with_context(format!("url: {url}"))
        .with_context(format!("body: {body}")));
    }

    let release: Release = serde_json::from_str(&body).map_err(|e| {
        Error::upstream_api("failed to parse GitLab release response")
            .with_source(e)
            .with_context(format!("url: {url}"))
            .with_context(format!("body: {body}"))
    })?;

    let link = release
        .assets
        .links
        .into_iter()
        .find(|link| link.name == target.file || link.url.ends_with(&target.file))
        .ok_or_else(|| {
            Error::asset_not_found(format!(
                "Asset {} not found in release {}",
                target.file, target.tag
            ))
            .with_context(format!("url: {url}"))
        })?;

    debug!(
        "resolved asset {} of release {} to {}",
        target.file, target.tag, link.url
    );
    Ok(link.url)
}
