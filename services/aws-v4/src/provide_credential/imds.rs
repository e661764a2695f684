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

use crate::constants::{
    AWS_EC2_METADATA_DISABLED, AWS_EC2_METADATA_SERVICE_ENDPOINT, DEFAULT_IMDS_ENDPOINT,
};
use crate::Credential;
use async_trait::async_trait;
use authfetch_core::time::parse_rfc3339;
use authfetch_core::{Context, Error, ProvideCredential, RequestTimeout, Result};
use bytes::Bytes;
use http::header::CONTENT_LENGTH;
use http::{Method, StatusCode};
use log::{debug, warn};
use serde::Deserialize;
use std::time::Duration;

/// Probes against the metadata service must fail fast off EC2.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// IMDSv2CredentialProvider loads temporary credentials from the EC2 instance metadata service.
///
/// An unreachable or refusing metadata service means "not on EC2" and yields `Ok(None)`.
/// A reachable service that returns malformed credentials is a hard error.
#[derive(Debug, Clone, Default)]
pub struct IMDSv2CredentialProvider {
    endpoint: Option<String>,
    timeout: Option<Duration>,
}

impl IMDSv2CredentialProvider {
    /// Create a new `IMDSv2CredentialProvider` instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the endpoint for the metadata service.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the timeout for metadata requests.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn get_endpoint(&self, ctx: &Context) -> String {
        // First check configured endpoint, then environment, then default
        self.endpoint
            .clone()
            .or_else(|| ctx.env_var_non_empty(AWS_EC2_METADATA_SERVICE_ENDPOINT))
            .unwrap_or_else(|| DEFAULT_IMDS_ENDPOINT.to_string())
            .trim_end_matches('/')
            .to_string()
    }

    fn request(&self, method: Method, url: &str) -> Result<http::Request<Bytes>> {
        let mut req = http::Request::builder()
            .method(method)
            .uri(url)
            .body(Bytes::new())
            .map_err(|e| {
                Error::request_invalid("failed to build IMDS request")
                    .with_source(e)
                    .with_context(format!("url: {url}"))
            })?;
        req.extensions_mut()
            .insert(RequestTimeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT)));
        Ok(req)
    }

    /// Send a probe, mapping transport failures to `None`.
    async fn probe(&self, ctx: &Context, req: http::Request<Bytes>) -> Option<http::Response<String>> {
        let url = req.uri().to_string();
        match ctx.http_send_as_string(req).await {
            Ok(resp) => Some(resp),
            Err(err) => {
                debug!("instance metadata service not reachable at {url}: {err}");
                None
            }
        }
    }
}

#[async_trait]
impl ProvideCredential for IMDSv2CredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let disabled = ctx
            .env_var(AWS_EC2_METADATA_DISABLED)
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        if disabled {
            debug!("instance metadata service disabled by {AWS_EC2_METADATA_DISABLED}");
            return Ok(None);
        }

        let endpoint = self.get_endpoint(ctx);

        // Fetch a session token first.
        let mut req = self.request(Method::PUT, &format!("{endpoint}/latest/api/token"))?;
        req.headers_mut()
            .insert(CONTENT_LENGTH, http::HeaderValue::from_static("0"));
        // 21600s (6h) is recommended by AWS.
        req.headers_mut().insert(
            "x-aws-ec2-metadata-token-ttl-seconds",
            http::HeaderValue::from_static("21600"),
        );
        let Some(resp) = self.probe(ctx, req).await else {
            return Ok(None);
        };
        if resp.status() != StatusCode::OK {
            warn!(
                "instance metadata service refused a session token with status {}",
                resp.status()
            );
            return Ok(None);
        }
        let Ok(token) = http::HeaderValue::from_str(resp.body().trim()) else {
            debug!("instance metadata service returned a malformed session token");
            return Ok(None);
        };

        // List the role attached to this instance.
        let url = format!("{endpoint}/latest/meta-data/iam/security-credentials/");
        let mut req = self.request(Method::GET, &url)?;
        req.headers_mut()
            .insert("x-aws-ec2-metadata-token", token.clone());
        let Some(resp) = self.probe(ctx, req).await else {
            return Ok(None);
        };
        if resp.status() != StatusCode::OK {
            debug!("no IAM role attached to instance: status {}", resp.status());
            return Ok(None);
        }
        let Some(role) = resp
            .body()
            .lines()
            .map(str::trim)
            .find(|v| !v.is_empty())
            .map(str::to_string)
        else {
            debug!("no IAM role attached to instance");
            return Ok(None);
        };

        // Get the credentials via role name.
        let url = format!("{endpoint}/latest/meta-data/iam/security-credentials/{role}");
        let mut req = self.request(Method::GET, &url)?;
        req.headers_mut()
            .insert("x-aws-ec2-metadata-token", token.clone());
        let resp = ctx.http_send_as_string(req).await.map_err(|e| {
            Error::upstream_api("failed to fetch instance credentials")
                .with_source(e)
                .with_context(format!("role: {role}"))
        })?;
        if resp.status() != StatusCode::OK {
            return Err(Error::upstream_api(format!(
                "instance metadata service returned {} for role credentials",
                resp.status()
            ))
            .with_context(format!("role: {role}"))
            .with_context(format!("body: {}", resp.body())));
        }

        let content = resp.into_body();
        let creds: Ec2MetadataIamSecurityCredentials =
            serde_json::from_str(&content).map_err(|e| {
                Error::upstream_api("failed to parse instance credentials response")
                    .with_source(e)
                    .with_context(format!("role: {role}"))
                    .with_context(format!("body: {content}"))
            })?;

        if creds.code != "Success" {
            return Err(Error::upstream_api(format!(
                "instance metadata service returned error: [{}] {}",
                creds.code, creds.message
            ))
            .with_context(format!("role: {role}")));
        }

        let expires_in = if creds.expiration.is_empty() {
            None
        } else {
            Some(parse_rfc3339(&creds.expiration).map_err(|e| {
                Error::upstream_api("failed to parse instance credential expiration time")
                    .with_source(e)
                    .with_context(format!("expiration_value: {}", creds.expiration))
            })?)
        };

        debug!("loaded temporary credentials for role {role} from instance metadata");
        Ok(Some(Credential {
            access_key_id: creds.access_key_id,
            secret_access_key: creds.secret_access_key,
            session_token: Some(creds.token).filter(|v| !v.is_empty()),
            expires_in,
        }))
    }
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct Ec2MetadataIamSecurityCredentials {
    access_key_id: String,
    secret_access_key: String,
    token: String,
    expiration: String,

    code: String,
    message: String,
}
