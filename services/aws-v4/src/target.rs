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

use crate::constants::{AWS_DEFAULT_REGION, AWS_REGION, AWS_URI_ENCODE_SET, DEFAULT_REGION};
use authfetch_core::{Context, Error, FetchOptions, Result};
use once_cell::sync::Lazy;
use percent_encoding::{percent_decode_str, utf8_percent_encode};
use regex::Regex;

static S3_SCHEME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^s3://([^/]+)/(.+)$").expect("s3 scheme pattern must be valid")
});
static VIRTUAL_HOSTED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://([^./]+)\.s3(?:\.([^./]+))?\.amazonaws\.com/(.+)$")
        .expect("virtual hosted pattern must be valid")
});
static PATH_STYLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://s3(?:\.([^./]+))?\.amazonaws\.com/([^/]+)/(.+)$")
        .expect("path style pattern must be valid")
});
static CUSTOM_ENDPOINT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://([^/]+)/([^/]+)/(.+)$").expect("custom endpoint pattern must be valid")
});

/// How the bucket is addressed in the request URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressingStyle {
    /// `https://<bucket>.s3.<region>.amazonaws.com/<key>`, also used for `s3://` URLs.
    VirtualHosted,
    /// `https://s3.<region>.amazonaws.com/<bucket>/<key>`
    PathStyle,
    /// `https://<endpoint>/<bucket>/<key>` for S3-compatible services.
    CustomEndpoint(String),
}

/// S3Target is a parsed S3 object locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Target {
    bucket: String,
    key: String,
    region: Option<String>,
    style: AddressingStyle,
}

impl S3Target {
    /// Check whether `url` belongs to the S3 family.
    ///
    /// Custom endpoints are indistinguishable from any other https URL and are never claimed.
    pub fn claims(url: &str) -> bool {
        url.starts_with("s3://")
            || (url.starts_with("https://") && {
                let host = url["https://".len()..].split('/').next().unwrap_or_default();
                host.ends_with(".amazonaws.com")
                    && (host.starts_with("s3.") || host.contains(".s3."))
            })
    }

    /// Parse an `s3://`, virtual-hosted or path-style URL.
    pub fn parse(url: &str) -> Result<Self> {
        if let Some(c) = S3_SCHEME.captures(url) {
            return Ok(Self::build(&c[1], &c[2], None, AddressingStyle::VirtualHosted));
        }
        if let Some(c) = VIRTUAL_HOSTED.captures(url) {
            let region = c.get(2).map(|m| m.as_str());
            return Ok(Self::build(&c[1], &c[3], region, AddressingStyle::VirtualHosted));
        }
        if let Some(c) = PATH_STYLE.captures(url) {
            let region = c.get(1).map(|m| m.as_str());
            return Ok(Self::build(&c[2], &c[3], region, AddressingStyle::PathStyle));
        }

        Err(Error::invalid_locator(format!("invalid S3 URL: {url}")).with_context(
            "hint: use s3://bucket/key, https://bucket.s3.region.amazonaws.com/key or https://s3.region.amazonaws.com/bucket/key",
        ))
    }

    /// Parse `https://<endpoint>/<bucket>/<key>` for an S3-compatible service.
    ///
    /// Any AWS form is accepted as well, so an explicit S3 hint works for every shape.
    pub fn parse_custom_endpoint(url: &str) -> Result<Self> {
        if Self::claims(url) {
            return Self::parse(url);
        }
        let c = CUSTOM_ENDPOINT.captures(url).ok_or_else(|| {
            Error::invalid_locator(format!("invalid S3 URL: {url}"))
                .with_context("hint: custom endpoints must look like https://host/bucket/key")
        })?;
        Ok(Self::build(
            &c[2],
            &c[3],
            None,
            AddressingStyle::CustomEndpoint(c[1].to_string()),
        ))
    }

    fn build(bucket: &str, key: &str, region: Option<&str>, style: AddressingStyle) -> Self {
        // Keys are kept decoded and encoded once when the URL is rebuilt.
        let key = percent_decode_str(key).decode_utf8_lossy().into_owned();
        Self {
            bucket: bucket.to_string(),
            key,
            region: region.map(str::to_string),
            style,
        }
    }

    /// Bucket name.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Object key, decoded.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Region named by the URL itself.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Addressing style.
    pub fn style(&self) -> &AddressingStyle {
        &self.style
    }

    /// Resolve the effective region: URL, then option, then `AWS_REGION`,
    /// then `AWS_DEFAULT_REGION`, then `us-east-1`.
    pub fn resolve_region(&self, ctx: &Context, options: &FetchOptions) -> String {
        self.region
            .clone()
            .or_else(|| options.region.clone().filter(|v| !v.is_empty()))
            .or_else(|| ctx.env_var_non_empty(AWS_REGION))
            .or_else(|| ctx.env_var_non_empty(AWS_DEFAULT_REGION))
            .unwrap_or_else(|| DEFAULT_REGION.to_string())
    }

    /// The https URL to request in `region`.
    pub fn url(&self, region: &str) -> String {
        let key = utf8_percent_encode(&self.key, &AWS_URI_ENCODE_SET);
        match &self.style {
            AddressingStyle::VirtualHosted => {
                format!("https://{}.s3.{region}.amazonaws.com/{key}", self.bucket)
            }
            AddressingStyle::PathStyle => {
                format!("https://s3.{region}.amazonaws.com/{}/{key}", self.bucket)
            }
            AddressingStyle::CustomEndpoint(endpoint) => {
                format!("https://{endpoint}/{}/{key}", self.bucket)
            }
        }
    }
}
