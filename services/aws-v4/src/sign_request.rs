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
    AWS_QUERY_ENCODE_SET, AWS_URI_ENCODE_SET, S3_SERVICE, UNSIGNED_PAYLOAD,
    X_AMZ_CONTENT_SHA_256, X_AMZ_DATE, X_AMZ_SECURITY_TOKEN,
};
use crate::Credential;
use authfetch_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use authfetch_core::time::{format_date, format_iso8601, DateTime};
use authfetch_core::utils::Redact;
use authfetch_core::{AuthenticatedRequest, Error, Result};
use http::{header, Method, Uri};
use log::debug;
use percent_encoding::{percent_decode_str, utf8_percent_encode};
use std::collections::BTreeMap;
use std::fmt::{self, Debug, Formatter};

/// CanonicalRequest carries every input of a SigV4 signature.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
///
/// The host header is always taken from the request URL so that the signed host and the
/// host the transport connects to can never disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    method: Method,
    uri: String,
    query: Vec<(String, String)>,
    headers: BTreeMap<String, String>,
    payload_hash: String,
    time: DateTime,
    region: String,
    service: String,
}

impl CanonicalRequest {
    /// Build the canonical form of a GET for `url`.
    pub fn get(url: &str, region: &str, time: DateTime) -> Result<Self> {
        Self::new(Method::GET, url, region, time)
    }

    /// Build the canonical form of a request.
    pub fn new(method: Method, url: &str, region: &str, time: DateTime) -> Result<Self> {
        let uri: Uri = url.parse().map_err(|e| {
            Error::request_invalid(format!("failed to parse url for signing: {url}"))
                .with_source(anyhow::Error::from(e))
        })?;
        let authority = uri.authority().ok_or_else(|| {
            Error::request_invalid(format!("url has no host to sign: {url}"))
        })?;

        let mut headers = BTreeMap::new();
        headers.insert(header::HOST.to_string(), authority.as_str().to_string());

        Ok(Self {
            method,
            uri: canonical_uri(uri.path())?,
            query: canonical_query(uri.query())?,
            headers,
            payload_hash: UNSIGNED_PAYLOAD.to_string(),
            time,
            region: region.to_string(),
            service: S3_SERVICE.to_string(),
        })
    }

    /// Use another service name in the credential scope.
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = service.into();
        self
    }

    /// Use a computed payload hash instead of `UNSIGNED-PAYLOAD`.
    pub fn with_payload_hash(mut self, hash: impl Into<String>) -> Self {
        self.payload_hash = hash.into();
        self
    }

    /// Add a header that must be covered by the signature.
    ///
    /// The caller is responsible for also sending it.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .insert(name.to_ascii_lowercase(), normalize_header_value(value));
        self
    }

    /// Request method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Canonical, URI-encoded path.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Host the signature is bound to.
    pub fn host(&self) -> &str {
        self.headers
            .get(header::HOST.as_str())
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Payload hash.
    pub fn payload_hash(&self) -> &str {
        &self.payload_hash
    }

    /// Signing time.
    pub fn time(&self) -> DateTime {
        self.time
    }

    /// Region in the credential scope.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Credential scope: `<date>/<region>/<service>/aws4_request`.
    pub fn scope(&self) -> String {
        format!(
            "{}/{}/{}/aws4_request",
            format_date(self.time),
            self.region,
            self.service
        )
    }

    /// The canonical request text signed for `cred`.
    pub fn canonical_string(&self, cred: &Credential) -> String {
        canonical_request_string(self, &self.signed_header_values(cred))
    }

    /// The string to sign for `cred`.
    pub fn string_to_sign(&self, cred: &Credential) -> String {
        let creq = self.canonical_string(cred);
        string_to_sign(self, &creq)
    }

    fn signed_header_values(&self, cred: &Credential) -> BTreeMap<String, String> {
        let mut headers = self.headers.clone();
        headers.insert(X_AMZ_DATE.to_string(), format_iso8601(self.time));
        headers.insert(X_AMZ_CONTENT_SHA_256.to_string(), self.payload_hash.clone());
        if let Some(token) = &cred.session_token {
            headers.insert(X_AMZ_SECURITY_TOKEN.to_string(), token.trim().to_string());
        }
        headers
    }
}

/// SignedHeaders is the result of [`sign`]: the headers an S3 GET must carry.
///
/// Identical inputs always produce identical values.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// `AWS4-HMAC-SHA256 Credential=..., SignedHeaders=..., Signature=...`
    pub authorization: String,
    /// `YYYYMMDDTHHMMSSZ`
    pub x_amz_date: String,
    /// Payload hash, `UNSIGNED-PAYLOAD` for downloads.
    pub x_amz_content_sha256: String,
    /// Session token of temporary credentials.
    pub x_amz_security_token: Option<String>,
}

impl SignedHeaders {
    /// Attach these headers to `req`.
    ///
    /// Extra headers added through [`CanonicalRequest::with_header`] are not included.
    pub fn apply(&self, req: AuthenticatedRequest) -> Result<AuthenticatedRequest> {
        let mut req = req
            .sensitive_header(header::AUTHORIZATION.as_str(), &self.authorization)?
            .header(X_AMZ_DATE, &self.x_amz_date)?
            .header(X_AMZ_CONTENT_SHA_256, &self.x_amz_content_sha256)?;
        if let Some(token) = &self.x_amz_security_token {
            req = req.sensitive_header(X_AMZ_SECURITY_TOKEN, token)?;
        }
        Ok(req)
    }
}

impl Debug for SignedHeaders {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedHeaders")
            .field("authorization", &self.authorization)
            .field("x_amz_date", &self.x_amz_date)
            .field("x_amz_content_sha256", &self.x_amz_content_sha256)
            .field(
                "x_amz_security_token",
                &Redact::from(&self.x_amz_security_token),
            )
            .finish()
    }
}

/// Sign `req` with `cred`.
///
/// This function performs no I/O and never reads the clock; the time is part of `req`.
pub fn sign(req: &CanonicalRequest, cred: &Credential) -> SignedHeaders {
    let headers = req.signed_header_values(cred);
    let creq = canonical_request_string(req, &headers);
    let string_to_sign = string_to_sign(req, &creq);
    debug!("calculated string to sign: {string_to_sign}");

    let signing_key =
        generate_signing_key(&cred.secret_access_key, req.time, &req.region, &req.service);
    let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes());

    let authorization = format!(
        "AWS4-HMAC-SHA256 Credential={}/{}, SignedHeaders={}, Signature={}",
        cred.access_key_id,
        req.scope(),
        signed_header_names(&headers),
        signature
    );

    SignedHeaders {
        authorization,
        x_amz_date: format_iso8601(req.time),
        x_amz_content_sha256: req.payload_hash.clone(),
        x_amz_security_token: cred.session_token.as_ref().map(|v| v.trim().to_string()),
    }
}

fn canonical_request_string(req: &CanonicalRequest, headers: &BTreeMap<String, String>) -> String {
    // 512 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(512);

    f.push_str(req.method.as_str());
    f.push('\n');
    f.push_str(&req.uri);
    f.push('\n');
    f.push_str(
        &req.query
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&"),
    );
    f.push('\n');
    for (name, value) in headers {
        f.push_str(name);
        f.push(':');
        f.push_str(value);
        f.push('\n');
    }
    f.push('\n');
    f.push_str(&signed_header_names(headers));
    f.push('\n');
    f.push_str(&req.payload_hash);

    f
}

fn string_to_sign(req: &CanonicalRequest, creq: &str) -> String {
    // StringToSign:
    //
    // AWS4-HMAC-SHA256
    // 20220313T072004Z
    // 20220313/<region>/<service>/aws4_request
    // <hashed_canonical_request>
    let scope = req.scope();
    debug!("calculated scope: {scope}");

    format!(
        "AWS4-HMAC-SHA256\n{}\n{}\n{}",
        format_iso8601(req.time),
        scope,
        hex_sha256(creq.as_bytes())
    )
}

fn signed_header_names(headers: &BTreeMap<String, String>) -> String {
    headers.keys().map(String::as_str).collect::<Vec<_>>().join(";")
}

fn canonical_uri(path: &str) -> Result<String> {
    if path.is_empty() {
        return Ok("/".to_string());
    }
    let path = percent_decode_str(path).decode_utf8().map_err(|e| {
        Error::request_invalid(format!("failed to decode path: {path}")).with_source(e)
    })?;
    Ok(utf8_percent_encode(&path, &AWS_URI_ENCODE_SET).to_string())
}

fn canonical_query(query: Option<&str>) -> Result<Vec<(String, String)>> {
    let Some(query) = query.filter(|q| !q.is_empty()) else {
        return Ok(Vec::new());
    };

    let decode = |s: &str| -> Result<String> {
        percent_decode_str(s)
            .decode_utf8()
            .map(|v| v.into_owned())
            .map_err(|e| {
                Error::request_invalid(format!("failed to decode query: {query}")).with_source(e)
            })
    };

    let mut pairs = query
        .split('&')
        .filter(|p| !p.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            Ok((decode(k)?, decode(v)?))
        })
        .collect::<Result<Vec<_>>>()?;

    // Sort by param name
    pairs.sort();

    Ok(pairs
        .into_iter()
        .map(|(k, v)| {
            (
                utf8_percent_encode(&k, &AWS_QUERY_ENCODE_SET).to_string(),
                utf8_percent_encode(&v, &AWS_QUERY_ENCODE_SET).to_string(),
            )
        })
        .collect())
}

/// Header values are trimmed and inner whitespace runs collapse to one space.
fn normalize_header_value(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Derive the SigV4 signing key.
pub fn generate_signing_key(secret: &str, time: DateTime, region: &str, service: &str) -> Vec<u8> {
    // Sign secret
    let secret = format!("AWS4{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), format_date(time).as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes());
    // Sign request
    hmac_sha256(sign_service.as_slice(), "aws4_request".as_bytes())
}
