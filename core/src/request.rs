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

use crate::utils::Redact;
use crate::{Error, Result};
use http::header::HeaderName;
use http::{HeaderMap, HeaderValue, Method};
use std::fmt::{self, Debug, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// AuthenticatedRequest is what a strategy produces: where to GET and how to authenticate.
///
/// It is turned into a [`FetchRequest`] once the caller's destination and timeout are known.
#[derive(Clone, PartialEq)]
pub struct AuthenticatedRequest {
    /// Target URL.
    pub url: String,
    /// Headers to send.
    pub headers: HeaderMap,
    /// Basic auth `(username, password)` passed as a credential parameter, not a header.
    pub basic_auth: Option<(String, String)>,
}

impl AuthenticatedRequest {
    /// Create an unauthenticated GET for `url`.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HeaderMap::new(),
            basic_auth: None,
        }
    }

    /// Insert a header, replacing any previous value with the same name.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self> {
        self.insert_header(name, value, false)?;
        Ok(self)
    }

    /// Insert a header whose value must never be logged.
    pub fn sensitive_header(mut self, name: &str, value: &str) -> Result<Self> {
        self.insert_header(name, value, true)?;
        Ok(self)
    }

    /// Append a header, keeping previous values with the same name.
    pub fn append_header(mut self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            Error::request_invalid(format!("invalid header name: {name}")).with_source(e)
        })?;
        let value = HeaderValue::from_str(value).map_err(|e| {
            Error::request_invalid(format!("invalid value for header {name}")).with_source(e)
        })?;
        self.headers.append(name, value);
        Ok(self)
    }

    /// Use basic auth.
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.basic_auth = Some((username.into(), password.into()));
        self
    }

    fn insert_header(&mut self, name: &str, value: &str, sensitive: bool) -> Result<()> {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            Error::request_invalid(format!("invalid header name: {name}")).with_source(e)
        })?;
        let mut value = HeaderValue::from_str(value).map_err(|e| {
            Error::request_invalid(format!("invalid value for header {name}")).with_source(e)
        })?;
        value.set_sensitive(sensitive);
        self.headers.insert(name, value);
        Ok(())
    }
}

impl Debug for AuthenticatedRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // HeaderValue prints `Sensitive` for values marked sensitive.
        f.debug_struct("AuthenticatedRequest")
            .field("url", &self.url)
            .field("headers", &self.headers)
            .field(
                "basic_auth",
                &self
                    .basic_auth
                    .as_ref()
                    .map(|(u, p)| (u.as_str(), Redact::from(p))),
            )
            .finish()
    }
}

/// FetchRequest is the transport-ready description handed to [`crate::Download`].
///
/// The method is always GET. The core never executes it itself.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchRequest {
    method: Method,
    request: AuthenticatedRequest,
    destination: PathBuf,
    timeout: Option<Duration>,
}

impl FetchRequest {
    /// Create a GET request descriptor.
    pub fn new(
        request: AuthenticatedRequest,
        destination: impl AsRef<Path>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            method: Method::GET,
            request,
            destination: destination.as_ref().to_path_buf(),
            timeout,
        }
    }

    /// HTTP method, always GET.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Target URL.
    pub fn url(&self) -> &str {
        &self.request.url
    }

    /// Headers to send.
    pub fn headers(&self) -> &HeaderMap {
        &self.request.headers
    }

    /// Basic auth pair, if any.
    pub fn basic_auth(&self) -> Option<(&str, &str)> {
        self.request
            .basic_auth
            .as_ref()
            .map(|(u, p)| (u.as_str(), p.as_str()))
    }

    /// Where the body must be written.
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Caller supplied timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// The authenticated request this descriptor wraps.
    pub fn request(&self) -> &AuthenticatedRequest {
        &self.request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensitive_header_not_printed() {
        let req = AuthenticatedRequest::get("https://example.com/a")
            .sensitive_header("Authorization", "Bearer secret-token-value")
            .unwrap()
            .basic_auth("alice", "hunter2-hunter2");

        let s = format!("{req:?}");
        assert!(!s.contains("secret-token-value"));
        assert!(!s.contains("hunter2-hunter2"));
        assert!(s.contains("alice"));
    }

    #[test]
    fn test_invalid_header_is_request_invalid() {
        let err = AuthenticatedRequest::get("https://example.com/a")
            .header("X-Bad", "line\nbreak")
            .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_append_keeps_duplicates() {
        let req = AuthenticatedRequest::get("https://example.com/a")
            .append_header("X-A", "1")
            .unwrap()
            .append_header("X-A", "2")
            .unwrap();
        assert_eq!(req.headers.get_all("x-a").iter().count(), 2);
    }

    #[test]
    fn test_fetch_request_is_get() {
        let req = FetchRequest::new(
            AuthenticatedRequest::get("https://example.com/a"),
            "/tmp/a",
            Some(Duration::from_secs(5)),
        );
        assert_eq!(req.method(), Method::GET);
        assert_eq!(req.url(), "https://example.com/a");
        assert_eq!(req.destination(), Path::new("/tmp/a"));
        assert_eq!(req.timeout(), Some(Duration::from_secs(5)));
    }
}
