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

//! Reqwest-based transport for authfetch.
//!
//! [`ReqwestHttpSend`] implements both capabilities authfetch needs from an HTTP client:
//!
//! - [`HttpSend`] for the small pre-resolution calls (IMDS, release lookups).
//! - [`Download`] for the final transfer of a [`FetchRequest`] into its destination file.
//!
//! ```no_run
//! use authfetch_core::Context;
//! use authfetch_http_send_reqwest::ReqwestHttpSend;
//!
//! let http = ReqwestHttpSend::default();
//! let ctx = Context::new()
//!     .with_http_send(http.clone())
//!     .with_download(http);
//! ```

use async_trait::async_trait;
use authfetch_core::{Download, Error, FetchRequest, HttpSend, RequestTimeout, Result};
use bytes::Bytes;
use http_body_util::BodyExt;
use reqwest::{Client, Request};
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// User agent sent by the default client. GitHub rejects API calls without one.
pub const USER_AGENT: &str = concat!("authfetch/", env!("CARGO_PKG_VERSION"));

/// HTTP transport backed by a [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl Default for ReqwestHttpSend {
    fn default() -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let timeout = req.extensions().get::<RequestTimeout>().copied();

        let mut req = Request::try_from(req)
            .map_err(|e| Error::request_invalid("failed to build http request").with_source(e))?;
        if let Some(RequestTimeout(d)) = timeout {
            *req.timeout_mut() = Some(d);
        }

        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| Error::transport("failed to send http request").with_source(e))?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| Error::transport("failed to read http response body").with_source(e))?;
        Ok(http::Response::from_parts(parts, bs))
    }
}

#[async_trait]
impl Download for ReqwestHttpSend {
    async fn download(&self, req: &FetchRequest) -> Result<u64> {
        log::debug!("downloading {} to {}", req.url(), req.destination().display());

        let mut builder = self
            .client
            .request(req.method().clone(), req.url())
            .headers(req.headers().clone());
        if let Some((username, password)) = req.basic_auth() {
            builder = builder.basic_auth(username, Some(password));
        }
        if let Some(timeout) = req.timeout() {
            builder = builder.timeout(timeout);
        }

        let mut resp = builder.send().await.map_err(|e| {
            Error::transport(format!("failed to download {}", req.url())).with_source(e)
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::transport(format!(
                "failed to download {}: server responded with {status}",
                req.url()
            )));
        }

        let mut file = tokio::fs::File::create(req.destination())
            .await
            .map_err(|e| {
                Error::transport(format!(
                    "failed to create {}",
                    req.destination().display()
                ))
                .with_source(e)
            })?;

        let result = write_body(&mut resp, &mut file, req).await;
        drop(file);
        let written = match result {
            Ok(written) => written,
            Err(err) => {
                let _ = tokio::fs::remove_file(req.destination()).await;
                return Err(err);
            }
        };

        log::debug!("downloaded {written} bytes from {}", req.url());
        Ok(written)
    }
}

/// Stream the response body into `file`, returning the bytes written.
async fn write_body<W>(resp: &mut reqwest::Response, file: &mut W, req: &FetchRequest) -> Result<u64>
where
    W: AsyncWrite + Unpin,
{
    let write_err = |e: std::io::Error| {
        Error::transport(format!("failed to write {}", req.destination().display())).with_source(e)
    };

    let mut written = 0u64;
    while let Some(chunk) = resp.chunk().await.map_err(|e| {
        Error::transport(format!("connection lost while downloading {}", req.url())).with_source(e)
    })? {
        file.write_all(&chunk).await.map_err(write_err)?;
        written += chunk.len() as u64;
    }
    file.flush().await.map_err(write_err)?;
    Ok(written)
}
