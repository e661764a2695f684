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

use async_trait::async_trait;
use authfetch::time::{parse_rfc3339, DateTime};
use authfetch::{
    CommandExecute, CommandOutput, Context, Download, Error, FetchRequest, HttpSend, Result,
    StaticEnv,
};
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// An API call seen by [`MockTransport`].
#[derive(Debug, Clone)]
pub struct SentRequest {
    pub uri: String,
    pub headers: http::HeaderMap,
}

/// MockTransport serves canned responses for both API calls and downloads.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    routes: Arc<HashMap<String, (u16, &'static str)>>,
    sent: Arc<Mutex<Vec<SentRequest>>>,
    downloads: Arc<Mutex<Vec<FetchRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, url: &str, status: u16, body: &'static str) -> Self {
        Arc::make_mut(&mut self.routes).insert(url.to_string(), (status, body));
        self
    }

    /// A context using this transport, `env` and `cli`.
    pub fn context(&self, env: &[(&str, &str)], cli: MockCli) -> Context {
        Context::new()
            .with_http_send(self.clone())
            .with_download(self.clone())
            .with_env(StaticEnv::from_pairs(env.iter().copied()))
            .with_command_execute(cli)
    }

    pub fn sent(&self) -> Vec<SentRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn downloads(&self) -> Vec<FetchRequest> {
        self.downloads.lock().unwrap().clone()
    }

    fn lookup(&self, url: &str) -> (u16, &'static str) {
        self.routes
            .get(url)
            .copied()
            .unwrap_or((404, r#"{"message":"Not Found"}"#))
    }
}

#[async_trait]
impl HttpSend for MockTransport {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let (status, body) = self.lookup(&req.uri().to_string());
        self.sent.lock().unwrap().push(SentRequest {
            uri: req.uri().to_string(),
            headers: req.headers().clone(),
        });
        Ok(http::Response::builder()
            .status(status)
            .body(Bytes::from_static(body.as_bytes()))
            .unwrap())
    }
}

#[async_trait]
impl Download for MockTransport {
    async fn download(&self, req: &FetchRequest) -> Result<u64> {
        self.downloads.lock().unwrap().push(req.clone());
        let (status, body) = self.lookup(req.url());
        if !(200..300).contains(&status) {
            return Err(Error::transport(format!("server returned {status}")));
        }
        std::fs::write(req.destination(), body)?;
        Ok(body.len() as u64)
    }
}

/// MockCli answers `gh auth token` and `glab config get token`, recording each call.
#[derive(Debug, Clone)]
pub struct MockCli {
    token: Option<&'static str>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockCli {
    pub fn token(token: &'static str) -> Self {
        Self {
            token: Some(token),
            calls: Arc::default(),
        }
    }

    pub fn missing() -> Self {
        Self {
            token: None,
            calls: Arc::default(),
        }
    }

    /// Programs invoked so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandExecute for MockCli {
    async fn command_execute(&self, program: &str, _: &[&str]) -> Result<CommandOutput> {
        self.calls.lock().unwrap().push(program.to_string());
        match self.token {
            Some(token) => Ok(CommandOutput {
                status: 0,
                stdout: format!("{token}\n").into_bytes(),
                stderr: Vec::new(),
            }),
            None => Err(Error::unexpected(format!("{program}: command not found"))),
        }
    }
}

pub fn fixed_clock(rfc3339: &str) -> impl Fn() -> DateTime + Send + Sync + 'static {
    let time = parse_rfc3339(rfc3339).unwrap();
    move || time
}
