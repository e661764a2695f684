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

use crate::mock::{MockCli, MockTransport};
use authfetch::{ErrorKind, FetchOptions, Fetcher, Locator};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_latest_release_download() {
    let _ = env_logger::builder().is_test(true).try_init();

    let transport = MockTransport::new()
        .route(
            "https://api.github.com/repos/acme/tools/releases/latest",
            200,
            r#"{"tag_name":"v2.3.0","draft":false}"#,
        )
        .route(
            "https://github.com/acme/tools/releases/download/v2.3.0/tool.tar.gz",
            200,
            "tarball",
        );
    let ctx = transport.context(
        &[("HOMEBREW_GITHUB_API_TOKEN", "ghp_env")],
        MockCli::token("gho_cli"),
    );
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("tool.tar.gz");

    let locator = Locator::new("https://github.com/acme/tools/releases/latest/download/tool.tar.gz")
        .with_metadata("tool", "2.3.0");
    let written = Fetcher::new(ctx).fetch(&locator, &dest).await.unwrap();

    assert_eq!(written, 7);
    assert_eq!(std::fs::read_to_string(&dest).unwrap(), "tarball");

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].headers["authorization"], "token ghp_env");
    assert_eq!(sent[0].headers["accept"], "application/vnd.github.v3+json");

    let downloads = transport.downloads();
    assert_eq!(downloads.len(), 1);
    assert_eq!(
        downloads[0].url(),
        "https://github.com/acme/tools/releases/download/v2.3.0/tool.tar.gz"
    );
    assert_eq!(downloads[0].headers()["authorization"], "token ghp_env");
}

#[tokio::test]
async fn test_cli_token_when_env_missing() {
    let transport = MockTransport::new();
    let fetcher = Fetcher::new(transport.context(&[], MockCli::token("gho_cli")));

    let req = fetcher
        .prepare(
            &Locator::new("https://raw.githubusercontent.com/acme/tools/main/install.sh"),
            "/tmp/install.sh",
        )
        .await
        .unwrap();
    assert_eq!(req.headers()["authorization"], "token gho_cli");
}

#[tokio::test]
async fn test_option_token_beats_env() {
    let transport = MockTransport::new();
    let fetcher = Fetcher::new(transport.context(
        &[("HOMEBREW_GITHUB_API_TOKEN", "ghp_env")],
        MockCli::missing(),
    ));
    let locator = Locator::new("https://api.github.com/repos/acme/tools/releases/assets/987")
        .with_options(FetchOptions {
            token: Some("ghp_option".to_string()),
            ..Default::default()
        });

    let req = fetcher.prepare(&locator, "/tmp/asset").await.unwrap();
    assert_eq!(req.headers()["authorization"], "token ghp_option");
    assert_eq!(req.headers()["accept"], "application/octet-stream");
}

#[tokio::test]
async fn test_missing_credentials() {
    let transport = MockTransport::new();
    let fetcher = Fetcher::new(transport.context(&[], MockCli::missing()));

    let err = fetcher
        .fetch(
            &Locator::new("https://github.com/acme/tools/releases/download/v1.0.0/tool.zip"),
            "/tmp/tool.zip",
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingCredentials);
    assert_eq!(err.strategy(), Some("github-release"));
    let text = err.to_string();
    assert!(text.contains("HOMEBREW_GITHUB_API_TOKEN"));
    assert!(text.contains("gh auth login"));
    assert!(transport.downloads().is_empty());
}

#[tokio::test]
async fn test_download_failure_is_transport_error() {
    let transport = MockTransport::new();
    let fetcher = Fetcher::new(transport.context(
        &[("HOMEBREW_GITHUB_API_TOKEN", "ghp_env")],
        MockCli::missing(),
    ));
    let dir = tempfile::tempdir().unwrap();

    let err = fetcher
        .fetch(
            &Locator::new("https://raw.githubusercontent.com/acme/tools/main/missing.sh"),
            dir.path().join("missing.sh"),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.strategy(), Some("github-raw"));
}
