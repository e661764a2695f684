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
use test_case::test_case;

const URL: &str = "https://artifacts.example.com/releases/tool-1.0.0.tar.gz";

#[test_case(&[("HOMEBREW_BEARER_TOKEN", "b-1"), ("HOMEBREW_API_KEY", "k-1")], "authorization", "Bearer b-1"; "bearer detected first")]
#[test_case(&[("HOMEBREW_API_KEY", "k-1"), ("HOMEBREW_AUTH_USER", "alice"), ("HOMEBREW_AUTH_PASSWORD", "secret")], "x-api-key", "k-1"; "api key before basic")]
#[test_case(&[("HOMEBREW_API_KEY", "k-1"), ("HOMEBREW_API_KEY_HEADER", "X-Artifactory-Key")], "x-artifactory-key", "k-1"; "api key header from env")]
#[test_case(&[("HOMEBREW_AUTH_HEADER", "X-Deploy-Token"), ("HOMEBREW_AUTH_VALUE", "d-1")], "x-deploy-token", "d-1"; "custom header")]
#[tokio::test]
async fn test_detected_auth(env: &[(&str, &str)], header: &str, value: &str) {
    let transport = MockTransport::new();
    let req = Fetcher::new(transport.context(env, MockCli::missing()))
        .prepare(&Locator::new(URL), "/tmp/tool.tar.gz")
        .await
        .unwrap();
    assert_eq!(req.url(), URL);
    assert_eq!(req.headers()[header], value);
}

#[tokio::test]
async fn test_basic_auth_and_extra_headers() {
    let _ = env_logger::builder().is_test(true).try_init();

    let transport = MockTransport::new().route(URL, 200, "archive");
    let locator = Locator::new(URL)
        .with_metadata("tool", "1.0.0")
        .with_options(basic_with_headers());
    let dir = tempfile::tempdir().unwrap();

    let written = Fetcher::new(transport.context(
        &[("HOMEBREW_AUTH_USER", "alice"), ("HOMEBREW_AUTH_PASSWORD", "secret")],
        MockCli::missing(),
    ))
    .fetch(&locator, dir.path().join("tool.tar.gz"))
    .await
    .unwrap();
    assert_eq!(written, 7);

    let downloads = transport.downloads();
    let req = &downloads[0];
    assert_eq!(req.basic_auth(), Some(("alice", "secret")));
    assert!(req.headers().get("authorization").is_none());
    assert_eq!(req.headers()["x-request-source"], "authfetch");
    assert_eq!(req.headers()["accept"], "application/octet-stream");
}

fn basic_with_headers() -> FetchOptions {
    FetchOptions {
        auth_type: Some("basic".to_string()),
        headers: vec![
            ("X-Request-Source".to_string(), "authfetch".to_string()),
            ("Accept".to_string(), "application/octet-stream".to_string()),
        ],
        ..Default::default()
    }
}

#[tokio::test]
async fn test_detection_fails_without_signals() {
    let transport = MockTransport::new();
    let err = Fetcher::new(transport.context(&[], MockCli::missing()))
        .prepare(&Locator::new(URL), "/tmp/tool.tar.gz")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownAuthKind);
    assert_eq!(err.strategy(), Some("authenticated"));
}

#[tokio::test]
async fn test_declared_kind_without_credentials() {
    let transport = MockTransport::new();
    let locator = Locator::new(URL).with_options(FetchOptions {
        auth_type: Some("api_key".to_string()),
        ..Default::default()
    });
    let err = Fetcher::new(transport.context(&[("HOMEBREW_BEARER_TOKEN", "b-1")], MockCli::missing()))
        .prepare(&locator, "/tmp/tool.tar.gz")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingCredentials);
    assert_eq!(
        err.message(),
        "API key required. Set HOMEBREW_API_KEY environment variable."
    );
}

#[tokio::test]
async fn test_unknown_declared_kind() {
    let transport = MockTransport::new();
    let locator = Locator::new(URL).with_options(FetchOptions {
        auth_type: Some("kerberos".to_string()),
        ..Default::default()
    });
    let err = Fetcher::new(transport.context(&[], MockCli::missing()))
        .prepare(&locator, "/tmp/tool.tar.gz")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownAuthKind);
}

#[test_case("github"; "github token")]
#[test_case("aws_sigv4"; "sigv4")]
#[test_case("presigned"; "presigned url")]
#[test_case("none"; "no auth")]
#[tokio::test]
async fn test_provider_kind_rejected_before_resolution(auth_type: &str) {
    let transport = MockTransport::new();
    let cli = MockCli::token("gho_cli");
    let locator = Locator::new(URL).with_options(FetchOptions {
        auth_type: Some(auth_type.to_string()),
        ..Default::default()
    });
    let env = [
        ("HOMEBREW_GITHUB_API_TOKEN", "ghp_env"),
        ("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE"),
        ("AWS_SECRET_ACCESS_KEY", "secret"),
        ("HOMEBREW_S3_PRESIGNED_URL", "https://b.s3.amazonaws.com/k?X-Amz-Signature=abc"),
    ];
    let err = Fetcher::new(transport.context(&env, cli.clone()))
        .prepare(&locator, "/tmp/tool.tar.gz")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownAuthKind);
    assert_eq!(err.strategy(), Some("authenticated"));
    assert!(cli.calls().is_empty());
    assert!(transport.sent().is_empty());
}
