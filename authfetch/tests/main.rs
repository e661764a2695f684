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

mod mock;
mod providers;

use authfetch::{dispatch, ErrorKind, Fetcher, Locator, StrategyKind};
use mock::{fixed_clock, MockCli, MockTransport};
use pretty_assertions::assert_eq;

#[test]
fn test_strategy_listing() {
    let names: Vec<_> = StrategyKind::ALL.iter().map(|k| k.name()).collect();
    assert_eq!(
        names,
        [
            "github-raw",
            "github-release",
            "gitlab-raw",
            "gitlab-release",
            "s3",
            "s3-public",
            "authenticated"
        ]
    );
    assert_eq!("s3-public".parse::<StrategyKind>().unwrap(), StrategyKind::S3Public);
}

#[tokio::test]
async fn test_unrecognized_locator_never_touches_network() {
    let _ = env_logger::builder().is_test(true).try_init();

    let transport = MockTransport::new();
    let fetcher = Fetcher::new(transport.context(&[], MockCli::missing()));
    let dir = tempfile::tempdir().unwrap();

    let err = fetcher
        .fetch(&Locator::new("ftp://mirror.example.com/tool.tar.gz"), dir.path().join("t"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnrecognizedLocator);
    assert!(transport.sent().is_empty());
    assert!(transport.downloads().is_empty());
}

#[test]
fn test_invalid_locator_names_strategy() {
    let err = dispatch(&Locator::new("https://github.com/acme/tools/releases/tag/v1.0.0")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidLocator);
    assert_eq!(err.strategy(), Some("github-release"));
    assert!(err.to_string().starts_with("[github-release] invalid locator: "));
}

#[tokio::test]
async fn test_prepare_is_idempotent() {
    let env = [
        ("HOMEBREW_GITHUB_API_TOKEN", "ghp_idempotent"),
        ("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE"),
        ("AWS_SECRET_ACCESS_KEY", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY"),
        ("HOMEBREW_BEARER_TOKEN", "bearer"),
    ];
    let transport = MockTransport::new()
        .route(
            "https://api.github.com/repos/acme/tools/releases/latest",
            200,
            r#"{"tag_name":"v2.3.0"}"#,
        );

    for url in [
        "https://github.com/acme/tools/releases/latest/download/tool.tar.gz",
        "https://gitlab.example.com/acme/tools/-/raw/main/install.sh",
        "s3://my-bucket/releases/tool.tar.gz",
        "https://artifacts.example.com/tool.zip",
    ] {
        let fetcher = Fetcher::new(transport.context(&env, MockCli::token("gitlab-cli")))
            .with_clock(fixed_clock("2024-01-15T09:30:00Z"));
        let locator = Locator::new(url);

        let first = fetcher.prepare(&locator, "/tmp/out").await.unwrap();
        let second = fetcher.prepare(&locator, "/tmp/out").await.unwrap();
        assert_eq!(first, second, "{url}");
    }
}

#[tokio::test]
async fn test_signing_fields_follow_the_clock() {
    let env = [
        ("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE"),
        ("AWS_SECRET_ACCESS_KEY", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY"),
    ];
    let transport = MockTransport::new();
    let locator = Locator::new("s3://my-bucket/tool.tar.gz");

    let early = Fetcher::new(transport.context(&env, MockCli::missing()))
        .with_clock(fixed_clock("2024-01-15T09:30:00Z"))
        .prepare(&locator, "/tmp/out")
        .await
        .unwrap();
    let late = Fetcher::new(transport.context(&env, MockCli::missing()))
        .with_clock(fixed_clock("2024-01-15T09:31:00Z"))
        .prepare(&locator, "/tmp/out")
        .await
        .unwrap();

    assert_eq!(early.url(), late.url());
    assert_eq!(early.headers()["x-amz-date"], "20240115T093000Z");
    assert_eq!(late.headers()["x-amz-date"], "20240115T093100Z");
    assert_ne!(
        early.headers()["authorization"],
        late.headers()["authorization"]
    );
}
