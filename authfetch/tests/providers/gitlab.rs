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
use authfetch::{ErrorKind, Fetcher, Locator};
use pretty_assertions::assert_eq;

const RELEASE: &str = r#"{
    "tag_name": "v1.0.0",
    "assets": {
        "count": 2,
        "links": [
            {"id": 1, "name": "checksums.txt", "url": "https://gitlab.com/acme/tools/-/package_files/1/download"},
            {"id": 2, "name": "tool.tar.gz", "url": "https://gitlab.com/acme/tools/-/package_files/2/download"}
        ]
    }
}"#;

#[tokio::test]
async fn test_release_asset_download() {
    let _ = env_logger::builder().is_test(true).try_init();

    let transport = MockTransport::new()
        .route(
            "https://gitlab.com/api/v4/projects/acme%2Ftools/releases/v1.0.0",
            200,
            RELEASE,
        )
        .route(
            "https://gitlab.com/acme/tools/-/package_files/2/download",
            200,
            "gitlab-tarball",
        );
    let ctx = transport.context(
        &[("HOMEBREW_GITLAB_API_TOKEN", "glpat-env")],
        MockCli::missing(),
    );
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("tool.tar.gz");

    let written = Fetcher::new(ctx)
        .fetch(
            &Locator::new("https://gitlab.com/acme/tools/-/releases/v1.0.0/downloads/tool.tar.gz"),
            &dest,
        )
        .await
        .unwrap();
    assert_eq!(written, 14);
    assert_eq!(std::fs::read_to_string(&dest).unwrap(), "gitlab-tarball");

    let sent = transport.sent();
    assert_eq!(sent[0].headers["private-token"], "glpat-env");
    assert_eq!(
        transport.downloads()[0].headers()["private-token"],
        "glpat-env"
    );
}

#[tokio::test]
async fn test_release_asset_not_found() {
    let transport = MockTransport::new().route(
        "https://gitlab.com/api/v4/projects/acme%2Ftools/releases/v1.0.0",
        200,
        RELEASE,
    );
    let fetcher = Fetcher::new(transport.context(&[], MockCli::token("glpat-cli")));

    let err = fetcher
        .fetch(
            &Locator::new("https://gitlab.com/acme/tools/-/releases/v1.0.0/downloads/tool.zip"),
            "/tmp/tool.zip",
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AssetNotFound);
    assert_eq!(err.strategy(), Some("gitlab-release"));
    assert_eq!(err.message(), "Asset tool.zip not found in release v1.0.0");
    assert!(transport.downloads().is_empty());
}

#[tokio::test]
async fn test_raw_and_api_forms_prepare_identically() {
    let transport = MockTransport::new();
    let fetcher = Fetcher::new(transport.context(
        &[("GITLAB_PRIVATE_TOKEN", "glpat-private")],
        MockCli::missing(),
    ));

    let raw = fetcher
        .prepare(
            &Locator::new("https://gitlab.example.com/group/sub/tools/-/raw/v1.2.0/bin/install.sh"),
            "/tmp/install.sh",
        )
        .await
        .unwrap();
    let api = fetcher
        .prepare(
            &Locator::new(
                "https://gitlab.example.com/api/v4/projects/group%2Fsub%2Ftools/repository/files/bin%2Finstall.sh/raw?ref=v1.2.0",
            ),
            "/tmp/install.sh",
        )
        .await
        .unwrap();

    assert_eq!(raw, api);
    assert_eq!(
        raw.url(),
        "https://gitlab.example.com/api/v4/projects/group%2Fsub%2Ftools/repository/files/bin%2Finstall.sh/raw?ref=v1.2.0"
    );
    assert_eq!(raw.headers()["private-token"], "glpat-private");
}

#[tokio::test]
async fn test_missing_credentials() {
    let transport = MockTransport::new();
    let err = Fetcher::new(transport.context(&[], MockCli::missing()))
        .prepare(
            &Locator::new("https://gitlab.com/acme/tools/-/raw/main/install.sh"),
            "/tmp/install.sh",
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingCredentials);
    assert!(err.message().contains("glab auth login"));
}
