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

use crate::mock::{fixed_clock, MockCli, MockTransport};
use authfetch::{ErrorKind, FetchOptions, Fetcher, Locator, StrategyKind};
use pretty_assertions::assert_eq;
use std::time::Duration;

const ACCESS_KEY: &str = "AKIDEXAMPLE";
const SECRET_KEY: &str = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY";

#[tokio::test]
async fn test_signed_path_style_request() {
    let _ = env_logger::builder().is_test(true).try_init();

    let transport = MockTransport::new();
    let fetcher = Fetcher::new(transport.context(
        &[
            ("AWS_ACCESS_KEY_ID", ACCESS_KEY),
            ("AWS_SECRET_ACCESS_KEY", SECRET_KEY),
            ("AWS_SESSION_TOKEN", "session-token-example"),
        ],
        MockCli::missing(),
    ))
    .with_clock(fixed_clock("2024-01-15T09:30:00Z"));

    let req = fetcher
        .prepare(
            &Locator::new("https://s3.eu-west-1.amazonaws.com/my-bucket/releases/tool%20v1.tar.gz"),
            "/tmp/tool.tar.gz",
        )
        .await
        .unwrap();

    assert_eq!(
        req.url(),
        "https://s3.eu-west-1.amazonaws.com/my-bucket/releases/tool%20v1.tar.gz"
    );
    assert_eq!(
        req.headers()["authorization"],
        "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20240115/eu-west-1/s3/aws4_request, SignedHeaders=host;x-amz-content-sha256;x-amz-date;x-amz-security-token, Signature=50c49926c2b49ac9e495a0b2c964a61c32fc3aa2926487194e645a784670c8ad"
    );
    assert_eq!(req.headers()["x-amz-content-sha256"], "UNSIGNED-PAYLOAD");
    assert_eq!(req.headers()["x-amz-security-token"], "session-token-example");
    assert!(req.headers()["authorization"].is_sensitive());
}

#[tokio::test]
async fn test_region_from_option_for_s3_scheme() {
    let transport = MockTransport::new();
    let locator = Locator::new("s3://my-bucket/tool.tar.gz").with_options(FetchOptions {
        region: Some("ap-southeast-2".to_string()),
        access_key: Some(ACCESS_KEY.to_string()),
        secret_key: Some(SECRET_KEY.to_string()),
        ..Default::default()
    });

    let req = Fetcher::new(transport.context(&[("AWS_REGION", "us-west-2")], MockCli::missing()))
        .with_clock(fixed_clock("2024-01-15T09:30:00Z"))
        .prepare(&locator, "/tmp/tool.tar.gz")
        .await
        .unwrap();
    assert_eq!(
        req.url(),
        "https://my-bucket.s3.ap-southeast-2.amazonaws.com/tool.tar.gz"
    );
    assert!(req.headers()["authorization"]
        .to_str()
        .unwrap()
        .contains("/20240115/ap-southeast-2/s3/aws4_request"));
    assert!(req.headers().get("x-amz-security-token").is_none());
}

#[tokio::test]
async fn test_presigned_url_skips_signing() {
    let presigned = "https://my-bucket.s3.amazonaws.com/tool.tar.gz?X-Amz-Signature=abc123";
    let transport = MockTransport::new();
    let fetcher = Fetcher::new(transport.context(
        &[
            ("HOMEBREW_S3_PRESIGNED_URL", presigned),
            ("AWS_ACCESS_KEY_ID", ACCESS_KEY),
            ("AWS_SECRET_ACCESS_KEY", SECRET_KEY),
        ],
        MockCli::missing(),
    ));

    let req = fetcher
        .prepare(&Locator::new("s3://my-bucket/tool.tar.gz"), "/tmp/tool.tar.gz")
        .await
        .unwrap();
    assert_eq!(req.url(), presigned);
    assert!(req.headers().is_empty());
}

#[tokio::test]
async fn test_public_bucket_by_hint() {
    let transport = MockTransport::new();
    let locator = Locator::new("https://public-bucket.s3.us-east-2.amazonaws.com/tool.tar.gz")
        .with_strategy(StrategyKind::S3Public)
        .with_options(FetchOptions::default().with_timeout(Duration::from_secs(30)));

    let req = Fetcher::new(transport.context(&[], MockCli::missing()))
        .prepare(&locator, "/tmp/tool.tar.gz")
        .await
        .unwrap();
    assert_eq!(
        req.url(),
        "https://public-bucket.s3.us-east-2.amazonaws.com/tool.tar.gz"
    );
    assert!(req.headers().is_empty());
    assert_eq!(req.timeout(), Some(Duration::from_secs(30)));
}

#[tokio::test]
async fn test_custom_endpoint_by_hint() {
    let transport = MockTransport::new();
    let locator = Locator::new("https://minio.example.com:9000/artifacts/tool.tar.gz")
        .with_strategy(StrategyKind::S3);

    let req = Fetcher::new(transport.context(
        &[
            ("AWS_ACCESS_KEY_ID", ACCESS_KEY),
            ("AWS_SECRET_ACCESS_KEY", SECRET_KEY),
        ],
        MockCli::missing(),
    ))
    .prepare(&locator, "/tmp/tool.tar.gz")
    .await
    .unwrap();
    assert_eq!(req.url(), "https://minio.example.com:9000/artifacts/tool.tar.gz");
    assert!(req.headers().contains_key("authorization"));
}

#[tokio::test]
async fn test_missing_credentials_without_metadata_service() {
    let transport = MockTransport::new();
    let err = Fetcher::new(transport.context(&[], MockCli::missing()))
        .prepare(&Locator::new("s3://my-bucket/tool.tar.gz"), "/tmp/tool.tar.gz")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingCredentials);
    assert_eq!(err.strategy(), Some("s3"));
    assert!(err.message().contains("AWS_ACCESS_KEY_ID"));
}
