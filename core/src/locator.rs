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
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

/// Locator identifies the artifact to fetch.
///
/// It carries the URL, the caller's display metadata, per-call options and an
/// optional explicit strategy. A locator is immutable once built.
#[derive(Debug, Clone)]
pub struct Locator {
    url: String,
    name: Option<String>,
    version: Option<String>,
    strategy: Option<StrategyKind>,
    options: FetchOptions,
}

impl Locator {
    /// Create a new locator for `url` with default options.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: None,
            version: None,
            strategy: None,
            options: FetchOptions::default(),
        }
    }

    /// Attach display name and version.
    pub fn with_metadata(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self.version = Some(version.into());
        self
    }

    /// Force a strategy instead of letting the dispatcher pick one.
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Replace the options.
    pub fn with_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    /// The artifact URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The display name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The version, if any.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// The explicitly requested strategy, if any.
    pub fn strategy(&self) -> Option<StrategyKind> {
        self.strategy
    }

    /// The per-call options.
    pub fn options(&self) -> &FetchOptions {
        &self.options
    }
}

impl Display for Locator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match (&self.name, &self.version) {
            (Some(name), Some(version)) => write!(f, "{name} {version} ({})", self.url),
            (Some(name), None) => write!(f, "{name} ({})", self.url),
            _ => f.write_str(&self.url),
        }
    }
}

/// FetchOptions holds the per-call options a caller may supply.
///
/// Keys follow the snake_case names callers use in their manifests, so the struct can be
/// deserialized straight out of a table:
///
/// ```
/// use authfetch_core::FetchOptions;
///
/// let opts: FetchOptions = serde_json::from_str(r#"{
///     "auth_type": "api_key",
///     "api_key_header": "X-Token",
///     "headers": [["X-Trace", "1"]]
/// }"#).unwrap();
/// assert_eq!(opts.api_key_header.as_deref(), Some("X-Token"));
/// ```
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct FetchOptions {
    /// Declared auth kind, parsed with [`AuthKind::from_str`].
    pub auth_type: Option<String>,
    /// Bearer, GitHub or GitLab token.
    pub token: Option<String>,
    /// Basic auth username.
    pub username: Option<String>,
    /// Basic auth password.
    pub password: Option<String>,
    /// Custom auth header name.
    pub header: Option<String>,
    /// Custom auth header value.
    pub header_value: Option<String>,
    /// API key.
    pub api_key: Option<String>,
    /// Header carrying the API key.
    pub api_key_header: Option<String>,
    /// Extra headers appended verbatim to generic requests.
    ///
    /// Accepts a list of `[name, value]` pairs (order kept) or a table (sorted by name).
    #[serde(deserialize_with = "deserialize_headers")]
    pub headers: Vec<(String, String)>,
    /// AWS region.
    pub region: Option<String>,
    /// AWS access key id.
    pub access_key: Option<String>,
    /// AWS secret access key.
    pub secret_key: Option<String>,
    /// AWS session token.
    pub session_token: Option<String>,
    /// Presigned S3 URL, fetched as is.
    pub presigned_url: Option<String>,
    /// Timeout for the final transfer, passed through unchanged.
    #[serde(skip)]
    pub timeout: Option<Duration>,
}

impl FetchOptions {
    /// Parse the declared auth kind.
    ///
    /// Returns `Ok(None)` when none was declared.
    pub fn auth_kind(&self) -> Result<Option<AuthKind>> {
        self.auth_type.as_deref().map(AuthKind::from_str).transpose()
    }

    /// Set the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Debug for FetchOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchOptions")
            .field("auth_type", &self.auth_type)
            .field("token", &Redact::from(&self.token))
            .field("username", &self.username)
            .field("password", &Redact::from(&self.password))
            .field("header", &self.header)
            .field("header_value", &Redact::from(&self.header_value))
            .field("api_key", &Redact::from(&self.api_key))
            .field("api_key_header", &self.api_key_header)
            .field(
                "headers",
                &self.headers.iter().map(|(k, _)| k).collect::<Vec<_>>(),
            )
            .field("region", &self.region)
            .field("access_key", &Redact::from(&self.access_key))
            .field("secret_key", &Redact::from(&self.secret_key))
            .field("session_token", &Redact::from(&self.session_token))
            .field("presigned_url", &self.presigned_url.as_ref().map(|_| "<set>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn deserialize_headers<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Headers {
        List(Vec<(String, String)>),
        Table(BTreeMap<String, String>),
    }

    Ok(match Headers::deserialize(deserializer)? {
        Headers::List(v) => v,
        Headers::Table(v) => v.into_iter().collect(),
    })
}

/// AuthKind is the closed set of authentication schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthKind {
    /// `Authorization: Bearer <token>`
    Bearer,
    /// HTTP basic auth with username and password.
    Basic,
    /// Arbitrary `<header>: <value>`.
    CustomHeader,
    /// `<api key header>: <api key>`
    ApiKey,
    /// `Authorization: token <github token>`
    GitHubToken,
    /// `PRIVATE-TOKEN: <gitlab token>`
    GitLabToken,
    /// AWS Signature Version 4.
    AwsSigV4,
    /// A presigned URL that carries its own authentication.
    PresignedUrl,
    /// No authentication.
    None,
}

impl AuthKind {
    /// The canonical name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthKind::Bearer => "bearer",
            AuthKind::Basic => "basic",
            AuthKind::CustomHeader => "header",
            AuthKind::ApiKey => "api_key",
            AuthKind::GitHubToken => "github_token",
            AuthKind::GitLabToken => "gitlab_token",
            AuthKind::AwsSigV4 => "aws_sigv4",
            AuthKind::PresignedUrl => "presigned_url",
            AuthKind::None => "none",
        }
    }
}

impl Display for AuthKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s
            .trim()
            .trim_start_matches(':')
            .to_ascii_lowercase()
            .replace('-', "_");
        let kind = match normalized.as_str() {
            "bearer" => AuthKind::Bearer,
            "basic" => AuthKind::Basic,
            "header" | "custom_header" => AuthKind::CustomHeader,
            "api_key" | "apikey" => AuthKind::ApiKey,
            "github_token" | "github" => AuthKind::GitHubToken,
            "gitlab_token" | "gitlab" => AuthKind::GitLabToken,
            "aws_sigv4" | "sigv4" => AuthKind::AwsSigV4,
            "presigned_url" | "presigned" => AuthKind::PresignedUrl,
            "none" => AuthKind::None,
            _ => {
                return Err(Error::unknown_auth_kind(format!(
                    "unknown authentication type: {s}"
                ))
                .with_context(
                    "hint: use one of bearer, basic, header, api_key",
                ))
            }
        };
        Ok(kind)
    }
}

/// StrategyKind names every provider strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// Raw files from private GitHub repositories.
    GitHubRaw,
    /// GitHub release assets.
    GitHubRelease,
    /// Raw files from private GitLab repositories.
    GitLabRaw,
    /// GitLab release assets.
    GitLabRelease,
    /// Private S3 objects.
    S3,
    /// Public S3 objects.
    S3Public,
    /// Any HTTPS URL with a generic auth scheme.
    Generic,
}

impl StrategyKind {
    /// All strategies in dispatch order.
    pub const ALL: [StrategyKind; 7] = [
        StrategyKind::GitHubRaw,
        StrategyKind::GitHubRelease,
        StrategyKind::GitLabRaw,
        StrategyKind::GitLabRelease,
        StrategyKind::S3,
        StrategyKind::S3Public,
        StrategyKind::Generic,
    ];

    /// The short name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::GitHubRaw => "github-raw",
            StrategyKind::GitHubRelease => "github-release",
            StrategyKind::GitLabRaw => "gitlab-raw",
            StrategyKind::GitLabRelease => "gitlab-release",
            StrategyKind::S3 => "s3",
            StrategyKind::S3Public => "s3-public",
            StrategyKind::Generic => "authenticated",
        }
    }
}

impl Display for StrategyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        StrategyKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| {
                Error::unrecognized_locator(format!("unknown strategy: {s}")).with_context(format!(
                    "hint: use one of {}",
                    StrategyKind::ALL.map(|k| k.name()).join(", ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_auth_kind_from_str() {
        for (input, expected) in [
            ("bearer", AuthKind::Bearer),
            (":basic", AuthKind::Basic),
            ("header", AuthKind::CustomHeader),
            ("API-KEY", AuthKind::ApiKey),
            ("aws_sigv4", AuthKind::AwsSigV4),
        ] {
            assert_eq!(input.parse::<AuthKind>().unwrap(), expected, "{input}");
        }

        let err = "kerberos".parse::<AuthKind>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownAuthKind);
    }

    #[test]
    fn test_strategy_kind_names_round_trip() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.name().parse::<StrategyKind>().unwrap(), kind);
        }
        assert!("ftp".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn test_deserialize_options() {
        let opts: FetchOptions = serde_json::from_str(
            r#"{"auth_type": "bearer", "token": "t", "headers": {"X-B": "2", "X-A": "1"}}"#,
        )
        .unwrap();

        assert_eq!(opts.auth_kind().unwrap(), Some(AuthKind::Bearer));
        assert_eq!(
            opts.headers,
            vec![
                ("X-A".to_string(), "1".to_string()),
                ("X-B".to_string(), "2".to_string())
            ]
        );
        assert_eq!(opts.timeout, None);
    }

    #[test]
    fn test_options_debug_redacts_secrets() {
        let opts = FetchOptions {
            token: Some("ghp_0123456789abcdef".to_string()),
            secret_key: Some("short".to_string()),
            ..Default::default()
        };
        let s = format!("{opts:?}");
        assert!(!s.contains("0123456789abcdef"));
        assert!(!s.contains("short"));
    }

    #[test]
    fn test_locator_display() {
        let loc = Locator::new("https://example.com/a.tar.gz").with_metadata("tool", "1.0.0");
        assert_eq!(loc.to_string(), "tool 1.0.0 (https://example.com/a.tar.gz)");
    }
}
