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

use crate::constants::{DEFAULT_REF, GITLAB_PATH_ENCODE_SET};
use authfetch_core::{Error, Result};
use once_cell::sync::Lazy;
use percent_encoding::{percent_decode_str, utf8_percent_encode};
use regex::Regex;

static RAW_GITLAB_COM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://(gitlab\.com)/([^/]+(?:/[^/]+)+?)/-/raw/([^/]+)/([^?#]+)(?:\?[^#]*)?(?:#.*)?$")
        .expect("gitlab.com raw pattern must be valid")
});
static RAW_ANY_HOST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://([^/]+)/([^/]+(?:/[^/]+)+?)/-/raw/([^/]+)/([^?#]+)(?:\?[^#]*)?(?:#.*)?$")
        .expect("raw pattern must be valid")
});
static RAW_API: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://([^/]+)/api/v4/projects/([^/]+)/repository/files/([^/?]+)/raw(?:\?([^#]*))?$")
        .expect("api raw pattern must be valid")
});
static RELEASE_GITLAB_COM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://(gitlab\.com)/([^/]+(?:/[^/]+)+?)/-/releases/([^/]+)/downloads/(.+)$")
        .expect("gitlab.com release pattern must be valid")
});
static RELEASE_ANY_HOST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://([^/]+)/([^/]+(?:/[^/]+)+?)/-/releases/([^/]+)/downloads/(.+)$")
        .expect("release pattern must be valid")
});

fn decode(v: &str) -> String {
    percent_decode_str(v).decode_utf8_lossy().into_owned()
}

fn encode(v: &str) -> String {
    utf8_percent_encode(v, &GITLAB_PATH_ENCODE_SET).to_string()
}

/// RawTarget is a repository file fetched through the GitLab files API.
///
/// Both `/-/raw/` web URLs and `/api/v4/projects/:id/repository/files/:path/raw` URLs
/// parse into the same shape, so they produce the same request URL. Query strings
/// on web URLs (`?inline=false`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTarget {
    /// GitLab host, `gitlab.com` or self-managed.
    pub host: String,
    /// `namespace/project` path or numeric project id, decoded.
    pub project: String,
    /// File path inside the repository, decoded.
    pub path: String,
    /// Branch, tag or commit.
    pub git_ref: String,
}

impl RawTarget {
    /// Check whether `url` belongs to the raw family.
    pub fn claims(url: &str) -> bool {
        url.starts_with("https://")
            && (url.contains("/-/raw/")
                || (url.contains("/api/v4/projects/") && url.contains("/repository/files/")))
    }

    /// Parse a raw web URL or a files API URL.
    pub fn parse(url: &str) -> Result<Self> {
        for re in [&*RAW_GITLAB_COM, &*RAW_ANY_HOST] {
            if let Some(c) = re.captures(url) {
                return Ok(Self {
                    host: c[1].to_string(),
                    project: decode(&c[2]),
                    git_ref: decode(&c[3]),
                    path: decode(&c[4]),
                });
            }
        }
        if let Some(c) = RAW_API.captures(url) {
            let git_ref = c
                .get(4)
                .and_then(|q| {
                    q.as_str()
                        .split('&')
                        .find_map(|kv| kv.strip_prefix("ref="))
                        .filter(|v| !v.is_empty())
                        .map(decode)
                })
                .unwrap_or_else(|| DEFAULT_REF.to_string());
            return Ok(Self {
                host: c[1].to_string(),
                project: decode(&c[2]),
                path: decode(&c[3]),
                git_ref,
            });
        }

        Err(Error::invalid_locator(format!("invalid GitLab raw URL: {url}"))
            .with_context("hint: use https://<host>/<namespace>/<project>/-/raw/<ref>/<path>")
            .with_context(
                "hint: or https://<host>/api/v4/projects/<id>/repository/files/<path>/raw?ref=<ref>",
            ))
    }

    /// The files API URL to request.
    pub fn url(&self) -> String {
        format!(
            "https://{}/api/v4/projects/{}/repository/files/{}/raw?ref={}",
            self.host,
            encode(&self.project),
            encode(&self.path),
            encode(&self.git_ref)
        )
    }
}

/// ReleaseTarget is a file attached to a GitLab release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTarget {
    /// GitLab host.
    pub host: String,
    /// `namespace/project` path.
    pub project: String,
    /// Release tag.
    pub tag: String,
    /// Asset file name.
    pub file: String,
}

impl ReleaseTarget {
    /// Check whether `url` belongs to the release family.
    pub fn claims(url: &str) -> bool {
        url.starts_with("https://") && url.contains("/-/releases/")
    }

    /// Parse `https://<host>/<namespace>/<project>/-/releases/<tag>/downloads/<file>`.
    pub fn parse(url: &str) -> Result<Self> {
        [&*RELEASE_GITLAB_COM, &*RELEASE_ANY_HOST]
            .into_iter()
            .find_map(|re| re.captures(url))
            .map(|c| Self {
                host: c[1].to_string(),
                project: decode(&c[2]),
                tag: decode(&c[3]),
                file: decode(&c[4]),
            })
            .ok_or_else(|| {
                Error::invalid_locator(format!("invalid GitLab release URL: {url}")).with_context(
                    "hint: use https://<host>/<namespace>/<project>/-/releases/<tag>/downloads/<file>",
                )
            })
    }

    /// The releases API URL describing this tag.
    pub fn release_api_url(&self) -> String {
        format!(
            "https://{}/api/v4/projects/{}/releases/{}",
            self.host,
            encode(&self.project),
            encode(&self.tag)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authfetch_core::ErrorKind;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("https://gitlab.com/acme/tools/-/raw/main/scripts/install.sh", "gitlab.com", "acme/tools", "main", "scripts/install.sh"; "gitlab com")]
    #[test_case("https://git.example.com/acme/tools/-/raw/v1.2.0/bin/tool", "git.example.com", "acme/tools", "v1.2.0", "bin/tool"; "self managed")]
    #[test_case("https://gitlab.com/group/sub/tools/-/raw/main/a%20b.txt", "gitlab.com", "group/sub/tools", "main", "a b.txt"; "nested group decoded")]
    #[test_case("https://gitlab.com/acme/tools/-/raw/main/Formula/tool.rb?inline=false", "gitlab.com", "acme/tools", "main", "Formula/tool.rb"; "web link query ignored")]
    #[test_case("https://git.example.com/acme/tools/-/raw/v1.2.0/bin/tool?ref_type=tags#L1", "git.example.com", "acme/tools", "v1.2.0", "bin/tool"; "self managed query and fragment ignored")]
    #[test_case("https://gitlab.com/api/v4/projects/acme%2Ftools/repository/files/scripts%2Finstall.sh/raw?ref=dev", "gitlab.com", "acme/tools", "dev", "scripts/install.sh"; "api form")]
    #[test_case("https://git.example.com/api/v4/projects/42/repository/files/README.md/raw", "git.example.com", "42", "main", "README.md"; "api form default ref")]
    fn test_parse_raw(url: &str, host: &str, project: &str, git_ref: &str, path: &str) {
        assert!(RawTarget::claims(url));
        let target = RawTarget::parse(url).unwrap();
        assert_eq!(
            target,
            RawTarget {
                host: host.to_string(),
                project: project.to_string(),
                path: path.to_string(),
                git_ref: git_ref.to_string(),
            }
        );
    }

    #[test]
    fn test_raw_and_api_form_build_same_url() {
        let raw = RawTarget::parse("https://gitlab.com/acme/tools/-/raw/main/scripts/install.sh")
            .unwrap();
        let api = RawTarget::parse(
            "https://gitlab.com/api/v4/projects/acme%2Ftools/repository/files/scripts%2Finstall.sh/raw?ref=main",
        )
        .unwrap();
        assert_eq!(raw.url(), api.url());
        assert_eq!(
            raw.url(),
            "https://gitlab.com/api/v4/projects/acme%2Ftools/repository/files/scripts%2Finstall.sh/raw?ref=main"
        );
    }

    #[test_case("https://gitlab.com/tools/-/raw/main/x"; "project without namespace")]
    #[test_case("https://gitlab.com/acme/tools/-/raw/main/"; "missing path")]
    #[test_case("https://gitlab.com/api/v4/projects/1/repository/files//raw"; "api missing path")]
    fn test_parse_raw_invalid(url: &str) {
        let err = RawTarget::parse(url).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidLocator);
    }

    #[test]
    fn test_parse_release() {
        let url = "https://gitlab.com/acme/tools/-/releases/v1.0.0/downloads/tool.tar.gz";
        assert!(ReleaseTarget::claims(url));
        let target = ReleaseTarget::parse(url).unwrap();
        assert_eq!(target.host, "gitlab.com");
        assert_eq!(target.project, "acme/tools");
        assert_eq!(target.tag, "v1.0.0");
        assert_eq!(target.file, "tool.tar.gz");
        assert_eq!(
            target.release_api_url(),
            "https://gitlab.com/api/v4/projects/acme%2Ftools/releases/v1.0.0"
        );

        let target = ReleaseTarget::parse(
            "https://git.example.com/group/sub/tools/-/releases/2024.1/downloads/bin/tool",
        )
        .unwrap();
        assert_eq!(target.host, "git.example.com");
        assert_eq!(target.project, "group/sub/tools");
        assert_eq!(target.file, "bin/tool");

        let err = ReleaseTarget::parse("https://gitlab.com/acme/tools/-/releases/v1.0.0")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidLocator);
    }

    #[test]
    fn test_claims() {
        assert!(!RawTarget::claims("https://github.com/acme/tools/releases/download/v1/t"));
        assert!(!ReleaseTarget::claims("https://gitlab.com/acme/tools/-/raw/main/x"));
        assert!(!RawTarget::claims("http://gitlab.com/acme/tools/-/raw/main/x"));
    }
}
