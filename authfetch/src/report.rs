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

use crate::{aws, generic, github, gitlab};
use authfetch_core::utils::mask;
use authfetch_core::Context;
use std::fmt::{self, Display, Formatter};

/// The credential variables each provider reads, in report order.
const PROVIDERS: [(&str, &[&str]); 4] = [
    ("GitHub", &[github::HOMEBREW_GITHUB_API_TOKEN]),
    (
        "GitLab",
        &[
            gitlab::HOMEBREW_GITLAB_API_TOKEN,
            gitlab::GITLAB_PRIVATE_TOKEN,
            gitlab::GITLAB_TOKEN,
        ],
    ),
    (
        "AWS S3",
        &[
            aws::AWS_ACCESS_KEY_ID,
            aws::AWS_SECRET_ACCESS_KEY,
            aws::AWS_SESSION_TOKEN,
            aws::AWS_REGION,
            aws::HOMEBREW_S3_PRESIGNED_URL,
        ],
    ),
    (
        "Generic Auth",
        &[
            generic::HOMEBREW_BEARER_TOKEN,
            generic::HOMEBREW_API_KEY,
            generic::HOMEBREW_API_KEY_HEADER,
            generic::HOMEBREW_AUTH_USER,
            generic::HOMEBREW_AUTH_PASSWORD,
            generic::HOMEBREW_AUTH_HEADER,
            generic::HOMEBREW_AUTH_VALUE,
        ],
    ),
];

/// Whether one variable is set, with its value masked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableStatus {
    /// Variable name.
    pub name: &'static str,
    /// First four characters followed by `*`, or `None` when unset.
    pub masked: Option<String>,
}

/// The variables of one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderReport {
    /// Provider display name.
    pub provider: &'static str,
    /// Variable states in the order the provider reads them.
    pub variables: Vec<VariableStatus>,
}

/// EnvironmentReport lists which credential variables are set, without revealing them.
///
/// ```
/// use authfetch::{Context, EnvironmentReport, StaticEnv};
///
/// let ctx = Context::new().with_env(StaticEnv::from_pairs([("HOMEBREW_GITHUB_API_TOKEN", "ghp_abcdef")]));
/// let report = EnvironmentReport::collect(&ctx);
/// assert!(report.to_string().contains("HOMEBREW_GITHUB_API_TOKEN = ghp_******"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentReport {
    /// One entry per provider.
    pub providers: Vec<ProviderReport>,
}

impl EnvironmentReport {
    /// Read every known variable through `ctx`.
    pub fn collect(ctx: &Context) -> Self {
        let providers = PROVIDERS
            .iter()
            .map(|&(provider, vars)| ProviderReport {
                provider,
                variables: vars
                    .iter()
                    .map(|&name| VariableStatus {
                        name,
                        masked: ctx.env_var(name).map(|v| mask(&v)),
                    })
                    .collect(),
            })
            .collect();
        Self { providers }
    }
}

impl Display for EnvironmentReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Environment Variable Status:")?;
        write!(f, "{}", "-".repeat(40))?;
        for p in &self.providers {
            write!(f, "\n\n{}:", p.provider)?;
            for v in &p.variables {
                match &v.masked {
                    Some(masked) => write!(f, "\n  ✓ {} = {masked}", v.name)?,
                    None => write!(f, "\n  ✗ {} = (not set)", v.name)?,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authfetch_core::StaticEnv;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_collect_masks_values() {
        let ctx = Context::new().with_env(StaticEnv::from_pairs([
            ("GITLAB_PRIVATE_TOKEN", "glpat-1234567890"),
            ("AWS_REGION", "us"),
        ]));
        let report = EnvironmentReport::collect(&ctx);

        assert_eq!(
            report.providers.iter().map(|p| p.provider).collect::<Vec<_>>(),
            ["GitHub", "GitLab", "AWS S3", "Generic Auth"]
        );
        assert_eq!(
            report.providers[1].variables[1],
            VariableStatus {
                name: "GITLAB_PRIVATE_TOKEN",
                masked: Some("glpa************".to_string()),
            }
        );
        assert_eq!(
            report.providers[2].variables[3].masked.as_deref(),
            Some("us")
        );

        let text = report.to_string();
        assert!(text.contains("  ✗ HOMEBREW_GITHUB_API_TOKEN = (not set)"));
        assert!(text.contains("  ✓ GITLAB_PRIVATE_TOKEN = glpa************"));
        assert!(!text.contains("1234567890"));
    }
}
