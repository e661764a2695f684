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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Env values used in gitlab services.
pub const HOMEBREW_GITLAB_API_TOKEN: &str = "HOMEBREW_GITLAB_API_TOKEN";
pub const GITLAB_PRIVATE_TOKEN: &str = "GITLAB_PRIVATE_TOKEN";
/// Read by `glab` itself, consulted after the CLI.
pub const GITLAB_TOKEN: &str = "GITLAB_TOKEN";

// Delegated CLI.
pub const GLAB_PROGRAM: &str = "glab";
pub const GLAB_TOKEN_ARGS: [&str; 3] = ["config", "get", "token"];

pub const PRIVATE_TOKEN: &str = "PRIVATE-TOKEN";
pub const GITLAB_COM: &str = "gitlab.com";
/// Ref used for API-form URLs without `?ref=`.
pub const DEFAULT_REF: &str = "main";

/// AsciiSet for GitLab path parameters: project paths and file paths travel as one
/// segment, so `/` is encoded too.
pub static GITLAB_PATH_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
