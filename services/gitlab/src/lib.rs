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

//! GitLab support for authfetch.
//!
//! - raw files: `https://<host>/<ns>/<project>/-/raw/<ref>/<path>` and the files API form
//!   `https://<host>/api/v4/projects/<id>/repository/files/<path>/raw`. Both are sent to the
//!   files API.
//! - release assets: `https://<host>/<ns>/<project>/-/releases/<tag>/downloads/<file>`,
//!   looked up through the releases API.
//!
//! Requests carry `PRIVATE-TOKEN: <token>`.

mod constants;
pub use constants::{GITLAB_PRIVATE_TOKEN, GITLAB_TOKEN, HOMEBREW_GITLAB_API_TOKEN};

mod credential;
pub use credential::Credential;

mod target;
pub use target::{RawTarget, ReleaseTarget};

mod build_request;
pub use build_request::{build_raw_request, build_release_request, find_release_asset};

mod provide_credential;
pub use provide_credential::*;
