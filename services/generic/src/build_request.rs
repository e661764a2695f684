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

use crate::{Credential, Target};
use authfetch_core::{AuthenticatedRequest, Result};
use http::header::AUTHORIZATION;

/// Build the request for `target`.
///
/// `headers` are appended after the credential, whatever its kind.
pub fn build_request(
    target: &Target,
    cred: &Credential,
    headers: &[(String, String)],
) -> Result<AuthenticatedRequest> {
    let req = AuthenticatedRequest::get(&target.url);
    let mut req = match cred {
        Credential::Bearer { token } => {
            req.sensitive_header(AUTHORIZATION.as_str(), &format!("Bearer {token}"))?
        }
        Credential::Basic { username, password } => req.basic_auth(username, password),
        Credential::Header { name, value } => req.sensitive_header(name, value)?,
        Credential::ApiKey { header, key } => req.sensitive_header(header, key)?,
    };

    for (name, value) in headers {
        req = req.append_header(name, value)?;
    }
    Ok(req)
}
