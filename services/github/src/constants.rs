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

// Env values used in github services.
pub const HOMEBREW_GITHUB_API_TOKEN: &str = "HOMEBREW_GITHUB_API_TOKEN";

// Delegated CLI.
pub const GH_PROGRAM: &str = "gh";
pub const GH_TOKEN_ARGS: [&str; 2] = ["auth", "token"];

// Hosts.
pub const RAW_HOST: &str = "raw.githubusercontent.com";
pub const WEB_HOST: &str = "github.com";
pub const API_HOST: &str = "api.github.com";

// Media types.
pub const ACCEPT_GITHUB_V3_JSON: &str = "application/vnd.github.v3+json";
pub const ACCEPT_OCTET_STREAM: &str = "application/octet-stream";
