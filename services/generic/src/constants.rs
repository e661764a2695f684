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

// Env values used in generic authenticated downloads.
pub const HOMEBREW_BEARER_TOKEN: &str = "HOMEBREW_BEARER_TOKEN";
pub const HOMEBREW_API_KEY: &str = "HOMEBREW_API_KEY";
pub const HOMEBREW_API_KEY_HEADER: &str = "HOMEBREW_API_KEY_HEADER";
pub const HOMEBREW_AUTH_USER: &str = "HOMEBREW_AUTH_USER";
pub const HOMEBREW_AUTH_PASSWORD: &str = "HOMEBREW_AUTH_PASSWORD";
pub const HOMEBREW_AUTH_HEADER: &str = "HOMEBREW_AUTH_HEADER";
pub const HOMEBREW_AUTH_VALUE: &str = "HOMEBREW_AUTH_VALUE";

pub const DEFAULT_API_KEY_HEADER: &str = "X-API-Key";
