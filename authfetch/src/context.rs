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

use authfetch_command_execute_tokio::TokioCommandExecute;
use authfetch_core::{Context, OsEnv};
use authfetch_http_send_reqwest::ReqwestHttpSend;

/// Create a [`Context`] wired to the real world.
///
/// - HTTP and downloads: [`ReqwestHttpSend`]
/// - environment: [`OsEnv`]
/// - external CLIs: [`TokioCommandExecute`]
pub fn default_context() -> Context {
    let http = ReqwestHttpSend::default();
    Context::new()
        .with_http_send(http.clone())
        .with_download(http)
        .with_env(OsEnv)
        .with_command_execute(TokioCommandExecute)
}
