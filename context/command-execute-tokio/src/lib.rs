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

//! Tokio-based command execution for authfetch.
//!
//! This crate provides `TokioCommandExecute`, an async command executor that implements
//! the `CommandExecute` trait from `authfetch_core` using Tokio's process operations.
//!
//! It is what lets the GitHub and GitLab credential chains ask locally installed CLIs
//! (`gh`, `glab`) for the tokens they already hold.
//!
//! ## Example
//!
//! ```no_run
//! use authfetch_core::Context;
//! use authfetch_command_execute_tokio::TokioCommandExecute;
//!
//! # async fn example() {
//! let ctx = Context::new().with_command_execute(TokioCommandExecute);
//!
//! match ctx.command_execute("gh", &["auth", "token"]).await {
//!     Ok(output) if output.success() => println!("token: {}", output.stdout_trimmed()),
//!     Ok(_) => println!("gh is installed but not logged in"),
//!     Err(e) => eprintln!("gh is not available: {e}"),
//! }
//! # }
//! ```

use async_trait::async_trait;
use authfetch_core::{CommandExecute, CommandOutput, Error, Result};
use std::process::Stdio;
use tokio::process::Command;

/// Tokio-based implementation of the `CommandExecute` trait.
///
/// A program that cannot be spawned (not installed, not executable) is reported as an
/// error so that callers can treat it as "not available".
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioCommandExecute;

#[async_trait]
impl CommandExecute for TokioCommandExecute {
    async fn command_execute(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        log::debug!("executing command: {program} {}", args.join(" "));

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                Error::unexpected(format!("failed to execute command '{program}'")).with_source(e)
            })?;

        Ok(CommandOutput {
            status: output.status.code().unwrap_or(-1),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}
