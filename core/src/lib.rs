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

//! Core components for fetching provider-authenticated artifacts.
//!
//! This crate provides the foundational types and traits shared by every authfetch
//! service crate.
//!
//! ## Overview
//!
//! - **Context**: holds implementations for HTTP sending, downloading, environment access
//!   and command execution. Everything that touches the outside world goes through it.
//! - **Traits**: [`ProvideCredential`] for credential sources and [`SigningCredential`] for
//!   validating what they return. [`ProvideCredentialChain`] tries sources in order.
//! - **Locator**: the URL plus [`FetchOptions`] a caller wants fetched.
//! - **Requests**: [`AuthenticatedRequest`] built by strategies and [`FetchRequest`], the
//!   transport-ready descriptor handed to [`Download`].
//! - **Errors**: one [`Error`] type with an [`ErrorKind`] per failure family.
//!
//! ## Example
//!
//! ```no_run
//! use authfetch_core::{Context, ProvideCredential, Result, SigningCredential};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Token(String);
//!
//! impl SigningCredential for Token {
//!     fn is_valid(&self) -> bool {
//!         !self.0.is_empty()
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct EnvToken;
//!
//! #[async_trait]
//! impl ProvideCredential for EnvToken {
//!     type Credential = Token;
//!
//!     async fn provide_credential(&self, ctx: &Context) -> Result<Option<Token>> {
//!         Ok(ctx.env_var("MY_TOKEN").map(Token))
//!     }
//! }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Time manipulation utilities
//! - [`utils`]: Redaction and masking of secrets

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::{
    CommandExecute, CommandOutput, Context, Download, Env, HttpSend, NoopCommandExecute,
    NoopDownload, NoopEnv, NoopHttpSend, OsEnv, RequestTimeout, StaticEnv,
};

mod error;
pub use error::{Error, ErrorKind, Result};

mod api;
pub use api::{ProvideCredential, SigningCredential};
mod chain;
pub use chain::ProvideCredentialChain;

mod locator;
pub use locator::{AuthKind, FetchOptions, Locator, StrategyKind};
mod request;
pub use request::{AuthenticatedRequest, FetchRequest};
