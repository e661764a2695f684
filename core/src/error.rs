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

use std::fmt;
use thiserror::Error;

/// The error type for authfetch operations.
///
/// Every error carries a [`ErrorKind`], a human readable message, the name of the
/// strategy that was selected when it happened (if any) and a list of context
/// lines. Context lines starting with `hint:` tell the operator how to fix the
/// problem.
#[derive(Error, Debug)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    strategy: Option<&'static str>,
    context: Vec<String>,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No strategy family recognises the locator.
    UnrecognizedLocator,

    /// A strategy family claimed the locator but its fields could not be extracted.
    InvalidLocator,

    /// No credential source produced a usable credential.
    MissingCredentials,

    /// The declared auth kind is unknown, or detection found no signal.
    UnknownAuthKind,

    /// A release lookup found no asset matching the requested file.
    AssetNotFound,

    /// A pre-resolution API call returned malformed or error data.
    UpstreamApi,

    /// The HTTP transport failed.
    Transport,

    /// The request descriptor could not be built (invalid header values, etc.)
    RequestInvalid,

    /// Unexpected errors.
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            strategy: None,
            context: Vec::new(),
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Add a context line.
    ///
    /// Lines starting with `hint:` are remediation steps for the operator.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Record the strategy that was selected when this error happened.
    ///
    /// The first recorded strategy is kept.
    pub fn with_strategy(mut self, strategy: &'static str) -> Self {
        if self.strategy.is_none() {
            self.strategy = Some(strategy);
        }
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the error message without context.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the strategy that was selected, if any.
    pub fn strategy(&self) -> Option<&'static str> {
        self.strategy
    }

    /// Get the context lines.
    pub fn context(&self) -> &[String] {
        &self.context
    }

    /// Check if this error is caused by the locator itself.
    ///
    /// Locator errors are raised before any network activity and never go away on retry.
    pub fn is_locator_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::UnrecognizedLocator | ErrorKind::InvalidLocator
        )
    }
}

// Convenience constructors
impl Error {
    /// Create an unrecognized locator error
    pub fn unrecognized_locator(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnrecognizedLocator, message)
    }

    /// Create an invalid locator error
    pub fn invalid_locator(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidLocator, message)
    }

    /// Create a missing credentials error
    pub fn missing_credentials(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingCredentials, message)
    }

    /// Create an unknown auth kind error
    pub fn unknown_auth_kind(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownAuthKind, message)
    }

    /// Create an asset not found error
    pub fn asset_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AssetNotFound, message)
    }

    /// Create an upstream api error
    pub fn upstream_api(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UpstreamApi, message)
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Create a request invalid error
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(strategy) = self.strategy {
            write!(f, "[{strategy}] ")?;
        }
        write!(f, "{}: {}", self.kind, self.message)?;
        for line in &self.context {
            write!(f, "\n  {line}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::UnrecognizedLocator => write!(f, "unrecognized locator"),
            ErrorKind::InvalidLocator => write!(f, "invalid locator"),
            ErrorKind::MissingCredentials => write!(f, "missing credentials"),
            ErrorKind::UnknownAuthKind => write!(f, "unknown auth kind"),
            ErrorKind::AssetNotFound => write!(f, "asset not found"),
            ErrorKind::UpstreamApi => write!(f, "upstream api error"),
            ErrorKind::Transport => write!(f, "transport error"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderName> for Error {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::transport(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::upstream_api(format!("malformed json: {err}")).with_source(anyhow::Error::from(err))
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
