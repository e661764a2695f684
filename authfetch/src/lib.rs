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

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use authfetch_core::*;

#[cfg(feature = "default-context")]
mod context;
#[cfg(feature = "default-context")]
pub use context::default_context;

pub mod aws {
    pub use authfetch_aws_v4::*;
}

pub mod github {
    pub use authfetch_github::*;
}

pub mod gitlab {
    pub use authfetch_gitlab::*;
}

pub mod generic {
    pub use authfetch_generic::*;
}

mod strategy;
pub use strategy::Strategy;

mod dispatch;
pub use dispatch::{dispatch, parse_as};

mod resolve;
pub use resolve::{resolve_credential, CredentialBundle};

mod fetcher;
pub use fetcher::Fetcher;

mod report;
pub use report::{EnvironmentReport, ProviderReport, VariableStatus};
