// Copyright 2021 Dmitry Tantsur <dtantsur@protonmail.com>
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Asynchronous OpenStack service discovery.
//!
//! Clients for the image (Glance) and networking (Neutron) services that find the API version
//! they support in the service root document and resolve its endpoint.
//!
//! Version queries always go to the server, while the resolved endpoint is cached for the
//! lifetime of a client:
//!
//! ```rust,no_run
//! # async fn example() -> Result<(), osdiscovery::Error> {
//! let config = osdiscovery::EndpointConfig::new("http://192.168.99.99:9292")?;
//! let glance = osdiscovery::Glance::new(config);
//!
//! for version in glance.versions().await? {
//!     println!("{} ({:?})", version.id, version.status);
//! }
//!
//! // Only the first call hits the server.
//! let endpoint = glance.service_endpoint().await?;
//! assert_eq!(endpoint, glance.service_endpoint().await?);
//! # Ok(()) }
//! # #[tokio::main]
//! # async fn main() { example().await.unwrap(); }
//! ```

#![crate_name = "osdiscovery"]
#![crate_type = "lib"]
#![doc(html_root_url = "https://docs.rs/osdiscovery/0.1.0")]
// NOTE: we do not use generic deny(warnings) to avoid breakages with new
// versions of the compiler. Add more warnings here as you discover them.
// Taken from https://github.com/rust-unofficial/patterns/
#![deny(
    dead_code,
    improper_ctypes,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    trivial_casts,
    trivial_numeric_casts,
    unconditional_recursion,
    unsafe_code,
    unused,
    unused_allocation,
    unused_comparisons,
    unused_doc_comments,
    unused_import_braces,
    unused_parens,
    unused_qualifications,
    unused_results,
    while_true
)]
#![allow(
    clippy::new_ret_no_self,
    clippy::should_implement_trait,
    clippy::wrong_self_convention
)]

mod apiversion;
mod client;
pub mod common;
mod config;
pub mod discovery;
mod error;
pub mod glance;
pub mod neutron;
mod openstack;
pub mod services;
mod url;

pub use crate::apiversion::ApiVersion;
pub use crate::common::{Link, RootDocument, Version, VersionStatus};
pub use crate::config::{CloudConfig, EndpointConfig};
pub use crate::discovery::ServiceClient;
pub use crate::error::{Error, ErrorKind};
pub use crate::glance::{Glance, Image};
pub use crate::neutron::{Network, Neutron};
pub use crate::openstack::OpenStack;
