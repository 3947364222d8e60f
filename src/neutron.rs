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

//! Networking service (Neutron) client.

use log::debug;
use reqwest::Client;
use serde::Deserialize;
use static_assertions::assert_impl_all;
use url::Url;

use crate::common::Version;
use crate::discovery::ServiceClient;
use crate::services::{GenericService, NETWORK};
use crate::{EndpointConfig, Error};

/// A network.
#[derive(Clone, Debug, Deserialize)]
pub struct Network {
    /// Network ID.
    pub id: String,
    /// Network name.
    #[serde(default)]
    pub name: Option<String>,
    /// Network status, e.g. `ACTIVE`.
    #[serde(default)]
    pub status: Option<String>,
    /// Administrative state of the network.
    #[serde(default = "default_true")]
    pub admin_state_up: bool,
    /// Whether the network is shared between projects.
    #[serde(default)]
    pub shared: bool,
    /// Whether the network is external.
    #[serde(rename = "router:external", default)]
    pub external: bool,
    /// Owning project.
    #[serde(default)]
    pub project_id: Option<String>,
    /// IDs of subnets of this network.
    #[serde(default)]
    pub subnets: Vec<String>,
    /// Maximum transmission unit.
    #[serde(default)]
    pub mtu: Option<u32>,
}

#[inline]
fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct NetworksRoot {
    networks: Vec<Network>,
}

/// Client for the networking service.
///
/// Speaks version 2.0 of the Networking API and follows the same discovery and caching rules as
/// [Glance](../glance/struct.Glance.html).
#[derive(Debug, Clone)]
pub struct Neutron {
    inner: ServiceClient<GenericService>,
}

assert_impl_all!(Neutron: Send, Sync);

impl Neutron {
    /// Create a networking service client.
    pub fn new<C>(config: C) -> Neutron
    where
        C: Into<Option<EndpointConfig>>,
    {
        Neutron {
            inner: ServiceClient::new(NETWORK, config),
        }
    }

    /// Create a networking service client without a configuration.
    #[inline]
    pub fn new_without_config() -> Neutron {
        Neutron {
            inner: ServiceClient::new_without_config(NETWORK),
        }
    }

    /// Create a networking service client using the provided HTTP client.
    pub fn new_with_client<C>(client: Client, config: C) -> Neutron
    where
        C: Into<Option<EndpointConfig>>,
    {
        Neutron {
            inner: ServiceClient::new_with_client(client, NETWORK, config),
        }
    }

    /// List all versions of the networking API, not cached.
    #[inline]
    pub async fn versions(&self) -> Result<Vec<Version>, Error> {
        self.inner.versions().await
    }

    /// Get the supported version of the networking API, not cached.
    #[inline]
    pub async fn version(&self) -> Result<Version, Error> {
        self.inner.version().await
    }

    /// Get the networking API endpoint, cached for the lifetime of this client.
    #[inline]
    pub async fn service_endpoint(&self) -> Result<Url, Error> {
        self.inner.service_endpoint().await
    }

    /// List networks.
    pub async fn network_list(&self) -> Result<Vec<Network>, Error> {
        let root: NetworksRoot = self.inner.get_resource(&["networks"]).await?;
        debug!("Received {} networks", root.networks.len());
        Ok(root.networks)
    }

    /// Access the underlying discovery client.
    #[inline]
    pub fn discovery(&self) -> &ServiceClient<GenericService> {
        &self.inner
    }
}
