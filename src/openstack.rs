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

//! Cloud-level facade over the service clients.

use log::debug;
use reqwest::Client;
use static_assertions::assert_impl_all;

use crate::glance::{Glance, Image};
use crate::neutron::{Network, Neutron};
use crate::services::{IMAGE, NETWORK};
use crate::{CloudConfig, Error};

/// A cloud described by a `clouds.yaml` entry.
///
/// Service endpoints are taken from the `image_endpoint_override` and
/// `network_endpoint_override` options. A service without an endpoint is reported with
/// `InvalidConfig` when it is first used.
///
/// ```rust,no_run
/// # async fn example() -> Result<(), osdiscovery::Error> {
/// let os = osdiscovery::OpenStack::from_config("devstack")?;
/// for network in os.network_list().await? {
///     println!("{} {:?}", network.id, network.name);
/// }
/// # Ok(()) }
/// # #[tokio::main]
/// # async fn main() { example().await.unwrap(); }
/// ```
#[derive(Debug, Clone)]
pub struct OpenStack {
    cloud: CloudConfig,
    glance: Glance,
    neutron: Neutron,
}

assert_impl_all!(OpenStack: Send, Sync);

impl OpenStack {
    /// Create a facade for the cloud.
    pub fn new(cloud: CloudConfig) -> Result<OpenStack, Error> {
        OpenStack::new_with_client(Client::new(), cloud)
    }

    /// Create a facade for the cloud using the provided HTTP client.
    pub fn new_with_client(client: Client, cloud: CloudConfig) -> Result<OpenStack, Error> {
        let image = cloud.endpoint_config(&IMAGE)?;
        let network = cloud.endpoint_config(&NETWORK)?;
        debug!(
            "Creating cloud with image endpoint {:?} and network endpoint {:?}",
            image.as_ref().map(|c| c.url.as_str()),
            network.as_ref().map(|c| c.url.as_str())
        );
        Ok(OpenStack {
            glance: Glance::new_with_client(client.clone(), image),
            neutron: Neutron::new_with_client(client, network),
            cloud,
        })
    }

    /// Create a facade for the named cloud from `clouds.yaml`.
    pub fn from_config<S: AsRef<str>>(cloud_name: S) -> Result<OpenStack, Error> {
        OpenStack::new(CloudConfig::from_config(cloud_name)?)
    }

    /// Create a facade for the cloud named by `OS_CLOUD`.
    pub fn from_env() -> Result<OpenStack, Error> {
        OpenStack::new(CloudConfig::from_env()?)
    }

    /// Cloud configuration in use.
    #[inline]
    pub fn cloud(&self) -> &CloudConfig {
        &self.cloud
    }

    /// Image service client.
    #[inline]
    pub fn glance(&self) -> &Glance {
        &self.glance
    }

    /// Networking service client.
    #[inline]
    pub fn neutron(&self) -> &Neutron {
        &self.neutron
    }

    /// List images.
    #[inline]
    pub async fn image_list(&self) -> Result<Vec<Image>, Error> {
        self.glance.image_list().await
    }

    /// List networks.
    #[inline]
    pub async fn network_list(&self) -> Result<Vec<Network>, Error> {
        self.neutron.network_list().await
    }
}

#[cfg(test)]
mod test {
    use maplit::hashmap;
    use mockito::Server;

    use super::OpenStack;
    use crate::discovery::test::mock_root;
    use crate::neutron::test::{mock_networks, neutron_root};
    use crate::{CloudConfig, ErrorKind};

    fn cloud_with_network(url: String) -> CloudConfig {
        CloudConfig {
            region_name: Some("RegionOne".to_string()),
            options: hashmap! {
                "network_endpoint_override".to_string() => serde_yaml::Value::String(url),
            },
            ..CloudConfig::default()
        }
    }

    #[test]
    fn test_invalid_override() {
        let cloud = cloud_with_network("not a URL".to_string());
        let err = OpenStack::new(cloud).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    }

    #[tokio::test]
    async fn test_network_list() {
        let mut server = Server::new_async().await;
        let root = neutron_root(&server.url());
        let root_mock = mock_root(&mut server, &root, 1).await;
        let networks_mock = mock_networks(&mut server, 2).await;

        let os = OpenStack::new(cloud_with_network(server.url())).unwrap();
        let config = os.neutron().discovery().config().unwrap();
        assert_eq!(config.region.as_deref(), Some("RegionOne"));

        assert_eq!(os.network_list().await.unwrap().len(), 2);
        assert_eq!(os.network_list().await.unwrap().len(), 2);
        root_mock.assert_async().await;
        networks_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_image_list_without_endpoint() {
        let os = OpenStack::new(cloud_with_network("http://127.0.0.1:9696".to_string())).unwrap();
        let err = os.image_list().await.err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
        assert_eq!(err.to_string(), "An endpoint configuration is required.");
    }
}
