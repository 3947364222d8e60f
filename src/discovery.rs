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

//! Version discovery and endpoint resolution for one service.

use log::{debug, trace, warn};
use reqwest::Client;
use static_assertions::assert_impl_all;
use tokio::sync::OnceCell;
use url::Url;

use crate::client::get_json;
use crate::common::{RootDocument, Version};
use crate::services::{GenericService, ServiceType};
use crate::{EndpointConfig, Error, ErrorKind};

/// Discovery client for one service endpoint.
///
/// The root document is fetched anew for every `versions` and `version` call, since the set of
/// versions may change under a rolling upgrade. The endpoint returned by `service_endpoint` is
/// resolved once and then served from a cache owned by this instance.
///
/// # Note
///
/// Clones do not share the endpoint cache, only the HTTP connection pool.
#[derive(Debug)]
pub struct ServiceClient<Srv> {
    service: Srv,
    config: Option<EndpointConfig>,
    client: Client,
    endpoint: OnceCell<Url>,
}

assert_impl_all!(ServiceClient<GenericService>: Send, Sync);

impl<Srv: Clone> Clone for ServiceClient<Srv> {
    /// Clone the client removing the cached endpoint but keeping the configuration.
    fn clone(&self) -> ServiceClient<Srv> {
        ServiceClient {
            service: self.service.clone(),
            config: self.config.clone(),
            client: self.client.clone(),
            endpoint: OnceCell::new(),
        }
    }
}

impl<Srv: ServiceType> ServiceClient<Srv> {
    /// Create a client for the service.
    ///
    /// A missing configuration is not an error here: every call that needs the endpoint will
    /// fail with `InvalidConfig` instead.
    pub fn new<C>(service: Srv, config: C) -> ServiceClient<Srv>
    where
        C: Into<Option<EndpointConfig>>,
    {
        ServiceClient::new_with_client(Client::new(), service, config)
    }

    /// Create a client for the service without an endpoint configuration.
    ///
    /// All calls that need the endpoint will fail. Useful mostly for testing error handling.
    #[inline]
    pub fn new_without_config(service: Srv) -> ServiceClient<Srv> {
        ServiceClient::new(service, None::<EndpointConfig>)
    }

    /// Create a client for the service using the provided HTTP client.
    pub fn new_with_client<C>(client: Client, service: Srv, config: C) -> ServiceClient<Srv>
    where
        C: Into<Option<EndpointConfig>>,
    {
        ServiceClient {
            service,
            config: config.into(),
            client,
            endpoint: OnceCell::new(),
        }
    }

    /// Service this client talks to.
    #[inline]
    pub fn service(&self) -> &Srv {
        &self.service
    }

    /// Endpoint configuration of this client.
    #[inline]
    pub fn config(&self) -> Result<&EndpointConfig, Error> {
        self.config.as_ref().ok_or_else(Error::new_config_required)
    }

    /// Get a reference to the inner HTTP client.
    #[inline]
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// The cached endpoint, if it has been resolved already.
    #[inline]
    pub fn cached_endpoint(&self) -> Option<&Url> {
        self.endpoint.get()
    }

    /// Fetch the root document of the service.
    ///
    /// Issues exactly one request per call.
    pub async fn fetch_root(&self) -> Result<RootDocument, Error> {
        let config = self.config()?;
        debug!(
            "Fetching {} root document from {}",
            self.service.catalog_type(),
            config
        );
        let root: RootDocument = get_json(&self.client, config.url.clone()).await?;
        trace!(
            "Available versions for {} service: {:?}",
            self.service.catalog_type(),
            root.versions
        );
        Ok(root)
    }

    /// List all versions the service exposes, in the server order.
    ///
    /// Not cached.
    pub async fn versions(&self) -> Result<Vec<Version>, Error> {
        self.fetch_root().await.map(|root| root.versions)
    }

    /// Find the version this client supports.
    ///
    /// Not cached. Fails with `IncompatibleApiVersion` if the server does not list it.
    pub async fn version(&self) -> Result<Version, Error> {
        let wanted = self.service.supported_version();
        let version = self.fetch_root().await?.into_version(wanted)?;
        if !version.is_stable() {
            warn!(
                "Using version {} of {} API that is not marked as stable (status {})",
                version.id,
                self.service.catalog_type(),
                version.status.as_str()
            );
        }
        Ok(version)
    }

    /// Get the endpoint URL of the supported version.
    ///
    /// The first successful call stores the result, later calls return it without any network
    /// activity. Concurrent first calls wait for a single resolution. Failures are not cached.
    pub async fn service_endpoint(&self) -> Result<Url, Error> {
        if let Some(endpoint) = self.endpoint.get() {
            trace!(
                "Using cached endpoint {} for {} service",
                endpoint,
                self.service.catalog_type()
            );
            return Ok(endpoint.clone());
        }

        debug!(
            "No cached endpoint for service {}, resolving",
            self.service.catalog_type()
        );
        self.endpoint
            .get_or_try_init(|| self.resolve_endpoint())
            .await
            .map(Clone::clone)
    }

    /// Build a URL of a resource under the service endpoint.
    pub async fn resource_url<I>(&self, segments: I) -> Result<Url, Error>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let endpoint = self.service_endpoint().await?;
        crate::url::extend(endpoint, segments)
    }

    /// Fetch JSON from a resource under the service endpoint.
    pub(crate) async fn get_resource<T, I>(&self, segments: I) -> Result<T, Error>
    where
        T: serde::de::DeserializeOwned,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let url = self.resource_url(segments).await?;
        get_json(&self.client, url).await
    }

    async fn resolve_endpoint(&self) -> Result<Url, Error> {
        let base = self.config()?.url.clone();
        let version = self.version().await?;
        let link = version.self_link(&base)?;
        let endpoint = crate::url::match_scheme(&base, link);
        if endpoint.cannot_be_a_base() || !endpoint.has_host() {
            return Err(Error::new(
                ErrorKind::InvalidResponse,
                format!(
                    "Invalid URL {} received for service {}",
                    endpoint,
                    self.service.catalog_type()
                ),
            ));
        }
        debug!(
            "Resolved endpoint {} (version {}) for {} service",
            endpoint,
            version.id,
            self.service.catalog_type()
        );
        Ok(endpoint)
    }
}
