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

//! Image service (Glance) client.

use chrono::{DateTime, FixedOffset};
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use static_assertions::assert_impl_all;
use url::Url;

use crate::common::Version;
use crate::discovery::ServiceClient;
use crate::services::{GenericService, IMAGE};
use crate::{EndpointConfig, Error};

/// An image.
#[derive(Clone, Debug, Deserialize)]
pub struct Image {
    /// Image ID.
    pub id: String,
    /// Image name.
    #[serde(default)]
    pub name: Option<String>,
    /// Image status, e.g. `active` or `queued`.
    pub status: String,
    /// Image visibility, e.g. `public` or `private`.
    #[serde(default)]
    pub visibility: Option<String>,
    /// Image size in bytes.
    #[serde(default)]
    pub size: Option<u64>,
    /// Disk format, e.g. `qcow2`.
    #[serde(default)]
    pub disk_format: Option<String>,
    /// Container format, e.g. `bare`.
    #[serde(default)]
    pub container_format: Option<String>,
    /// Whether the image is protected from deletion.
    #[serde(default)]
    pub protected: bool,
    /// Image tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Creation date and time.
    #[serde(default)]
    pub created_at: Option<DateTime<FixedOffset>>,
    /// Last update date and time.
    #[serde(default)]
    pub updated_at: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Deserialize)]
struct ImagesRoot {
    images: Vec<Image>,
}

/// Client for the image service.
///
/// Speaks version 2.3 of the Image API. See [ServiceClient](../discovery/struct.ServiceClient.html)
/// for the caching rules.
///
/// ```rust,no_run
/// # async fn example() -> Result<(), osdiscovery::Error> {
/// let config = osdiscovery::EndpointConfig::new("http://192.168.99.99:9292")?;
/// let glance = osdiscovery::Glance::new(config);
/// println!("Image API at {}", glance.service_endpoint().await?);
/// # Ok(()) }
/// # #[tokio::main]
/// # async fn main() { example().await.unwrap(); }
/// ```
#[derive(Debug, Clone)]
pub struct Glance {
    inner: ServiceClient<GenericService>,
}

assert_impl_all!(Glance: Send, Sync);

impl Glance {
    /// Create an image service client.
    pub fn new<C>(config: C) -> Glance
    where
        C: Into<Option<EndpointConfig>>,
    {
        Glance {
            inner: ServiceClient::new(IMAGE, config),
        }
    }

    /// Create an image service client without a configuration.
    ///
    /// Every call that needs the endpoint will fail with `InvalidConfig`.
    #[inline]
    pub fn new_without_config() -> Glance {
        Glance {
            inner: ServiceClient::new_without_config(IMAGE),
        }
    }

    /// Create an image service client using the provided HTTP client.
    pub fn new_with_client<C>(client: Client, config: C) -> Glance
    where
        C: Into<Option<EndpointConfig>>,
    {
        Glance {
            inner: ServiceClient::new_with_client(client, IMAGE, config),
        }
    }

    /// List all versions of the image API, not cached.
    #[inline]
    pub async fn versions(&self) -> Result<Vec<Version>, Error> {
        self.inner.versions().await
    }

    /// Get the supported version of the image API, not cached.
    #[inline]
    pub async fn version(&self) -> Result<Version, Error> {
        self.inner.version().await
    }

    /// Get the image API endpoint, cached for the lifetime of this client.
    #[inline]
    pub async fn service_endpoint(&self) -> Result<Url, Error> {
        self.inner.service_endpoint().await
    }

    /// List images.
    pub async fn image_list(&self) -> Result<Vec<Image>, Error> {
        let root: ImagesRoot = self.inner.get_resource(&["images"]).await?;
        debug!("Received {} images", root.images.len());
        Ok(root.images)
    }

    /// Access the underlying discovery client.
    #[inline]
    pub fn discovery(&self) -> &ServiceClient<GenericService> {
        &self.inner
    }
}
