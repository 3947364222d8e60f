// Copyright 2018 Dmitry Tantsur <dtantsur@protonmail.com>
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

//! Endpoint and cloud configuration.

use std::collections::HashMap;
use std::env;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::services::ServiceType;
use crate::{Error, ErrorKind};

const CLOUDS_YAML: &str = "clouds.yaml";

/// Configuration of one service endpoint.
///
/// A client is bound to exactly one endpoint configuration for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EndpointConfig {
    /// Base URL of the service, the one serving the root document.
    pub url: Url,
    /// Region the endpoint belongs to.
    ///
    /// Informational: the URL is used as is, the region only shows up in diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Endpoint interface (public, internal or admin), informational like `region`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
}

impl EndpointConfig {
    /// Create an endpoint configuration from a base URL.
    pub fn new<U: AsRef<str>>(url: U) -> Result<EndpointConfig, Error> {
        let url = Url::parse(url.as_ref()).map_err(|e| {
            Error::new(
                ErrorKind::InvalidConfig,
                format!("Invalid endpoint URL {}: {}", url.as_ref(), e),
            )
        })?;
        crate::url::validate(&url)?;
        Ok(EndpointConfig {
            url,
            region: None,
            interface: None,
        })
    }

    /// Add a region to the configuration.
    #[inline]
    pub fn with_region<S: Into<String>>(mut self, region: S) -> EndpointConfig {
        self.region = Some(region.into());
        self
    }

    /// Add an endpoint interface to the configuration.
    #[inline]
    pub fn with_interface<S: Into<String>>(mut self, interface: S) -> EndpointConfig {
        self.interface = Some(interface.into());
        self
    }
}

impl fmt::Display for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.url)?;
        match (&self.region, &self.interface) {
            (Some(region), Some(interface)) => {
                write!(f, " (region {}, interface {})", region, interface)
            }
            (Some(region), None) => write!(f, " (region {})", region),
            (None, Some(interface)) => write!(f, " (interface {})", interface),
            (None, None) => Ok(()),
        }
    }
}

/// Configuration of a cloud as found in `clouds.yaml`.
///
/// Only the bits relevant to service discovery are interpreted, everything else is kept in
/// `options`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CloudConfig {
    /// Region of the cloud.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,
    /// Endpoint interface to use.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    /// Remaining options, including `<service>_endpoint_override`.
    #[serde(flatten)]
    pub options: HashMap<String, serde_yaml::Value>,
}

#[derive(Debug, Deserialize)]
struct Root {
    clouds: HashMap<String, CloudConfig>,
}

fn find_config<S: AsRef<str>>(filename: S) -> Option<PathBuf> {
    let filename = filename.as_ref();
    let current = Path::new(filename);
    if current.is_file() {
        match current.canonicalize() {
            Ok(val) => return Some(val),
            Err(e) => warn!("Cannot canonicalize {:?}: {}", current, e),
        }
    }

    if let Some(mut home) = dirs::home_dir() {
        home.push(format!(".config/openstack/{}", filename));
        if home.is_file() {
            return Some(home);
        }
    } else {
        warn!("Cannot find home directory");
    }

    let abs = PathBuf::from(format!("/etc/openstack/{}", filename));
    if abs.is_file() {
        Some(abs)
    } else {
        None
    }
}

impl CloudConfig {
    /// Load the named cloud from `clouds.yaml` in the standard locations.
    ///
    /// The file is looked up in the current directory, then in `~/.config/openstack` and
    /// finally in `/etc/openstack`.
    pub fn from_config<S: AsRef<str>>(cloud_name: S) -> Result<CloudConfig, Error> {
        let path = find_config(CLOUDS_YAML).ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidConfig,
                format!("{} was not found in any location", CLOUDS_YAML),
            )
        })?;
        CloudConfig::from_path(path, cloud_name)
    }

    /// Load the named cloud from the given configuration file.
    pub fn from_path<P, S>(path: P, cloud_name: S) -> Result<CloudConfig, Error>
    where
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        let path = path.as_ref();
        debug!("Reading cloud configuration from {:?}", path);
        let file = File::open(path).map_err(|e| {
            Error::new(
                ErrorKind::InvalidConfig,
                format!("Cannot read {:?}: {}", path, e),
            )
        })?;
        let mut root: Root = serde_yaml::from_reader(file).map_err(|e| {
            Error::new(
                ErrorKind::InvalidConfig,
                format!("Cannot parse {:?}: {}", path, e),
            )
        })?;

        let name = cloud_name.as_ref();
        root.clouds
            .remove(name)
            .ok_or_else(|| Error::new(ErrorKind::InvalidConfig, format!("No such cloud: {}", name)))
    }

    /// Load the cloud named by the `OS_CLOUD` environment variable.
    pub fn from_env() -> Result<CloudConfig, Error> {
        let cloud_name = env::var("OS_CLOUD").map_err(|_| {
            Error::new(
                ErrorKind::InvalidConfig,
                "Required environment variable OS_CLOUD is not provided",
            )
        })?;
        CloudConfig::from_config(cloud_name)
    }

    /// Build the endpoint configuration for a service.
    ///
    /// Returns `None` if the cloud has no endpoint for the service.
    pub fn endpoint_config<Srv: ServiceType>(
        &self,
        service: &Srv,
    ) -> Result<Option<EndpointConfig>, Error> {
        let option = service.endpoint_override_option();
        let value = match self.options.get(&option) {
            Some(value) => value,
            None => {
                debug!("No {} in the cloud configuration", option);
                return Ok(None);
            }
        };

        let url = value.as_str().ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidConfig,
                format!("{} must be a string, got {:?}", option, value),
            )
        })?;

        let mut config = EndpointConfig::new(url)?;
        config.region = self.region_name.clone();
        config.interface = self.interface.clone();
        Ok(Some(config))
    }
}
