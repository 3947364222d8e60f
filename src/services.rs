// Copyright 2019 Dmitry Tantsur <dtantsur@protonmail.com>
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

//! OpenStack service types.

use std::fmt::Debug;

use crate::ApiVersion;

/// Trait representing a service type.
pub trait ServiceType: Debug {
    /// Service type as known to the catalog and to `clouds.yaml`.
    fn catalog_type(&self) -> &'static str;

    /// The exact API version this client speaks.
    fn supported_version(&self) -> ApiVersion;

    /// Name of the `clouds.yaml` option overriding the endpoint.
    fn endpoint_override_option(&self) -> String {
        format!("{}_endpoint_override", self.catalog_type().replace('-', "_"))
    }
}

/// A generic service with a fixed API version.
#[derive(Copy, Clone, Debug)]
pub struct GenericService {
    catalog_type: &'static str,
    version: ApiVersion,
}

impl GenericService {
    /// Create a new generic service.
    pub const fn new(catalog_type: &'static str, version: ApiVersion) -> GenericService {
        GenericService {
            catalog_type,
            version,
        }
    }
}

impl ServiceType for GenericService {
    fn catalog_type(&self) -> &'static str {
        self.catalog_type
    }

    fn supported_version(&self) -> ApiVersion {
        self.version
    }
}

/// Image service (Glance).
pub const IMAGE: GenericService = GenericService::new("image", ApiVersion(2, 3));

/// Networking service (Neutron).
pub const NETWORK: GenericService = GenericService::new("network", ApiVersion(2, 0));

#[cfg(test)]
mod test {
    use super::{GenericService, ServiceType, IMAGE, NETWORK};
    use crate::ApiVersion;

    #[test]
    fn test_builtin_services() {
        assert_eq!(IMAGE.catalog_type(), "image");
        assert_eq!(IMAGE.supported_version(), ApiVersion(2, 3));
        assert_eq!(NETWORK.catalog_type(), "network");
        assert_eq!(NETWORK.supported_version(), ApiVersion(2, 0));
    }

    #[test]
    fn test_endpoint_override_option() {
        assert_eq!(IMAGE.endpoint_override_option(), "image_endpoint_override");
        let srv = GenericService::new("object-store", ApiVersion(1, 0));
        assert_eq!(
            srv.endpoint_override_option(),
            "object_store_endpoint_override"
        );
    }
}
