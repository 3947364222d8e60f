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

//! Version discovery documents.

use serde::de::{DeserializeOwned, Error as DeserError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use url::Url;

use crate::{ApiVersion, Error, ErrorKind};

/// Link relation pointing at the resource itself.
pub const SELF_REL: &str = "self";

/// A link to a resource.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub struct Link {
    /// Resource URL, possibly relative to the document it came from.
    pub href: String,
    /// Relationship between the referencing and the referenced object.
    pub rel: String,
}

impl Link {
    /// Resolve the link against the URL of the document it was found in.
    pub fn resolve(&self, base: &Url) -> Result<Url, Error> {
        base.join(&self.href).map_err(|e| {
            Error::new(
                ErrorKind::InvalidResponse,
                format!("Invalid link {} received: {}", self.href, e),
            )
        })
    }
}

/// Status of a major version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VersionStatus {
    /// The current version.
    Current,
    /// Supported version (that is not current).
    Supported,
    /// Deprecated version.
    Deprecated,
    /// Experimental version.
    Experimental,
    /// Unknown version status.
    #[default]
    Unknown,
}

impl VersionStatus {
    /// If the version is considered stable.
    ///
    /// We assume that unknown statuses are also stable.
    #[inline]
    pub fn is_stable(&self) -> bool {
        !matches!(self, VersionStatus::Deprecated | VersionStatus::Experimental)
    }

    /// Canonical upper-case name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionStatus::Current => "CURRENT",
            VersionStatus::Supported => "SUPPORTED",
            VersionStatus::Deprecated => "DEPRECATED",
            VersionStatus::Experimental => "EXPERIMENTAL",
            VersionStatus::Unknown => "UNKNOWN",
        }
    }
}

impl<T> From<T> for VersionStatus
where
    T: Into<String>,
{
    fn from(value: T) -> VersionStatus {
        match value.into().to_uppercase().as_ref() {
            "CURRENT" => VersionStatus::Current,
            "SUPPORTED" | "STABLE" => VersionStatus::Supported,
            "DEPRECATED" => VersionStatus::Deprecated,
            "EXPERIMENTAL" => VersionStatus::Experimental,
            _ => VersionStatus::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for VersionStatus {
    fn deserialize<D>(deserializer: D) -> Result<VersionStatus, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: String = Deserialize::deserialize(deserializer)?;
        Ok(value.into())
    }
}

impl Serialize for VersionStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// A single API version as returned by a version discovery endpoint.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Version {
    /// Version identifier, e.g. `v2.3`.
    pub id: String,
    /// Version status.
    #[serde(deserialize_with = "empty_as_default", default)]
    pub status: VersionStatus,
    /// Links to this API version.
    ///
    /// A missing or `null` array is treated as an empty one.
    #[serde(deserialize_with = "empty_as_default", default)]
    pub links: Vec<Link>,
}

impl Version {
    /// Whether a version is considered stable according to its status.
    #[inline]
    pub fn is_stable(&self) -> bool {
        self.status.is_stable()
    }

    /// Parsed API version, if the identifier is well-formed.
    #[inline]
    pub fn api_version(&self) -> Option<ApiVersion> {
        self.id.parse().ok()
    }

    /// Find the link pointing at this version's own address.
    ///
    /// Relative links are resolved against `base`, the URL of the root document.
    pub fn self_link(&self, base: &Url) -> Result<Url, Error> {
        if self.links.is_empty() {
            return Err(Error::new(
                ErrorKind::EndpointNotFound,
                format!("Version {} does not provide any links", self.id),
            ));
        }

        self.links
            .iter()
            .find(|link| link.rel == SELF_REL)
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::EndpointNotFound,
                    format!("Version {} is missing a self link", self.id),
                )
            })?
            .resolve(base)
    }
}

/// Root document of a service: the list of its API versions.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct RootDocument {
    /// Available versions in the order reported by the server.
    pub versions: Vec<Version>,
}

impl RootDocument {
    /// Find the version with the given identifier.
    ///
    /// The first matching entry wins if the server reports duplicates.
    pub fn find(&self, wanted: ApiVersion) -> Option<&Version> {
        self.versions.iter().find(|v| wanted.matches_id(&v.id))
    }

    /// Consume the document and return the version with the given identifier.
    pub fn into_version(self, wanted: ApiVersion) -> Result<Version, Error> {
        let available = self
            .versions
            .iter()
            .map(|v| v.id.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        self.versions
            .into_iter()
            .find(|v| wanted.matches_id(&v.id))
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::IncompatibleApiVersion,
                    format!(
                        "API version v{} is not supported by the server (available: [{}])",
                        wanted, available
                    ),
                )
            })
    }
}

/// Deserialize a value where empty string or `null` is replaced by `Default` value.
pub fn empty_as_default<'de, D, T>(des: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(des)?;
    match value {
        Value::Null => Ok(T::default()),
        Value::String(ref s) if s.is_empty() => Ok(T::default()),
        _ => serde_json::from_value(value).map_err(D::Error::custom),
    }
}

#[cfg(test)]
mod test {
    use url::Url;

    use super::{Link, RootDocument, Version, VersionStatus};
    use crate::{ApiVersion, ErrorKind};

    fn version(id: &str, status: VersionStatus, links: Vec<Link>) -> Version {
        Version {
            id: id.to_string(),
            status,
            links,
        }
    }

    fn link(rel: &str, href: &str) -> Link {
        Link {
            href: href.to_string(),
            rel: rel.to_string(),
        }
    }

    fn base() -> Url {
        Url::parse("http://192.168.99.99:9292").unwrap()
    }

    #[test]
    fn test_version_status_stability() {
        assert!(VersionStatus::Current.is_stable());
        assert!(VersionStatus::Supported.is_stable());
        assert!(VersionStatus::Unknown.is_stable());
        assert!(!VersionStatus::Deprecated.is_stable());
        assert!(!VersionStatus::Experimental.is_stable());
    }

    #[test]
    fn test_version_status_from_string() {
        assert_eq!(VersionStatus::from("SUPPORTED"), VersionStatus::Supported);
        assert_eq!(VersionStatus::from("Stable"), VersionStatus::Supported);
        assert_eq!(VersionStatus::from("CURRENT"), VersionStatus::Current);
        assert_eq!(VersionStatus::from("deprecated"), VersionStatus::Deprecated);
        assert_eq!(
            VersionStatus::from("EXPERIMENTAL"),
            VersionStatus::Experimental
        );
        assert_eq!(VersionStatus::from("banana!"), VersionStatus::Unknown);
    }

    const GLANCE_ONE: &str = r#"{
    "status": "CURRENT",
    "id": "v2.3",
    "links": [
        {"href": "http://192.168.99.99:9292/v2/", "rel": "self"}
    ]
}"#;

    #[test]
    fn test_version_parse() {
        let ver: Version = serde_json::from_str(GLANCE_ONE).unwrap();
        assert_eq!(ver.id, "v2.3");
        assert_eq!(ver.status, VersionStatus::Current);
        assert_eq!(ver.api_version(), Some(ApiVersion(2, 3)));
        assert_eq!(
            ver.self_link(&base()).unwrap().as_str(),
            "http://192.168.99.99:9292/v2/"
        );
    }

    #[test]
    fn test_version_parse_without_links_and_status() {
        let ver: Version = serde_json::from_str(r#"{"id": "v2.0", "status": ""}"#).unwrap();
        assert!(ver.links.is_empty());
        assert_eq!(ver.status, VersionStatus::Unknown);
    }

    #[test]
    fn test_self_link_no_links() {
        let ver = version("v2.3", VersionStatus::Current, Vec::new());
        let err = ver.self_link(&base()).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::EndpointNotFound);
    }

    #[test]
    fn test_self_link_missing() {
        let ver = version(
            "v2.3",
            VersionStatus::Current,
            vec![link("describedby", "https://docs.openstack.org/")],
        );
        let err = ver.self_link(&base()).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::EndpointNotFound);
    }

    #[test]
    fn test_self_link_picks_self_relation() {
        let ver = version(
            "v2.3",
            VersionStatus::Current,
            vec![
                link("describedby", "https://docs.openstack.org/"),
                link("self", "https://example.com/v2/"),
            ],
        );
        assert_eq!(
            ver.self_link(&base()).unwrap().as_str(),
            "https://example.com/v2/"
        );
    }

    #[test]
    fn test_self_link_relative() {
        let ver = version("v1.0", VersionStatus::Deprecated, vec![link("self", "/v1/")]);
        assert_eq!(
            ver.self_link(&base()).unwrap().as_str(),
            "http://192.168.99.99:9292/v1/"
        );
    }

    #[test]
    fn test_self_link_invalid() {
        let ver = version(
            "v2.3",
            VersionStatus::Current,
            vec![link("self", "http://[::1/v2/")],
        );
        let err = ver.self_link(&base()).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidResponse);
    }

    #[test]
    fn test_version_parse_null_links_and_status() {
        let ver: Version =
            serde_json::from_str(r#"{"id": "v2.3", "status": null, "links": null}"#).unwrap();
        assert!(ver.links.is_empty());
        assert_eq!(ver.status, VersionStatus::Unknown);
        let err = ver.self_link(&base()).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::EndpointNotFound);
    }

    #[test]
    fn test_root_document_tolerates_relative_links() {
        let root: RootDocument = serde_json::from_str(
            r#"{"versions": [
                {"id": "v2.3", "links": [{"href": "http://192.168.99.99:9292/v2/", "rel": "self"}]},
                {"id": "v1.0", "links": [{"href": "/v1/", "rel": "self"}]}
            ]}"#,
        )
        .unwrap();
        let ver = root.into_version(ApiVersion(2, 3)).unwrap();
        assert_eq!(ver.id, "v2.3");
    }

    #[test]
    fn test_into_version_first_match_wins() {
        let root = RootDocument {
            versions: vec![
                version(
                    "v2.2",
                    VersionStatus::Supported,
                    vec![link("self", "https://example.com/old/")],
                ),
                version(
                    "v2.3",
                    VersionStatus::Current,
                    vec![link("self", "https://example.com/first/")],
                ),
                version(
                    "v2.3",
                    VersionStatus::Current,
                    vec![link("self", "https://example.com/second/")],
                ),
            ],
        };
        assert!(root.find(ApiVersion(2, 3)).is_some());
        let ver = root.into_version(ApiVersion(2, 3)).unwrap();
        assert_eq!(
            ver.self_link(&base()).unwrap().as_str(),
            "https://example.com/first/"
        );
    }

    #[test]
    fn test_into_version_unsupported() {
        let root = RootDocument {
            versions: vec![version("v2.2", VersionStatus::Supported, Vec::new())],
        };
        let err = root.into_version(ApiVersion(2, 3)).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::IncompatibleApiVersion);
        assert!(err.to_string().contains("v2.2"));
    }

    #[test]
    fn test_root_document_preserves_order() {
        let root: RootDocument = serde_json::from_str(
            r#"{"versions": [{"id": "v1.0"}, {"id": "v2.3"}, {"id": "v2.1"}]}"#,
        )
        .unwrap();
        let ids: Vec<_> = root.versions.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["v1.0", "v2.3", "v2.1"]);
    }
}
