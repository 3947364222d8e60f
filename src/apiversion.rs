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

//! ApiVersion implementation.

use std::fmt;
use std::str::FromStr;

use super::{Error, ErrorKind};

/// API version (major, minor).
///
/// Parsed from version identifiers as they appear in root documents, e.g. `v2.3`.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct ApiVersion(pub u16, pub u16);

impl ApiVersion {
    /// Check whether a raw version identifier denotes this version.
    ///
    /// Identifiers that cannot be parsed never match.
    #[inline]
    pub fn matches_id<S: AsRef<str>>(&self, id: S) -> bool {
        ApiVersion::from_str(id.as_ref())
            .map(|parsed| parsed == *self)
            .unwrap_or(false)
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.0, self.1)
    }
}

fn parse_component(component: &str, message: &str) -> Result<u16, Error> {
    component
        .parse()
        .map_err(|_| Error::new(ErrorKind::InvalidResponse, message))
}

impl FromStr for ApiVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<ApiVersion, Error> {
        let version_part = s.strip_prefix('v').unwrap_or(s);
        let parts: Vec<&str> = version_part.split('.').collect();

        if parts.is_empty() || parts.len() > 2 {
            let msg = format!("Invalid API version: expected X.Y or X, got {}", s);
            return Err(Error::new(ErrorKind::InvalidResponse, msg));
        }

        let major = parse_component(parts[0], "First version component is not a number")?;

        let minor = if parts.len() == 2 {
            parse_component(parts[1], "Second version component is not a number")?
        } else {
            0
        };

        Ok(ApiVersion(major, minor))
    }
}
