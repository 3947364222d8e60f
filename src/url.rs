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

//! Handy primitives for working with URLs.

use url::Url;

use crate::{Error, ErrorKind};

/// Check that the URL can be used as a service endpoint.
pub fn validate(url: &Url) -> Result<(), Error> {
    if url.cannot_be_a_base() || !url.has_host() {
        Err(Error::new(
            ErrorKind::InvalidConfig,
            format!("Invalid endpoint URL {}", url),
        ))
    } else {
        Ok(())
    }
}

/// Append path segments to the URL, dropping a trailing slash first.
#[allow(unused_results)]
pub fn extend<I>(mut url: Url, segments: I) -> Result<Url, Error>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    url.path_segments_mut()
        .map_err(|_| {
            Error::new(
                ErrorKind::InvalidInput,
                "Endpoint URL cannot be used as a base",
            )
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Upgrade an insecure URL to HTTPS if the base URL uses it on the same host.
pub fn match_scheme(base: &Url, mut url: Url) -> Url {
    if base.scheme() == "https" && url.scheme() == "http" && base.host() == url.host() {
        // Switching between two special schemes cannot fail.
        let _ = url.set_scheme("https");
    }
    url
}

#[cfg(test)]
mod test {
    use url::Url;

    use super::{extend, match_scheme, validate};

    #[test]
    fn test_extend() {
        let base = Url::parse("http://192.168.99.99:9292/v2/").unwrap();
        let res = extend(base, &["images"]).unwrap();
        assert_eq!(res.as_str(), "http://192.168.99.99:9292/v2/images");
    }

    #[test]
    fn test_extend_without_slash() {
        let base = Url::parse("https://example.com/v2.0").unwrap();
        let res = extend(base, &["networks"]).unwrap();
        assert_eq!(res.as_str(), "https://example.com/v2.0/networks");
    }

    #[test]
    fn test_validate() {
        assert!(validate(&Url::parse("http://example.com").unwrap()).is_ok());
        assert!(validate(&Url::parse("unix:/run/foo.socket").unwrap()).is_err());
        assert!(validate(&Url::parse("mailto:admin@example.com").unwrap()).is_err());
    }

    #[test]
    fn test_match_scheme() {
        let base = Url::parse("https://example.com/").unwrap();
        let upgraded = match_scheme(&base, Url::parse("http://example.com/v2/").unwrap());
        assert_eq!(upgraded.as_str(), "https://example.com/v2/");

        let other = match_scheme(&base, Url::parse("http://other.com/v2/").unwrap());
        assert_eq!(other.as_str(), "http://other.com/v2/");

        let plain = Url::parse("http://example.com/").unwrap();
        let kept = match_scheme(&plain, Url::parse("http://example.com/v2/").unwrap());
        assert_eq!(kept.as_str(), "http://example.com/v2/");
    }
}
