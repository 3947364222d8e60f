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

//! Low-level HTTP helpers.

use std::collections::HashMap;

use log::trace;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::{Error, ErrorKind};

#[derive(Debug, Deserialize)]
struct Message {
    message: Option<String>,
    faultstring: Option<String>,
    title: Option<String>,
}

impl From<Message> for Option<String> {
    fn from(value: Message) -> Option<String> {
        value.message.or(value.faultstring).or(value.title)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorResponse {
    Map(HashMap<String, Message>),
    Message(Message),
}

fn extract_message(text: String) -> String {
    serde_json::from_str::<ErrorResponse>(&text)
        .ok()
        .and_then(|body| match body {
            ErrorResponse::Map(map) => map.into_iter().next().and_then(|(_k, v)| v.into()),
            ErrorResponse::Message(msg) => msg.into(),
        })
        .unwrap_or(text)
}

/// Check for OpenStack errors in the response.
pub async fn check(response: Response) -> Result<Response, Error> {
    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        let message = extract_message(response.text().await?);
        trace!("HTTP request returned {}; error: {}", status, message);
        Err(Error::new(status.into(), message).with_status(status))
    } else {
        trace!(
            "HTTP request to {} returned {}",
            response.url(),
            response.status()
        );
        Ok(response)
    }
}

/// Issue one GET request and parse the JSON response.
///
/// Transport failures are reported as `ProtocolError`, a body that does not match `T` as
/// `InvalidResponse`.
pub async fn get_json<T>(client: &Client, url: Url) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    trace!("Sending HTTP GET request to {}", url);
    let response = client
        .get(url.clone())
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| Error::new(ErrorKind::ProtocolError, e.to_string()))?;
    let body = check(response).await?.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        Error::new(
            ErrorKind::InvalidResponse,
            format!("Cannot parse response from {}: {}", url, e),
        )
    })
}

#[cfg(test)]
mod test_extract_message {
    use super::extract_message;

    #[test]
    fn test_plain() {
        let msg = "<html><body>I failed</body></html>";
        let result = extract_message(msg.to_string());
        assert_eq!(result, msg);
    }

    #[test]
    fn test_simple_message() {
        let msg = r#"{"message": "I failed"}"#;
        let result = extract_message(msg.to_string());
        assert_eq!(result, "I failed");
    }

    #[test]
    fn test_nested_message() {
        let msg = r#"{"NeutronError": {"message": "Network not found"}}"#;
        let result = extract_message(msg.to_string());
        assert_eq!(result, "Network not found");
    }

    #[test]
    fn test_title() {
        let msg = r#"{"title": "Unauthorized"}"#;
        let result = extract_message(msg.to_string());
        assert_eq!(result, "Unauthorized");
    }
}
