// src/core/net.rs
// Blocking HTTPS GET returning decoded JSON.

use std::time::Duration;

use reqwest::blocking::{Client, ClientBuilder};
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::consts::USER_AGENT;
use crate::error::SourceError;

#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    base: Url,
}

impl HttpClient {
    /// `base` is the API root, e.g. `https://host/api`. A trailing slash is ignored.
    pub fn new(base: &str) -> Result<Self, SourceError> {
        Self::with_builder(base, Client::builder())
    }

    fn with_builder(base: &str, builder: ClientBuilder) -> Result<Self, SourceError> {
        let client = builder.user_agent(USER_AGENT).build()?;
        let bad = || SourceError::BadBase(s!(base));
        let url = Url::parse(base.trim_end_matches('/')).map_err(|_| bad())?;
        if url.cannot_be_a_base() {
            return Err(bad());
        }
        Ok(Self { client, base: url })
    }

    /// Loopback client for tests; ignores proxy settings from the environment.
    #[cfg(test)]
    pub(crate) fn direct(base: &str) -> Self {
        Self::with_builder(base, Client::builder().no_proxy()).unwrap()
    }

    /// Append `segments` to the base path. Each segment is percent-encoded,
    /// so `/`, `?` and `#` inside an identifier stay inside that segment.
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // Cannot fail: `new` rejects cannot-be-a-base URLs.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET the endpoint at `segments` with optional query pairs and decode the
    /// body as `T`. Non-2xx responses are errors; the body is decoded
    /// separately so decode failures carry the URL.
    pub fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<T, SourceError> {
        let url = self.url(segments);
        debug!(%url, "GET");

        let resp = self.client.get(url.clone()).query(query).timeout(timeout).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Status { url: url.into(), status: status.as_u16() });
        }

        let body = resp.bytes()?;
        serde_json::from_slice(&body).map_err(|source| SourceError::Decode { url: url.into(), source })
    }
}
