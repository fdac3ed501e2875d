use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;

use crate::error::Error;

/// Capability the client needs from HTTP: perform a GET, return the body.
///
/// The default implementation is [`ReqwestTransport`]; tests swap in mocks to
/// inject bodies and failures without a network.
#[async_trait]
pub trait HttpTransport: Send + Sync + Debug {
    async fn get(&self, url: &str) -> Result<String, Error>;
}

/// `reqwest`-backed transport used outside of tests.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<String, Error> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        // Reading the body to completion releases the connection on every path.
        response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))
    }
}
