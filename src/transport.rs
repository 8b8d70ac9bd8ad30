//! HTTP access to the `showmore` endpoint.

use std::time::Duration;

use log::debug;
use thiserror::Error;

/// Failures at the network layer. These end a run early but keep what was
/// already collected.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Performs a single GET and returns the response body.
pub trait PageTransport {
    fn get(&mut self, url: &str) -> Result<String, TransportError>;
}

impl<T: PageTransport + ?Sized> PageTransport for &mut T {
    fn get(&mut self, url: &str) -> Result<String, TransportError> {
        (**self).get(url)
    }
}

/// Blocking `reqwest` client.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// `timeout` of `None` keeps the client's default.
    pub fn new(user_agent: &str, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::blocking::Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl PageTransport for HttpTransport {
    fn get(&mut self, url: &str) -> Result<String, TransportError> {
        debug!("GET {}", url);
        let request_failed = |e: reqwest::Error| TransportError::Request {
            url: url.to_string(),
            source: Box::new(e),
        };

        let response = self.client.get(url).send().map_err(request_failed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(request_failed)
    }
}
