//! Transport seam between the palette client and the network

use crate::error::{PaletteError, PaletteResult};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::sync::Arc;
use std::time::Duration;

/// Performs a single GET and returns the response body
///
/// [`HttpTransport`] is the production implementation; tests substitute
/// canned bodies or failures.
#[async_trait]
pub trait PaletteTransport: Send + Sync {
    async fn get(&self, url: &Url) -> PaletteResult<String>;
}

#[async_trait]
impl<T: PaletteTransport + ?Sized> PaletteTransport for Arc<T> {
    async fn get(&self, url: &Url) -> PaletteResult<String> {
        (**self).get(url).await
    }
}

/// reqwest-backed transport
///
/// No timeout is applied unless one is configured, leaving the transport
/// default in charge.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
    timeout: Option<Duration>,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

#[async_trait]
impl PaletteTransport for HttpTransport {
    async fn get(&self, url: &Url) -> PaletteResult<String> {
        let mut request = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PaletteError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_defaults_to_no_timeout() {
        assert_eq!(HttpTransport::new().timeout(), None);
    }

    #[test]
    fn test_transport_with_timeout() {
        let transport = HttpTransport::new().with_timeout(Duration::from_secs(3));
        assert_eq!(transport.timeout(), Some(Duration::from_secs(3)));
    }
}
