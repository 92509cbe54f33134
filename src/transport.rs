use std::time::Duration;

use reqwest::Client;

use crate::{AuthError, TransportResponse};

/// Implementations must send credentials (the server-side session cookie);
/// the client never attaches a body or a bearer header itself.
pub trait Transport: Send + Sync {
    fn post(&self, url: &str) -> impl Future<Output = Result<TransportResponse, AuthError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self, AuthError> {
        let mut builder = Client::builder().cookie_store(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
        })
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

impl Transport for HttpTransport {
    async fn post(&self, url: &str) -> Result<TransportResponse, AuthError> {
        let response = self.http.post(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok(TransportResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}
