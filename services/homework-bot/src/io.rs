//! HTTP client abstraction for testability

use std::time::Duration;

use async_trait::async_trait;

/// HTTP response from a request
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Abstraction over HTTP client for dependency injection
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait HttpClient: Send + Sync {
    /// Send a GET request with extra headers and query parameters.
    /// The body of a non-2xx response is not read and comes back empty.
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        query: &[(&str, &str)],
    ) -> crate::Result<HttpResponse>;

    /// Send a POST request with form-encoded body
    async fn post_form(&self, url: &str, params: &[(&str, &str)]) -> crate::Result<HttpResponse>;
}

/// Production HTTP client using reqwest
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Build a client that gives up on a request after `request_timeout`
    /// and on connection setup after `connect_timeout`.
    pub fn new(request_timeout: Duration, connect_timeout: Duration) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .user_agent(concat!("homework-bot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| crate::HomeworkBotError::Http(format!("Building HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        query: &[(&str, &str)],
    ) -> crate::Result<HttpResponse> {
        tracing::debug!("GET {}", url);
        let mut request = self.client.get(url).query(query);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request
            .send()
            .await
            .map_err(|e| crate::HomeworkBotError::Http(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("GET {} -> {} (body not read)", url, status.as_u16());
            return Ok(HttpResponse {
                status: status.as_u16(),
                body: String::new(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| crate::HomeworkBotError::Http(format!("Reading response body: {}", e)))?;

        tracing::debug!("GET {} -> {} ({} bytes)", url, status.as_u16(), body.len());
        Ok(HttpResponse {
            status: status.as_u16(),
            body,
        })
    }

    async fn post_form(&self, url: &str, params: &[(&str, &str)]) -> crate::Result<HttpResponse> {
        // Telegram URLs embed the bot token, so only the host is logged.
        let host = reqwest::Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_default();
        tracing::debug!("POST to {}", host);
        let response = self
            .client
            .post(url)
            .form(params)
            .send()
            .await
            .map_err(|e| {
                crate::HomeworkBotError::Http(format!(
                    "POST to {} failed: {}",
                    host,
                    e.without_url()
                ))
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| crate::HomeworkBotError::Http(format!("Reading response body: {}", e)))?;

        tracing::debug!("POST to {} -> {} ({} bytes)", host, status, body.len());
        Ok(HttpResponse { status, body })
    }
}
