use crate::client_core::error::BoxError;
use async_trait::async_trait;
use bytes::Bytes;
use http::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use http::{Method, StatusCode};
use std::time::Duration;
use url::Url;

const APPLICATION_JSON: &str = "application/json";

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

impl HttpRequest {
    /// A request that expects JSON back. Bodies are sent as JSON as well.
    pub fn json(method: Method, url: Url, body: Option<Bytes>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
        if body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        }

        HttpRequest {
            method,
            url,
            headers,
            body,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Moves a request over the wire. `Err` means no HTTP response was received at all.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, BoxError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration, connect_timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::ClientBuilder::new()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .use_rustls_tls()
            .trust_dns(true)
            .build()?;

        Ok(ReqwestTransport { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let res = builder.send().await?;
        let status = res.status();
        let body = res.bytes().await?;

        Ok(HttpResponse { status, body })
    }
}
