use crate::api::{
    DistributionsResponse, ErrorResponse, HealthResponse, InvalidationRecord,
    InvalidationRequest, API_PREFIX, HEALTH_SEGMENT, INVALIDATIONS_SEGMENT,
};
use crate::client_core::error::{synthesize_message, Error};
use crate::client_core::transport::{HttpRequest, ReqwestTransport, Transport};
use crate::entities::{DistributionName, InvalidationId};
use bytes::Bytes;
use http::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

#[derive(Clone)]
pub struct ApiClient {
    endpoint: Url,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

impl ApiClient {
    pub fn new(endpoint: &Url, timeout: Duration, connect_timeout: Duration) -> anyhow::Result<Self> {
        let transport = ReqwestTransport::new(timeout, connect_timeout)?;

        Ok(Self::with_transport(endpoint, Arc::new(transport))?)
    }

    pub fn with_transport(endpoint: &Url, transport: Arc<dyn Transport>) -> Result<Self, Error> {
        if endpoint.cannot_be_a_base() {
            return Err(Error::Url(endpoint.clone()));
        }

        Ok(ApiClient {
            endpoint: endpoint.clone(),
            transport,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn url<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url, Error> {
        let mut url = self.endpoint.clone();

        url.path_segments_mut()
            .map_err(|_| Error::Url(self.endpoint.clone()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    pub fn distributions_url(&self) -> Result<Url, Error> {
        self.url(API_PREFIX.iter().copied())
    }

    pub fn invalidations_url(&self, distribution: &DistributionName) -> Result<Url, Error> {
        self.url(
            API_PREFIX
                .iter()
                .copied()
                .chain([distribution.as_str(), INVALIDATIONS_SEGMENT].iter().copied()),
        )
    }

    pub fn invalidation_url(
        &self,
        distribution: &DistributionName,
        id: &InvalidationId,
    ) -> Result<Url, Error> {
        self.url(API_PREFIX.iter().copied().chain(
            [distribution.as_str(), INVALIDATIONS_SEGMENT, id.as_str()]
                .iter()
                .copied(),
        ))
    }

    /// Sends a JSON request and decodes a JSON answer.
    ///
    /// A non-success status becomes [`Error::Api`], with the message taken from the
    /// `status` field of the body when there is one.
    pub async fn request<B, T>(&self, method: Method, url: Url, body: Option<&B>) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = body
            .map(|b| serde_json::to_vec(b).map(Bytes::from))
            .transpose()
            .map_err(Error::Encode)?;

        debug!("{} {}", method, url);

        let res = self
            .transport
            .execute(HttpRequest::json(method.clone(), url.clone(), body))
            .await
            .map_err(|source| Error::Transport {
                method: method.clone(),
                url: url.clone(),
                source,
            })?;

        if !res.status.is_success() {
            let message = match serde_json::from_slice::<ErrorResponse>(&res.body) {
                Ok(ErrorResponse { status }) => status,
                Err(_) => synthesize_message(
                    &method,
                    &url,
                    res.status,
                    &String::from_utf8_lossy(&res.body),
                ),
            };

            warn!("{} {} returned {}: {}", method, url, res.status, message);

            return Err(Error::Api {
                code: res.status,
                message,
            });
        }

        serde_json::from_slice(&res.body).map_err(|source| Error::Decode { url, source })
    }

    pub async fn list_distributions(&self) -> Result<Vec<DistributionName>, Error> {
        let url = self.distributions_url()?;
        let resp: DistributionsResponse = self.request::<(), _>(Method::GET, url, None).await?;

        Ok(resp
            .distributions
            .into_iter()
            .filter_map(|name| match DistributionName::from_str(&name) {
                Ok(distribution) => Some(distribution),
                Err(e) => {
                    warn!("skipping distribution {:?}: {}", name, e);
                    None
                }
            })
            .collect())
    }

    pub async fn create_invalidation(
        &self,
        distribution: &DistributionName,
        paths: &[String],
    ) -> Result<InvalidationRecord, Error> {
        let url = self.invalidations_url(distribution)?;
        let body = InvalidationRequest {
            paths: paths.to_vec(),
        };

        self.request(Method::POST, url, Some(&body)).await
    }

    pub async fn get_invalidation(
        &self,
        distribution: &DistributionName,
        id: &InvalidationId,
    ) -> Result<InvalidationRecord, Error> {
        let url = self.invalidation_url(distribution, id)?;

        self.request::<(), _>(Method::GET, url, None).await
    }

    pub async fn health(&self) -> Result<HealthResponse, Error> {
        let url = self.url(std::iter::once(HEALTH_SEGMENT))?;

        self.request::<(), _>(Method::GET, url, None).await
    }
}
