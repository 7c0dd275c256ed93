use http::{Method, StatusCode};
use url::Url;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{method} {url} failed: {source}")]
    Transport {
        method: Method,
        url: Url,
        #[source]
        source: BoxError,
    },

    #[error("{message}")]
    Api { code: StatusCode, message: String },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: Url,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode request body: {0}")]
    Encode(serde_json::Error),

    #[error("bad endpoint url `{0}`: cannot be used as a base")]
    Url(Url),
}

impl Error {
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Error::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Message for a non-success response whose body carries no usable `status`.
pub(crate) fn synthesize_message(
    method: &Method,
    url: &Url,
    code: StatusCode,
    body: &str,
) -> String {
    format!(
        "{} {} returned error: {} {}: {}",
        method,
        url,
        code.as_u16(),
        code.canonical_reason().unwrap_or(""),
        body
    )
}
