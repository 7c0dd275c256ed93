mod api;
mod error;
#[cfg(test)]
pub(crate) mod testing;
mod transport;

pub use api::ApiClient;
pub use error::{BoxError, Error};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
