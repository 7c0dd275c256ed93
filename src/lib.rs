#[cfg(feature = "api")]
pub mod api;
#[cfg(feature = "client-core")]
pub mod client_core;
#[cfg(feature = "common-utils")]
pub mod common_utils;
#[cfg(feature = "config-core")]
pub mod config_core;
#[cfg(feature = "console")]
pub mod console;
#[cfg(feature = "entities")]
pub mod entities;
