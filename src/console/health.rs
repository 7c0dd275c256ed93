use crate::api::HealthResponse;
use crate::console::error::OperationError;
use crate::console::presenter::Detail;
use crate::console::Console;
use serde_json::Value;
use tracing::{error, info};

pub const HEALTH_HEADER: &str = "Health";
pub const HEALTH_ERROR_HEADER: &str = "Health Error";

impl Console {
    /// Asks the backend whether it is alive and logs the answer.
    pub async fn check_health(&self) -> Result<HealthResponse, OperationError> {
        let _busy = self.busy.acquire();
        let endpoint = Detail::Fields(vec![("Endpoint", self.client.endpoint().to_string())]);

        match self.client.health().await {
            Ok(health) => {
                info!("backend health: {}", health.status);
                self.presenter.append(
                    HEALTH_HEADER,
                    endpoint,
                    Some(Value::String(health.status.clone())),
                );

                Ok(health)
            }
            Err(e) => {
                error!("health check failed: {}", e);
                self.presenter.append(
                    HEALTH_ERROR_HEADER,
                    endpoint,
                    Some(Value::String(e.to_string())),
                );

                Err(e.into())
            }
        }
    }
}
