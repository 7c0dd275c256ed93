use crate::console::error::OperationError;
use crate::console::ports::Field;
use crate::console::presenter::Detail;
use crate::console::Console;
use crate::entities::DistributionName;
use serde_json::Value;
use tracing::{error, info};

pub const CATALOG_ERROR_HEADER: &str = "Error Populating Distributions";

const SELECTORS: [Field; 2] = [Field::CreateDistribution, Field::GetDistribution];

impl Console {
    /// Fills both distribution selectors from the catalog endpoint.
    pub async fn load_distributions(&self) -> Result<Vec<DistributionName>, OperationError> {
        let _busy = self.busy.acquire();

        match self.client.list_distributions().await {
            Ok(distributions) => {
                for distribution in &distributions {
                    for field in SELECTORS.iter() {
                        self.ports
                            .add_option(*field, distribution.as_str(), distribution.as_str());
                    }
                }
                info!("loaded {} distributions", distributions.len());

                Ok(distributions)
            }
            Err(e) => {
                error!("could not load distributions: {}", e);
                self.presenter.append(
                    CATALOG_ERROR_HEADER,
                    Detail::Empty,
                    Some(Value::String(e.to_string())),
                );

                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::client_core::testing::FakeTransport;
    use crate::client_core::ApiClient;
    use crate::config_core::NavOrder;
    use crate::console::ports::Indicator;
    use crate::console::testing::{RecordingUi, UiEvent};
    use http::StatusCode;
    use std::sync::Arc;

    fn setup() -> (Arc<FakeTransport>, Arc<RecordingUi>, Console) {
        let transport = Arc::new(FakeTransport::default());
        let ui = Arc::new(RecordingUi::default());
        let client =
            ApiClient::with_transport(&"http://localhost:8080/".parse().unwrap(), transport.clone())
                .unwrap();
        let console = Console::new(client, ui.clone(), NavOrder::MostRecentFirst);

        (transport, ui, console)
    }

    #[tokio::test]
    async fn fills_both_selectors() {
        let (transport, ui, console) = setup();
        transport.respond(StatusCode::OK, r#"{"distributions":["www","assets"]}"#);

        let loaded = console.load_distributions().await.unwrap();

        assert_eq!(loaded.len(), 2);
        let expected = vec![
            ("www".to_string(), "www".to_string()),
            ("assets".to_string(), "assets".to_string()),
        ];
        assert_eq!(ui.options(Field::CreateDistribution), expected);
        assert_eq!(ui.options(Field::GetDistribution), expected);
        assert!(ui.entries().is_empty());
        assert_eq!(
            ui.events(),
            vec![
                UiEvent::Visible(Indicator::Loading, true),
                UiEvent::Visible(Indicator::Loading, false),
            ]
        );
    }

    #[tokio::test]
    async fn failure_is_logged_and_indicator_released() {
        let (transport, ui, console) = setup();
        transport.respond(
            StatusCode::UNAUTHORIZED,
            "User is not entitled to the CloudFront Invalidation service\n",
        );

        let err = console.load_distributions().await.err().unwrap();

        assert!(!err.is_validation());
        assert!(ui.options(Field::CreateDistribution).is_empty());
        assert!(!ui.visible(Indicator::Loading));

        let entries = ui.entries();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].header.starts_with(CATALOG_ERROR_HEADER));
        assert_eq!(entries[0].detail_html, "");
        assert!(entries[0]
            .payload_text
            .as_deref()
            .unwrap()
            .contains("401 Unauthorized"));
    }

    #[tokio::test]
    async fn transport_failure_is_logged() {
        let (transport, ui, console) = setup();
        transport.fail("connection refused");

        console.load_distributions().await.err().unwrap();

        assert!(ui.entries()[0]
            .payload_text
            .as_deref()
            .unwrap()
            .contains("connection refused"));
        assert!(!console.is_busy());
    }
}
