use crate::api::InvalidationRecord;
use crate::client_core;
use crate::console::busy::{BusyGuard, BusyIndicator};
use crate::console::error::{OperationError, ValidationError};
use crate::console::input::{parse_distribution, parse_invalidation_id, parse_paths};
use crate::console::ports::{Field, UiPorts};
use crate::console::presenter::Detail;
use crate::console::state::{Command, OperationState};
use crate::console::Console;
use serde_json::Value;
use std::future::Future;
use tracing::{error, info};

pub type Outcome = Result<InvalidationRecord, OperationError>;

/// UI affordances held for the duration of one request.
///
/// Dropping it clears the consumed input, re-enables the button and then releases the
/// loading indicator, whatever the outcome was.
struct Submission<'a> {
    ports: &'a dyn UiPorts,
    command: Command,
    _busy: BusyGuard,
}

impl<'a> Submission<'a> {
    fn begin(ports: &'a dyn UiPorts, command: Command, busy: &BusyIndicator) -> Self {
        ports.set_enabled(command.button(), false);
        let busy = busy.acquire();

        Submission {
            ports,
            command,
            _busy: busy,
        }
    }
}

impl Drop for Submission<'_> {
    fn drop(&mut self) {
        self.ports.set_value(self.command.input_field(), "");
        self.ports.set_enabled(self.command.button(), true);
    }
}

impl Console {
    pub async fn create_invalidation(&self) -> Outcome {
        let command = Command::Create;
        self.command_state(command)
            .transition(OperationState::Validating);

        let input = parse_paths(&self.ports.value(Field::CreatePaths)).and_then(|paths| {
            parse_distribution(&self.ports.value(command.distribution_field()))
                .map(|distribution| (distribution, paths))
        });
        let (distribution, paths) = match input {
            Ok(input) => input,
            Err(e) => return self.reject(command, e),
        };

        let detail = Detail::Fields(vec![
            ("Distribution", distribution.to_string()),
            ("Paths", paths.join(",")),
        ]);

        self.submit(
            command,
            detail,
            self.client.create_invalidation(&distribution, &paths),
        )
        .await
    }

    pub async fn get_invalidation(&self) -> Outcome {
        let command = Command::Get;
        self.command_state(command)
            .transition(OperationState::Validating);

        let input = parse_invalidation_id(&self.ports.value(Field::GetInvalidationId)).and_then(
            |id| {
                parse_distribution(&self.ports.value(command.distribution_field()))
                    .map(|distribution| (distribution, id))
            },
        );
        let (distribution, id) = match input {
            Ok(input) => input,
            Err(e) => return self.reject(command, e),
        };

        let detail = Detail::Fields(vec![
            ("Distribution", distribution.to_string()),
            ("Invalidation ID", id.to_string()),
        ]);

        self.submit(
            command,
            detail,
            self.client.get_invalidation(&distribution, &id),
        )
        .await
    }

    fn reject(&self, command: Command, err: ValidationError) -> Outcome {
        info!("{} rejected: {}", command, err);

        self.presenter.append(
            command.error_header(),
            Detail::Message(err.to_string()),
            None,
        );

        let state = self.command_state(command);
        state.transition(OperationState::Failed);
        state.transition(OperationState::Idle);

        Err(err.into())
    }

    async fn submit<F>(&self, command: Command, detail: Detail, request: F) -> Outcome
    where
        F: Future<Output = Result<InvalidationRecord, client_core::Error>>,
    {
        let state = self.command_state(command);

        let result = {
            let _submission = Submission::begin(&*self.ports, command, &self.busy);
            state.transition(OperationState::Submitting);

            let result = request.await;
            match &result {
                Ok(record) => {
                    info!("{} succeeded", command);
                    self.presenter
                        .append(command.header(), detail, Some(record.clone()));
                    state.transition(OperationState::Succeeded);
                }
                Err(e) => {
                    error!("{} failed: {}", command, e);
                    self.presenter.append(
                        command.error_header(),
                        detail,
                        Some(Value::String(e.to_string())),
                    );
                    state.transition(OperationState::Failed);
                }
            }

            result
        };

        state.transition(OperationState::Idle);

        result.map_err(OperationError::from)
    }
}
