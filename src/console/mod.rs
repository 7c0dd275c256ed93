//! Operation handlers of the invalidation console and the log they write to.

mod busy;
mod catalog;
mod commands;
mod error;
mod health;
mod input;
mod ports;
mod presenter;
mod state;
#[cfg(test)]
pub(crate) mod testing;

pub use busy::{BusyGuard, BusyIndicator};
pub use catalog::CATALOG_ERROR_HEADER;
pub use commands::Outcome;
pub use error::{OperationError, ValidationError};
pub use health::{HEALTH_ERROR_HEADER, HEALTH_HEADER};
pub use input::{parse_distribution, parse_invalidation_id, parse_paths, strip_surrounding_quotes};
pub use ports::{Button, Field, Indicator, UiPorts};
pub use presenter::{Anchor, Detail, MalformedAnchor, LogEntry, OperationLog, Placement, Presenter, RenderedEntry};
pub use state::{Command, CommandState, OperationState};

use crate::client_core::ApiClient;
use crate::config_core::NavOrder;
use std::sync::Arc;

pub struct Console {
    client: ApiClient,
    ports: Arc<dyn UiPorts>,
    presenter: Presenter,
    busy: BusyIndicator,
    create: CommandState,
    get: CommandState,
}

impl Console {
    pub fn new(client: ApiClient, ports: Arc<dyn UiPorts>, nav_order: NavOrder) -> Self {
        Console {
            presenter: Presenter::new(ports.clone(), nav_order),
            busy: BusyIndicator::new(ports.clone(), Indicator::Loading),
            client,
            ports,
            create: CommandState::new(Command::Create),
            get: CommandState::new(Command::Get),
        }
    }

    pub fn presenter(&self) -> &Presenter {
        &self.presenter
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn state(&self, command: Command) -> OperationState {
        self.command_state(command).current()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    fn command_state(&self, command: Command) -> &CommandState {
        match command {
            Command::Create => &self.create,
            Command::Get => &self.get,
        }
    }
}
