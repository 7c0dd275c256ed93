use crate::console::ports::{Button, Field};
use parking_lot::Mutex;
use std::fmt;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Create,
    Get,
}

impl Command {
    pub fn header(self) -> &'static str {
        match self {
            Command::Create => "Create",
            Command::Get => "Get",
        }
    }

    pub fn error_header(self) -> &'static str {
        match self {
            Command::Create => "Create Error",
            Command::Get => "Get Error",
        }
    }

    pub fn button(self) -> Button {
        match self {
            Command::Create => Button::CreateInvalidation,
            Command::Get => Button::GetInvalidation,
        }
    }

    pub fn distribution_field(self) -> Field {
        match self {
            Command::Create => Field::CreateDistribution,
            Command::Get => Field::GetDistribution,
        }
    }

    /// The free-text input consumed by a submission.
    pub fn input_field(self) -> Field {
        match self {
            Command::Create => Field::CreatePaths,
            Command::Get => Field::GetInvalidationId,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationState {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

impl OperationState {
    fn can_move_to(self, next: OperationState) -> bool {
        use OperationState::*;

        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, Submitting)
                | (Validating, Failed)
                | (Submitting, Succeeded)
                | (Submitting, Failed)
                | (Succeeded, Idle)
                | (Failed, Idle)
        )
    }
}

pub struct CommandState {
    command: Command,
    state: Mutex<OperationState>,
}

impl CommandState {
    pub fn new(command: Command) -> Self {
        CommandState {
            command,
            state: Mutex::new(OperationState::Idle),
        }
    }

    pub fn current(&self) -> OperationState {
        *self.state.lock()
    }

    pub fn transition(&self, next: OperationState) {
        let mut state = self.state.lock();
        if !state.can_move_to(next) {
            // a second run of the same command started before the first ended
            warn!("{}: unexpected transition {:?} -> {:?}", self.command, *state, next);
        } else {
            debug!("{}: {:?} -> {:?}", self.command, *state, next);
        }
        *state = next;
    }
}
