use cdn_console_common::common_utils::termination::StopSignal;
use std::fmt;

/// Why the interactive console stopped taking commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Quit,
    EndOfInput,
    SignalReceived,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StopReason::Quit => "quit requested",
            StopReason::EndOfInput => "input closed",
            StopReason::SignalReceived => "signal received",
        })
    }
}

impl StopSignal for StopReason {
    fn signal_received() -> Self {
        StopReason::SignalReceived
    }
}
