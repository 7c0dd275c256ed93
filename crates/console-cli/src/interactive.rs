use crate::terminal::TerminalUi;
use crate::termination::StopReason;
use cdn_console_common::console::{Command, Console, Field, OperationError, UiPorts};
use futures::future::{FusedFuture, LocalBoxFuture};
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use std::sync::Arc;
use stop_handle::StopWait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

pub const HELP: &str = "\
commands:
  create <distribution> <path>[,<path>...]   request an invalidation
  get <distribution> <invalidation-id>       show an invalidation
  list                                       reload distributions
  health                                     check the backend
  help                                       show this message
  quit                                       wait for running requests and exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Empty,
    Create { distribution: String, paths: String },
    Get { distribution: String, id: String },
    List,
    Health,
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LineError {
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(idx) => (&s[..idx], s[idx..].trim()),
        None => (s, ""),
    }
}

/// Parses one console line. Paths and ids are passed on as typed; the console validates them.
pub fn parse_line(line: &str) -> Result<Line, LineError> {
    let (command, rest) = split_word(line);

    match command {
        "" => Ok(Line::Empty),
        "create" => {
            let (distribution, paths) = split_word(rest);
            if distribution.is_empty() {
                return Err(LineError::Usage("create <distribution> <paths>"));
            }
            Ok(Line::Create {
                distribution: distribution.to_string(),
                paths: paths.to_string(),
            })
        }
        "get" => {
            let (distribution, id) = split_word(rest);
            if distribution.is_empty() {
                return Err(LineError::Usage("get <distribution> <invalidation-id>"));
            }
            Ok(Line::Get {
                distribution: distribution.to_string(),
                id: id.to_string(),
            })
        }
        "list" | "distributions" => Ok(Line::List),
        "health" => Ok(Line::Health),
        "help" | "?" => Ok(Line::Help),
        "quit" | "exit" => Ok(Line::Quit),
        other => Err(LineError::Unknown(other.to_string())),
    }
}

type InFlight = LocalBoxFuture<'static, Result<(), OperationError>>;

/// Starts the operation for `line`. `None` when there is nothing to run.
fn start(console: &Arc<Console>, ui: &Arc<TerminalUi>, line: Line) -> Option<InFlight> {
    let console = console.clone();

    let (command, distribution, input) = match line {
        Line::Create {
            distribution,
            paths,
        } => (Command::Create, distribution, paths),
        Line::Get { distribution, id } => (Command::Get, distribution, id),
        Line::List => {
            return Some(async move { console.load_distributions().await.map(|_| ()) }.boxed_local())
        }
        Line::Health => {
            return Some(async move { console.check_health().await.map(|_| ()) }.boxed_local())
        }
        Line::Empty | Line::Help | Line::Quit => return None,
    };

    if !ui.is_enabled(command.button()) {
        println!("{} is already in progress", command);
        return None;
    }

    let ui = ui.clone();
    Some(
        async move {
            // filled and read within one poll, so concurrent commands never see each other's input
            ui.set_value(command.distribution_field(), &distribution);
            ui.set_value(command.input_field(), &input);

            let result = match command {
                Command::Create => console.create_invalidation().await,
                Command::Get => console.get_invalidation().await,
            };

            result.map(|_| ())
        }
        .boxed_local(),
    )
}

/// Runs the console on stdin until `quit`, end of input or a stop signal.
pub async fn run(
    console: Arc<Console>,
    ui: Arc<TerminalUi>,
    stop_wait: StopWait<StopReason>,
) -> anyhow::Result<StopReason> {
    println!("{}", distributions_summary(&ui));
    println!("{}", HELP);

    run_with(console, ui, BufReader::new(tokio::io::stdin()), stop_wait).await
}

/// Reads commands from `input` and runs them concurrently.
///
/// Requests still running when the console stops are awaited before returning.
pub async fn run_with<R>(
    console: Arc<Console>,
    ui: Arc<TerminalUi>,
    input: R,
    stop_wait: StopWait<StopReason>,
) -> anyhow::Result<StopReason>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut in_flight = FuturesUnordered::<InFlight>::new();
    tokio::pin!(stop_wait);

    let reason = loop {
        tokio::select! {
            biased;

            Some(result) = in_flight.next(), if !in_flight.is_empty() => {
                if let Err(e) = result {
                    debug!("operation finished with error: {}", e);
                }
            }
            stopped = &mut stop_wait, if !stop_wait.is_terminated() => match stopped {
                stop_handle::StopReason::Requested(reason) => break reason,
                stop_handle::StopReason::HandleLost => warn!("stop handle lost, only `quit` ends the console"),
            },
            line = lines.next_line() => {
                let line = match line? {
                    Some(line) => line,
                    None => break StopReason::EndOfInput,
                };

                match parse_line(&line) {
                    Ok(Line::Quit) => break StopReason::Quit,
                    Ok(Line::Help) => println!("{}", HELP),
                    Ok(line) => {
                        if let Some(operation) = start(&console, &ui, line) {
                            in_flight.push(operation);
                        }
                    }
                    Err(e) => println!("{}", e),
                }
            }
        }
    };

    info!("console stopped: {}", reason);
    if !in_flight.is_empty() {
        info!("waiting for {} running requests", in_flight.len());
    }
    while in_flight.next().await.is_some() {}

    Ok(reason)
}

fn distributions_summary(ui: &TerminalUi) -> String {
    let distributions = ui.options(Field::CreateDistribution);
    if distributions.is_empty() {
        "no distributions loaded".to_string()
    } else {
        format!("distributions: {}", distributions.join(", "))
    }
}
