#[macro_use]
extern crate tracing;

mod interactive;
mod terminal;
mod termination;
#[cfg(test)]
mod testing;

use crate::terminal::TerminalUi;
use crate::termination::StopReason;
use anyhow::Context;
use cdn_console_common::client_core::{ApiClient, VERSION};
use cdn_console_common::common_utils::termination::stop_signal_listener;
use cdn_console_common::config_core::{ConsoleConfig, DEFAULT_CONFIG_FILE};
use cdn_console_common::console::{Console, Field, UiPorts};
use clap::{App, AppSettings, Arg, ArgMatches};
use std::sync::Arc;
use stop_handle::stop_handle;
use tokio::runtime::Builder;
use url::Url;

fn distribution_arg<'a>() -> Arg<'a, 'a> {
    Arg::with_name("distribution")
        .short("d")
        .long("distribution")
        .value_name("NAME")
        .help("Distribution")
        .required(true)
        .takes_value(true)
}

fn app<'a>() -> App<'a, 'a> {
    let args = App::new("cdn-console")
        .version(VERSION)
        .author("CDN Console Team <team@cdn-console.dev>")
        .about("Request and inspect CDN cache invalidations")
        .setting(AppSettings::VersionlessSubcommands)
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .help("Sets a custom config file")
                .env("CDN_CONSOLE_CONFIG")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("endpoint")
                .short("e")
                .long("endpoint")
                .value_name("URL")
                .help("Base URL of the invalidation backend")
                .env("CDN_CONSOLE_ENDPOINT")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("no_color")
                .long("no-color")
                .help("Don't colorize output")
                .global(true)
                .takes_value(false),
        )
        .subcommand(App::new("distributions").about("List distributions"))
        .subcommand(
            App::new("create")
                .about("Create an invalidation")
                .arg(distribution_arg())
                .arg(
                    Arg::with_name("paths")
                        .short("p")
                        .long("paths")
                        .value_name("PATHS")
                        .help("Comma-separated paths, e.g. /index.html,/images/*")
                        .required(true)
                        .takes_value(true),
                ),
        )
        .subcommand(
            App::new("get")
                .about("Show an invalidation")
                .arg(distribution_arg())
                .arg(
                    Arg::with_name("id")
                        .short("i")
                        .long("id")
                        .value_name("INVALIDATION_ID")
                        .help("Invalidation ID")
                        .required(true)
                        .takes_value(true),
                ),
        )
        .subcommand(App::new("health").about("Check the backend"))
        .subcommand(App::new("interactive").about("Run the line console (default)"));

    cdn_console_common::common_utils::clap::autocompletion::add_args(
        cdn_console_common::common_utils::clap::log::add_args(args),
    )
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<ConsoleConfig> {
    let mut config = match matches.value_of("config") {
        Some(path) => ConsoleConfig::load(path)?,
        None => ConsoleConfig::load_optional(DEFAULT_CONFIG_FILE)?,
    };

    if let Some(endpoint) = matches.value_of("endpoint") {
        let endpoint = Url::parse(endpoint).with_context(|| format!("bad endpoint `{}`", endpoint))?;
        config = config.with_endpoint(endpoint)?;
    }

    Ok(config)
}

async fn dispatch(
    matches: ArgMatches<'_>,
    console: Arc<Console>,
    ui: Arc<TerminalUi>,
) -> anyhow::Result<bool> {
    match matches.subcommand() {
        ("distributions", _) => {
            let distributions = console.load_distributions().await;
            if let Ok(distributions) = &distributions {
                for distribution in distributions {
                    println!("{}", distribution);
                }
            }
            Ok(distributions.is_ok())
        }
        ("create", Some(sub)) => {
            ui.set_value(
                Field::CreateDistribution,
                sub.value_of("distribution").unwrap_or_default(),
            );
            ui.set_value(Field::CreatePaths, sub.value_of("paths").unwrap_or_default());
            Ok(console.create_invalidation().await.is_ok())
        }
        ("get", Some(sub)) => {
            ui.set_value(
                Field::GetDistribution,
                sub.value_of("distribution").unwrap_or_default(),
            );
            ui.set_value(Field::GetInvalidationId, sub.value_of("id").unwrap_or_default());
            Ok(console.get_invalidation().await.is_ok())
        }
        ("health", _) => Ok(console.check_health().await.is_ok()),
        _ => {
            let (app_stop_handle, app_stop_wait) = stop_handle::<StopReason>();
            tokio::spawn(stop_signal_listener(app_stop_handle));

            // a failed catalog load is already in the log; the console stays usable
            let _ = console.load_distributions().await;
            interactive::run(console, ui, app_stop_wait).await?;

            Ok(true)
        }
    }
}

/// Returns whether the requested operation succeeded.
fn run() -> anyhow::Result<bool> {
    let mut args = app();
    let matches = args.clone().get_matches();

    cdn_console_common::common_utils::clap::autocompletion::handle_autocompletion(
        &mut args,
        &matches,
        "cdn-console",
    );
    cdn_console_common::common_utils::clap::log::handle(&matches)?;

    let config = load_config(&matches)?;
    info!("using endpoint {}", config.endpoint);

    let client = ApiClient::new(&config.endpoint, config.timeout, config.connect_timeout)?;
    let ui = Arc::new(TerminalUi::stdout(!matches.is_present("no_color")));
    let console = Arc::new(Console::new(client, ui.clone(), config.nav_order));

    let rt = Builder::new_current_thread()
        .enable_all()
        .thread_name("cdn-console-reactor")
        .build()?;

    rt.block_on(dispatch(matches, console, ui))
}

pub fn main() {
    let code = match run() {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            eprintln!("error: {:#}", e);
            2
        }
    };

    info!("we are done");
    std::process::exit(code);
}
