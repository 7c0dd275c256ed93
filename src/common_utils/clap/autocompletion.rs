use clap::{App, ArgMatches, Shell};
use std::io;

pub fn add_args<'a>(app: clap::App<'a, 'a>) -> clap::App<'a, 'a> {
    app.subcommand(
        App::new("autocompletion")
            .about("Print shell completions")
            .subcommand(App::new("fish"))
            .subcommand(App::new("bash"))
            .subcommand(App::new("zsh")),
    )
}

fn autodetect_shell() -> Option<Shell> {
    let shell_var = std::env::var("SHELL").ok()?.to_lowercase();
    if shell_var.contains("fish") {
        Some(Shell::Fish)
    } else if shell_var.contains("bash") {
        Some(Shell::Bash)
    } else if shell_var.contains("zsh") {
        Some(Shell::Zsh)
    } else {
        None
    }
}

/// Prints completions and exits when the `autocompletion` subcommand was given.
pub fn handle_autocompletion<'a>(app: &mut clap::App<'a, 'a>, matches: &ArgMatches, cmd: &str) {
    if let Some(shell) = matches.subcommand_matches("autocompletion") {
        let shell = match shell.subcommand_name() {
            Some("fish") => Some(Shell::Fish),
            Some("bash") => Some(Shell::Bash),
            Some("zsh") => Some(Shell::Zsh),
            _ => {
                let detected = autodetect_shell();
                match detected {
                    Some(shell) => eprintln!("Autodetect shell: {}", shell),
                    None => eprintln!("Could not autodetect shell"),
                }
                detected
            }
        };

        if let Some(shell) = shell {
            app.gen_completions_to(cmd, shell, &mut io::stdout());
        }

        std::process::exit(0);
    }
}
