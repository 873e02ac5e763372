//! Notegate CLI - a minimal, access-gated note viewer
//!
//! Loads the note store, asks for the password once, and prints the note
//! only when the password matches.

mod cli;
mod config;
mod constants;
mod errors;
mod logging;
mod prompt;
mod ui;

use std::io::{self, Write};

use clap::Parser;
use notegate_core::{run_session, AccessGate, NoteLoader, Outcome};

use crate::cli::Cli;
use crate::config::{load_config, resolve_settings};
use crate::errors::CliError;
use crate::prompt::StdinPrompter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let settings = load_config(&cli)
        .and_then(|config| resolve_settings(&cli, config))
        .unwrap_or_else(|err| err.exit());
    let gate = AccessGate::new(settings.secret)
        .map_err(CliError::from)
        .unwrap_or_else(|err| err.exit());
    let loader = NoteLoader::new(settings.limits);

    let mut prompter = StdinPrompter::new();
    let outcome = run_session(&loader, &settings.store_path, &gate, &mut prompter)
        .map_err(CliError::from)
        .unwrap_or_else(|err| err.exit());

    if let Outcome::Revealed(note) = &outcome {
        if note.is_truncated() && !cli.quiet {
            eprintln!(
                "{} Note exceeded {} bytes and was truncated.",
                ui::warning_prefix(),
                note.capacity()
            );
        }
    }

    let mut stdout = io::stdout().lock();
    outcome.write_to(&mut stdout)?;
    stdout.flush()?;
    drop(stdout);

    if !outcome.is_revealed() {
        CliError::AuthFailed.exit()
    }
    Ok(())
}
