mod args;
mod output;

use anyhow::{Context, Result};
use mailboxlayer::check_syntax;

use std::io::{self, BufRead};

use args::{Cli, Commands};
use output::{OutputRow, any_invalid, write_reports};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let (emails, syntax_only) = match &cli.cmd {
        Some(Commands::Validate { emails }) => (emails.clone(), false),
        Some(Commands::CheckSyntax { emails }) => (emails.clone(), true),
        None if cli.stdin => (Vec::new(), false),
        None => {
            Cli::clap_command().print_help()?;
            println!();
            return Ok(());
        }
    };
    let emails = if cli.stdin {
        let mut all = emails;
        all.extend(read_stdin()?);
        all
    } else {
        emails
    };

    let rows = if syntax_only {
        let mode = cli.syntax_mode();
        emails
            .iter()
            .map(|email| OutputRow::from_syntax(email, check_syntax(email, mode)))
            .collect()
    } else {
        validate_all(&cli, &emails)?
    };

    write_reports(&rows, &cli)?;

    // codes de sortie : 0 OK, 2 invalids, 1 fatal
    if any_invalid(&rows) {
        std::process::exit(2);
    }
    Ok(())
}

fn validate_all(cli: &Cli, emails: &[String]) -> Result<Vec<OutputRow>> {
    let validator = cli.validator()?;
    let rows = emails
        .iter()
        .map(
            |email| match validator.validate_with(email, cli.bypass_local_check) {
                Ok(result) => OutputRow::from_result(email, &result),
                Err(err) => OutputRow::from_error(email, &err),
            },
        )
        .collect();
    Ok(rows)
}

fn read_stdin() -> Result<Vec<String>> {
    let mut emails = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line.context("read stdin")?;
        if !line.is_empty() {
            emails.push(line);
        }
    }
    Ok(emails)
}

#[cfg(feature = "with-tracing")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(not(feature = "with-tracing"))]
fn init_tracing() {}
