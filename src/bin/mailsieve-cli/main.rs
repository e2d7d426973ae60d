mod args;
mod batch;
mod mx;
mod output;

use std::fs::File;
use std::io::{self, BufReader};

use anyhow::{Context, Result};
use mailsieve_lib::{Outcome, ReportRow, Summary, Validator};
use tracing_subscriber::{EnvFilter, fmt};

use args::{Cli, Commands};

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    if cli.cmd.is_none() && !cli.stdin {
        Cli::clap_command().print_help()?;
        println!();
        return Ok(());
    }

    output::ensure_format(&cli.format)?;
    let heuristics = cli.heuristics()?;
    let validator = Validator::from_system_conf(heuristics, cli.validation_options())
        .context("initialize DNS resolver")?;

    let summary = match &cli.cmd {
        Some(Commands::Mx { email }) => return mx::run(&validator, email, &cli.format),
        Some(Commands::Validate { email }) => {
            let verdict = validator.validate(email)?;
            let rows = vec![ReportRow::new(email.as_str(), verdict)];
            output::write_reports(&rows, &cli.format, cli.out.as_deref())?;
            Summary::from_rows(&rows)
        }
        Some(Commands::Check { input }) => {
            let file = File::open(input).with_context(|| format!("open {}", input.display()))?;
            // rapport à côté de l'entrée: <entrée><millis>.txt
            let out = cli.out.clone().or_else(|| output::default_out(&cli.format, input));
            batch::run_to(&validator, BufReader::new(file), &cli.format, out.as_deref())?
        }
        None => batch::run_to(&validator, io::stdin().lock(), &cli.format, cli.out.as_deref())?,
    };

    log_summary(&summary, validator.resolver().cache().len());

    // codes de sortie : 0 OK, 2 adresses rejetées, 1 fatal
    if !summary.all_ok() {
        std::process::exit(2);
    }
    Ok(())
}

fn log_summary(summary: &Summary, hostnames: usize) {
    for outcome in Outcome::ALL {
        let count = summary.count(outcome);
        if count > 0 {
            tracing::info!(outcome = outcome.label(), count, "summary");
        }
    }
    tracing::info!(
        total = summary.total(),
        errors = summary.errors,
        hostnames,
        "run complete"
    );
}
