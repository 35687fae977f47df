// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// LSS — Line and mask Simplification for PAGE-XML
//
// Entry point. Initialises logging, parses the command line and dispatches to
// the subcommands.

mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use commands::{SimplifyArgs, TestValuesArgs};

#[derive(Parser)]
#[command(
    name = "lss",
    version,
    about = "LSS is a tool to deal with mask and baseline simplification"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simplify baselines and masks of FILES, writing `<name>.<suffix>.xml`
    /// next to each
    Simplify(SimplifyArgs),
    /// Test different ratios for mask and baseline simplification using one
    /// or multiple FILES
    TestValues(TestValuesArgs),
}

fn main() -> ExitCode {
    // Results go to stdout; logs stay on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Command::Simplify(args) => commands::simplify(&args),
        Command::TestValues(args) => commands::test_values(&args),
    };
    outcome.exit_code()
}
