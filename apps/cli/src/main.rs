use leetcode_exporter::cli::Cli;
use leetcode_exporter::commands;
use leetcode_exporter::logger::initialize_cli;
use leetcode_exporter::output::error_lines;

use std::process::ExitCode;

use clap::Parser;
use log::debug;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = initialize_cli(cli.log_level()) {
        eprintln!("{}", e.summary());
    }
    debug!("Running {:?}", cli.command);

    let mut stdout = std::io::stdout();
    match commands::run(cli.command, &mut stdout).await {
        Ok(outcome) => ExitCode::from(outcome.code()),
        Err(e) => {
            for line in error_lines(&e) {
                eprintln!("{line}");
            }
            ExitCode::FAILURE
        }
    }
}
