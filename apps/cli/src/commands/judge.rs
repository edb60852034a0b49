//! `test` and `submit` for a local solution file.

use crate::commands::CommandOutcome;
use crate::error::CliError;
use crate::output;

use client_core::judge::{JudgeClient, JudgeJob, Sleeper};
use client_core::solution::{find_solution_file, load_solution};

use std::io::Write;
use std::path::Path;

use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JudgeMode {
    Test,
    Submit,
}

/// Locate the solution under `target`, run it through the judge and print
/// the verdict. Anything but Accepted is [`CommandOutcome::Rejected`].
pub async fn run<Z, W>(
    client: &JudgeClient<Z>,
    mode: JudgeMode,
    target: &Path,
    color: bool,
    out: &mut W,
) -> Result<CommandOutcome, CliError>
where
    Z: Sleeper,
    W: Write,
{
    let file = find_solution_file(target)?;
    let verb = match mode {
        JudgeMode::Test => "Testing",
        JudgeMode::Submit => "Submitting",
    };
    writeln!(out, "\n{verb}: {}\n", file.display())?;

    let solution = load_solution(&file)?;
    let question_id = solution.require_question_id()?;
    writeln!(out, "Problem: {} (#{question_id})", solution.slug)?;
    writeln!(out, "Language: {}\n", solution.language)?;

    let job = match mode {
        JudgeMode::Test => {
            let input = solution.require_test_input()?;
            writeln!(out, "Running tests...")?;
            JudgeJob::test(
                &solution.slug,
                question_id,
                &solution.code,
                &solution.language,
                input,
            )
        }
        JudgeMode::Submit => {
            writeln!(out, "Submitting...")?;
            JudgeJob::submit(
                &solution.slug,
                question_id,
                &solution.code,
                &solution.language,
            )
        }
    };
    out.flush()?;

    let report = client.run_job(&job).await?;
    info!("{} finished: {}", solution.slug, report.outcome());

    for line in output::report_lines(&report, color) {
        writeln!(out, "{line}")?;
    }

    Ok(if report.is_accepted() {
        CommandOutcome::Success
    } else {
        CommandOutcome::Rejected
    })
}
