//! Running the CLI: one command, or the interactive shell

use std::io::Write;

use clap::Parser;
use tracing::{debug, instrument};

use crate::application::help::general_help;
use crate::application::{ApplicationError, CommandDispatcher, DispatchOutcome, InteractiveShell};
use crate::cli::args::{Cli, ShellLine};
use crate::cli::error::CliResult;
use crate::config::Settings;
use crate::domain::Options;
use crate::exitcode;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;
use crate::infrastructure::traits::{LineReader, RustylineReader};

/// Load settings, wire services and run. Returns the process exit code.
#[instrument(level = "debug", skip_all)]
pub fn execute(cli: Cli) -> CliResult<i32> {
    if cli.config_template {
        print_text(&Settings::template())?;
        return Ok(exitcode::OK);
    }

    let settings = Settings::load(cli.config.as_deref())?;
    if cli.show_config {
        print_text(&settings.to_toml()?)?;
        return Ok(exitcode::OK);
    }

    let container = ServiceContainer::new(settings);
    let dispatcher = container.dispatcher();
    let (options, words) = cli.task.into_parts();

    let mut stdout = std::io::stdout();
    if words.is_empty() {
        let reader = RustylineReader::new(container.history_path())?;
        run_interactive(&dispatcher, reader, &mut stdout)
    } else {
        run_once(&dispatcher, options, &words, &mut stdout)
    }
}

/// Exit code of a command that did not fail with an error.
pub fn outcome_code(outcome: DispatchOutcome) -> i32 {
    match outcome {
        DispatchOutcome::Ran | DispatchOutcome::Help => exitcode::OK,
        DispatchOutcome::MissingTask | DispatchOutcome::UnknownTask => exitcode::USAGE,
        DispatchOutcome::LoginFailed => exitcode::NOPERM,
    }
}

pub fn run_once(
    dispatcher: &CommandDispatcher,
    options: Options,
    words: &[String],
    out: &mut dyn Write,
) -> CliResult<i32> {
    let outcome = match dispatcher.dispatch(options, words, out) {
        Ok(outcome) => outcome,
        Err(e) if e.is_interrupted() => {
            write_line(out, "")?;
            return Ok(exitcode::OK);
        }
        Err(e) => return Err(e.into()),
    };
    debug!("outcome: {:?}", outcome);
    Ok(outcome_code(outcome))
}

/// Options and words of one shell line.
pub fn parse_shell_words(words: &[String]) -> Result<(Options, Vec<String>), clap::Error> {
    ShellLine::try_parse_from(words).map(|line| line.task.into_parts())
}

pub fn run_interactive<R: LineReader>(
    dispatcher: &CommandDispatcher,
    reader: R,
    out: &mut dyn Write,
) -> CliResult<i32> {
    let mut shell = InteractiveShell::new(reader);
    let exit = shell.run(
        out,
        |out| write_line(out, &general_help(dispatcher.registry())),
        |words, out| match parse_shell_words(&words) {
            Ok((options, words)) => dispatcher.dispatch(options, &words, out).map(|_| ()),
            // also covers --help, which clap reports as an error
            Err(e) => write_line(out, e.render().to_string().trim_end()),
        },
    )?;
    debug!("shell ended: {:?}", exit);
    Ok(exitcode::OK)
}

fn print_text(text: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{text}").map_err(|e| InfraError::io("write to stdout", e))?;
    Ok(())
}

fn write_line(out: &mut dyn Write, text: &str) -> Result<(), ApplicationError> {
    writeln!(out, "{text}").map_err(|e| ApplicationError::OperationFailed {
        context: "write output".to_string(),
        source: Box::new(e),
    })
}
