//! Tests for the interactive shell loop

mod common;

use std::io::{self, Write};

use googlecl::application::shell::INTERRUPT_MESSAGE;
use googlecl::application::{ApplicationError, InteractiveShell, ShellExit};
use googlecl::cli::commands::{run_interactive, run_once};
use googlecl::config::Settings;
use googlecl::domain::Options;
use googlecl::exitcode;
use googlecl::infrastructure::traits::ShellInput;

use common::{output, words, FakeApi, Harness, ScriptedPrompter, ScriptedReader, EMAIL};

fn run_lines(reader: ScriptedReader) -> (ShellExit, String, Vec<Vec<String>>, Vec<String>) {
    let mut reader = reader;
    let mut out = Vec::new();
    let mut seen = Vec::new();
    let exit = {
        let mut shell = InteractiveShell::new(&mut reader);
        shell
            .run(
                &mut out,
                |out| {
                    writeln!(out, "HELP").unwrap();
                    Ok(())
                },
                |words, _out| {
                    seen.push(words);
                    Ok(())
                },
            )
            .unwrap()
    };
    (exit, output(out), seen, reader.history)
}

#[test]
fn given_quit_when_running_then_stops_without_running_later_lines() {
    // Arrange
    let reader = ScriptedReader::lines(&["picasa list", "quit", "blogger list"]);

    // Act
    let (exit, _, seen, history) = run_lines(reader);

    // Assert
    assert_eq!(exit, ShellExit::Quit);
    assert_eq!(seen, vec![vec!["picasa".to_string(), "list".to_string()]]);
    assert_eq!(history, vec!["picasa list", "quit"]);
}

#[test]
fn given_question_mark_when_running_then_prints_help() {
    // Arrange
    let reader = ScriptedReader::lines(&["?", "", "quit"]);

    // Act
    let (exit, text, seen, history) = run_lines(reader);

    // Assert
    assert_eq!(exit, ShellExit::Quit);
    assert_eq!(text, "HELP\n");
    assert!(seen.is_empty());
    assert_eq!(history, vec!["?", "quit"], "blank lines are not remembered");
}

#[test]
fn given_end_of_input_when_running_then_prints_blank_line() {
    // Arrange
    let reader = ScriptedReader::lines(&[]);

    // Act
    let (exit, text, _, _) = run_lines(reader);

    // Assert
    assert_eq!(exit, ShellExit::Eof);
    assert_eq!(text, "\n");
}

#[test]
fn given_interrupt_when_running_then_reports_keyboard_quit() {
    // Arrange
    let reader = ScriptedReader::lines(&[]).then(ShellInput::Interrupted);

    // Act
    let (exit, text, _, _) = run_lines(reader);

    // Assert
    assert_eq!(exit, ShellExit::Interrupted);
    assert_eq!(text, format!("\n{INTERRUPT_MESSAGE}\n"));
}

#[test]
fn given_unbalanced_quote_when_running_then_reports_and_continues() {
    // Arrange
    let reader = ScriptedReader::lines(&["blogger post \"oops", "docs list"]);

    // Act
    let (exit, text, seen, _) = run_lines(reader);

    // Assert
    assert_eq!(exit, ShellExit::Eof);
    assert!(text.starts_with("Cannot parse \"blogger post \"oops\""));
    assert_eq!(seen, vec![vec!["docs".to_string(), "list".to_string()]]);
}

#[test]
fn given_failing_command_when_running_then_error_printed_and_loop_continues() {
    // Arrange
    let mut reader = ScriptedReader::lines(&["bad task", "quit"]);
    let mut out = Vec::new();

    // Act
    let exit = InteractiveShell::new(&mut reader)
        .run(
            &mut out,
            |_| Ok(()),
            |words, _| Err(ApplicationError::UnknownService(words[0].clone())),
        )
        .unwrap();

    // Assert
    assert_eq!(exit, ShellExit::Quit);
    assert_eq!(output(out), "error: unknown service: bad\n");
}

#[test]
fn given_input_closed_inside_command_when_running_then_shell_ends() {
    // Arrange
    let mut reader = ScriptedReader::lines(&["picasa create", "never reached"]);
    let mut out = Vec::new();
    let mut runs = 0;

    // Act
    let exit = InteractiveShell::new(&mut reader)
        .run(
            &mut out,
            |_| Ok(()),
            |_, _| {
                runs += 1;
                Err(ApplicationError::input(
                    "title",
                    io::Error::new(io::ErrorKind::UnexpectedEof, "closed"),
                ))
            },
        )
        .unwrap();

    // Assert
    assert_eq!(exit, ShellExit::Eof);
    assert_eq!(runs, 1);
}

#[test]
fn given_dispatcher_when_running_interactively_then_commands_reach_it() {
    // Arrange
    let harness = Harness::new(FakeApi::new(), ScriptedPrompter::default());
    let dispatcher = harness.dispatcher(Settings::default());
    let reader = ScriptedReader::lines(&[
        "?",
        "help contacts",
        "picasa",
        "nosuch list",
        "docs list --bogus-flag",
        "quit",
    ]);
    let mut out = Vec::new();

    // Act
    let code = run_interactive(&dispatcher, reader, &mut out).unwrap();

    // Assert
    assert_eq!(code, exitcode::OK);
    let text = output(out);
    assert!(text.starts_with("Welcome to the Google CL tool!"));
    assert!(text.contains("Available tasks for service contacts: 'list', 'add', 'delete'"));
    assert!(text.contains("Must specify at least a service and a task!"));
    assert!(text.contains("error: unknown service: nosuch"));
    assert!(text.contains("--bogus-flag"), "clap reports the bad option");
    assert!(harness.api.calls().is_empty());
}

#[test]
fn given_ctrl_c_at_prompt_inside_command_when_running_then_reports_keyboard_quit() {
    // Arrange
    let mut reader = ScriptedReader::lines(&["docs list", "never reached"]);
    let mut out = Vec::new();

    // Act
    let exit = InteractiveShell::new(&mut reader)
        .run(
            &mut out,
            |_| Ok(()),
            |_, _| {
                Err(ApplicationError::input(
                    "password",
                    io::Error::new(io::ErrorKind::Interrupted, "keyboard interrupt"),
                ))
            },
        )
        .unwrap();

    // Assert
    assert_eq!(exit, ShellExit::Interrupted);
    assert_eq!(output(out), format!("\n{INTERRUPT_MESSAGE}\n"));
}

#[test]
fn given_ctrl_c_at_login_prompt_when_running_once_then_blank_line_and_success() {
    // Arrange
    let harness = Harness::new(FakeApi::new(), ScriptedPrompter::interrupting(&[EMAIL]));
    let dispatcher = harness.dispatcher(Settings::default());
    let mut out = Vec::new();

    // Act
    let code = run_once(
        &dispatcher,
        Options::default(),
        &words(&["docs", "list"]),
        &mut out,
    )
    .unwrap();

    // Assert
    assert_eq!(code, exitcode::OK);
    assert!(output(out).ends_with('\n'));
    assert!(!harness.api.called("login"));
}
