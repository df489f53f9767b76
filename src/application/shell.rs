//! Interactive read-eval loop

use std::io::Write;

use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::infrastructure::traits::{LineReader, ShellInput};

pub const PROMPT: &str = "> ";
pub const INTERRUPT_MESSAGE: &str = "Quit via keyboard interrupt";

/// Why the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellExit {
    Quit,
    Eof,
    Interrupted,
}

/// What the shell does with one entered line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Empty,
    Help,
    Quit,
    Run(Vec<String>),
}

impl ShellCommand {
    /// Classify a line; words follow POSIX shell quoting.
    pub fn parse(line: &str) -> Result<Self, shell_words::ParseError> {
        match line.trim() {
            "" => Ok(ShellCommand::Empty),
            "?" => Ok(ShellCommand::Help),
            "quit" => Ok(ShellCommand::Quit),
            text => shell_words::split(text).map(ShellCommand::Run),
        }
    }
}

pub struct InteractiveShell<R: LineReader> {
    reader: R,
}

impl<R: LineReader> InteractiveShell<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Read lines until `quit`, end of input or an interrupt.
    ///
    /// `on_help` prints general help; `on_command` runs the words of one
    /// line. Errors of a single command are reported and the loop goes on.
    pub fn run(
        &mut self,
        out: &mut dyn Write,
        mut on_help: impl FnMut(&mut dyn Write) -> ApplicationResult<()>,
        mut on_command: impl FnMut(Vec<String>, &mut dyn Write) -> ApplicationResult<()>,
    ) -> ApplicationResult<ShellExit> {
        loop {
            let input = self
                .reader
                .read_line(PROMPT)
                .map_err(|e| ApplicationError::input("shell", e))?;
            let line = match input {
                ShellInput::Line(line) => line,
                ShellInput::Eof => {
                    say(out, "")?;
                    return Ok(ShellExit::Eof);
                }
                ShellInput::Interrupted => return interrupted(out),
            };

            let command = match ShellCommand::parse(&line) {
                Ok(command) => command,
                Err(e) => {
                    say(out, &format!("Cannot parse \"{}\": {}", line.trim(), e))?;
                    continue;
                }
            };
            if command != ShellCommand::Empty {
                self.reader.add_history(line.trim());
            }

            match command {
                ShellCommand::Empty => continue,
                ShellCommand::Quit => return Ok(ShellExit::Quit),
                ShellCommand::Help => on_help(out)?,
                ShellCommand::Run(words) => {
                    debug!("shell command: {:?}", words);
                    match on_command(words, out) {
                        Ok(()) => {}
                        // nobody left to answer prompts
                        Err(e) if e.is_end_of_input() => {
                            say(out, "")?;
                            return Ok(ShellExit::Eof);
                        }
                        Err(e) if e.is_interrupted() => return interrupted(out),
                        Err(e) => say(out, &format!("error: {e}"))?,
                    }
                }
            }
        }
    }
}

fn interrupted(out: &mut dyn Write) -> ApplicationResult<ShellExit> {
    say(out, "")?;
    say(out, INTERRUPT_MESSAGE)?;
    Ok(ShellExit::Interrupted)
}

fn say(out: &mut dyn Write, text: &str) -> ApplicationResult<()> {
    writeln!(out, "{text}").map_err(|e| ApplicationError::OperationFailed {
        context: "write output".to_string(),
        source: Box::new(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_quoted_words_when_parsing_then_quotes_group_words() {
        let command = ShellCommand::parse(r#"picasa post --title "My Cat Photos" cats.jpg"#).unwrap();
        assert_eq!(
            command,
            ShellCommand::Run(vec![
                "picasa".into(),
                "post".into(),
                "--title".into(),
                "My Cat Photos".into(),
                "cats.jpg".into()
            ])
        );
    }

    #[test]
    fn given_special_lines_when_parsing_then_classified() {
        assert_eq!(ShellCommand::parse("   ").unwrap(), ShellCommand::Empty);
        assert_eq!(ShellCommand::parse("?").unwrap(), ShellCommand::Help);
        assert_eq!(ShellCommand::parse(" quit ").unwrap(), ShellCommand::Quit);
    }

    #[test]
    fn given_unbalanced_quote_when_parsing_then_error() {
        assert!(ShellCommand::parse("blogger post \"unterminated").is_err());
    }
}
