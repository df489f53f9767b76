//! I/O boundary traits for testability
//!
//! These traits abstract terminal, filesystem and editor access, allowing
//! the resolver, dispatcher and shell to be tested with scripted fakes.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::infrastructure::{InfraError, InfraResult};

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read raw file contents.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write content, readable and writable by the owner only.
    fn write_private(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a file.
    fn is_file(&self, path: &Path) -> bool;

    /// Create directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Rename/move a file.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Remove a file.
    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// Line-oriented user input.
///
/// End of input is reported as `io::ErrorKind::UnexpectedEof`.
pub trait Prompter: Send + Sync {
    /// Show `message` and read one line without its line terminator.
    fn prompt(&self, message: &str) -> io::Result<String>;

    /// Like `prompt`, for passwords and keys.
    ///
    /// Ctrl-C is reported as `io::ErrorKind::Interrupted`.
    fn prompt_secret(&self, message: &str) -> io::Result<String> {
        self.prompt(message)
    }

    /// Yes/no question; only `y` and `yes` (any case) confirm.
    fn confirm(&self, message: &str) -> io::Result<bool> {
        let answer = self.prompt(message)?;
        Ok(matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        ))
    }
}

/// Editor abstraction for opening files.
pub trait Editor: Send + Sync {
    /// Open a file in `program`, or the user's default editor when `None`.
    /// Blocks until the editor exits.
    fn open(&self, program: Option<&str>, path: &Path) -> io::Result<()>;
}

/// What the interactive shell got from the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellInput {
    Line(String),
    Interrupted,
    Eof,
}

/// Source of interactive shell lines.
pub trait LineReader {
    fn read_line(&mut self, prompt: &str) -> io::Result<ShellInput>;

    /// Remember a line for recall; a no-op by default.
    fn add_history(&mut self, _line: &str) {}
}

impl<R: LineReader + ?Sized> LineReader for &mut R {
    fn read_line(&mut self, prompt: &str) -> io::Result<ShellInput> {
        (**self).read_line(prompt)
    }

    fn add_history(&mut self, line: &str) {
        (**self).add_history(line)
    }
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write_private(&self, path: &Path, content: &str) -> io::Result<()> {
        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(path)?;
        file.write_all(content.as_bytes())?;

        // mode() only applies on creation; tighten files that already existed
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }
}

/// Prompts on stdout and reads answers from stdin.
#[derive(Debug, Default)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn prompt(&self, message: &str) -> io::Result<String> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(message.as_bytes())?;
        stdout.flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "end of input while waiting for an answer",
            ));
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    /// Reads without echo when stdin is a terminal.
    fn prompt_secret(&self, message: &str) -> io::Result<String> {
        if !io::stdin().is_terminal() {
            return self.prompt(message);
        }
        let mut stdout = io::stdout().lock();
        stdout.write_all(message.as_bytes())?;
        stdout.flush()?;

        let answer = {
            let _raw = RawMode::enable()?;
            read_hidden_line()
        };
        stdout.write_all(b"\n")?;
        stdout.flush()?;
        answer
    }
}

/// Raw terminal mode until dropped.
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            tracing::warn!("could not restore terminal mode: {}", e);
        }
    }
}

/// Collect key presses up to Enter; nothing is echoed in raw mode.
fn read_hidden_line() -> io::Result<String> {
    let mut line = String::new();
    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => return Ok(line),
            KeyCode::Char('c') if ctrl => {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "keyboard interrupt"));
            }
            KeyCode::Char('d') if ctrl && line.is_empty() => {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "end of input while waiting for an answer",
                ));
            }
            KeyCode::Backspace => {
                line.pop();
            }
            KeyCode::Char(c) if !ctrl => line.push(c),
            _ => {}
        }
    }
}

/// Real editor implementation using the given program, $VISUAL, $EDITOR, or vim.
#[derive(Debug, Default)]
pub struct CommandEditor;

impl Editor for CommandEditor {
    fn open(&self, program: Option<&str>, path: &Path) -> io::Result<()> {
        use std::process::Command;

        let editor = program
            .map(String::from)
            .or_else(|| std::env::var("VISUAL").ok())
            .or_else(|| std::env::var("EDITOR").ok())
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| "vim".to_string());

        // Allow "code --wait" style editor commands
        let words = shell_words::split(&editor)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
        let Some((cmd, args)) = words.split_first() else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "empty editor command",
            ));
        };

        tracing::debug!("opening {} with {}", path.display(), editor);
        let status = Command::new(cmd).args(args).arg(path).status()?;

        if status.success() {
            Ok(())
        } else {
            Err(io::Error::other(format!(
                "editor exited with status: {}",
                status
            )))
        }
    }
}

/// Terminal line editing with a persistent history file.
pub struct RustylineReader {
    editor: DefaultEditor,
    history: Option<PathBuf>,
}

impl RustylineReader {
    pub fn new(history: Option<PathBuf>) -> InfraResult<Self> {
        let mut editor = DefaultEditor::new().map_err(|e| InfraError::Shell {
            message: format!("failed to initialize line editor: {e}"),
        })?;
        if let Some(path) = &history {
            if let Err(e) = editor.load_history(path) {
                if !matches!(e, ReadlineError::Io(ref io) if io.kind() == io::ErrorKind::NotFound)
                {
                    tracing::warn!("failed to load history from {}: {}", path.display(), e);
                }
            }
        }
        Ok(Self { editor, history })
    }

    fn save_history(&mut self) {
        if let Some(path) = &self.history {
            if let Err(e) = self.editor.save_history(path) {
                tracing::warn!("failed to save history to {}: {}", path.display(), e);
            }
        }
    }
}

impl LineReader for RustylineReader {
    fn read_line(&mut self, prompt: &str) -> io::Result<ShellInput> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ShellInput::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ShellInput::Interrupted),
            Err(ReadlineError::Eof) => Ok(ShellInput::Eof),
            Err(ReadlineError::Io(e)) => Err(e),
            Err(e) => Err(io::Error::other(e.to_string())),
        }
    }

    fn add_history(&mut self, line: &str) {
        if matches!(self.editor.add_history_entry(line), Ok(true)) {
            self.save_history();
        }
    }
}

impl Drop for RustylineReader {
    fn drop(&mut self) {
        self.save_history();
    }
}
