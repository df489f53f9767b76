//! Scripted fakes shared by the integration tests

#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use googlecl::application::services::ServiceRegistry;
use googlecl::application::{CommandDispatcher, DispatcherDeps};
use googlecl::config::Settings;
use googlecl::domain::{AuthToken, Entry, Feed, NewItem};
use googlecl::infrastructure::credentials::FileCredentialStore;
use googlecl::infrastructure::paths::XdgPaths;
use googlecl::infrastructure::remote::{RemoteApi, RemoteResult, Session};
use googlecl::infrastructure::token_store::FileTokenStore;
use googlecl::infrastructure::traits::{Editor, LineReader, Prompter, RealFileSystem, ShellInput};
use googlecl::util::testing::init_test_logging;

pub const EMAIL: &str = "joe@example.com";
pub const PASSWORD: &str = "secret";

pub fn token_for(service: &str, email: &str) -> AuthToken {
    AuthToken::new(format!("tok-{service}-{email}"))
}

/// In-memory remote backend recording every call.
#[derive(Default)]
pub struct FakeApi {
    passwords: BTreeMap<String, String>,
    valid_tokens: Mutex<Vec<String>>,
    entries: Mutex<Vec<Entry>>,
    calls: Mutex<Vec<String>>,
    sessions: Mutex<Vec<Session>>,
    feeds: Mutex<Vec<Feed>>,
    published: Mutex<Vec<NewItem>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `password` for `email` at login.
    pub fn with_account(mut self, email: &str, password: &str) -> Self {
        self.passwords.insert(email.to_string(), password.to_string());
        self
    }

    /// Accept `token` when validating cached tokens.
    pub fn with_valid_token(self, token: &AuthToken) -> Self {
        self.valid_tokens
            .lock()
            .unwrap()
            .push(token.as_str().to_string());
        self
    }

    /// Entries every feed returns.
    pub fn with_entries(self, entries: Vec<Entry>) -> Self {
        *self.entries.lock().unwrap() = entries;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called(&self, prefix: &str) -> bool {
        self.calls().iter().any(|c| c.starts_with(prefix))
    }

    pub fn last_session(&self) -> Option<Session> {
        self.sessions.lock().unwrap().last().cloned()
    }

    pub fn feeds(&self) -> Vec<Feed> {
        self.feeds.lock().unwrap().clone()
    }

    pub fn published(&self) -> Vec<NewItem> {
        self.published.lock().unwrap().clone()
    }

    fn record(&self, call: String, session: Option<&Session>) {
        self.calls.lock().unwrap().push(call);
        if let Some(session) = session {
            self.sessions.lock().unwrap().push(session.clone());
        }
    }
}

impl RemoteApi for FakeApi {
    fn client_login(
        &self,
        service: &str,
        email: &str,
        password: &str,
    ) -> RemoteResult<Option<AuthToken>> {
        self.record(format!("login:{service}:{email}"), None);
        let accepted = self.passwords.get(email).is_some_and(|p| p == password);
        Ok(accepted.then(|| token_for(service, email)))
    }

    fn validate_token(&self, service: &str, token: &AuthToken) -> RemoteResult<bool> {
        self.record(format!("validate:{service}"), None);
        Ok(self
            .valid_tokens
            .lock()
            .unwrap()
            .iter()
            .any(|t| t == token.as_str()))
    }

    fn fetch(&self, session: &Session, feed: &Feed) -> RemoteResult<Vec<Entry>> {
        self.record(format!("fetch:{}", session.service), Some(session));
        self.feeds.lock().unwrap().push(feed.clone());
        Ok(self.entries.lock().unwrap().clone())
    }

    fn publish(&self, session: &Session, feed: &Feed, item: &NewItem) -> RemoteResult<Entry> {
        let title = item.title.clone().unwrap_or_default();
        self.record(format!("publish:{}:{}", session.service, title), Some(session));
        self.feeds.lock().unwrap().push(feed.clone());
        self.published.lock().unwrap().push(item.clone());
        Ok(Entry::new("new-id", title))
    }

    fn update(&self, session: &Session, entry: &Entry) -> RemoteResult<Entry> {
        self.record(
            format!("update:{}:{}:{}", session.service, entry.title, entry.tags.join("|")),
            Some(session),
        );
        Ok(entry.clone())
    }

    fn delete(&self, session: &Session, entry: &Entry) -> RemoteResult<()> {
        self.record(format!("delete:{}:{}", session.service, entry.title), Some(session));
        Ok(())
    }

    fn download(&self, session: &Session, entry: &Entry, dest: &Path) -> RemoteResult<()> {
        self.record(format!("download:{}:{}", session.service, entry.title), Some(session));
        std::fs::write(dest, format!("content of {}", entry.title)).unwrap();
        Ok(())
    }

    fn replace_media(&self, session: &Session, entry: &Entry, path: &Path) -> RemoteResult<Entry> {
        let content = std::fs::read_to_string(path).unwrap();
        self.record(
            format!("replace:{}:{}:{}", session.service, entry.title, content),
            Some(session),
        );
        Ok(entry.clone())
    }
}

/// Answers prompts from a script; an exhausted script reads as end of input,
/// or as Ctrl-C when built with `interrupting`.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
    interrupt_when_exhausted: bool,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().map(|a| a.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
            interrupt_when_exhausted: false,
        }
    }

    pub fn interrupting(answers: &[&str]) -> Self {
        Self {
            interrupt_when_exhausted: true,
            ..Self::new(answers)
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt(&self, message: &str) -> io::Result<String> {
        self.prompts.lock().unwrap().push(message.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| {
                if self.interrupt_when_exhausted {
                    io::Error::new(io::ErrorKind::Interrupted, "keyboard interrupt")
                } else {
                    io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted")
                }
            })
    }
}

/// Editor that optionally rewrites the file it is given.
#[derive(Default)]
pub struct FakeEditor {
    new_content: Option<String>,
    opened: Mutex<Vec<(Option<String>, PathBuf)>>,
}

impl FakeEditor {
    pub fn writing(content: &str) -> Self {
        Self {
            new_content: Some(content.to_string()),
            ..Default::default()
        }
    }

    pub fn opened(&self) -> Vec<(Option<String>, PathBuf)> {
        self.opened.lock().unwrap().clone()
    }
}

impl Editor for FakeEditor {
    fn open(&self, program: Option<&str>, path: &Path) -> io::Result<()> {
        self.opened
            .lock()
            .unwrap()
            .push((program.map(String::from), path.to_path_buf()));
        if let Some(content) = &self.new_content {
            std::fs::write(path, content)?;
        }
        Ok(())
    }
}

/// Shell input from a script; an exhausted script reads as end of input.
#[derive(Default)]
pub struct ScriptedReader {
    inputs: VecDeque<ShellInput>,
    pub history: Vec<String>,
}

impl ScriptedReader {
    pub fn lines(lines: &[&str]) -> Self {
        Self {
            inputs: lines.iter().map(|l| ShellInput::Line(l.to_string())).collect(),
            history: Vec::new(),
        }
    }

    pub fn then(mut self, input: ShellInput) -> Self {
        self.inputs.push_back(input);
        self
    }
}

impl LineReader for ScriptedReader {
    fn read_line(&mut self, _prompt: &str) -> io::Result<ShellInput> {
        Ok(self.inputs.pop_front().unwrap_or(ShellInput::Eof))
    }

    fn add_history(&mut self, line: &str) {
        self.history.push(line.to_string());
    }
}

/// Data directory plus the collaborators a dispatcher is built from.
pub struct Harness {
    pub temp: TempDir,
    pub api: Arc<FakeApi>,
    pub prompter: Arc<ScriptedPrompter>,
    pub editor: Arc<FakeEditor>,
}

impl Harness {
    pub fn new(api: FakeApi, prompter: ScriptedPrompter) -> Self {
        Self::with_editor(api, prompter, FakeEditor::default())
    }

    pub fn with_editor(api: FakeApi, prompter: ScriptedPrompter, editor: FakeEditor) -> Self {
        init_test_logging();
        Self {
            temp: TempDir::new().unwrap(),
            api: Arc::new(api),
            prompter: Arc::new(prompter),
            editor: Arc::new(editor),
        }
    }

    pub fn data_dir(&self) -> &Path {
        self.temp.path()
    }

    pub fn paths(&self) -> XdgPaths {
        XdgPaths::rooted(self.temp.path())
    }

    pub fn tokens(&self) -> FileTokenStore {
        FileTokenStore::new(self.paths(), Arc::new(RealFileSystem))
    }

    pub fn credentials(&self) -> FileCredentialStore {
        FileCredentialStore::new(self.paths(), Arc::new(RealFileSystem))
    }

    pub fn dispatcher(&self, settings: Settings) -> CommandDispatcher {
        CommandDispatcher::new(
            Arc::new(settings),
            Arc::new(ServiceRegistry::builtin()),
            DispatcherDeps {
                tokens: Arc::new(self.tokens()),
                credentials: Arc::new(self.credentials()),
                prompter: self.prompter.clone(),
                editor: self.editor.clone(),
                fs: Arc::new(RealFileSystem),
                api: self.api.clone(),
            },
        )
    }
}

pub fn words(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn output(buffer: Vec<u8>) -> String {
    String::from_utf8(buffer).unwrap()
}
