//! Running one `service task [args...]` command

use std::io::Write;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::help::{general_help, service_help, unknown_task};
use crate::application::resolver::OptionResolver;
use crate::application::services::{ServiceRegistry, TaskContext};
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{Options, TerminalEncoding};
use crate::infrastructure::client::ServiceClient;
use crate::infrastructure::credentials::CredentialStore;
use crate::infrastructure::remote::RemoteApi;
use crate::infrastructure::token_store::TokenStore;
use crate::infrastructure::traits::{Editor, FileSystem, Prompter};

pub const MISSING_TASK_MESSAGE: &str = "Must specify at least a service and a task!";
pub const LOGIN_FAILED_MESSAGE: &str = "Failed to log on!";
pub const USERNAME_LOGIN_PROMPT: &str = "Enter your username: ";
pub const DEVKEY_PROMPT: &str = "Please enter your developer key: ";

/// How a dispatched command ended, apart from errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The task handler ran to completion
    Ran,
    /// General or service help was printed
    Help,
    /// Fewer than two words were given
    MissingTask,
    /// The service has no such task
    UnknownTask,
    /// Authentication failed; the handler did not run
    LoginFailed,
}

/// I/O collaborators of the dispatcher.
pub struct DispatcherDeps {
    pub tokens: Arc<dyn TokenStore>,
    pub credentials: Arc<dyn CredentialStore>,
    pub prompter: Arc<dyn Prompter>,
    pub editor: Arc<dyn Editor>,
    pub fs: Arc<dyn FileSystem>,
    pub api: Arc<dyn RemoteApi>,
}

pub struct CommandDispatcher {
    settings: Arc<Settings>,
    registry: Arc<ServiceRegistry>,
    deps: DispatcherDeps,
    encoding: TerminalEncoding,
}

impl CommandDispatcher {
    pub fn new(settings: Arc<Settings>, registry: Arc<ServiceRegistry>, deps: DispatcherDeps) -> Self {
        Self {
            settings,
            registry,
            deps,
            encoding: TerminalEncoding::Utf8,
        }
    }

    /// Encoding task output is escaped for.
    pub fn with_encoding(mut self, encoding: TerminalEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// Run one command. `argv` starts with the service name.
    #[instrument(level = "debug", skip_all, fields(argv = ?argv))]
    pub fn dispatch(
        &self,
        mut options: Options,
        argv: &[String],
        out: &mut dyn Write,
    ) -> ApplicationResult<DispatchOutcome> {
        let (service_name, task_name, args) = match argv {
            [service, task, args @ ..] => (service.as_str(), task.as_str(), args),
            [only] if only == "help" => {
                emit(out, &general_help(&self.registry))?;
                return Ok(DispatchOutcome::Help);
            }
            _ => {
                emit(out, MISSING_TASK_MESSAGE)?;
                return Ok(DispatchOutcome::MissingTask);
            }
        };

        if service_name == "help" {
            let service = self
                .registry
                .get(task_name)
                .ok_or_else(|| ApplicationError::UnknownService(task_name.to_string()))?;
            emit(out, &service_help(service))?;
            return Ok(DispatchOutcome::Help);
        }

        let service = self
            .registry
            .get(service_name)
            .ok_or_else(|| ApplicationError::UnknownService(service_name.to_string()))?;
        let mut client = (service.new_client)(self.settings.client_flags(), self.deps.api.clone());

        let Some(task) = service.task(task_name) else {
            emit(out, &unknown_task(service))?;
            return Ok(DispatchOutcome::UnknownTask);
        };

        if service.needs_devkey {
            client.set_devkey(self.devkey()?);
        }

        if task.login_required && !self.authenticate(client.as_mut(), &options)? {
            emit(out, LOGIN_FAILED_MESSAGE)?;
            return Ok(DispatchOutcome::LoginFailed);
        }

        OptionResolver::new(
            &self.settings,
            self.deps.credentials.as_ref(),
            self.deps.prompter.as_ref(),
            self.deps.fs.as_ref(),
        )
        .resolve(service.section, &task.requirements, &mut options, client.is_logged_in())?;

        debug!("running {} {}", service.name, task.name);
        let mut ctx = TaskContext {
            client: client.as_ref(),
            options: &options,
            args,
            prompter: self.deps.prompter.as_ref(),
            editor: self.deps.editor.as_ref(),
            fs: self.deps.fs.as_ref(),
            out,
            encoding: self.encoding,
        };
        (task.handler)(&mut ctx)?;
        Ok(DispatchOutcome::Ran)
    }

    /// Cached token of the default user first, then a credential login.
    ///
    /// Tokens are only cached for the default user, never for an explicit
    /// `--user`.
    fn authenticate(
        &self,
        client: &mut dyn ServiceClient,
        options: &Options,
    ) -> ApplicationResult<bool> {
        let service = client.service().to_string();
        let cached = self.deps.credentials.read_creds();
        let explicit_user = options.user.clone().filter(|u| !u.is_empty());

        if explicit_user.is_none() {
            if let Some(creds) = &cached {
                self.try_cached_token(client, &service, &creds.email);
            }
        }
        if client.is_logged_in() {
            return Ok(true);
        }

        let email = match (&explicit_user, &cached) {
            (Some(user), _) => user.clone(),
            (None, Some(creds)) => creds.email.clone(),
            (None, None) => self.ask_username()?,
        };
        let password = match options.password.clone().filter(|p| !p.is_empty()) {
            Some(password) => password,
            None => match cached
                .as_ref()
                .filter(|c| c.email == email)
                .and_then(|c| c.password.clone())
            {
                Some(password) => password,
                None => self
                    .deps
                    .prompter
                    .prompt_secret(&format!("Enter password for {email}: "))
                    .with_prompt_context("password")?,
            },
        };

        match client.login(&email, &password) {
            Ok(true) => info!("logged in to {} as {}", service, email),
            Ok(false) => return Ok(false),
            Err(e) => {
                warn!("login to {} failed: {}", service, e);
                return Ok(false);
            }
        }

        if explicit_user.is_none() {
            if let Some(token) = client.token() {
                if let Err(e) = self.deps.tokens.write(&service, &email, token) {
                    warn!("could not cache {} token for {}: {}", service, email, e);
                }
            }
            if let Err(e) = self.deps.credentials.remember_user(&email) {
                warn!("could not remember {} as default user: {}", email, e);
            }
        }
        Ok(true)
    }

    fn try_cached_token(&self, client: &mut dyn ServiceClient, service: &str, email: &str) {
        let Some(token) = self.deps.tokens.read(service, email) else {
            return;
        };
        client.set_token(token);
        match client.is_token_valid() {
            Ok(true) => {
                debug!("cached {} token for {} accepted", service, email);
                client.mark_logged_in(email);
            }
            Ok(false) => {
                info!("cached {} token for {} was rejected", service, email);
                client.clear_token();
                if let Err(e) = self.deps.tokens.remove(service, email) {
                    warn!("could not remove stale {} token: {}", service, e);
                }
            }
            Err(e) => {
                warn!("could not validate cached {} token: {}", service, e);
                client.clear_token();
            }
        }
    }

    fn ask_username(&self) -> ApplicationResult<String> {
        loop {
            let answer = self
                .deps
                .prompter
                .prompt(USERNAME_LOGIN_PROMPT)
                .with_prompt_context("username")?;
            let answer = answer.trim();
            if !answer.is_empty() {
                return Ok(answer.to_string());
            }
        }
    }

    /// Developer key from the store, or asked for once and stored.
    fn devkey(&self) -> ApplicationResult<String> {
        if let Some(key) = self.deps.credentials.read_devkey() {
            return Ok(key);
        }
        let key = loop {
            let answer = self
                .deps
                .prompter
                .prompt_secret(DEVKEY_PROMPT)
                .with_prompt_context("developer key")?;
            if !answer.trim().is_empty() {
                break answer.trim().to_string();
            }
        };
        self.deps
            .credentials
            .write_devkey(&key)
            .map_err(|e| ApplicationError::store("developer key", e))?;
        Ok(key)
    }
}

fn emit(out: &mut dyn Write, text: &str) -> ApplicationResult<()> {
    writeln!(out, "{text}").map_err(|e| ApplicationError::OperationFailed {
        context: "write output".to_string(),
        source: Box::new(e),
    })
}
