//! Service registry and task catalogs
//!
//! Every service is a static definition: its config section, the client
//! constructor, and a catalog of tasks. Each task declares which options it
//! requires and points at a plain handler function.

mod blogger;
mod calendar;
pub mod common;
mod contacts;
mod docs;
mod picasa;
mod youtube;

use std::io::Write;
use std::sync::Arc;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    build_titles_list, safe_encode, ClientFlags, EncodeErrors, Options, Requirements,
    TerminalEncoding, TitleMatcher,
};
use crate::infrastructure::client::{ClientFactory, GoogleClient, ServiceClient};
use crate::infrastructure::remote::RemoteApi;
use crate::infrastructure::traits::{Editor, FileSystem, Prompter};

/// Everything a task handler may touch.
pub struct TaskContext<'a> {
    pub client: &'a dyn ServiceClient,
    pub options: &'a Options,
    /// Words left on the command line after `service task`
    pub args: &'a [String],
    pub prompter: &'a dyn Prompter,
    pub editor: &'a dyn Editor,
    pub fs: &'a dyn FileSystem,
    pub out: &'a mut dyn Write,
    pub encoding: TerminalEncoding,
}

impl TaskContext<'_> {
    /// Write one line, escaping what the terminal cannot show.
    pub fn say(&mut self, text: &str) -> ApplicationResult<()> {
        let safe = safe_encode(text, self.encoding, EncodeErrors::BackslashReplace)?;
        writeln!(self.out, "{}", safe).map_err(|e| ApplicationError::OperationFailed {
            context: "write output".to_string(),
            source: Box::new(e),
        })
    }

    pub fn flags(&self) -> ClientFlags {
        self.client.flags()
    }

    /// Titles from `--title` plus extra words, as the title-driven tasks take them.
    pub fn titles(&self) -> Vec<Option<String>> {
        build_titles_list(self.options.title.as_deref(), self.args)
    }

    /// Matcher over `--title` only, for tasks whose words are file paths.
    pub fn title_matcher(&self) -> ApplicationResult<TitleMatcher> {
        Ok(TitleMatcher::new(
            &[self.options.title.clone()],
            self.flags().regex,
        )?)
    }

    /// Matcher over `--title` and all extra words.
    pub fn titles_matcher(&self) -> ApplicationResult<TitleMatcher> {
        Ok(TitleMatcher::new(&self.titles(), self.flags().regex)?)
    }
}

pub type TaskHandler = fn(&mut TaskContext<'_>) -> ApplicationResult<()>;

/// One task of a service catalog.
pub struct TaskDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub requirements: Requirements,
    pub login_required: bool,
    pub handler: TaskHandler,
}

impl std::fmt::Debug for TaskDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskDescriptor")
            .field("name", &self.name)
            .field("requirements", &self.requirements)
            .field("login_required", &self.login_required)
            .finish()
    }
}

/// A service the dispatcher knows about.
pub struct ServiceDefinition {
    pub name: &'static str,
    /// Config table holding this service's option defaults
    pub section: &'static str,
    pub tasks: Vec<TaskDescriptor>,
    pub needs_devkey: bool,
    pub new_client: ClientFactory,
}

impl ServiceDefinition {
    pub fn task(&self, name: &str) -> Option<&TaskDescriptor> {
        self.tasks.iter().find(|t| t.name == name)
    }

    pub fn task_names(&self) -> Vec<&'static str> {
        self.tasks.iter().map(|t| t.name).collect()
    }
}

/// Static mapping from service name to definition, in registration order.
#[derive(Default)]
pub struct ServiceRegistry {
    services: Vec<ServiceDefinition>,
}

impl ServiceRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// picasa, blogger, youtube, docs, contacts, calendar.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(picasa::definition());
        registry.register(blogger::definition());
        registry.register(youtube::definition());
        registry.register(docs::definition());
        registry.register(contacts::definition());
        registry.register(calendar::definition());
        registry
    }

    /// Add a service; a later definition with the same name replaces the earlier one.
    pub fn register(&mut self, definition: ServiceDefinition) {
        self.services.retain(|s| s.name != definition.name);
        self.services.push(definition);
    }

    pub fn get(&self, name: &str) -> Option<&ServiceDefinition> {
        self.services.iter().find(|s| s.name == name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.services.iter().map(|s| s.name).collect()
    }
}

/// Build a `GoogleClient` for `service`; used by the builtin constructors.
fn google_client(service: &str, flags: ClientFlags, api: Arc<dyn RemoteApi>) -> Box<dyn ServiceClient> {
    Box::new(GoogleClient::new(service, flags, api))
}
