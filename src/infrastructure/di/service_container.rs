//! Service container for dependency injection
//!
//! Wires the dispatcher to the real stores, terminal and remote backend.

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::services::ServiceRegistry;
use crate::application::{CommandDispatcher, DispatcherDeps};
use crate::config::Settings;
use crate::domain::TerminalEncoding;
use crate::infrastructure::credentials::{CredentialStore, FileCredentialStore};
use crate::infrastructure::paths::XdgPaths;
use crate::infrastructure::remote::{RemoteApi, UnlinkedApi};
use crate::infrastructure::token_store::{FileTokenStore, TokenStore};
use crate::infrastructure::traits::{
    CommandEditor, Editor, FileSystem, Prompter, RealFileSystem, StdinPrompter,
};

pub const HISTORY_FILENAME: &str = "history";

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Known services and their task catalogs
    pub registry: Arc<ServiceRegistry>,

    /// Where tokens, credentials and history live
    pub data_paths: XdgPaths,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    pub tokens: Arc<dyn TokenStore>,
    pub credentials: Arc<dyn CredentialStore>,
    pub prompter: Arc<dyn Prompter>,
    pub editor: Arc<dyn Editor>,
    pub api: Arc<dyn RemoteApi>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(
            settings,
            XdgPaths::data(),
            Arc::new(RealFileSystem),
            Arc::new(StdinPrompter),
            Arc::new(UnlinkedApi),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        data_paths: XdgPaths,
        fs: Arc<dyn FileSystem>,
        prompter: Arc<dyn Prompter>,
        api: Arc<dyn RemoteApi>,
    ) -> Self {
        let tokens = Arc::new(FileTokenStore::new(data_paths.clone(), fs.clone()));
        let credentials = Arc::new(FileCredentialStore::new(data_paths.clone(), fs.clone()));

        Self {
            settings: Arc::new(settings),
            registry: Arc::new(ServiceRegistry::builtin()),
            data_paths,
            fs,
            tokens,
            credentials,
            prompter,
            editor: Arc::new(CommandEditor),
            api,
        }
    }

    /// Dispatcher sharing this container's services.
    pub fn dispatcher(&self) -> CommandDispatcher {
        CommandDispatcher::new(
            self.settings.clone(),
            self.registry.clone(),
            DispatcherDeps {
                tokens: self.tokens.clone(),
                credentials: self.credentials.clone(),
                prompter: self.prompter.clone(),
                editor: self.editor.clone(),
                fs: self.fs.clone(),
                api: self.api.clone(),
            },
        )
        .with_encoding(TerminalEncoding::detect())
    }

    /// History file of the interactive shell; `None` when the data
    /// directory cannot be created.
    pub fn history_path(&self) -> Option<PathBuf> {
        self.data_paths
            .resolve(HISTORY_FILENAME, true)
            .map_err(|e| tracing::warn!("no shell history: {}", e))
            .ok()
    }
}
