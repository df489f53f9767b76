//! Filling in task options the user did not give
//!
//! Missing required options come from the service's config section first,
//! then from an interactive prompt.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::{debug, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{expand_env_vars, safe_decode, OptionField, Options, Requirements};
use crate::infrastructure::credentials::CredentialStore;
use crate::infrastructure::traits::{FileSystem, Prompter};

pub const USERNAME_PROMPT: &str = "Enter a username: ";

/// Characters `quote_plus` leaves alone, besides the space that becomes `+`.
const QUERY_KEEP: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b' ');

/// Form-encode a query: space becomes `+`, everything outside
/// `A-Za-z0-9_.-` is percent-encoded as UTF-8.
pub fn quote_plus(query: &str) -> String {
    utf8_percent_encode(query, QUERY_KEEP)
        .to_string()
        .replace(' ', "+")
}

pub struct OptionResolver<'a> {
    settings: &'a Settings,
    credentials: &'a dyn CredentialStore,
    prompter: &'a dyn Prompter,
    fs: &'a dyn FileSystem,
}

impl<'a> OptionResolver<'a> {
    pub fn new(
        settings: &'a Settings,
        credentials: &'a dyn CredentialStore,
        prompter: &'a dyn Prompter,
        fs: &'a dyn FileSystem,
    ) -> Self {
        Self {
            settings,
            credentials,
            prompter,
            fs,
        }
    }

    /// Fill every option `requirements` asks for, in place.
    ///
    /// `section` names the config table defaults are read from. After a
    /// successful return each required option is non-empty and
    /// `encoded_query` reflects `query`.
    #[instrument(level = "debug", skip(self, requirements, options))]
    pub fn resolve(
        &self,
        section: &str,
        requirements: &Requirements,
        options: &mut Options,
        logged_in: bool,
    ) -> ApplicationResult<()> {
        if !logged_in && requirements.mentions(OptionField::User) && options.is_missing(OptionField::User)
        {
            self.fill_user(options)?;
        }

        self.inline_summary_file(options)?;

        let candidates = options.missing_fields();
        for field in candidates {
            if !requirements.requires(field, options) {
                continue;
            }
            match self.settings.service_default(section, field) {
                Some(value) => {
                    debug!("{} taken from [{}] defaults", field, section);
                    options.set(field, value)?;
                }
                None => {
                    let value = self.ask(&field.prompt(), field.name())?;
                    options.set(field, value)?;
                }
            }
        }

        options.encoded_query = options
            .query
            .as_deref()
            .filter(|q| !q.is_empty())
            .map(quote_plus);
        Ok(())
    }

    fn fill_user(&self, options: &mut Options) -> ApplicationResult<()> {
        if self.settings.general.use_default_username {
            if let Some(creds) = self.credentials.read_creds() {
                debug!("using cached username {}", creds.email);
                options.user = Some(creds.email);
                return Ok(());
            }
        }
        options.user = Some(self.ask(USERNAME_PROMPT, "username")?);
        Ok(())
    }

    /// `--summary` naming an existing file means "use this file's text".
    fn inline_summary_file(&self, options: &mut Options) -> ApplicationResult<()> {
        let Some(summary) = options.summary.as_deref().filter(|s| !s.is_empty()) else {
            return Ok(());
        };
        let expanded = expand_env_vars(summary);
        let path = std::path::Path::new(&expanded);
        if !self.fs.is_file(path) {
            return Ok(());
        }
        let bytes = self.fs.read(path).with_path_context("read summary", path)?;
        debug!("summary read from {}", path.display());
        options.summary = Some(safe_decode(bytes)?);
        Ok(())
    }

    /// Prompt until the answer is non-empty.
    fn ask(&self, message: &str, what: &str) -> ApplicationResult<String> {
        loop {
            let answer = self.prompter.prompt(message).with_prompt_context(what)?;
            if !answer.trim().is_empty() {
                return Ok(answer);
            }
        }
    }
}
