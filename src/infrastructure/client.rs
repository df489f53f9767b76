//! Per-invocation service clients

use std::path::Path;
use std::sync::Arc;

use crate::domain::{AuthToken, ClientFlags, Entry, Feed, NewItem};
use crate::infrastructure::remote::{RemoteApi, RemoteResult, Session};

/// Token handling every service client provides.
pub trait TokenAuth {
    fn token(&self) -> Option<&AuthToken>;

    fn set_token(&mut self, token: AuthToken);

    fn clear_token(&mut self);

    /// Ask the service whether the installed token is still accepted.
    /// Without a token the answer is `false`.
    fn is_token_valid(&self) -> RemoteResult<bool>;

    /// Credential login; on success the token is installed and the client
    /// counts as logged in as `email`.
    fn login(&mut self, email: &str, password: &str) -> RemoteResult<bool>;

    fn is_logged_in(&self) -> bool;

    fn mark_logged_in(&mut self, email: &str);

    fn email(&self) -> Option<&str>;
}

/// Client for one service, built from the `[general]` flags.
pub trait ServiceClient: TokenAuth {
    fn service(&self) -> &str;

    fn flags(&self) -> ClientFlags;

    fn set_devkey(&mut self, key: String);

    fn fetch(&self, feed: &Feed) -> RemoteResult<Vec<Entry>>;

    fn publish(&self, feed: &Feed, item: &NewItem) -> RemoteResult<Entry>;

    fn update(&self, entry: &Entry) -> RemoteResult<Entry>;

    fn delete(&self, entry: &Entry) -> RemoteResult<()>;

    fn download(&self, entry: &Entry, dest: &Path) -> RemoteResult<()>;

    fn replace_media(&self, entry: &Entry, path: &Path) -> RemoteResult<Entry>;
}

/// Client constructor registered for each service.
pub type ClientFactory = fn(ClientFlags, Arc<dyn RemoteApi>) -> Box<dyn ServiceClient>;

/// `ServiceClient` that forwards remote work to a `RemoteApi`.
pub struct GoogleClient {
    flags: ClientFlags,
    api: Arc<dyn RemoteApi>,
    session: Session,
    logged_in: bool,
}

impl GoogleClient {
    pub fn new(service: &str, flags: ClientFlags, api: Arc<dyn RemoteApi>) -> Self {
        Self {
            flags,
            api,
            session: Session::new(service),
            logged_in: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}

impl TokenAuth for GoogleClient {
    fn token(&self) -> Option<&AuthToken> {
        self.session.token.as_ref()
    }

    fn set_token(&mut self, token: AuthToken) {
        self.session.token = Some(token);
    }

    fn clear_token(&mut self) {
        self.session.token = None;
        self.logged_in = false;
    }

    fn is_token_valid(&self) -> RemoteResult<bool> {
        match &self.session.token {
            Some(token) => self.api.validate_token(&self.session.service, token),
            None => Ok(false),
        }
    }

    fn login(&mut self, email: &str, password: &str) -> RemoteResult<bool> {
        match self
            .api
            .client_login(&self.session.service, email, password)?
        {
            Some(token) => {
                self.set_token(token);
                self.mark_logged_in(email);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    fn mark_logged_in(&mut self, email: &str) {
        self.session.email = Some(email.to_string());
        self.logged_in = true;
    }

    fn email(&self) -> Option<&str> {
        self.session.email.as_deref()
    }
}

impl ServiceClient for GoogleClient {
    fn service(&self) -> &str {
        &self.session.service
    }

    fn flags(&self) -> ClientFlags {
        self.flags
    }

    fn set_devkey(&mut self, key: String) {
        self.session.devkey = Some(key);
    }

    fn fetch(&self, feed: &Feed) -> RemoteResult<Vec<Entry>> {
        self.api.fetch(&self.session, feed)
    }

    fn publish(&self, feed: &Feed, item: &NewItem) -> RemoteResult<Entry> {
        self.api.publish(&self.session, feed, item)
    }

    fn update(&self, entry: &Entry) -> RemoteResult<Entry> {
        self.api.update(&self.session, entry)
    }

    fn delete(&self, entry: &Entry) -> RemoteResult<()> {
        self.api.delete(&self.session, entry)
    }

    fn download(&self, entry: &Entry, dest: &Path) -> RemoteResult<()> {
        self.api.download(&self.session, entry, dest)
    }

    fn replace_media(&self, entry: &Entry, path: &Path) -> RemoteResult<Entry> {
        self.api.replace_media(&self.session, entry, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::remote::UnlinkedApi;

    #[test]
    fn given_no_token_when_validating_then_invalid_without_remote_call() {
        let client = GoogleClient::new("blogger", ClientFlags::default(), Arc::new(UnlinkedApi));
        assert!(!client.is_token_valid().unwrap());
    }

    #[test]
    fn given_token_when_clearing_then_logged_out() {
        let mut client =
            GoogleClient::new("blogger", ClientFlags::default(), Arc::new(UnlinkedApi));
        client.set_token(AuthToken::new("t"));
        client.mark_logged_in("joe@example.com");

        client.clear_token();

        assert!(client.token().is_none());
        assert!(!client.is_logged_in());
        assert_eq!(client.session().service, "blogger");
    }
}
