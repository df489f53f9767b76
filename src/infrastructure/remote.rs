//! Boundary to the Google data APIs
//!
//! Authentication exchanges, HTTP and feed parsing live behind `RemoteApi`.
//! The binary links `UnlinkedApi`; tests link in-memory fakes.

use std::path::Path;

use thiserror::Error;

use crate::domain::{AuthToken, Entry, Feed, NewItem};

/// Errors reported by a remote backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("remote service unavailable: {0}")]
    Unavailable(String),

    #[error("authentication rejected: {0}")]
    Auth(String),

    #[error("{operation} failed: {message}")]
    Request { operation: String, message: String },
}

impl RemoteError {
    pub fn request(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Request {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Per-invocation authentication state handed to every remote call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub service: String,
    pub token: Option<AuthToken>,
    pub email: Option<String>,
    pub devkey: Option<String>,
}

impl Session {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            ..Default::default()
        }
    }
}

/// Remote operations shared by all services.
pub trait RemoteApi: Send + Sync {
    /// Exchange credentials for a token; `Ok(None)` when they are rejected.
    fn client_login(
        &self,
        service: &str,
        email: &str,
        password: &str,
    ) -> RemoteResult<Option<AuthToken>>;

    /// Whether the service still accepts `token`.
    fn validate_token(&self, service: &str, token: &AuthToken) -> RemoteResult<bool>;

    fn fetch(&self, session: &Session, feed: &Feed) -> RemoteResult<Vec<Entry>>;

    fn publish(&self, session: &Session, feed: &Feed, item: &NewItem) -> RemoteResult<Entry>;

    /// Push changed metadata (title, summary, tags) of an entry.
    fn update(&self, session: &Session, entry: &Entry) -> RemoteResult<Entry>;

    fn delete(&self, session: &Session, entry: &Entry) -> RemoteResult<()>;

    /// Save the entry's content to `dest`.
    fn download(&self, session: &Session, entry: &Entry, dest: &Path) -> RemoteResult<()>;

    /// Replace the entry's content with the file at `path`.
    fn replace_media(&self, session: &Session, entry: &Entry, path: &Path)
        -> RemoteResult<Entry>;
}

/// Backend used when no transport is linked into the binary.
#[derive(Debug, Default)]
pub struct UnlinkedApi;

impl UnlinkedApi {
    fn unavailable<T>(&self, service: &str) -> RemoteResult<T> {
        Err(RemoteError::Unavailable(format!(
            "no remote API backend is linked for {service}"
        )))
    }
}

impl RemoteApi for UnlinkedApi {
    fn client_login(
        &self,
        service: &str,
        _email: &str,
        _password: &str,
    ) -> RemoteResult<Option<AuthToken>> {
        self.unavailable(service)
    }

    fn validate_token(&self, service: &str, _token: &AuthToken) -> RemoteResult<bool> {
        self.unavailable(service)
    }

    fn fetch(&self, session: &Session, _feed: &Feed) -> RemoteResult<Vec<Entry>> {
        self.unavailable(&session.service)
    }

    fn publish(&self, session: &Session, _feed: &Feed, _item: &NewItem) -> RemoteResult<Entry> {
        self.unavailable(&session.service)
    }

    fn update(&self, session: &Session, _entry: &Entry) -> RemoteResult<Entry> {
        self.unavailable(&session.service)
    }

    fn delete(&self, session: &Session, _entry: &Entry) -> RemoteResult<()> {
        self.unavailable(&session.service)
    }

    fn download(&self, session: &Session, _entry: &Entry, _dest: &Path) -> RemoteResult<()> {
        self.unavailable(&session.service)
    }

    fn replace_media(
        &self,
        session: &Session,
        _entry: &Entry,
        _path: &Path,
    ) -> RemoteResult<Entry> {
        self.unavailable(&session.service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Collection;

    #[test]
    fn given_unlinked_api_when_calling_then_reports_unavailable_with_service() {
        let api = UnlinkedApi;
        let err = api
            .fetch(&Session::new("picasa"), &Feed::new(Collection::Albums))
            .unwrap_err();
        assert!(matches!(err, RemoteError::Unavailable(ref m) if m.contains("picasa")));
    }
}
