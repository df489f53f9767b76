//! Domain entities: core data structures

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::DateRange;

/// Opaque credential that authenticates calls without a password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens must never end up in logs.
impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Cached default-user credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Behaviour switches a service client is built with (from `[general]`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientFlags {
    /// Titles are regular expressions instead of exact names
    pub regex: bool,
    /// Confirm each tag change
    pub tags_prompt: bool,
    /// Confirm each deletion
    pub delete_prompt: bool,
}

/// Collection of remote items a task operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collection {
    Albums,
    Photos { album: Option<String> },
    Blogs,
    Posts { blog: Option<String> },
    Videos,
    Documents { folder: Option<String> },
    Contacts,
    Events {
        calendar: Option<String>,
        range: Option<DateRange>,
    },
}

impl Collection {
    /// Singular noun for messages ("album", "post", ...).
    pub fn item_kind(&self) -> &'static str {
        match self {
            Collection::Albums => "album",
            Collection::Photos { .. } => "photo",
            Collection::Blogs => "blog",
            Collection::Posts { .. } => "post",
            Collection::Videos => "video",
            Collection::Documents { .. } => "document",
            Collection::Contacts => "contact",
            Collection::Events { .. } => "event",
        }
    }
}

/// Addressed feed: collection plus owner and full-text query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    pub collection: Collection,
    /// Owner of the feed; `None` means the logged-in user
    pub user: Option<String>,
    /// URL-encoded full-text query
    pub query: Option<String>,
}

impl Feed {
    pub fn new(collection: Collection) -> Self {
        Self {
            collection,
            user: None,
            query: None,
        }
    }

    pub fn owned_by(mut self, user: Option<String>) -> Self {
        self.user = user;
        self
    }

    pub fn matching(mut self, encoded_query: Option<String>) -> Self {
        self.query = encoded_query;
        self
    }
}

/// Remote item as returned by a feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub id: String,
    pub title: String,
    pub url: Option<String>,
    /// Description, or the email address of a contact
    pub summary: Option<String>,
    pub tags: Vec<String>,
    /// Date or timestamp text as reported by the service
    pub when: Option<String>,
}

impl Entry {
    /// Entry id and title; the remaining fields start empty.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Item to create remotely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewItem {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub date: Option<String>,
    /// Local media to upload
    pub path: Option<PathBuf>,
    /// Id of the containing entry (album, folder, ...)
    pub parent: Option<String>,
    pub category: Option<String>,
    pub devtags: Vec<String>,
    pub email: Option<String>,
    /// File extension used to pick the upload content type
    pub format: Option<String>,
    pub convert: bool,
}

/// Split a comma separated option value into trimmed, non-empty parts.
pub fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

/// Expand `~` and `$VAR` in a path-like string.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
