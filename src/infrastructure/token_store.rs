//! Per-user token records
//!
//! Each user has one TOML file `access_tok_<user>` in the data directory:
//!
//! ```toml
//! [tokens]
//! picasa = "DQAAAH..."
//! blogger = "DQAAAI..."
//! ```
//!
//! A record that is not UTF-8 TOML is moved aside to `<file>.failed` the next
//! time it would be written, and replaced by a fresh one.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::AuthToken;
use crate::infrastructure::paths::XdgPaths;
use crate::infrastructure::traits::FileSystem;

pub const TOKEN_FILE_PREFIX: &str = "access_tok_";
const FAILED_SUFFIX: &str = ".failed";

/// Persistent (service, user) -> token mapping.
pub trait TokenStore: Send + Sync {
    fn read(&self, service: &str, user: &str) -> Option<AuthToken>;

    fn write(&self, service: &str, user: &str, token: &AuthToken) -> io::Result<()>;

    /// Returns whether a token was removed.
    fn remove(&self, service: &str, user: &str) -> io::Result<bool>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct TokenRecord {
    #[serde(default)]
    tokens: BTreeMap<String, AuthToken>,
}

/// Token records stored as files on the XDG data path.
pub struct FileTokenStore {
    paths: XdgPaths,
    fs: Arc<dyn FileSystem>,
}

impl FileTokenStore {
    pub fn new(paths: XdgPaths, fs: Arc<dyn FileSystem>) -> Self {
        Self { paths, fs }
    }

    /// File name of a user's record; path separators are not allowed in it.
    pub fn file_name(user: &str) -> String {
        let safe: String = user
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        format!("{TOKEN_FILE_PREFIX}{safe}")
    }

    /// Outer error is I/O; inner error is a record that is not UTF-8 TOML.
    fn parse(&self, path: &Path) -> io::Result<Result<TokenRecord, String>> {
        let bytes = self.fs.read(path)?;
        let Ok(content) = String::from_utf8(bytes) else {
            return Ok(Err("not valid UTF-8".to_string()));
        };
        Ok(toml::from_str(&content).map_err(|e| e.message().to_string()))
    }

    /// Existing record, or a fresh one after quarantining a corrupt file.
    fn load_for_update(&self, path: &Path) -> io::Result<TokenRecord> {
        if !self.fs.exists(path) {
            return Ok(TokenRecord::default());
        }
        match self.parse(path)? {
            Ok(record) => Ok(record),
            Err(e) => {
                let failed = failed_path(path);
                tracing::warn!(
                    "token record {} is unreadable ({}); moving it to {}",
                    path.display(),
                    e,
                    failed.display()
                );
                if self.fs.exists(&failed) {
                    self.fs.remove_file(&failed)?;
                }
                self.fs.rename(path, &failed)?;
                Ok(TokenRecord::default())
            }
        }
    }

    fn save(&self, path: &Path, record: &TokenRecord) -> io::Result<()> {
        let content = toml::to_string(record).map_err(io::Error::other)?;
        self.fs.write_private(path, &content)
    }
}

impl TokenStore for FileTokenStore {
    fn read(&self, service: &str, user: &str) -> Option<AuthToken> {
        let path = self.paths.locate(&Self::file_name(user))?;
        match self.parse(&path) {
            Ok(Ok(mut record)) => record.tokens.remove(&service.to_lowercase()),
            Ok(Err(e)) => {
                tracing::warn!("ignoring unreadable token record {}: {}", path.display(), e);
                None
            }
            Err(e) => {
                tracing::warn!("cannot read token record {}: {}", path.display(), e);
                None
            }
        }
    }

    fn write(&self, service: &str, user: &str, token: &AuthToken) -> io::Result<()> {
        let path = self.paths.resolve(&Self::file_name(user), true)?;
        let mut record = self.load_for_update(&path)?;
        record.tokens.insert(service.to_lowercase(), token.clone());
        tracing::debug!("storing {} token for {} in {}", service, user, path.display());
        self.save(&path, &record)
    }

    fn remove(&self, service: &str, user: &str) -> io::Result<bool> {
        let Some(path) = self.paths.locate(&Self::file_name(user)) else {
            return Ok(false);
        };
        let mut record = self.load_for_update(&path)?;
        let removed = record.tokens.remove(&service.to_lowercase()).is_some();
        self.save(&path, &record)?;
        Ok(removed)
    }
}

fn failed_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(FAILED_SUFFIX);
    PathBuf::from(name)
}
