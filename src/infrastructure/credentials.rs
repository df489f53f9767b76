//! Cached default-user credentials and the YouTube developer key

use std::io;
use std::sync::Arc;

use crate::domain::Credentials;
use crate::infrastructure::paths::XdgPaths;
use crate::infrastructure::traits::FileSystem;

pub const CREDS_FILENAME: &str = "creds";
pub const DEVKEY_FILENAME: &str = "yt_devkey";

pub trait CredentialStore: Send + Sync {
    /// Cached default user, if one was remembered.
    fn read_creds(&self) -> Option<Credentials>;

    /// Make `email` the default user. A cached password survives only when
    /// the email is unchanged.
    fn remember_user(&self, email: &str) -> io::Result<()>;

    fn read_devkey(&self) -> Option<String>;

    fn write_devkey(&self, key: &str) -> io::Result<()>;
}

/// Credentials kept in owner-only files on the XDG data path.
pub struct FileCredentialStore {
    paths: XdgPaths,
    fs: Arc<dyn FileSystem>,
}

impl FileCredentialStore {
    pub fn new(paths: XdgPaths, fs: Arc<dyn FileSystem>) -> Self {
        Self { paths, fs }
    }

    fn read_file(&self, filename: &str) -> Option<String> {
        let path = self.paths.locate(filename)?;
        self.fs
            .read_to_string(&path)
            .map_err(|e| tracing::warn!("cannot read {}: {}", path.display(), e))
            .ok()
    }
}

impl CredentialStore for FileCredentialStore {
    fn read_creds(&self) -> Option<Credentials> {
        let content = self.read_file(CREDS_FILENAME)?;
        match toml::from_str::<Credentials>(&content) {
            Ok(creds) if !creds.email.trim().is_empty() => Some(creds),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("ignoring unreadable {} file: {}", CREDS_FILENAME, e.message());
                None
            }
        }
    }

    fn remember_user(&self, email: &str) -> io::Result<()> {
        let password = self
            .read_creds()
            .filter(|c| c.email == email)
            .and_then(|c| c.password);
        let creds = Credentials {
            email: email.to_string(),
            password,
        };
        let content = toml::to_string(&creds).map_err(io::Error::other)?;
        let path = self.paths.resolve(CREDS_FILENAME, true)?;
        tracing::debug!("remembering {} as default user", email);
        self.fs.write_private(&path, &content)
    }

    fn read_devkey(&self) -> Option<String> {
        self.read_file(DEVKEY_FILENAME)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }

    fn write_devkey(&self, key: &str) -> io::Result<()> {
        let path = self.paths.resolve(DEVKEY_FILENAME, true)?;
        self.fs.write_private(&path, key.trim())
    }
}
