//! XDG base directory lookup for config and data files
//!
//! Files are searched in: the current directory, `$XDG_<KIND>_HOME/googlecl`,
//! every `$XDG_<KIND>_DIRS` entry joined with `googlecl`, then `~/.googlecl`.
//! New files are created under `$XDG_<KIND>_HOME/googlecl`.

use std::io;
use std::path::{Path, PathBuf};

use directories::BaseDirs;

pub const SUBDIR_NAME: &str = "googlecl";
const LEGACY_DIR_NAME: &str = ".googlecl";

/// Kind of XDG location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XdgKind {
    Config,
    Data,
}

impl XdgKind {
    fn var_suffix(self) -> &'static str {
        match self {
            XdgKind::Config => "CONFIG",
            XdgKind::Data => "DATA",
        }
    }

    fn default_system_dirs(self) -> &'static str {
        match self {
            XdgKind::Config => "/etc/xdg",
            XdgKind::Data => "/usr/local/share/:/usr/share/",
        }
    }
}

/// Ordered search path plus the directory new files go to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XdgPaths {
    search: Vec<PathBuf>,
    home: PathBuf,
}

impl XdgPaths {
    pub fn config() -> Self {
        Self::from_env(XdgKind::Config)
    }

    pub fn data() -> Self {
        Self::from_env(XdgKind::Data)
    }

    fn from_env(kind: XdgKind) -> Self {
        let base = BaseDirs::new();
        let user_home = base
            .as_ref()
            .map(|b| b.home_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("~"));

        let xdg_home = std::env::var(format!("XDG_{}_HOME", kind.var_suffix()))
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| match kind {
                XdgKind::Config => user_home.join(".config"),
                XdgKind::Data => user_home.join(".local").join("share"),
            })
            .join(SUBDIR_NAME);

        let system_dirs = std::env::var(format!("XDG_{}_DIRS", kind.var_suffix()))
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| kind.default_system_dirs().to_string());

        let mut search = Vec::new();
        if let Ok(cwd) = std::env::current_dir() {
            search.push(cwd);
        }
        search.push(xdg_home.clone());
        search.extend(
            system_dirs
                .split(':')
                .filter(|d| !d.is_empty())
                .map(|d| Path::new(d).join(SUBDIR_NAME)),
        );
        search.push(user_home.join(LEGACY_DIR_NAME));

        Self {
            search,
            home: xdg_home,
        }
    }

    /// A single directory used both for lookup and creation (tests, `--data-dir` style setups).
    pub fn rooted(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            search: vec![dir.clone()],
            home: dir,
        }
    }

    /// Directory where new files are created.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// First existing file named `filename` on the search path.
    pub fn locate(&self, filename: &str) -> Option<PathBuf> {
        let found = self
            .search
            .iter()
            .map(|dir| dir.join(filename))
            .find(|p| p.is_file());
        if found.is_none() {
            tracing::debug!("could not find {} in any of {:?}", filename, self.search);
        }
        found
    }

    /// Existing file, or the path it would be created at in the home directory.
    ///
    /// With `create_missing_dir` the home directory is created (mode 0700 on Unix).
    pub fn resolve(&self, filename: &str, create_missing_dir: bool) -> io::Result<PathBuf> {
        if let Some(existing) = self.locate(filename) {
            return Ok(existing);
        }
        if create_missing_dir && !self.home.is_dir() {
            create_private_dir(&self.home)?;
        }
        Ok(self.home.join(filename))
    }
}

fn create_private_dir(dir: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        std::fs::DirBuilder::new()
            .recursive(true)
            .mode(0o700)
            .create(dir)
    }

    #[cfg(not(unix))]
    {
        std::fs::create_dir_all(dir)
    }
}
