// Resolution of logical resource paths to files on disk.

use std::path::{Path, PathBuf};

use log::debug;

/// Environment variable holding extra dictionary roots, separated like
/// `PATH`.
pub const DICT_PATH_ENV: &str = "FSASPELL_DICT_PATH";

/// Maps a logical relative path such as `en/hunspell/en_US.dict` to an
/// existing file, or `None` when it does not exist.
pub trait ResourceLocator: Send + Sync {
    fn locate(&self, relative: &str) -> Option<PathBuf>;
}

/// Looks a path up under an ordered list of root directories; the first
/// root containing the file wins.
#[derive(Debug, Clone, Default)]
pub struct DirectoryLocator {
    roots: Vec<PathBuf>,
}

impl DirectoryLocator {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Roots from [`DICT_PATH_ENV`], if set.
    pub fn from_env() -> Self {
        let roots = std::env::var_os(DICT_PATH_ENV)
            .map(|value| std::env::split_paths(&value).collect())
            .unwrap_or_default();
        Self { roots }
    }

    pub fn push_root(&mut self, root: impl Into<PathBuf>) {
        self.roots.push(root.into());
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

impl ResourceLocator for DirectoryLocator {
    fn locate(&self, relative: &str) -> Option<PathBuf> {
        let relative = Path::new(relative.trim_start_matches('/'));
        let found = self
            .roots
            .iter()
            .map(|root| root.join(relative))
            .find(|candidate| candidate.is_file());
        if found.is_none() {
            debug!("{} not found under {} roots", relative.display(), self.roots.len());
        }
        found
    }
}
