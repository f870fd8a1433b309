// fsaspell-cli: shared utilities for the command-line tools.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use env_logger::Builder;
use fsaspell::locator::DICT_PATH_ENV;
use fsaspell::{DictionaryConfig, DirectoryLocator};
use log::LevelFilter;

/// Initialize logging on stderr. `verbose` counts `-v` flags; `quiet`
/// limits output to errors.
pub fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    };
    Builder::new()
        .filter_level(level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

/// Build the list of directories to search for dictionary resources.
///
/// Search order:
/// 1. `dict_path` arguments, in the order given
/// 2. `FSASPELL_DICT_PATH` environment variable
/// 3. `~/.fsaspell`
/// 4. System paths
/// 5. Current working directory
pub fn build_search_paths(dict_paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = dict_paths.to_vec();

    if let Some(env_path) = std::env::var_os(DICT_PATH_ENV) {
        paths.extend(std::env::split_paths(&env_path));
    }

    if let Some(home) = std::env::var_os("HOME") {
        paths.push(PathBuf::from(home).join(".fsaspell"));
    }

    paths.push(PathBuf::from("/usr/local/share/fsaspell"));
    paths.push(PathBuf::from("/usr/share/fsaspell"));

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd);
    }

    paths
}

/// Locator over [`build_search_paths`].
pub fn locator(dict_paths: &[PathBuf]) -> DirectoryLocator {
    DirectoryLocator::new(build_search_paths(dict_paths))
}

/// Read a speller configuration from a JSON file.
pub fn load_config(path: &Path) -> anyhow::Result<DictionaryConfig> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid configuration in {}", path.display()))
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}
