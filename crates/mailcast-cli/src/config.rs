//! Account configuration resolution.
//!
//! The account identity and secret come from two sources with a fixed
//! precedence: explicit command-line overrides win; otherwise values
//! are read from a TOML file with a single `[account]` section:
//!
//! ```toml
//! [account]
//! jid = "bot@example.org"
//! password = "botpassword"
//! ```
//!
//! A missing file logs a warning and resolution falls through to the
//! overrides. Missing jid or password after resolution is fatal.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

/// Default configuration file location.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/mailcast/mailcast.toml";

/// Errors raised while resolving the account configuration. All fatal
/// at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file exists but could not be read.
    #[error("cannot read configuration file {path}: {source}")]
    Read {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid TOML for the expected shape.
    #[error("cannot parse configuration file {path}: {source}")]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// No account jid after applying overrides and the file.
    #[error("no account jid configured (use --jid or the configuration file)")]
    MissingJid,

    /// No account password after applying overrides and the file.
    #[error("no account password configured (use --password or the configuration file)")]
    MissingPassword,
}

/// Fully resolved account credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountConfig {
    /// Account identity (jid).
    pub jid: String,

    /// Account secret.
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    account: Option<AccountSection>,
}

#[derive(Debug, Default, Deserialize)]
struct AccountSection {
    jid: Option<String>,
    password: Option<String>,
}

/// Resolve the account configuration.
///
/// Command-line overrides beat file values; file values fill whatever
/// the overrides leave open.
///
/// # Errors
///
/// [`ConfigError::MissingJid`] / [`ConfigError::MissingPassword`] when
/// a credential is absent from both sources; `Read`/`Parse` for a file
/// that exists but cannot be used.
pub fn resolve(
    path: &Path,
    jid_override: Option<String>,
    password_override: Option<String>,
) -> Result<AccountConfig, ConfigError> {
    let account = load_file(path)?.account.unwrap_or_default();

    let jid = jid_override.or(account.jid).ok_or(ConfigError::MissingJid)?;
    let password = password_override.or(account.password).ok_or(ConfigError::MissingPassword)?;

    Ok(AccountConfig { jid, password })
}

fn load_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    if !path.is_file() {
        tracing::warn!(path = %path.display(), "configuration file does not exist");
        return Ok(ConfigFile::default());
    }

    let contents = fs::read_to_string(path)
        .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;

    toml::from_str(&contents)
        .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
}
