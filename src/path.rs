// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Path resolution utilities.
//!
//! Determine where the playground keeps its configuration file and its
//! progress file when the user does not say otherwise.

use std::path::PathBuf;

/// Determine default absolute path to configuration file.
///
/// Uses XDG Base Directory path `$XDG_CONFIG_HOME/gitplay/config.toml`. Does
/// not check if the path returned actually exists.
///
/// # Errors
///
/// - Return [`NoWayHome`] if home directory path cannot be determined.
///
/// # See Also
///
/// - [XDG Base Directory](https://wiki.archlinux.org/title/XDG_Base_Directory)
pub fn default_config_file() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|path| path.join("gitplay").join("config.toml"))
        .ok_or(NoWayHome)
}

/// Determine default absolute path to progress file.
///
/// Uses `$XDG_DATA_HOME/gitplay/progress.toml`.
///
/// # Errors
///
/// - Return [`NoWayHome`] if home directory path cannot be determined.
pub fn default_progress_file() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|path| path.join("gitplay").join("progress.toml"))
        .ok_or(NoWayHome)
}

/// No way to determine user's home directory.
///
/// # See Also
///
/// - [`dirs::home_dir`](https://docs.rs/dirs/latest/dirs/fn.home_dir.html)
#[derive(Clone, Debug, thiserror::Error)]
#[error("cannot determine absolute path to user's home directory")]
pub struct NoWayHome;

/// Friendly result alias :3
pub type Result<T, E = NoWayHome> = std::result::Result<T, E>;

#[cfg(all(test, target_os = "linux"))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sealed_test::prelude::*;

    #[sealed_test(env = [
        ("XDG_CONFIG_HOME", "/home/blah/.config"),
        ("XDG_DATA_HOME", "/home/blah/.local/share"),
    ])]
    fn default_paths_follow_xdg() -> anyhow::Result<()> {
        assert_eq!(
            default_config_file()?,
            PathBuf::from("/home/blah/.config/gitplay/config.toml")
        );
        assert_eq!(
            default_progress_file()?,
            PathBuf::from("/home/blah/.local/share/gitplay/progress.toml")
        );
        Ok(())
    }
}
