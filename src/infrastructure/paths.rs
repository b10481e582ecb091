//! Path handling for the Zellij plugin sandbox.

use std::path::PathBuf;

/// Sandbox mount point of the host directory Zellij was started from.
const HOST_ROOT: &str = "/host";

/// Returns the directory holding Cinedex's trace files.
///
/// `/host/.local/share/zellij/cinedex`, which is
/// `~/.local/share/zellij/cinedex` when Zellij was started from the home
/// directory.
///
/// # Examples
///
/// ```
/// use cinedex::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/cinedex"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT).join(".local/share/zellij").join("cinedex")
}

/// Maps a `~`-prefixed path onto the sandbox `/host` mount.
///
/// Used for the `theme_file` option so users can write `~/themes/x.toml`.
///
/// # Examples
///
/// ```
/// use cinedex::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dusk.toml"), "/host/themes/dusk.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/cinedex.toml"), "/etc/cinedex.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => HOST_ROOT.to_string(),
        Some(rest) if rest.starts_with('/') => format!("{HOST_ROOT}{rest}"),
        _ => path.to_string(),
    }
}
