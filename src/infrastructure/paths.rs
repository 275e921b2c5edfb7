//! Path helpers for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is mounted under `/host`, which Zellij points
//! at the cwd of the last focused terminal (usually the user's home).

use std::path::PathBuf;

/// Sandbox path of the host's home directory.
const HOST_ROOT: &str = "/host";

/// Returns the directory holding the span journal.
///
/// Resolves to `~/.local/share/zellij/reelfinder` on the host when Zellij was started
/// from the home directory.
///
/// ```
/// use reelfinder::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/reelfinder"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT)
        .join(".local/share/zellij")
        .join("reelfinder")
}

/// Maps `~` and `~/...` to their sandbox location. Other paths pass through unchanged.
///
/// Used for the `theme_file` option.
///
/// ```
/// use reelfinder::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dusk.toml"), "/host/themes/dusk.toml");
/// assert_eq!(expand_tilde("/etc/dusk.toml"), "/etc/dusk.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => HOST_ROOT.to_string(),
        Some(rest) if rest.starts_with('/') => format!("{HOST_ROOT}{rest}"),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_forms() {
        assert_eq!(expand_tilde("~"), "/host");
        assert_eq!(expand_tilde("~/a"), "/host/a");
        assert_eq!(expand_tilde("~user/a"), "~user/a");
        assert_eq!(expand_tilde("relative/a"), "relative/a");
    }
}
