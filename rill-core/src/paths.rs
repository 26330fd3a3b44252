use std::path::PathBuf;

/// Expand a leading `~` to the user's home directory.
///
/// `None` when the path needs the home directory and it cannot be determined. Paths without a
/// leading `~` come back unchanged.
pub fn expand_tilde(path: &str) -> Option<PathBuf> {
    match path.strip_prefix('~') {
        Some("") => dirs::home_dir(),
        Some(rest) if rest.starts_with('/') => {
            dirs::home_dir().map(|home| home.join(rest.trim_start_matches('/')))
        }
        _ => Some(PathBuf::from(path)),
    }
}

/// `$var/<app>` when the variable is set and non-empty, otherwise `~/<fallback>/<app>`.
pub fn xdg_dir(var: &str, fallback: &str, app: &str) -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(var)
        && !dir.is_empty()
    {
        return Some(PathBuf::from(dir).join(app));
    }
    dirs::home_dir().map(|home| home.join(fallback).join(app))
}
