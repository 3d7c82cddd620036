//! Platform-specific paths for user presets.
//!
//! # Locations
//!
//! - **User presets**: `~/.config/waveshaper/presets/` (Linux),
//!   `~/Library/Application Support/waveshaper/presets/` (macOS),
//!   `%APPDATA%\waveshaper\presets\` (Windows)
//!
//! Setting `WAVESHAPER_PRESET_DIR` replaces the user presets directory.
//!
//! # Example
//!
//! ```rust,no_run
//! use waveshaper_config::paths;
//!
//! for file in paths::list_user_presets() {
//!     println!("{}", file.display());
//! }
//!
//! let crunch = paths::find_preset("my_crunch");
//! assert!(crunch.is_none_or(|p| p.extension().is_some_and(|e| e == "toml")));
//! ```

use std::path::{Path, PathBuf};

use crate::ConfigError;

/// Directory name under the platform config root.
const APP_NAME: &str = "waveshaper";

const PRESET_SUBDIR: &str = "presets";

/// Environment variable that overrides [`user_presets_dir`].
pub const PRESET_DIR_ENV: &str = "WAVESHAPER_PRESET_DIR";

/// Directory holding user presets.
///
/// Uses `$WAVESHAPER_PRESET_DIR` when set and non-empty, otherwise the
/// platform config directory. Falls back to `./waveshaper/presets` if neither
/// can be determined.
pub fn user_presets_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(PRESET_DIR_ENV).filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    user_config_dir().join(PRESET_SUBDIR)
}

/// Per-user config directory for the waveshaper.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_default()
        .join(APP_NAME)
}

/// Resolve `name` to a preset file.
///
/// An existing file path wins; otherwise `name` (with or without `.toml`)
/// is looked up in [`user_presets_dir`].
pub fn find_preset(name: &str) -> Option<PathBuf> {
    find_preset_in(name, &user_presets_dir())
}

/// [`find_preset`] against an explicit directory.
pub fn find_preset_in(name: &str, dir: &Path) -> Option<PathBuf> {
    let direct = Path::new(name);
    if direct.is_file() {
        return Some(direct.to_path_buf());
    }
    let stem = name.strip_suffix(".toml").unwrap_or(name);
    let candidate = dir.join(format!("{stem}.toml"));
    candidate.is_file().then_some(candidate)
}

/// Create [`user_presets_dir`] if missing and return it.
pub fn ensure_user_presets_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_presets_dir();
    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    Ok(dir)
}

/// Preset files in [`user_presets_dir`], sorted. Empty when unreadable.
pub fn list_user_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&user_presets_dir())
}

/// List `.toml` files in `dir`, sorted by path.
pub fn list_presets_in_dir(dir: &Path) -> Vec<PathBuf> {
    let mut presets: Vec<PathBuf> = std::fs::read_dir(dir)
        .into_iter()
        .flatten()
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml") && path.is_file())
        .collect();
    presets.sort();
    presets
}

/// Get the preset name from a file path (the file stem).
///
/// ```rust
/// use waveshaper_config::paths::preset_name_from_path;
/// use std::path::Path;
///
/// let name = preset_name_from_path(Path::new("/path/to/warm_sine.toml"));
/// assert_eq!(name, Some("warm_sine".to_string()));
/// ```
pub fn preset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(ToString::to_string)
}

/// Turn a display name into a file name stem: `"Warm Sine"` -> `"warm_sine"`.
pub fn preset_file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "untitled".to_string()
    } else {
        stem
    }
}
