//! Configuration loading and root folder resolution

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Name of the database file inside the root folder
const DATABASE_FILE: &str = "ladle.db";

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. `LADLE_ROOT` environment variable
/// 3. TOML config file (`root_folder` key)
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&str>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var("LADLE_ROOT") {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = locate_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(root_folder) = config.get("root_folder").and_then(|v| v.as_str()) {
                    return PathBuf::from(root_folder);
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Ensure the root folder exists, creating it if needed
pub fn ensure_root_folder(root: &Path) -> Result<()> {
    std::fs::create_dir_all(root)?;
    Ok(())
}

/// Path of the SQLite database inside the root folder
pub fn database_path(root: &Path) -> PathBuf {
    root.join(DATABASE_FILE)
}

/// Get configuration file path for the platform
fn locate_config_file() -> Result<PathBuf> {
    let candidate = if cfg!(target_os = "linux") {
        // Try ~/.config/ladle/config.toml first, then /etc/ladle/config.toml
        let user_config = dirs::config_dir().map(|d| d.join("ladle").join("config.toml"));
        let system_config = PathBuf::from("/etc/ladle/config.toml");

        if let Some(path) = user_config {
            if path.exists() {
                return Ok(path);
            }
        }
        if system_config.exists() {
            return Ok(system_config);
        }
        return Err(Error::Config("No config file found".to_string()));
    } else {
        dirs::config_dir()
            .map(|d| d.join("ladle").join("config.toml"))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?
    };

    if candidate.exists() {
        Ok(candidate)
    } else {
        Err(Error::Config(format!("Config file not found: {:?}", candidate)))
    }
}

/// Get OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        dirs::data_local_dir()
            .map(|d| d.join("ladle"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/ladle"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("ladle"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/ladle"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("ladle"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\ladle"))
    } else {
        PathBuf::from("./ladle_data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_argument_wins() {
        let root = resolve_root_folder(Some("/tmp/ladle-cli-root"));
        assert_eq!(root, PathBuf::from("/tmp/ladle-cli-root"));
    }

    #[test]
    fn test_database_path() {
        let path = database_path(Path::new("/tmp/ladle-root"));
        assert_eq!(path, PathBuf::from("/tmp/ladle-root/ladle.db"));
    }
}
