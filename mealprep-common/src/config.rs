//! Configuration loading and root folder resolution

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Environment variable consulted for the root folder
pub const ROOT_FOLDER_ENV: &str = "MEALPREP_ROOT_FOLDER";

/// Database file name inside the root folder
const DATABASE_FILE: &str = "mealprep.db";

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&str>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        return PathBuf::from(path);
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = find_config_file() {
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

/// Get default configuration file path for the platform
fn find_config_file() -> Result<PathBuf> {
    if cfg!(target_os = "linux") {
        // Try ~/.config/mealprep/config.toml first, then /etc/mealprep/config.toml
        let user_config = dirs::config_dir().map(|d| d.join("mealprep").join("config.toml"));
        let system_config = PathBuf::from("/etc/mealprep/config.toml");

        if let Some(path) = user_config {
            if path.exists() {
                return Ok(path);
            }
        }
        if system_config.exists() {
            return Ok(system_config);
        }
        return Err(Error::Config("No config file found".to_string()));
    }

    let config_path = dirs::config_dir()
        .map(|d| d.join("mealprep").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

    if config_path.exists() {
        Ok(config_path)
    } else {
        Err(Error::Config(format!(
            "Config file not found: {:?}",
            config_path
        )))
    }
}

/// Get OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/mealprep (or /var/lib/mealprep for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("mealprep"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/mealprep"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/mealprep
        dirs::data_dir()
            .map(|d| d.join("mealprep"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/mealprep"))
    } else if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\mealprep
        dirs::data_local_dir()
            .map(|d| d.join("mealprep"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\mealprep"))
    } else {
        PathBuf::from("./mealprep_data")
    }
}

/// Create the root folder (and parents) if missing
pub fn ensure_root_folder(root: &Path) -> Result<()> {
    std::fs::create_dir_all(root)?;
    Ok(())
}

/// Path of the SQLite database inside the root folder
pub fn database_path(root: &Path) -> PathBuf {
    root.join(DATABASE_FILE)
}
