//! Configuration loading and root folder resolution

use crate::{Error, Result};
use std::path::PathBuf;

/// Environment variable naming the service root folder
pub const ROOT_FOLDER_ENV: &str = "IMPSRV_ROOT_FOLDER";

/// Environment variable naming the HTTP listen port
pub const PORT_ENV: &str = "IMPSRV_PORT";

/// Compiled default listen port
pub const DEFAULT_PORT: u16 = 5731;

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
        if !path.is_empty() {
            return PathBuf::from(path);
        }
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

/// Resolve the HTTP listen port from the environment, falling back to
/// the compiled default
pub fn resolve_port() -> u16 {
    std::env::var(PORT_ENV)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Get configuration file path for the platform
fn find_config_file() -> Result<PathBuf> {
    if cfg!(target_os = "linux") {
        // Try ~/.config/impsrv/config.toml first, then /etc/impsrv/config.toml
        if let Some(path) = dirs::config_dir().map(|d| d.join("impsrv").join("config.toml")) {
            if path.exists() {
                return Ok(path);
            }
        }
        let system_config = PathBuf::from("/etc/impsrv/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
        Err(Error::Config("No config file found".to_string()))
    } else {
        let path = dirs::config_dir()
            .map(|d| d.join("impsrv").join("config.toml"))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;
        if path.exists() {
            Ok(path)
        } else {
            Err(Error::Config(format!("Config file not found: {:?}", path)))
        }
    }
}

/// Get OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        dirs::data_local_dir()
            .map(|d| d.join("impsrv"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/impsrv"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("impsrv"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/impsrv"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("impsrv"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\impsrv"))
    } else {
        PathBuf::from("./impsrv_data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_arg_takes_priority() {
        let resolved = resolve_root_folder(Some("/tmp/explicit-root"));
        assert_eq!(resolved, PathBuf::from("/tmp/explicit-root"));
    }

    #[test]
    fn default_root_folder_is_non_empty() {
        let folder = default_root_folder();
        assert!(!folder.as_os_str().is_empty());
    }

    #[test]
    fn default_port_is_stable() {
        assert_eq!(DEFAULT_PORT, 5731);
    }
}
