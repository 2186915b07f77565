//! Configuration loading and root folder resolution

use crate::{Error, Result};
use std::path::PathBuf;

/// Name of the SQLite database file inside the root folder
pub const DATABASE_FILE: &str = "utareq.db";

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&str>, env_var_name: &str) -> Result<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Ok(PathBuf::from(path));
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = locate_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(root_folder) = config.get("root_folder").and_then(|v| v.as_str()) {
                    return Ok(PathBuf::from(root_folder));
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    Ok(default_root_folder())
}

/// Ensure the root folder exists, creating it if necessary
pub fn ensure_root_folder(root: &PathBuf) -> Result<()> {
    std::fs::create_dir_all(root)?;
    Ok(())
}

/// Path of the database file inside the root folder
pub fn database_path(root: &std::path::Path) -> PathBuf {
    root.join(DATABASE_FILE)
}

/// Get configuration file path for the platform
fn locate_config_file() -> Result<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("utareq").join("config.toml"));

    if let Some(path) = user_config {
        if path.exists() {
            return Ok(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/utareq/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
    }

    Err(Error::Config("No config file found".to_string()))
}

/// Get OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("utareq"))
        .unwrap_or_else(|| PathBuf::from("./utareq_data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_arg_takes_priority() {
        let root = resolve_root_folder(Some("/tmp/custom"), "UTAREQ_TEST_UNSET_VAR").unwrap();
        assert_eq!(root, PathBuf::from("/tmp/custom"));
    }

    #[test]
    fn env_var_used_when_no_cli_arg() {
        std::env::set_var("UTAREQ_TEST_ROOT_VAR", "/tmp/from-env");
        let root = resolve_root_folder(None, "UTAREQ_TEST_ROOT_VAR").unwrap();
        assert_eq!(root, PathBuf::from("/tmp/from-env"));
        std::env::remove_var("UTAREQ_TEST_ROOT_VAR");
    }

    #[test]
    fn database_path_joins_filename() {
        let path = database_path(std::path::Path::new("/data/utareq"));
        assert_eq!(path, PathBuf::from("/data/utareq/utareq.db"));
    }
}
