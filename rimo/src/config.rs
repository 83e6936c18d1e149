//! Configuration management for the rimo CLI
//!
//! Configuration priority (highest to lowest):
//! 1. Command line arguments
//! 2. Config file specified via --config flag
//! 3. Environment variables (RIMO_*)
//! 4. Local config file (./config.toml)
//! 5. Global config file ($XDG_CONFIG_HOME/rimo/config.toml or ~/.config/rimo/config.toml)

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    /// Classifier variant: "strict" or "permissive"
    pub variant: String,

    /// How far ahead a line looks for rhyme partners
    pub window: usize,

    /// Lines per chunk when scanning whole poem files
    pub chunk_size: usize,

    /// Emit JSON instead of human-readable output
    pub json: bool,

    /// Enable verbose debug output
    pub verbose: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            variant: "strict".to_string(),
            window: 8,
            chunk_size: 20,
            json: false,
            verbose: false,
        }
    }
}

/// Get the XDG config directory ($XDG_CONFIG_HOME or ~/.config)
/// Checks the environment variable first on all platforms
pub fn xdg_config_home() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return PathBuf::from(xdg);
        }
    }
    dirs::home_dir()
        .map(|h| h.join(".config"))
        .unwrap_or_else(|| PathBuf::from(".config"))
}

impl AppConfig {
    /// Get the global config directory path for rimo
    pub fn global_config_dir() -> PathBuf {
        xdg_config_home().join("rimo")
    }

    /// Get the global config file path
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Get the local config file path (current directory)
    pub fn local_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    /// Load configuration with proper priority chain
    ///
    /// Priority (highest to lowest):
    /// 1. Command line arguments (handled separately by clap)
    /// 2. Config file specified via --config flag
    /// 3. Environment variables (RIMO_*)
    /// 4. Local config file (./config.toml)
    /// 5. Global config file ($XDG_CONFIG_HOME/rimo/config.toml)
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // 5. Start with defaults (lowest priority)
        builder = builder.add_source(config::File::from_str(
            include_str!("default_config.toml"),
            config::FileFormat::Toml,
        ));

        // 4. Global config file
        let global_path = Self::global_config_path();
        if global_path.exists() {
            builder = builder.add_source(File::from(global_path).required(false));
        }

        // 3. Local config file (./config.toml)
        let local_path = Self::local_config_path();
        if local_path.exists() {
            builder = builder.add_source(File::from(local_path).required(false));
        }

        // 2. Environment variables (RIMO_*)
        // e.g., RIMO_VARIANT, RIMO_WINDOW, RIMO_CHUNK_SIZE
        builder = builder.add_source(
            Environment::with_prefix("RIMO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // 1. Config file specified via --config flag (highest priority from config sources)
        if let Some(config_path) = config_file {
            let expanded = expand_path(config_path);
            builder = builder.add_source(File::with_name(&expanded).required(true));
        }

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Ensure the global config directory exists and create default config if needed
    pub fn ensure_config_exists() -> std::io::Result<()> {
        let config_dir = Self::global_config_dir();
        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir)?;
        }

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            std::fs::write(&config_path, include_str!("default_config.toml"))?;
            eprintln!("Created default config at: {}", config_path.display());
        }
        Ok(())
    }

    /// Print the current configuration paths (useful for debugging)
    pub fn print_paths() {
        eprintln!("Configuration paths:");
        eprintln!("  Config dir:  {}", Self::global_config_dir().display());
        eprintln!("  Config file: {}", Self::global_config_path().display());
        eprintln!("  Local file:  {}", Self::local_config_path().display());
    }
}

/// Expand shell-like paths (~ and environment variables)
pub fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.variant, "strict");
        assert_eq!(config.window, 8);
        assert_eq!(config.chunk_size, 20);
        assert!(!config.json);
    }

    #[test]
    fn test_expand_path() {
        let expanded = expand_path("~/poems.txt");
        assert!(!expanded.starts_with('~'));
    }
}
