//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Prefix for environment overrides (`HUNGER_GAMES_BACKEND__BASE_URL=...`)
pub const ENV_PREFIX: &str = "HUNGER_GAMES_";

/// `HUNGER_GAMES_API_URL`: shorthand for `backend.base_url`
const API_URL_KEY: &str = "api_url";

const PROJECT_FILES: [&str; 2] = ["hunger-games.toml", ".hunger-games.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Later sources win:
    /// 1. Default values
    /// 2. XDG config: `$XDG_CONFIG_HOME/hunger-games/config.toml`
    /// 3. Project root: `./hunger-games.toml` or `./.hunger-games.toml`
    /// 4. Explicit config path (if provided)
    /// 5. `HUNGER_GAMES_*` environment variables
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut files = Vec::new();

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            files.push(global_path);
        }
        if let Some(project_path) = Self::project_config_path() {
            files.push(project_path);
        }
        if let Some(path) = config_path {
            files.push(path.clone());
        }

        Self::layered(&files, ENV_PREFIX)
            .extract()
            .map_err(Box::new)
    }

    /// Defaults plus environment, no files (for --no-config)
    pub fn load_without_files() -> Result<FileConfig, Box<figment::Error>> {
        Self::layered(&[], ENV_PREFIX)
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Defaults, then each file in order, then the environment
    fn layered(files: &[PathBuf], env_prefix: &str) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for path in files {
            figment = figment.merge(Toml::file(path));
        }

        figment
            .merge(
                Env::prefixed(env_prefix)
                    .ignore(&[API_URL_KEY])
                    .split("__"),
            )
            .merge(
                Env::prefixed(env_prefix)
                    .only(&[API_URL_KEY])
                    .map(|_| "backend.base_url".into()),
            )
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/hunger-games/config.toml if set,
    /// otherwise the platform config directory equivalent.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("hunger-games").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&Path>) {
        println!("Configuration sources (in priority order):");

        let overrides: Vec<String> = std::env::vars()
            .map(|(key, _)| key)
            .filter(|key| key.starts_with(ENV_PREFIX))
            .collect();
        if overrides.is_empty() {
            println!("  [     ] Env:     {}*", ENV_PREFIX);
        } else {
            println!("  [FOUND] Env:     {}", overrides.join(", "));
        }

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<5}] Config:  {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./hunger-games.toml or ./.hunger-games.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hunger_domain::ResponsePolicy;
    use std::io::Write;

    fn write_toml(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("hunger-games"));
    }

    #[test]
    fn test_later_files_override_earlier() {
        let dir = tempfile::tempdir().unwrap();
        let global = write_toml(
            &dir,
            "global.toml",
            "[backend]\nbase_url = \"http://global:1\"\ntimeout_secs = 10\n\n[game]\npolicy = \"lenient\"\n",
        );
        let project = write_toml(
            &dir,
            "project.toml",
            "[backend]\nbase_url = \"http://project:2\"\n",
        );

        let config: FileConfig = ConfigLoader::layered(&[global, project], "HG_TEST_FILES_")
            .extract()
            .unwrap();

        assert_eq!(config.backend.base_url, "http://project:2");
        assert_eq!(config.backend.timeout_secs, 10);
        assert_eq!(config.game.parse_policy().0, ResponsePolicy::Lenient);
        assert_eq!(config.pacing.vote_reveal_ms, 1500);
    }

    #[test]
    fn test_env_overrides_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_toml(
            &dir,
            "config.toml",
            "[backend]\nbase_url = \"http://file:1\"\n\n[pacing]\ncountdown_secs = 5\n",
        );

        // Unique prefix so parallel tests never see these variables
        unsafe {
            std::env::set_var("HG_TEST_ENV_PACING__COUNTDOWN_SECS", "50");
            std::env::set_var("HG_TEST_ENV_OUTPUT__COLOR", "false");
        }

        let config: FileConfig = ConfigLoader::layered(&[file], "HG_TEST_ENV_")
            .extract()
            .unwrap();

        assert_eq!(config.backend.base_url, "http://file:1");
        assert_eq!(config.pacing.countdown_secs, 50);
        assert!(!config.output.color);
    }

    #[test]
    fn test_api_url_shorthand() {
        unsafe {
            std::env::set_var("HG_TEST_URL_API_URL", "https://arena.example.com");
        }

        let config: FileConfig = ConfigLoader::layered(&[], "HG_TEST_URL_")
            .extract()
            .unwrap();

        assert_eq!(config.backend.base_url, "https://arena.example.com");
    }

    #[test]
    fn test_invalid_toml_type_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_toml(&dir, "bad.toml", "[backend]\ntimeout_secs = \"soon\"\n");

        let result: Result<FileConfig, _> =
            ConfigLoader::layered(&[file], "HG_TEST_BAD_").extract();
        assert!(result.is_err());
    }
}
