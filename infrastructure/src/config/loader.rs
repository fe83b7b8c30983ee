//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_FILES: [&str; 2] = ["scout.toml", ".scout.toml"];
const ENV_PREFIX: &str = "SCOUT_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `SCOUT_*` environment variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./scout.toml` or `./.scout.toml`
    /// 4. Global: `<config_dir>/scout/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path).extract().map_err(Box::new)
    }

    /// The merged provider chain, exposed for `--show-config` and tests
    pub fn figment(config_path: Option<&PathBuf>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns `$XDG_CONFIG_HOME/scout/config.toml` on Linux and the
    /// platform config directory elsewhere.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("scout").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Describe the config file locations being used, one line per source
    pub fn describe_sources(explicit: Option<&Path>) -> Vec<String> {
        let mut lines = vec!["Configuration sources (in priority order):".to_string()];

        lines.push(format!("  [ENV  ] {}* variables", ENV_PREFIX));

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            lines.push(format!("  [{:<5}] Explicit: {}", mark, path.display()));
        }

        match Self::project_config_path() {
            Some(path) => lines.push(format!("  [FOUND] Project: {}", path.display())),
            None => lines.push("  [     ] Project: ./scout.toml or ./.scout.toml".to_string()),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            lines.push(format!("  [{}] Global:  {}", mark, path.display()));
        }

        lines.push("  [     ] Default: built-in defaults".to_string());
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.backend.base_url, "http://localhost:2024");
        assert_eq!(config.ui.copied_feedback_ms, 2000);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("scout"));
    }

    #[test]
    fn test_project_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "scout.toml",
                r#"
[backend]
assistant_id = "deep-research"

[ui]
reveal_delay_ms = 25
"#,
            )?;

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.backend.assistant_id, "deep-research");
            assert_eq!(config.ui.reveal_delay_ms, 25);
            assert_eq!(config.backend.base_url, "http://localhost:2024");
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_overrides_project_file() {
        Jail::expect_with(|jail| {
            jail.create_file(".scout.toml", "[defaults]\neffort = \"low\"\n")?;
            jail.create_file("custom.toml", "[defaults]\neffort = \"high\"\n")?;

            let explicit = PathBuf::from("custom.toml");
            let config = ConfigLoader::load(Some(&explicit)).map_err(|e| *e)?;
            assert_eq!(config.defaults.effort, "high");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_files() {
        Jail::expect_with(|jail| {
            jail.create_file("scout.toml", "[backend]\nbase_url = \"http://file:1\"\n")?;
            jail.set_env("SCOUT_BACKEND__BASE_URL", "http://env:2");
            jail.set_env("SCOUT_UI__TICK_MS", "50");

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.backend.base_url, "http://env:2");
            assert_eq!(config.ui.tick_ms, 50);
            Ok(())
        });
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        Jail::expect_with(|jail| {
            jail.create_file("scout.toml", "[ui]\ntick_ms = \"often\"\n")?;
            assert!(ConfigLoader::load(None).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_describe_sources_mentions_explicit_path() {
        let lines = ConfigLoader::describe_sources(Some(Path::new("/nonexistent/scout.toml")));
        assert!(
            lines
                .iter()
                .any(|l| l.contains("MISSING") && l.contains("/nonexistent/scout.toml"))
        );
    }
}
